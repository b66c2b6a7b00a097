//! Partition tree nodes
//!
//! The BSP tree lives in a flat, append-only list. Nodes refer to each other
//! by [`AreaId`] so parent and child links never form ownership cycles, and
//! an id stays valid for the lifetime of the tree.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use core::ops::{Index, IndexMut};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::grid::Rect;
use crate::rng::GameRng;

/// Index of an area in its [`AreaTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AreaId(pub usize);

bitflags! {
    /// Area role and status flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct AreaFlags: u8 {
        /// Corridor band created by a split
        const STREET = 0x01;
        /// Room has at least one door onto a street
        const CONNECTED = 0x02;
        /// Lies on the route between the two stairs
        const CRITICAL_PATH = 0x04;
    }
}

// Manual serde impl for AreaFlags
impl Serialize for AreaFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AreaFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(AreaFlags::from_bits_truncate(bits))
    }
}

/// A node of the partition tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Region covered by this node
    pub rect: Rect,
    /// Split depth (root is 0)
    pub level: u32,
    /// For rooms: produced by a left/right cut. For streets: runs along x.
    pub horizontal: bool,
    pub parent: Option<AreaId>,
    pub child1: Option<AreaId>,
    pub child2: Option<AreaId>,
    pub flags: AreaFlags,
}

impl Area {
    /// The root node covering a whole map
    pub const fn root(width: i32, height: i32) -> Self {
        Self {
            rect: Rect::new(0, 0, width, height),
            level: 0,
            horizontal: false,
            parent: None,
            child1: None,
            child2: None,
            flags: AreaFlags::empty(),
        }
    }

    pub const fn is_leaf(&self) -> bool {
        self.child1.is_none() && self.child2.is_none()
    }

    pub const fn is_street(&self) -> bool {
        self.flags.contains(AreaFlags::STREET)
    }

    pub const fn is_connected(&self) -> bool {
        self.flags.contains(AreaFlags::CONNECTED)
    }

    pub const fn is_on_critical_path(&self) -> bool {
        self.flags.contains(AreaFlags::CRITICAL_PATH)
    }

    /// Check if any floor is left inside the walls
    ///
    /// A street band can squeeze a block down to its walls or to nothing.
    pub const fn has_floor(&self) -> bool {
        !self.rect.inset(1).is_empty()
    }

    /// Unit step along a street's length
    pub const fn along(&self) -> (i32, i32) {
        if self.horizontal { (1, 0) } else { (0, 1) }
    }

    /// Unit step across a street's width
    pub const fn across(&self) -> (i32, i32) {
        if self.horizontal { (0, 1) } else { (1, 0) }
    }

    /// Fresh child node of `parent`, covering this node's region
    const fn child(&self, parent: AreaId, horizontal: bool) -> Area {
        Area {
            rect: self.rect,
            level: self.level + 1,
            horizontal,
            parent: Some(parent),
            child1: None,
            child2: None,
            flags: AreaFlags::empty(),
        }
    }

    /// Cut into left and right halves, each at least `min_size` wide
    ///
    /// Returns `None` when the node is too narrow; no randomness is consumed then.
    pub(crate) fn split_horizontal(
        &self,
        rng: &mut GameRng,
        id: AreaId,
        min_size: i32,
    ) -> Option<(Area, Area)> {
        let cut = rng.range_inclusive(min_size, self.rect.w - min_size)?;
        let mut left = self.child(id, true);
        let mut right = left;
        left.rect.w = cut;
        right.rect.x = self.rect.x + cut;
        right.rect.w = self.rect.w - cut;
        Some((left, right))
    }

    /// Cut into top and bottom halves, each at least `min_size` tall
    pub(crate) fn split_vertical(
        &self,
        rng: &mut GameRng,
        id: AreaId,
        min_size: i32,
    ) -> Option<(Area, Area)> {
        let cut = rng.range_inclusive(min_size, self.rect.h - min_size)?;
        let mut top = self.child(id, false);
        let mut bottom = top;
        top.rect.h = cut;
        bottom.rect.y = self.rect.y + cut;
        bottom.rect.h = self.rect.h - cut;
        Some((top, bottom))
    }
}

/// Append-only arena holding the partition tree; index 0 is the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaTree {
    areas: Vec<Area>,
}

impl AreaTree {
    /// Create a tree holding only a root over a `width × height` map
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            areas: vec![Area::root(width, height)],
        }
    }

    pub const ROOT: AreaId = AreaId(0);

    pub fn root(&self) -> &Area {
        &self.areas[0]
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn get(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(id.0)
    }

    /// All nodes with their ids, in append order
    pub fn iter(&self) -> impl Iterator<Item = (AreaId, &Area)> + '_ {
        self.areas.iter().enumerate().map(|(i, a)| (AreaId(i), a))
    }

    /// Leaf rooms (leaves that are not streets)
    pub fn rooms(&self) -> impl Iterator<Item = (AreaId, &Area)> + '_ {
        self.iter().filter(|(_, a)| a.is_leaf() && !a.is_street())
    }

    pub fn streets(&self) -> impl Iterator<Item = (AreaId, &Area)> + '_ {
        self.iter().filter(|(_, a)| a.is_street())
    }

    /// First node in append order whose region contains the point
    pub fn area_at(&self, x: i32, y: i32) -> Option<AreaId> {
        self.iter()
            .find(|(_, a)| a.rect.contains(x, y))
            .map(|(id, _)| id)
    }

    /// The node itself followed by each ancestor up to the root
    pub fn lineage(&self, id: AreaId) -> impl Iterator<Item = AreaId> + '_ {
        core::iter::successors(Some(id), move |cur| self.areas[cur.0].parent)
    }

    /// Append two children under `parent`
    pub(crate) fn attach(&mut self, parent: AreaId, first: Area, second: Area) {
        let child1 = AreaId(self.areas.len());
        self.areas.push(first);
        let child2 = AreaId(self.areas.len());
        self.areas.push(second);
        let node = &mut self.areas[parent.0];
        node.child1 = Some(child1);
        node.child2 = Some(child2);
    }
}

impl Index<AreaId> for AreaTree {
    type Output = Area;

    fn index(&self, id: AreaId) -> &Area {
        &self.areas[id.0]
    }
}

impl IndexMut<AreaId> for AreaTree {
    fn index_mut(&mut self, id: AreaId) -> &mut Area {
        &mut self.areas[id.0]
    }
}

//! Painting the partition tree onto the map

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::adjacency::AdjacencyMatrix;
use super::area::{Area, AreaFlags, AreaId, AreaTree};
use crate::grid::{Layer, Map, Rect, Tile};

/// A one-cell opening from a room onto a street
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub room: AreaId,
    pub street: AreaId,
    pub x: i32,
    pub y: i32,
}

/// Floor and walls for every block and room
///
/// Blocks that were split again are painted too; their children's walls
/// land on top, since children always come later in the list.
pub(crate) fn carve_rooms(tree: &AreaTree, map: &mut Map) {
    let (ground, structures) = map.ground_and_structures();
    for (_, area) in tree.iter().filter(|(_, a)| !a.is_street()) {
        ground.rectangle(area.rect.inset(1), Tile::Room, true);
        structures.rectangle(area.rect, Tile::Wall2, false);
    }
}

/// Where a room's wall meets a street, if it does
///
/// Side contact is checked first; the opening sits in the middle of the
/// shared span, on the room's own wall.
fn door_position(room: &Rect, street: &Rect) -> Option<(i32, i32)> {
    if room.is_empty() {
        None
    } else if room.right() == street.x || street.right() == room.x {
        let start = room.y.max(street.y);
        let end = room.bottom().min(street.bottom());
        if end <= start {
            return None;
        }
        let x = if room.right() == street.x {
            room.right() - 1
        } else {
            room.x
        };
        Some((x, start + (end - start) / 2))
    } else if room.bottom() == street.y || street.bottom() == room.y {
        let start = room.x.max(street.x);
        let end = room.right().min(street.right());
        if end <= start {
            return None;
        }
        let y = if room.bottom() == street.y {
            room.bottom() - 1
        } else {
            room.y
        };
        Some((start + (end - start) / 2, y))
    } else {
        None
    }
}

/// Open a door wherever a leaf room touches a street
pub(crate) fn open_doors(
    tree: &mut AreaTree,
    adjacency: &mut AdjacencyMatrix,
    map: &mut Map,
) -> Vec<Door> {
    let streets: Vec<(AreaId, Rect)> = tree.streets().map(|(id, s)| (id, s.rect)).collect();
    let rooms: Vec<(AreaId, Rect)> = tree.rooms().map(|(id, r)| (id, r.rect)).collect();
    let (ground, structures) = map.ground_and_structures();

    let mut doors = Vec::new();
    for (room, room_rect) in rooms {
        for &(street, street_rect) in &streets {
            let Some((x, y)) = door_position(&room_rect, &street_rect) else {
                continue;
            };
            structures.set(x, y, Tile::Nothing);
            ground.set(x, y, Tile::Room2);
            tree[room].flags |= AreaFlags::CONNECTED;
            adjacency.connect(room, street);
            trace!(room = room.0, street = street.0, x, y, "opened door");
            doors.push(Door { room, street, x, y });
        }
    }
    doors
}

/// Lay street floors and close or open both ends of each street
///
/// Runs after stairs are placed; streets clear whatever walls the
/// enclosing blocks drew over them.
pub(crate) fn carve_streets(tree: &AreaTree, map: &mut Map, level_diff_block: u32) {
    let (ground, structures) = map.ground_and_structures();
    for (_, street) in tree.streets().filter(|(_, s)| !s.rect.is_empty()) {
        ground.rectangle(street.rect, Tile::Room2, true);
        structures.rectangle(street.rect, Tile::Nothing, true);

        let (ax, ay) = street.across();
        let (lx, ly) = street.along();
        let first = (street.rect.x, street.rect.y);
        let last = (street.rect.right() - 1, street.rect.bottom() - 1);
        let cap = EndCap {
            tree,
            street,
            level_diff_block,
        };
        cap.apply(ground, structures, first, (ax, ay), (lx, ly));
        cap.apply(ground, structures, last, (-ax, -ay), (-lx, -ly));
    }
}

struct EndCap<'a> {
    tree: &'a AreaTree,
    street: &'a Area,
    level_diff_block: u32,
}

impl EndCap<'_> {
    /// Ground and structure tiles for the end of the street at `end`,
    /// judged by the cell just beyond it
    fn tiles_for(&self, ground: &Layer, end: (i32, i32), along: (i32, i32)) -> (Tile, Tile) {
        let (ox, oy) = (end.0 - along.0, end.1 - along.1);
        if !ground.in_bounds(ox, oy) {
            return (Tile::Nothing, Tile::Wall2);
        }
        match self.tree.area_at(ox, oy) {
            Some(id) if self.tree[id].level.abs_diff(self.street.level) > self.level_diff_block => {
                (Tile::Nothing, Tile::Wall2)
            }
            Some(_) => (Tile::Room2, Tile::Nothing),
            None => (Tile::Floor, Tile::Nothing),
        }
    }

    fn apply(
        &self,
        ground: &mut Layer,
        structures: &mut Layer,
        end: (i32, i32),
        across: (i32, i32),
        along: (i32, i32),
    ) {
        let (floor, wall) = self.tiles_for(ground, end, along);
        let width = if self.street.horizontal {
            self.street.rect.h
        } else {
            self.street.rect.w
        };
        for k in 0..width {
            let (x, y) = (end.0 + across.0 * k, end.1 + across.1 * k);
            ground.set(x, y, floor);
            structures.set(x, y, wall);
        }
        trace!(x = end.0, y = end.1, ?floor, ?wall, "capped street end");
    }
}

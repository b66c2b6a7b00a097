//! Stair placement along the longest route through the tree

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::adjacency::AdjacencyMatrix;
use super::area::{AreaFlags, AreaId, AreaTree};
use crate::grid::{LayerKind, Map, Tile};

/// Where a staircase was put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stair {
    /// Leaf room holding the stair
    pub room: AreaId,
    pub x: i32,
    pub y: i32,
}

/// Deepest leaf with floor space in the subtree under `start`
///
/// Walks depth-first with an explicit stack; among leaves of equal depth the
/// first one popped wins. Leaves squeezed down to their walls are passed
/// over. A subtree made only of level-0 leaves has no answer.
pub fn deepest_leaf(tree: &AreaTree, start: AreaId) -> Option<AreaId> {
    let mut stack = vec![start];
    let mut deepest = None;
    let mut max_level = 0;
    while let Some(id) = stack.pop() {
        let area = &tree[id];
        if area.is_leaf() && area.has_floor() && area.level > max_level {
            max_level = area.level;
            deepest = Some(id);
        }
        stack.extend(area.child1);
        stack.extend(area.child2);
    }
    deepest
}

/// Put the up stair in the deepest room under the root's first child and
/// the down stair in the deepest room under its second, then flag both
/// routes to the root as critical
///
/// Returns `None` when the root was never split or one side has no room
/// with floor space.
pub(crate) fn place_stairs(tree: &mut AreaTree, map: &mut Map) -> Option<(Stair, Stair)> {
    let root = *tree.root();
    let (Some(first), Some(second)) = (root.child1, root.child2) else {
        warn!("root area was never split, level has no stairs");
        return None;
    };
    let (Some(up_room), Some(down_room)) = (deepest_leaf(tree, first), deepest_leaf(tree, second))
    else {
        warn!("no room with floor space on one side of the root, level has no stairs");
        return None;
    };

    let up = put_stair(tree, map, up_room, Tile::StairsUp);
    let down = put_stair(tree, map, down_room, Tile::StairsDown);
    mark_critical_path(tree, up_room);
    mark_critical_path(tree, down_room);
    debug!(up = ?(up.x, up.y), down = ?(down.x, down.y), "placed stairs");
    Some((up, down))
}

fn put_stair(tree: &AreaTree, map: &mut Map, room: AreaId, tile: Tile) -> Stair {
    let (x, y) = tree[room].rect.center();
    map.layer_mut(LayerKind::Structures).set(x, y, tile);
    Stair { room, x, y }
}

/// Flag a node and all of its ancestors, root included
pub fn mark_critical_path(tree: &mut AreaTree, leaf: AreaId) {
    let lineage: Vec<AreaId> = tree.lineage(leaf).collect();
    for id in lineage {
        tree[id].flags |= AreaFlags::CRITICAL_PATH;
    }
}

/// Hop count from the critical path for every street and leaf
///
/// Critical nodes are 1. Other streets and leaves take one more than the
/// first already-measured neighbour, sweeping in index order until nothing
/// changes; a value set during a sweep is visible to later nodes of the same
/// sweep. Blocks that were split again stay `None`, as do unreachable nodes.
pub fn critical_distances(tree: &AreaTree, adjacency: &AdjacencyMatrix) -> Vec<Option<u32>> {
    let mut distance: Vec<Option<u32>> = tree
        .iter()
        .map(|(_, a)| a.is_on_critical_path().then_some(1))
        .collect();

    loop {
        let mut changed = false;
        for (id, area) in tree.iter() {
            if distance[id.0].is_some() || !(area.is_street() || area.is_leaf()) {
                continue;
            }
            if let Some(d) = adjacency.neighbors(id).find_map(|n| distance[n.0]) {
                distance[id.0] = Some(d + 1);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    distance
}

//! Recursive partitioning of the map into rooms and streets

use tracing::{debug, trace};

use super::area::{AreaFlags, AreaId, AreaTree};
use crate::config::GeneratorConfig;
use crate::grid::{Rect, grid_size};
use crate::rng::GameRng;

/// Build the partition tree for a config
///
/// The first pass cuts the map into blocks separated by streets; the second
/// subdivides each block into rooms sharing a wall.
pub fn partition(config: &GeneratorConfig, rng: &mut GameRng) -> AreaTree {
    let (width, height) = grid_size(config.width, config.height);
    let mut tree = AreaTree::new(width, height);
    if tree.root().rect.is_empty() {
        debug!(width = config.width, height = config.height, "empty map, nothing to split");
        return tree;
    }
    reserve_streets(&mut tree, config, rng);
    let streets = tree.streets().count();
    refine_rooms(&mut tree, config.min_room_size, rng);
    debug!(
        nodes = tree.len(),
        streets,
        rooms = tree.rooms().count(),
        "partitioned map"
    );
    tree
}

/// First pass: split breadth-first down to `config.splits` levels, turning
/// every split node into a street band between its two children
fn reserve_streets(tree: &mut AreaTree, config: &GeneratorConfig, rng: &mut GameRng) {
    // Axis phase: depth parity decides the cut direction from here on
    let phase = u32::from(rng.coin());
    let corridor = config.corridor_width.max(0);
    let min_size = config.min_room_size.max(1).saturating_add(corridor / 2);

    let mut i = 0;
    while i < tree.len() {
        let id = AreaId(i);
        i += 1;
        let area = tree[id];
        if area.level >= config.splits {
            break;
        }

        let horizontal = (phase + area.level) % 2 == 1;
        let split = if horizontal {
            area.split_horizontal(rng, id, min_size)
        } else {
            area.split_vertical(rng, id, min_size)
        };
        let Some((mut first, mut second)) = split else {
            trace!(id = id.0, rect = ?area.rect, "block too small to split");
            continue;
        };

        // Take the band out of both children, one cell at a time, alternating
        for unit in 0..corridor {
            match (horizontal, unit % 2 == 0) {
                (true, true) => first.rect.w -= 1,
                (true, false) => {
                    second.rect.x += 1;
                    second.rect.w -= 1;
                }
                (false, true) => first.rect.h -= 1,
                (false, false) => {
                    second.rect.y += 1;
                    second.rect.h -= 1;
                }
            }
        }

        let node = &mut tree[id];
        node.rect = if horizontal {
            Rect::new(first.rect.right(), first.rect.y, corridor, first.rect.h)
        } else {
            Rect::new(first.rect.x, first.rect.bottom(), first.rect.w, corridor)
        };
        node.flags |= AreaFlags::STREET;
        // A left/right cut leaves a street running top to bottom
        node.horizontal = !horizontal;
        trace!(id = id.0, rect = ?node.rect, level = node.level, "reserved street");

        tree.attach(id, first, second);
    }
}

/// Second pass: split every block once more along its longer side, without
/// a street, until no block can take another room
fn refine_rooms(tree: &mut AreaTree, min_room_size: i32, rng: &mut GameRng) {
    // The first room grows one cell over the cut, so anything under two
    // would never shrink
    let min_size = min_room_size.max(2);

    let mut i = 0;
    while i < tree.len() {
        let id = AreaId(i);
        i += 1;
        let area = tree[id];
        if area.is_street() || !area.is_leaf() {
            continue;
        }

        let split = if area.rect.w > area.rect.h {
            area.split_horizontal(rng, id, min_size)
        } else {
            area.split_vertical(rng, id, min_size)
        };
        if let Some((mut first, second)) = split {
            // Both rooms draw the shared wall
            if first.horizontal {
                first.rect.w += 1;
            } else {
                first.rect.h += 1;
            }
            trace!(id = id.0, first = ?first.rect, second = ?second.rect, "split room");
            tree.attach(id, first, second);
        }
    }
}

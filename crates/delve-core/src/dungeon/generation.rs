//! Level generation
//!
//! Builds a level in a fixed order: partition, rooms, doors, stairs, then
//! streets with their end caps. Streets go last so they clear the walls that
//! enclosing blocks drew over them.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::debug;

use super::adjacency::AdjacencyMatrix;
use super::area::AreaTree;
use super::carve::{Door, carve_rooms, carve_streets, open_doors};
use super::critical_path::{Stair, critical_distances, place_stairs};
use super::split::partition;
use crate::SURFACE_DEPTH;
use crate::config::GeneratorConfig;
use crate::grid::{LayerKind, Map, Tile};
use crate::rng::GameRng;

/// Checkpoints reported to a generation observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum GenerationStage {
    RoomsCarved,
    DoorsOpened,
    StairsPlaced,
    StreetsCarved,
}

/// A generated level and the structure it was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub map: Map,
    pub areas: AreaTree,
    pub adjacency: AdjacencyMatrix,
    pub doors: Vec<Door>,
    /// Absent when the map could not be split
    pub stairs_up: Option<Stair>,
    pub stairs_down: Option<Stair>,
    /// Hops from the critical path, indexed like `areas`
    pub critical_distance: Vec<Option<u32>>,
}

impl GeneratedLevel {
    /// Position of the up stair, if any
    pub fn up(&self) -> Option<(i32, i32)> {
        self.stairs_up.map(|s| (s.x, s.y))
    }

    /// Position of the down stair, if any
    pub fn down(&self) -> Option<(i32, i32)> {
        self.stairs_down.map(|s| (s.x, s.y))
    }
}

/// Generate a level
pub fn generate(config: &GeneratorConfig, rng: &mut GameRng) -> GeneratedLevel {
    generate_with_observer(config, rng, |_, _| {})
}

/// Generate a level, handing the map to `observer` after each stage
pub fn generate_with_observer<F>(
    config: &GeneratorConfig,
    rng: &mut GameRng,
    mut observer: F,
) -> GeneratedLevel
where
    F: FnMut(GenerationStage, &Map),
{
    let mut areas = partition(config, rng);
    let mut map = Map::new(config.width, config.height);

    carve_rooms(&areas, &mut map);
    observer(GenerationStage::RoomsCarved, &map);

    let mut adjacency = AdjacencyMatrix::for_tree(&areas);
    let doors = open_doors(&mut areas, &mut adjacency, &mut map);
    debug!(doors = doors.len(), "opened doors");
    observer(GenerationStage::DoorsOpened, &map);

    let stairs = place_stairs(&mut areas, &mut map);
    observer(GenerationStage::StairsPlaced, &map);

    carve_streets(&areas, &mut map, config.corridor_level_diff_block);
    observer(GenerationStage::StreetsCarved, &map);

    let critical_distance = critical_distances(&areas, &adjacency);

    GeneratedLevel {
        map,
        areas,
        adjacency,
        doors,
        stairs_up: stairs.map(|(up, _)| up),
        stairs_down: stairs.map(|(_, down)| down),
        critical_distance,
    }
}

/// Generate the level for a dungeon depth
///
/// The top floor has nothing above it, so its up stair becomes a second way
/// down and `stairs_up` is cleared.
pub fn generate_for_depth(
    depth: i32,
    config: &GeneratorConfig,
    rng: &mut GameRng,
) -> GeneratedLevel {
    let mut level = generate(config, rng);
    if depth == SURFACE_DEPTH {
        let converted =
            level
                .map
                .replace_tiles(LayerKind::Structures, Tile::StairsUp, Tile::StairsDown);
        level.stairs_up = None;
        debug!(depth, converted, "surface level, up stairs lead down");
    }
    level
}

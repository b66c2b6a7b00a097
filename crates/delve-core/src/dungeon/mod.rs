//! BSP interior generator
//!
//! The map is cut into blocks separated by streets, each block is cut into
//! rooms, and rooms get doors wherever they touch a street. Stairs go in the
//! deepest room on each side of the first cut.

mod adjacency;
mod area;
mod carve;
mod critical_path;
mod generation;
mod split;

pub use adjacency::AdjacencyMatrix;
pub use area::{Area, AreaFlags, AreaId, AreaTree};
pub use carve::Door;
pub use critical_path::{Stair, critical_distances, deepest_leaf, mark_critical_path};
pub use generation::{
    GeneratedLevel, GenerationStage, generate, generate_for_depth, generate_with_observer,
};
pub use split::partition;

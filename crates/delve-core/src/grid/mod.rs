//! Tile grid storage
//!
//! Contains the symbolic tile set, rectangles, and the layered map the
//! generator paints into and the rest of the game reads from.

mod layer;
mod map;
mod rect;
mod tile;

pub use layer::Layer;
pub(crate) use layer::grid_size;
pub use map::{LayerKind, Map};
pub use rect::Rect;
pub use tile::Tile;

//! Layered tile map

#[cfg(not(feature = "std"))]
use crate::compat::*;

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{Layer, Tile, grid_size};

/// The layers of a map, in paint order (background first)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[repr(u8)]
pub enum LayerKind {
    /// Floors; always considered present
    Ground = 0,
    /// Walls, stairs
    Structures = 1,
    /// Player, monsters and merchants, written by spawners only
    Entities = 2,
}

impl LayerKind {
    /// Number of layers in a map
    pub const COUNT: usize = 3;

    /// All layers, background first
    pub const ALL: [LayerKind; Self::COUNT] =
        [LayerKind::Ground, LayerKind::Structures, LayerKind::Entities];

    const fn index(self) -> usize {
        self as usize
    }
}

/// A rectangular tile map made of stacked layers
///
/// Every layer exists from construction, so looking one up never allocates
/// and always returns the same storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    width: i32,
    height: i32,
    layers: [Layer; LayerKind::COUNT],
}

impl Map {
    /// Create an empty map
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = grid_size(width, height);
        Self {
            width,
            height,
            layers: core::array::from_fn(|_| Layer::new(width, height)),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a position lies on the map
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get a layer
    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.layers[kind.index()]
    }

    /// Get a layer for writing
    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        &mut self.layers[kind.index()]
    }

    /// Look a layer up by its name ("Ground", "Structures", "Entities")
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        LayerKind::from_str(name).ok().map(|kind| self.layer(kind))
    }

    /// Ground and structure layers borrowed together for painting
    pub(crate) fn ground_and_structures(&mut self) -> (&mut Layer, &mut Layer) {
        let [ground, structures, _] = &mut self.layers;
        (ground, structures)
    }

    /// The tile shown at a position: the top-most non-empty layer wins,
    /// and the ground layer is shown even when empty
    pub fn visible_tile(&self, x: i32, y: i32) -> Tile {
        self.layers
            .iter()
            .rev()
            .map(|layer| layer.get(x, y))
            .find(|tile| !tile.is_empty())
            .unwrap_or(Tile::Nothing)
    }

    /// Check if a creature can stand at a position
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y)
            && self.layer(LayerKind::Ground).get(x, y).is_floor()
            && !self.layer(LayerKind::Structures).get(x, y).is_wall()
    }

    /// Positions of every `tile` on a layer
    pub fn find_tiles(&self, kind: LayerKind, tile: Tile) -> Vec<(i32, i32)> {
        self.layer(kind).positions_of(tile)
    }

    /// Replace every `from` tile on a layer with `to`
    pub fn replace_tiles(&mut self, kind: LayerKind, from: Tile, to: Tile) -> usize {
        self.layer_mut(kind).replace(from, to)
    }

    /// Render the visible tiles as rows of symbols
    pub fn symbol_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.visible_tile(x, y).symbol()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Rect;

    #[test]
    fn test_layer_lookup_is_idempotent() {
        let mut map = Map::new(8, 4);
        map.layer_mut(LayerKind::Ground).set(2, 1, Tile::Room);
        assert_eq!(map.layer(LayerKind::Ground).get(2, 1), Tile::Room);
        assert_eq!(
            map.layer_by_name("Ground").map(|l| l.get(2, 1)),
            Some(Tile::Room)
        );
        assert!(core::ptr::eq(
            map.layer(LayerKind::Ground),
            map.layer(LayerKind::Ground)
        ));
        assert!(map.layer_by_name("Sky").is_none());
    }

    #[test]
    fn test_layers_start_empty() {
        let map = Map::new(5, 5);
        for kind in LayerKind::ALL {
            let layer = map.layer(kind);
            assert_eq!(layer.width(), 5);
            assert_eq!(layer.height(), 5);
            assert!(layer.is_clear(Rect::new(0, 0, 5, 5)));
        }
    }

    #[test]
    fn test_visible_tile_paint_order() {
        let mut map = Map::new(3, 1);
        map.layer_mut(LayerKind::Ground).set(0, 0, Tile::Room);
        map.layer_mut(LayerKind::Ground).set(1, 0, Tile::Room);
        map.layer_mut(LayerKind::Structures).set(1, 0, Tile::StairsUp);
        map.layer_mut(LayerKind::Entities).set(1, 0, Tile::Player);

        assert_eq!(map.visible_tile(0, 0), Tile::Room);
        assert_eq!(map.visible_tile(1, 0), Tile::Player);
        assert_eq!(map.visible_tile(2, 0), Tile::Nothing);
        assert_eq!(map.symbol_rows(), vec![".@ ".to_string()]);
    }

    #[test]
    fn test_is_passable() {
        let mut map = Map::new(3, 1);
        map.layer_mut(LayerKind::Ground).fill(Tile::Room);
        map.layer_mut(LayerKind::Structures).set(1, 0, Tile::Wall2);
        map.layer_mut(LayerKind::Structures).set(2, 0, Tile::StairsDown);
        assert!(map.is_passable(0, 0));
        assert!(!map.is_passable(1, 0));
        assert!(map.is_passable(2, 0));
        assert!(!map.is_passable(3, 0));
    }

    #[test]
    fn test_layer_kind_names() {
        assert_eq!(LayerKind::Structures.to_string(), "Structures");
        assert_eq!(LayerKind::from_str("Entities"), Ok(LayerKind::Entities));
    }
}

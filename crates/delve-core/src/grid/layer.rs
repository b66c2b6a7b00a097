//! A single rectangular plane of tiles

#[cfg(not(feature = "std"))]
use crate::compat::*;
#[cfg(feature = "std")]
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{Rect, Tile};
use crate::PLACEMENT_ATTEMPTS;
use crate::rng::GameRng;

/// Dimensions a grid can hold: negatives become zero, and a grid whose
/// cell count overflows `i32` is empty
pub(crate) fn grid_size(width: i32, height: i32) -> (i32, i32) {
    let (width, height) = (width.max(0), height.max(0));
    match width.checked_mul(height) {
        Some(_) => (width, height),
        None => (0, 0),
    }
}

/// A dense, row-major grid of tiles
///
/// Reads outside the layer return [`Tile::Nothing`]. Writes outside the layer
/// are a caller bug: they are dropped, and debug builds assert on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Layer {
    /// Create a layer filled with [`Tile::Nothing`]
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = grid_size(width, height);
        Self {
            width,
            height,
            tiles: vec![Tile::Nothing; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Raw row-major tiles
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Check if a position lies on the layer
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Get the tile at a position, or [`Tile::Nothing`] off the layer
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Nothing, |i| self.tiles[i])
    }

    /// Set the tile at a position
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        debug_assert!(
            self.in_bounds(x, y),
            "write of {:?} at ({}, {}) outside {}x{} layer",
            tile,
            x,
            y,
            self.width,
            self.height
        );
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Fill the whole layer with a single tile
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Draw a rectangle, either solid or as a one-cell outline
    ///
    /// Parts of the rectangle outside the layer are skipped.
    pub fn rectangle(&mut self, r: Rect, tile: Tile, filled: bool) {
        let x0 = r.x.max(0);
        let x1 = r.right().min(self.width);
        let y0 = r.y.max(0);
        let y1 = r.bottom().min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                if filled || x == r.x || y == r.y || x == r.right() - 1 || y == r.bottom() - 1 {
                    self.set(x, y, tile);
                }
            }
        }
    }

    /// Replace the 4-connected region of equal tiles around a seed cell
    ///
    /// Returns the number of cells changed. Uses an explicit queue so large
    /// open areas cannot exhaust the stack.
    pub fn flood_fill(&mut self, x: i32, y: i32, tile: Tile) -> usize {
        let Some(start) = self.index(x, y) else {
            return 0;
        };
        let flood_tile = self.tiles[start];
        if flood_tile == tile {
            return 0;
        }

        let mut queue = VecDeque::new();
        self.tiles[start] = tile;
        queue.push_back((x, y));
        let mut filled = 1;

        while let Some((cx, cy)) = queue.pop_front() {
            for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
                let (nx, ny) = (cx + dx, cy + dy);
                if let Some(i) = self.index(nx, ny)
                    && self.tiles[i] == flood_tile
                {
                    self.tiles[i] = tile;
                    queue.push_back((nx, ny));
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Check if every cell of a rectangle is empty
    pub fn is_clear(&self, r: Rect) -> bool {
        r.cells().all(|(x, y)| self.get(x, y).is_empty())
    }

    /// Count cells equal to `tile` in the square of `radius` around a cell
    ///
    /// Cells off the layer count as matches.
    pub fn count_tiles(&self, x: i32, y: i32, radius: i32, tile: Tile) -> usize {
        let mut count = 0;
        for yi in y - radius..=y + radius {
            for xi in x - radius..=x + radius {
                if !self.in_bounds(xi, yi) || self.get(xi, yi) == tile {
                    count += 1;
                }
            }
        }
        count
    }

    /// Put `tile` on a random empty cell of `area`
    ///
    /// Gives up after a fixed number of probes and returns the position used.
    pub fn place_in_area_if_empty(
        &mut self,
        rng: &mut GameRng,
        area: Rect,
        tile: Tile,
    ) -> Option<(i32, i32)> {
        if area.is_empty() {
            return None;
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = area.x + rng.rn2(area.w as u32) as i32;
            let y = area.y + rng.rn2(area.h as u32) as i32;
            if self.in_bounds(x, y) && self.get(x, y).is_empty() {
                self.set(x, y, tile);
                return Some((x, y));
            }
        }
        None
    }

    /// Positions of every cell holding `tile`, row by row
    pub fn positions_of(&self, tile: Tile) -> Vec<(i32, i32)> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == tile)
            .map(|(i, _)| (i as i32 % self.width, i as i32 / self.width))
            .collect()
    }

    /// Replace every `from` tile with `to`, returning how many changed
    pub fn replace(&mut self, from: Tile, to: Tile) -> usize {
        let mut changed = 0;
        for t in self.tiles.iter_mut().filter(|t| **t == from) {
            *t = to;
            changed += 1;
        }
        changed
    }
}

//! Axis-aligned integer rectangles

use serde::{Deserialize, Serialize};

/// A rectangle on the map, `w` cells wide and `h` cells tall from `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width in cells
    pub w: i32,
    /// Height in cells
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// One past the rightmost column
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the bottom row
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Check if the rectangle covers no cells
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Number of cells covered
    pub const fn area(&self) -> i32 {
        if self.is_empty() { 0 } else { self.w * self.h }
    }

    /// Center cell (rounded towards the top-left)
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Check if a point is inside this rectangle
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle fully contains another
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if this rectangle shares at least one cell with another
    pub const fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Calculate the intersection of two rectangles
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Rect::new(
            x,
            y,
            self.right().min(other.right()) - x,
            self.bottom().min(other.bottom()) - y,
        ))
    }

    /// Shrink by `n` cells on every side
    pub const fn inset(&self, n: i32) -> Rect {
        Rect::new(self.x + n, self.y + n, self.w - 2 * n, self.h - 2 * n)
    }

    /// Iterate over every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (x0, x1) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

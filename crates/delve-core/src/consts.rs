//! Generator defaults
//!
//! These are the parameters the game uses for every dungeon floor.

/// Map dimensions
pub const DEFAULT_WIDTH: i32 = 150;
pub const DEFAULT_HEIGHT: i32 = 40;

/// Number of corridor-reserving split iterations
pub const DEFAULT_SPLITS: u32 = 3;

/// Minimum room span in cells (walls included)
pub const DEFAULT_MIN_ROOM_SIZE: i32 = 15;

/// Width of the band reserved for a street at each split
pub const DEFAULT_CORRIDOR_WIDTH: i32 = 3;

/// Street ends facing a node more than this many levels away are walled off
pub const CORRIDOR_LEVEL_DIFF_BLOCK: u32 = 1;

/// Random probes made when looking for an empty cell in an area
pub const PLACEMENT_ATTEMPTS: u32 = 100;

/// Depth of the top floor; its up-stair becomes a second down-stair
pub const SURFACE_DEPTH: i32 = 0;

//! delve-core: layered tile grid and BSP interior dungeon generator
//!
//! This crate contains the map data model and level generation with no I/O
//! dependencies. Generation is a pure function of its configuration and the
//! [`GameRng`] handed to it.
//!
//! Supports `no_std` environments by disabling the default `std` feature.
//! JSON configuration loading and entropy seeding are gated behind
//! `cfg(feature = "std")`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Re-exports of alloc types needed when building without std.
/// In std mode, these are provided by the std prelude.
#[cfg(not(feature = "std"))]
pub(crate) mod compat {
    pub use alloc::collections::VecDeque;
    pub use alloc::string::String;
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

pub mod config;
pub mod dungeon;
pub mod grid;

mod consts;
mod rng;

pub use config::{ConfigError, GeneratorConfig};
pub use consts::*;
pub use dungeon::{
    AdjacencyMatrix, Area, AreaFlags, AreaId, AreaTree, Door, GeneratedLevel, GenerationStage,
    Stair, generate, generate_for_depth, generate_with_observer,
};
pub use grid::{Layer, LayerKind, Map, Rect, Tile};
pub use rng::{GameRng, seed_from_str};

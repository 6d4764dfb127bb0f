//! Pure Game of Life logic for lifetrail.
//!
//! This crate holds the simulation kernel with no engine, renderer, or input
//! dependency. Functions take plain grids and return new ones, so every rule
//! is unit-testable on its own.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cell`] | Binary cell state and its tile index |
//! | [`clock`] | Step gating per host tick, operator presets |
//! | [`constants`] | World size, seeding odds, tile indices, durations |
//! | [`error`] | Configuration and out-of-bounds errors |
//! | [`grid`] | Fixed-size grid with hard-edged neighbor counting |
//! | [`overlay`] | Trail history: aging map, snapshot ring, merged aging |
//! | [`rule`] | `Rule` trait, Conway B3/S23, the generation step |
//! | [`seed`] | Random population for resets |

pub mod cell;
pub mod clock;
pub mod constants;
pub mod error;
pub mod grid;
pub mod overlay;
pub mod rule;
pub mod seed;

pub use cell::Cell;
pub use error::{ConfigError, LifeError};
pub use grid::Grid;

//! lifetrail Core - Game of Life simulation engine with trail history
//!
//! Wraps the pure logic in [`lifetrail_logic`] in a single controller that a
//! host loop calls once per frame. The engine decides when a generation is
//! due, commits it, and updates the trail overlay; a renderer reads the
//! committed grids between frames.
//!
//! # Example
//!
//! ```rust
//! use lifetrail_core::prelude::*;
//!
//! let mut engine = SimulationEngine::new(SimConfig::default().with_seed(7)).unwrap();
//!
//! // Host loop at 30 fps
//! for _ in 0..30 {
//!     engine.advance(1.0 / 30.0);
//! }
//! assert!(engine.generation() > 0);
//! ```

pub mod config;
pub mod engine;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::engine::SimulationEngine;
    pub use lifetrail_logic::clock::StepPreset;
    pub use lifetrail_logic::overlay::{LayerView, OverlayKind};
    pub use lifetrail_logic::{Cell, Grid};
}

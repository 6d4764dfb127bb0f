//! Error taxonomy for the logic crate.
//!
//! Every error here is a violated precondition: a bad configuration caught at
//! construction, or an out-of-range cell access that indicates a caller bug.
//! The transition rule, overlay updates, and seeding never fail on
//! well-formed grids.

use thiserror::Error;

/// Configuration validation error. Fatal, raised at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Width or height is zero, or their product overflows.
    #[error("grid dimensions {width}x{height} must be positive with a cell count that fits in usize")]
    InvalidDimensions { width: usize, height: usize },
    /// A history layer does not match the primary grid's shape.
    #[error("layer is {found_width}x{found_height}, expected {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },
    /// Stored cells do not fill the stated dimensions.
    #[error("{width}x{height} grid needs {expected} cells, got {found}")]
    CellCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        found: usize,
    },
    /// Alive probability outside [0, 1].
    #[error("alive probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    /// Aging overlay needs at least one fade step.
    #[error("max age must be at least 1, got {0}")]
    InvalidMaxAge(u8),
    /// Snapshot ring needs at least one history layer.
    #[error("snapshot depth must be at least 2, got {0}")]
    InvalidSnapshotDepth(usize),
    /// Step duration is NaN or infinite.
    #[error("step duration must be finite, got {0}")]
    InvalidStepDuration(f64),
}

/// Errors raised by grid construction and cell access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Cell access outside the grid. Always a programming defect.
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, LifeError>;

//! History overlays: secondary per-cell trail signal for fade effects.
//!
//! An overlay watches each committed transition `(previous, next)` of the
//! primary grid and updates its own layer(s). It never feeds back into the
//! transition rule.
//!
//! | Overlay | Layers | Signal |
//! |---------|--------|--------|
//! | [`AgingMap`] | 1 | generations since the cell was last alive, clamped |
//! | [`SnapshotRing`] | N-1 | full copies of the last N-1 primary grids |
//! | [`MergedAging`] | 1 | alive flag + fade age packed into one tile value |

mod aging;
mod merged;
mod snapshot;

pub use aging::AgingMap;
pub use merged::{advance_cell, step_merged, MergedAging, MergedCell};
pub use snapshot::SnapshotRing;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::constants::tiles;
use crate::error::{ConfigError, Result};
use crate::grid::{ensure_shape, Grid};

/// Observer of primary-grid transitions.
pub trait HistoryOverlay {
    /// Record one committed generation.
    ///
    /// Both grids must have the overlay's dimensions.
    fn observe(&mut self, previous: &Grid<Cell>, next: &Grid<Cell>);

    /// Return every layer to its blank fill.
    fn reset(&mut self);

    /// `(width, height)` of every layer.
    fn dimensions(&self) -> (usize, usize);

    fn layer_count(&self) -> usize;

    /// Read-only view of layer `index`, newest first.
    fn layer(&self, index: usize) -> Option<LayerView<'_>>;
}

/// Borrowed view of one overlay layer.
#[derive(Debug, Clone, Copy)]
pub enum LayerView<'a> {
    /// Aging indices, `0` = alive now.
    Aging(&'a Grid<u8>),
    /// A past primary grid.
    Snapshot(&'a Grid<Cell>),
    /// Merged alive/age cells.
    Merged(&'a Grid<MergedCell>),
}

impl LayerView<'_> {
    /// Tile index a renderer draws at `(row, col)`.
    pub fn tile(&self, row: usize, col: usize) -> Result<u8> {
        match self {
            LayerView::Aging(grid) => grid.get(row, col),
            LayerView::Snapshot(grid) => grid.get(row, col).map(Cell::tile_index),
            LayerView::Merged(grid) => grid.get(row, col).map(MergedCell::pack),
        }
    }

    /// Whole layer as tile indices.
    pub fn to_tiles(&self) -> Grid<u8> {
        match self {
            LayerView::Aging(grid) => (*grid).clone(),
            LayerView::Snapshot(grid) => grid.map(Cell::tile_index),
            LayerView::Merged(grid) => grid.map(MergedCell::pack),
        }
    }
}

/// Which overlay strategy to run, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayKind {
    Aging { max_age: u8 },
    Snapshots { depth: usize },
    Merged { max_age: u8 },
}

impl Default for OverlayKind {
    fn default() -> Self {
        OverlayKind::Aging {
            max_age: tiles::LONG_DEAD,
        }
    }
}

impl OverlayKind {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        match *self {
            OverlayKind::Aging { max_age } if max_age < 1 => Err(ConfigError::InvalidMaxAge(max_age)),
            // Merged cells need room above DEAD to fade
            OverlayKind::Merged { max_age } if max_age < tiles::DEAD => {
                Err(ConfigError::InvalidMaxAge(max_age))
            }
            OverlayKind::Snapshots { depth } if depth < 2 => {
                Err(ConfigError::InvalidSnapshotDepth(depth))
            }
            _ => Ok(()),
        }
    }
}

/// Tagged overlay; one of the three strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Aging(AgingMap),
    Snapshots(SnapshotRing),
    Merged(MergedAging),
}

impl Overlay {
    /// Blank overlay of the given kind and size.
    pub fn new(kind: OverlayKind, width: usize, height: usize) -> Result<Self> {
        Ok(match kind {
            OverlayKind::Aging { max_age } => Overlay::Aging(AgingMap::new(width, height, max_age)?),
            OverlayKind::Snapshots { depth } => {
                Overlay::Snapshots(SnapshotRing::new(width, height, depth)?)
            }
            OverlayKind::Merged { max_age } => {
                Overlay::Merged(MergedAging::new(width, height, max_age)?)
            }
        })
    }

    pub fn kind(&self) -> OverlayKind {
        match self {
            Overlay::Aging(o) => OverlayKind::Aging {
                max_age: o.max_age(),
            },
            Overlay::Snapshots(o) => OverlayKind::Snapshots { depth: o.depth() },
            Overlay::Merged(o) => OverlayKind::Merged {
                max_age: o.max_age(),
            },
        }
    }

    fn inner(&self) -> &dyn HistoryOverlay {
        match self {
            Overlay::Aging(o) => o,
            Overlay::Snapshots(o) => o,
            Overlay::Merged(o) => o,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn HistoryOverlay {
        match self {
            Overlay::Aging(o) => o,
            Overlay::Snapshots(o) => o,
            Overlay::Merged(o) => o,
        }
    }
}

impl HistoryOverlay for Overlay {
    fn observe(&mut self, previous: &Grid<Cell>, next: &Grid<Cell>) {
        self.inner_mut().observe(previous, next);
    }

    fn reset(&mut self) {
        self.inner_mut().reset();
    }

    fn dimensions(&self) -> (usize, usize) {
        self.inner().dimensions()
    }

    fn layer_count(&self) -> usize {
        self.inner().layer_count()
    }

    fn layer(&self, index: usize) -> Option<LayerView<'_>> {
        self.inner().layer(index)
    }
}

/// Fail unless `overlay` matches the shape of `primary`.
pub fn check_overlay<O: HistoryOverlay + ?Sized>(
    primary: &Grid<Cell>,
    overlay: &O,
) -> std::result::Result<(), ConfigError> {
    ensure_shape(primary.dimensions(), overlay.dimensions())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_validation() {
        assert!(OverlayKind::default().validate().is_ok());
        assert_eq!(
            OverlayKind::Aging { max_age: 0 }.validate(),
            Err(ConfigError::InvalidMaxAge(0))
        );
        assert_eq!(
            OverlayKind::Merged { max_age: 0 }.validate(),
            Err(ConfigError::InvalidMaxAge(0))
        );
        assert!(OverlayKind::Merged { max_age: 1 }.validate().is_ok());
        assert_eq!(
            OverlayKind::Snapshots { depth: 1 }.validate(),
            Err(ConfigError::InvalidSnapshotDepth(1))
        );
        assert!(OverlayKind::Snapshots { depth: 2 }.validate().is_ok());
    }

    #[test]
    fn test_kind_round_trips_through_overlay() {
        for kind in [
            OverlayKind::Aging { max_age: 5 },
            OverlayKind::Snapshots { depth: 4 },
            OverlayKind::Merged { max_age: 6 },
        ] {
            let overlay = Overlay::new(kind, 8, 6).unwrap();
            assert_eq!(overlay.kind(), kind);
            assert_eq!(overlay.dimensions(), (8, 6));
        }
    }

    #[test]
    fn test_layer_counts() {
        assert_eq!(Overlay::new(OverlayKind::default(), 4, 4).unwrap().layer_count(), 1);
        let ring = Overlay::new(OverlayKind::Snapshots { depth: 5 }, 4, 4).unwrap();
        assert_eq!(ring.layer_count(), 4);
        assert!(ring.layer(3).is_some());
        assert!(ring.layer(4).is_none());
    }

    #[test]
    fn test_check_overlay_mismatch() {
        let primary = Grid::new(40, 60, Cell::Dead).unwrap();
        let good = Overlay::new(OverlayKind::default(), 40, 60).unwrap();
        let bad = Overlay::new(OverlayKind::default(), 60, 40).unwrap();
        assert!(check_overlay(&primary, &good).is_ok());
        assert!(matches!(
            check_overlay(&primary, &bad),
            Err(ConfigError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_blank_tiles_per_kind() {
        let aging = Overlay::new(OverlayKind::Aging { max_age: 5 }, 3, 3).unwrap();
        assert!(aging.layer(0).unwrap().to_tiles().iter().all(|t| t == 5));

        let ring = Overlay::new(OverlayKind::Snapshots { depth: 3 }, 3, 3).unwrap();
        assert!(ring.layer(1).unwrap().to_tiles().iter().all(|t| t == tiles::DEAD));

        let merged = Overlay::new(OverlayKind::Merged { max_age: 5 }, 3, 3).unwrap();
        assert_eq!(merged.layer(0).unwrap().tile(2, 2), Ok(tiles::DEAD));
    }
}

//! Ring of past primary grids.

use std::collections::VecDeque;

use crate::cell::Cell;
use crate::error::{ConfigError, Result};
use crate::grid::Grid;

use super::{HistoryOverlay, LayerView};

/// The last `depth - 1` primary grids, newest first.
///
/// Layer `i` holds the primary grid as it was `i + 1` generations ago.
/// Layers not yet reached hold blank (all-dead) grids.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRing {
    layers: VecDeque<Grid<Cell>>,
    depth: usize,
    width: usize,
    height: usize,
}

impl SnapshotRing {
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self> {
        if depth < 2 {
            return Err(ConfigError::InvalidSnapshotDepth(depth).into());
        }
        let blank = Grid::new(width, height, Cell::Dead)?;
        Ok(Self {
            layers: std::iter::repeat(blank).take(depth - 1).collect(),
            depth,
            width,
            height,
        })
    }

    /// Total generations tracked, counting the live primary grid.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Grid<Cell>> + '_ {
        self.layers.iter()
    }
}

impl HistoryOverlay for SnapshotRing {
    fn observe(&mut self, previous: &Grid<Cell>, _next: &Grid<Cell>) {
        debug_assert_eq!((previous.width(), previous.height()), (self.width, self.height));
        // Reuse the oldest layer's buffer for the newest snapshot
        if let Some(mut oldest) = self.layers.pop_back() {
            oldest.clone_from(previous);
            self.layers.push_front(oldest);
        }
    }

    fn reset(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.fill(Cell::Dead);
        }
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer(&self, index: usize) -> Option<LayerView<'_>> {
        self.layers.get(index).map(LayerView::Snapshot)
    }
}

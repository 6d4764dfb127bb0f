//! Binary cell state.

use serde::{Deserialize, Serialize};

use crate::constants::tiles;

/// State of one primary-grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn from_alive(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }

    /// Tile index at the rendering boundary.
    pub fn tile_index(self) -> u8 {
        match self {
            Cell::Alive => tiles::ALIVE,
            Cell::Dead => tiles::DEAD,
        }
    }
}

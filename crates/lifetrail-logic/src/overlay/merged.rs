//! Merged life state and fade age.
//!
//! Each cell keeps `alive` and `age` as separate fields. They are only packed
//! into a single tile value (`ALIVE`, `DEAD`, then fading ages up to
//! `max_age`) when a renderer asks for it.
//!
//! [`step_merged`] runs the life rule and the aging update in one pass over
//! a merged grid. Aged cells count as dead for neighbor purposes.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::constants::tiles;
use crate::error::{ConfigError, Result};
use crate::grid::Grid;
use crate::rule::Rule;

use super::{HistoryOverlay, LayerView};

/// Alive flag plus generations since death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergedCell {
    pub alive: bool,
    /// `0` while alive, `DEAD` on the generation the cell died.
    pub age: u8,
}

impl MergedCell {
    pub const ALIVE: MergedCell = MergedCell {
        alive: true,
        age: tiles::ALIVE,
    };

    /// Freshly dead.
    pub const DEAD: MergedCell = MergedCell {
        alive: false,
        age: tiles::DEAD,
    };

    pub fn dead(age: u8) -> Self {
        MergedCell {
            alive: false,
            age: age.max(tiles::DEAD),
        }
    }

    pub fn from_cell(cell: Cell) -> Self {
        if cell.is_alive() {
            MergedCell::ALIVE
        } else {
            MergedCell::DEAD
        }
    }

    /// Binary projection used by the life rule.
    pub fn cell(self) -> Cell {
        Cell::from_alive(self.alive)
    }

    /// Single tile value for rendering.
    pub fn pack(self) -> u8 {
        if self.alive {
            tiles::ALIVE
        } else {
            self.age.max(tiles::DEAD)
        }
    }

    pub fn unpack(value: u8) -> Self {
        if value == tiles::ALIVE {
            MergedCell::ALIVE
        } else {
            MergedCell::dead(value)
        }
    }
}

/// Next merged state of one cell given its next binary state.
///
/// Any dead cell that comes alive becomes `ALIVE` regardless of its age.
pub fn advance_cell(current: MergedCell, next_alive: bool, max_age: u8) -> MergedCell {
    match (current.alive, next_alive) {
        (_, true) => MergedCell::ALIVE,
        (true, false) => MergedCell::DEAD,
        (false, false) => MergedCell::dead(current.age.saturating_add(1).min(max_age)),
    }
}

/// One generation over a merged grid: life rule and aging in a single pass.
pub fn step_merged<R: Rule + ?Sized>(grid: &Grid<MergedCell>, rule: &R, max_age: u8) -> Grid<MergedCell> {
    grid.map_indexed(|row, col, cell| {
        let n = grid.neighbor_alive_count(row, col, |c| c.alive);
        advance_cell(cell, rule.next_alive(cell.alive, n), max_age)
    })
}

/// Overlay holding one merged grid that tracks the primary grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedAging {
    cells: Grid<MergedCell>,
    max_age: u8,
}

impl MergedAging {
    /// Blank overlay: every cell freshly dead.
    pub fn new(width: usize, height: usize, max_age: u8) -> Result<Self> {
        if max_age < tiles::DEAD {
            return Err(ConfigError::InvalidMaxAge(max_age).into());
        }
        Ok(Self {
            cells: Grid::new(width, height, MergedCell::DEAD)?,
            max_age,
        })
    }

    /// Overlay matching `primary`: alive cells alive, the rest freshly dead.
    pub fn from_primary(primary: &Grid<Cell>, max_age: u8) -> Result<Self> {
        if max_age < tiles::DEAD {
            return Err(ConfigError::InvalidMaxAge(max_age).into());
        }
        Ok(Self {
            cells: primary.map(MergedCell::from_cell),
            max_age,
        })
    }

    pub fn cells(&self) -> &Grid<MergedCell> {
        &self.cells
    }

    pub fn max_age(&self) -> u8 {
        self.max_age
    }

    /// Binary projection of the merged grid.
    pub fn primary(&self) -> Grid<Cell> {
        self.cells.map(MergedCell::cell)
    }

    /// Advance one generation on the merged grid alone and return the new
    /// binary projection.
    pub fn advance<R: Rule + ?Sized>(&mut self, rule: &R) -> Grid<Cell> {
        self.cells = step_merged(&self.cells, rule, self.max_age);
        self.primary()
    }
}

impl HistoryOverlay for MergedAging {
    fn observe(&mut self, previous: &Grid<Cell>, next: &Grid<Cell>) {
        debug_assert!(self.cells.same_shape(previous) && self.cells.same_shape(next));
        let max_age = self.max_age;
        let transitions = previous.iter().zip(next.iter());
        for (cell, (before, after)) in self.cells.iter_mut().zip(transitions) {
            // The primary grid is authoritative for the alive bit
            let current = if before.is_alive() {
                MergedCell::ALIVE
            } else {
                MergedCell::dead(cell.age)
            };
            *cell = advance_cell(current, after.is_alive(), max_age);
        }
    }

    fn reset(&mut self) {
        self.cells.fill(MergedCell::DEAD);
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.cells.width(), self.cells.height())
    }

    fn layer_count(&self) -> usize {
        1
    }

    fn layer(&self, index: usize) -> Option<LayerView<'_>> {
        (index == 0).then_some(LayerView::Merged(&self.cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{step, Conway};

    #[test]
    fn test_pack_unpack() {
        assert_eq!(MergedCell::ALIVE.pack(), tiles::ALIVE);
        assert_eq!(MergedCell::DEAD.pack(), tiles::DEAD);
        assert_eq!(MergedCell::dead(4).pack(), 4);
        for value in 0..=5 {
            assert_eq!(MergedCell::unpack(value).pack(), value);
        }
        assert_eq!(MergedCell::unpack(3), MergedCell::dead(3));
    }

    #[test]
    fn test_advance_cell_transitions() {
        let max = 5;
        assert_eq!(advance_cell(MergedCell::ALIVE, false, max), MergedCell::DEAD);
        assert_eq!(advance_cell(MergedCell::ALIVE, true, max), MergedCell::ALIVE);
        assert_eq!(advance_cell(MergedCell::DEAD, true, max), MergedCell::ALIVE);
        // Aged cells revive like fresh ones
        assert_eq!(advance_cell(MergedCell::dead(4), true, max), MergedCell::ALIVE);
        assert_eq!(advance_cell(MergedCell::dead(5), true, max), MergedCell::ALIVE);
        // Fading saturates at max
        assert_eq!(advance_cell(MergedCell::DEAD, false, max), MergedCell::dead(2));
        assert_eq!(advance_cell(MergedCell::dead(4), false, max), MergedCell::dead(5));
        assert_eq!(advance_cell(MergedCell::dead(5), false, max), MergedCell::dead(5));
    }

    #[test]
    fn test_aged_neighbors_count_as_dead() {
        // Three aged neighbors around (1,1) must not cause a birth
        let mut grid = Grid::new(3, 3, MergedCell::DEAD).unwrap();
        grid.set(0, 0, MergedCell::dead(2)).unwrap();
        grid.set(0, 1, MergedCell::dead(3)).unwrap();
        grid.set(0, 2, MergedCell::dead(4)).unwrap();
        let next = step_merged(&grid, &Conway, 5);
        assert!(next.iter().all(|c| !c.alive));
    }

    #[test]
    fn test_blinker_fade_trail() {
        let primary = Grid::with_alive(5, 5, &[(2, 1), (2, 2), (2, 3)]).unwrap();
        let mut overlay = MergedAging::from_primary(&primary, 5).unwrap();
        let vertical = overlay.advance(&Conway);
        assert_eq!(vertical, step(&primary, &Conway));
        // Arms of the old horizontal line just died
        assert_eq!(overlay.cells().get(2, 1), Ok(MergedCell::DEAD));
        assert_eq!(overlay.cells().get(2, 3), Ok(MergedCell::DEAD));
        assert_eq!(overlay.cells().get(1, 2), Ok(MergedCell::ALIVE));
        // Background keeps fading
        assert_eq!(overlay.cells().get(0, 0), Ok(MergedCell::dead(2)));
    }

    #[test]
    fn test_observe_matches_fused_step() {
        let primary = Grid::with_alive(6, 6, &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]).unwrap();
        let mut fused = MergedAging::from_primary(&primary, 5).unwrap();
        let mut observed = fused.clone();

        let mut current = primary;
        for _ in 0..6 {
            let next = step(&current, &Conway);
            observed.observe(&current, &next);
            assert_eq!(fused.advance(&Conway), next);
            current = next;
        }
        assert_eq!(fused, observed);
    }

    #[test]
    fn test_reset_and_validation() {
        let mut overlay = MergedAging::from_primary(&Grid::new(3, 3, Cell::Alive).unwrap(), 5).unwrap();
        overlay.reset();
        assert!(overlay.cells().iter().all(|c| c == MergedCell::DEAD));
        assert!(MergedAging::new(3, 3, 0).is_err());
    }
}

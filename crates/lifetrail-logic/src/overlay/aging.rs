//! Single aging map: how many generations since each cell was alive.

use crate::cell::Cell;
use crate::constants::tiles;
use crate::error::{ConfigError, Result};
use crate::grid::Grid;

use super::{HistoryOverlay, LayerView};

/// Per-cell aging index, `0` while alive, counting up to `max_age` once dead.
#[derive(Debug, Clone, PartialEq)]
pub struct AgingMap {
    ages: Grid<u8>,
    max_age: u8,
}

impl AgingMap {
    /// Blank map: every cell at `max_age` (long dead).
    pub fn new(width: usize, height: usize, max_age: u8) -> Result<Self> {
        if max_age < 1 {
            return Err(ConfigError::InvalidMaxAge(max_age).into());
        }
        Ok(Self {
            ages: Grid::new(width, height, max_age)?,
            max_age,
        })
    }

    pub fn ages(&self) -> &Grid<u8> {
        &self.ages
    }

    pub fn max_age(&self) -> u8 {
        self.max_age
    }
}

impl HistoryOverlay for AgingMap {
    fn observe(&mut self, previous: &Grid<Cell>, next: &Grid<Cell>) {
        debug_assert!(self.ages.same_shape(previous) && self.ages.same_shape(next));
        let max_age = self.max_age;
        for (age, cell) in self.ages.iter_mut().zip(next.iter()) {
            *age = if cell.is_alive() {
                tiles::ALIVE
            } else {
                age.saturating_add(1).min(max_age)
            };
        }
    }

    fn reset(&mut self) {
        self.ages.fill(self.max_age);
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.ages.width(), self.ages.height())
    }

    fn layer_count(&self) -> usize {
        1
    }

    fn layer(&self, index: usize) -> Option<LayerView<'_>> {
        (index == 0).then_some(LayerView::Aging(&self.ages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Grid<Cell> {
        Grid::new(4, 4, Cell::Dead).unwrap()
    }

    #[test]
    fn test_alive_cells_reset_to_zero() {
        let mut map = AgingMap::new(4, 4, 5).unwrap();
        let next = Grid::with_alive(4, 4, &[(1, 1), (2, 3)]).unwrap();
        map.observe(&blank(), &next);
        assert_eq!(map.ages().get(1, 1), Ok(0));
        assert_eq!(map.ages().get(2, 3), Ok(0));
        assert_eq!(map.ages().get(0, 0), Ok(5));
    }

    #[test]
    fn test_dead_cells_age_by_one_then_clamp() {
        let mut map = AgingMap::new(4, 4, 3).unwrap();
        let alive = Grid::with_alive(4, 4, &[(0, 0)]).unwrap();
        map.observe(&blank(), &alive);
        assert_eq!(map.ages().get(0, 0), Ok(0));

        let mut seen = Vec::new();
        for _ in 0..5 {
            map.observe(&alive, &blank());
            seen.push(map.ages().get(0, 0).unwrap());
        }
        assert_eq!(seen, vec![1, 2, 3, 3, 3]);
    }

    #[test]
    fn test_reset_blanks_to_max() {
        let mut map = AgingMap::new(4, 4, 5).unwrap();
        map.observe(&blank(), &Grid::new(4, 4, Cell::Alive).unwrap());
        assert!(map.ages().iter().all(|a| a == 0));
        map.reset();
        assert!(map.ages().iter().all(|a| a == 5));
    }

    #[test]
    fn test_single_layer() {
        let map = AgingMap::new(4, 4, 5).unwrap();
        assert_eq!(map.layer_count(), 1);
        assert!(matches!(map.layer(0), Some(LayerView::Aging(_))));
        assert!(map.layer(1).is_none());
    }
}

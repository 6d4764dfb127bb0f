//! Transition rule: computes the next generation from the current one.
//!
//! The rule only sees the binary projection of a cell (alive or not) and its
//! live-neighbor count. `step` always builds a fresh grid, so the input is
//! never observed half-updated.

use crate::cell::Cell;
use crate::constants::conway;
use crate::grid::Grid;

/// Life-like neighbor rule.
pub trait Rule {
    /// Whether a cell is alive next generation.
    fn next_alive(&self, alive: bool, alive_neighbors: u8) -> bool;
}

/// Standard B3/S23 rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conway;

impl Rule for Conway {
    fn next_alive(&self, alive: bool, alive_neighbors: u8) -> bool {
        alive_neighbors == conway::BIRTH
            || (alive && (conway::SURVIVE_LOW..=conway::SURVIVE_HIGH).contains(&alive_neighbors))
    }
}

/// Apply `rule` to every cell of `grid`.
pub fn step<R: Rule + ?Sized>(grid: &Grid<Cell>, rule: &R) -> Grid<Cell> {
    grid.map_indexed(|row, col, cell| {
        let n = grid.neighbor_alive_count(row, col, Cell::is_alive);
        Cell::from_alive(rule.next_alive(cell.is_alive(), n))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth() {
        assert!(Conway.next_alive(false, 3));
        assert!(!Conway.next_alive(false, 2));
        assert!(!Conway.next_alive(false, 4));
        assert!(!Conway.next_alive(false, 0));
    }

    #[test]
    fn test_survival() {
        assert!(Conway.next_alive(true, 2));
        assert!(Conway.next_alive(true, 3));
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert!(!Conway.next_alive(true, n), "alive with {} neighbors", n);
        }
    }

    #[test]
    fn test_lonely_cell_dies() {
        let grid = Grid::with_alive(5, 5, &[(2, 2)]).unwrap();
        assert_eq!(step(&grid, &Conway).population(), 0);
    }

    #[test]
    fn test_three_by_three_full() {
        // Corners see 3, edges 5, center 8
        let grid = Grid::new(3, 3, Cell::Alive).unwrap();
        let next = step(&grid, &Conway);
        let expected =
            Grid::with_alive(3, 3, &[(0, 0), (0, 2), (2, 0), (2, 2)]).unwrap();
        assert_eq!(next, expected);
    }

    #[test]
    fn test_custom_rule() {
        struct AlwaysAlive;
        impl Rule for AlwaysAlive {
            fn next_alive(&self, _alive: bool, _n: u8) -> bool {
                true
            }
        }
        let grid = Grid::new(4, 4, Cell::Dead).unwrap();
        assert_eq!(step(&grid, &AlwaysAlive).population(), 16);
    }
}

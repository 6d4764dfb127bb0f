//! Random seeding of the primary grid.

use rand::Rng;

use crate::cell::Cell;
use crate::error::{ConfigError, Result};
use crate::grid::Grid;

/// New grid where each cell is independently alive with `probability`.
pub fn seed<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    probability: f64,
    rng: &mut R,
) -> Result<Grid<Cell>> {
    check_probability(probability)?;
    Grid::from_fn(width, height, |_, _| roll(probability, &mut *rng))
}

/// Fresh random grid with the same shape as `shape`.
///
/// `probability` is expected to be validated already; values below 0 yield
/// an empty grid and values above 1 a full one.
pub fn seed_like<T: Copy, R: Rng + ?Sized>(shape: &Grid<T>, probability: f64, rng: &mut R) -> Grid<Cell> {
    shape.map(|_| roll(probability, &mut *rng))
}

fn roll<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> Cell {
    Cell::from_alive(rng.gen::<f64>() < probability)
}

pub fn check_probability(probability: f64) -> std::result::Result<(), ConfigError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability(probability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::world;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_alive_fraction_near_probability() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = seed(1000, 1000, world::FIRST_GEN_ALIVE, &mut rng).unwrap();
        let fraction = grid.population() as f64 / 1_000_000.0;
        assert!(
            (fraction - 0.15).abs() < 0.005,
            "alive fraction {} too far from 0.15",
            fraction
        );
    }

    #[test]
    fn test_extreme_probabilities() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(seed(20, 20, 0.0, &mut rng).unwrap().population(), 0);
        assert_eq!(seed(20, 20, 1.0, &mut rng).unwrap().population(), 400);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = seed(40, 60, 0.15, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = seed(40, 60, 0.15, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_like_keeps_shape() {
        let shape = Grid::new(7, 3, 5u8).unwrap();
        let grid = seed_like(&shape, 1.0, &mut StdRng::seed_from_u64(3));
        assert!(grid.same_shape(&shape));
        assert_eq!(grid.population(), 21);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(seed(10, 10, 1.5, &mut rng).is_err());
        assert!(seed(10, 10, -0.1, &mut rng).is_err());
        assert!(seed(10, 10, f64::NAN, &mut rng).is_err());
        assert!(seed(0, 10, 0.5, &mut rng).is_err());
    }
}

//! Fixed-size rectangular grid of per-cell values.
//!
//! Cells are stored row-major. The grid has hard edges: neighbor lookups
//! outside `[0, width) x [0, height)` count as dead and never wrap around.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{ConfigError, LifeError, Result};

/// Offsets of the 8 Moore neighbors, as (row, col) deltas.
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Width x height container with exactly one value per cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>")]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Unchecked serialized form, validated on the way into [`Grid`].
#[derive(Deserialize)]
struct RawGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = ConfigError;

    fn try_from(raw: RawGrid<T>) -> std::result::Result<Self, ConfigError> {
        let expected = check_dimensions(raw.width, raw.height)?;
        if raw.cells.len() != expected {
            return Err(ConfigError::CellCountMismatch {
                width: raw.width,
                height: raw.height,
                expected,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![fill; len],
        })
    }

    /// Create a grid whose cell at `(row, col)` is `f(row, col)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        let mut cells = Vec::with_capacity(len);
        for row in 0..height {
            for col in 0..width {
                cells.push(f(row, col));
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Read one cell.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.index(row, col)
            .map(|i| self.cells[i])
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Overwrite one cell.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let i = self
            .index(row, col)
            .ok_or_else(|| self.out_of_bounds(row, col))?;
        self.cells[i] = value;
        Ok(())
    }

    /// Count the Moore neighbors of `(row, col)` for which `is_alive` holds.
    ///
    /// Coordinates beyond the edge contribute 0. The cell itself is never
    /// counted.
    pub fn neighbor_alive_count(&self, row: usize, col: usize, is_alive: impl Fn(T) -> bool) -> u8 {
        let mut count = 0;
        for (dr, dc) in MOORE_OFFSETS {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                continue;
            };
            if let Some(i) = self.index(r, c) {
                if is_alive(self.cells[i]) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Build a same-shaped grid from each cell's position and value.
    pub fn map_indexed<U: Copy>(&self, mut f: impl FnMut(usize, usize, T) -> U) -> Grid<U> {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &v)| f(i / self.width, i % self.width, v))
            .collect();
        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Build a same-shaped grid by transforming each value.
    pub fn map<U: Copy>(&self, mut f: impl FnMut(T) -> U) -> Grid<U> {
        self.map_indexed(|_, _, v| f(v))
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Iterate over all values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().copied()
    }

    /// Mutable access to all values in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.cells.iter_mut()
    }

    /// One slice per row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Number of cells satisfying `pred`.
    pub fn count(&self, pred: impl Fn(T) -> bool) -> usize {
        self.cells.iter().filter(|&&v| pred(v)).count()
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> LifeError {
        LifeError::OutOfBounds {
            row,
            col,
            width: self.width,
            height: self.height,
        }
    }
}

impl Grid<Cell> {
    /// All-dead grid with the listed `(row, col)` cells alive.
    pub fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> Result<Self> {
        let mut grid = Self::new(width, height, Cell::Dead)?;
        for &(row, col) in alive {
            grid.set(row, col, Cell::Alive)?;
        }
        Ok(grid)
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.count(Cell::is_alive)
    }
}

/// Validate grid dimensions and return the cell count.
///
/// Both sides must be positive and their product must fit in `usize`.
pub fn check_dimensions(width: usize, height: usize) -> std::result::Result<usize, ConfigError> {
    match width.checked_mul(height) {
        Some(len) if len > 0 => Ok(len),
        _ => Err(ConfigError::InvalidDimensions { width, height }),
    }
}

/// Fail unless `found` equals the `expected` `(width, height)`.
pub fn ensure_shape(
    expected: (usize, usize),
    found: (usize, usize),
) -> std::result::Result<(), ConfigError> {
    if expected == found {
        return Ok(());
    }
    Err(ConfigError::DimensionMismatch {
        width: expected.0,
        height: expected.1,
        found_width: found.0,
        found_height: found.1,
    })
}

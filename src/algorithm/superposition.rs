//! Per-cell candidate tracking over a rectangular grid
//!
//! Each cell owns a bitset of excluded variants. Exclusions only grow within
//! an attempt; [`SuperpositionGrid::reset`] starts a fresh one. Cells are
//! addressed row-major, `index = x + y * width`.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::spatial::direction::Direction;

/// Candidate variant indices per cell, shaped `(height, width)`
pub type Snapshot = Array2<Vec<usize>>;

/// Width × height grid of excluded-variant sets
#[derive(Clone, Debug)]
pub struct SuperpositionGrid {
    width: usize,
    height: usize,
    variant_count: usize,
    excluded: Vec<TileBitset>,
}

impl SuperpositionGrid {
    /// Create a grid where every cell may still take every variant
    pub fn new(width: usize, height: usize, variant_count: usize) -> Self {
        Self {
            width,
            height,
            variant_count,
            excluded: vec![TileBitset::new(variant_count); width * height],
        }
    }

    /// Clear all exclusions
    pub fn reset(&mut self) {
        for cell in &mut self.excluded {
            cell.clear();
        }
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of variants each cell is sized for
    pub const fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Row-major index of a coordinate, if inside the grid
    pub const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(x + y * self.width)
        } else {
            None
        }
    }

    /// Column and row of a cell index
    pub const fn coordinates(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    /// Adjacent cell in `direction`, or `None` at the grid boundary
    pub const fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        if cell >= self.cell_count() {
            return None;
        }
        let (x, y) = self.coordinates(cell);
        let (dx, dy) = direction.offset();
        match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
            (Some(nx), Some(ny)) => self.index(nx, ny),
            _ => None,
        }
    }

    /// Remaining variant count; 0 for cells outside the grid
    pub fn entropy(&self, cell: usize) -> usize {
        self.excluded
            .get(cell)
            .map_or(0, |excluded| self.variant_count - excluded.count())
    }

    /// Whether a variant has been excluded from a cell
    pub fn is_excluded(&self, cell: usize, variant: usize) -> bool {
        self.excluded
            .get(cell)
            .is_some_and(|excluded| excluded.contains(variant))
    }

    /// Remaining variants of a cell in ascending order
    ///
    /// Renderers blend by position in this sequence, so the order is part of
    /// the contract.
    pub fn candidates(&self, cell: usize) -> Vec<usize> {
        self.excluded
            .get(cell)
            .map(|excluded| excluded.iter_missing().collect())
            .unwrap_or_default()
    }

    /// Exclude one variant, returning whether the cell changed
    pub fn exclude(&mut self, cell: usize, variant: usize) -> bool {
        self.excluded
            .get_mut(cell)
            .is_some_and(|excluded| excluded.insert(variant))
    }

    /// Exclude every variant except `keep`, returning whether the cell changed
    pub fn exclude_all_except(&mut self, cell: usize, keep: usize) -> bool {
        let Some(excluded) = self.excluded.get_mut(cell) else {
            return false;
        };
        let mut changed = false;
        for variant in 0..self.variant_count {
            if variant != keep {
                changed |= excluded.insert(variant);
            }
        }
        changed
    }

    /// Whether every cell has exactly one remaining variant
    pub fn is_decided(&self) -> bool {
        (0..self.cell_count()).all(|cell| self.entropy(cell) == 1)
    }

    /// Candidates of every cell laid out by row and column
    pub fn snapshot(&self) -> Snapshot {
        Array2::from_shape_fn((self.height, self.width), |(y, x)| {
            self.candidates(x + y * self.width)
        })
    }
}

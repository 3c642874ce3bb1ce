use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::superposition::SuperpositionGrid;

/// Seeded random selector for reproducible stochastic choices
///
/// Every random decision of one solver (cell tie-breaks and variant choice)
/// draws from this single generator.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Wrap an existing generator
    pub const fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Uniformly pick one element, `None` for an empty slice
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..items.len());
        items.get(index).copied()
    }
}

/// Outcome of scanning the grid for the next cell to collapse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Collapse this cell next
    Cell(usize),
    /// Every cell holds exactly one variant
    Solved,
    /// This cell has no variants left
    Contradiction {
        /// The empty cell
        cell: usize,
    },
}

/// Cells with entropy ≥ 2 tied at the minimum entropy, in index order
///
/// Returns `Err(cell)` for the first cell found with entropy 0.
pub fn lowest_entropy_cells(grid: &SuperpositionGrid) -> Result<Vec<usize>, usize> {
    let mut lowest = usize::MAX;
    let mut tied = Vec::new();

    for cell in 0..grid.cell_count() {
        let entropy = grid.entropy(cell);
        if entropy == 0 {
            return Err(cell);
        }
        if entropy == 1 || entropy > lowest {
            continue;
        }
        if entropy < lowest {
            lowest = entropy;
            tied.clear();
        }
        tied.push(cell);
    }

    Ok(tied)
}

/// Pick the next cell to collapse uniformly among the lowest-entropy cells
pub fn select_cell(grid: &SuperpositionGrid, selector: &mut RandomSelector) -> Selection {
    match lowest_entropy_cells(grid) {
        Err(cell) => Selection::Contradiction { cell },
        Ok(tied) => selector.choose(&tied).map_or(Selection::Solved, Selection::Cell),
    }
}

/// Pick one of a cell's remaining variants uniformly
pub fn choose_variant(
    grid: &SuperpositionGrid,
    cell: usize,
    selector: &mut RandomSelector,
) -> Option<usize> {
    selector.choose(&grid.candidates(cell))
}

use log::{debug, trace};
use ndarray::Array2;
use rand::rngs::StdRng;

use crate::{
    algorithm::cancellation::CancellationToken,
    algorithm::connections::ConnectionTable,
    algorithm::propagation::{AdjacencyRules, Propagation, propagate},
    algorithm::selection::{RandomSelector, Selection, choose_variant, select_cell},
    algorithm::superposition::{Snapshot, SuperpositionGrid},
    io::error::{ConfigurationError, GenerationError, Result},
    spatial::tiles::TileCatalog,
};

/// Where an attempt stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveState {
    /// Undecided cells remain
    Running,
    /// Every cell holds exactly one variant
    Solved,
    /// A cell ran out of variants; the attempt cannot continue
    Contradiction {
        /// The emptied cell
        cell: usize,
    },
}

impl SolveState {
    /// Whether no further steps will change the grid
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Result of a single step, intended for frame-by-frame rendering
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// State after the step
    pub state: SolveState,
    /// Cell and variant collapsed during the step, if any
    pub collapsed: Option<(usize, usize)>,
    /// Candidates of every cell after the step
    pub snapshot: Snapshot,
}

/// Wave function collapse solver over a socket-constrained tile catalog
///
/// Owns its grid and random generator exclusively; independent solvers can
/// run on separate threads. Contradictions are terminal for an attempt and
/// are only recovered by [`Solver::reset`].
#[derive(Clone, Debug)]
pub struct Solver {
    catalog: TileCatalog,
    rules: AdjacencyRules,
    grid: SuperpositionGrid,
    random_selector: RandomSelector,
    state: SolveState,
    collapses: usize,
    attempt: usize,
}

impl Solver {
    /// Create a solver whose random choices are seeded with `seed`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - Either grid dimension is zero or their product overflows
    /// - The catalog is empty
    /// - The connection table lacks a label used by the catalog
    pub fn new(
        catalog: TileCatalog,
        connections: ConnectionTable,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::with_selector(
            catalog,
            connections,
            width,
            height,
            RandomSelector::new(seed),
        )
    }

    /// Create a solver drawing from a caller-supplied generator
    ///
    /// # Errors
    ///
    /// Same conditions as [`Solver::new`]
    pub fn with_rng(
        catalog: TileCatalog,
        connections: ConnectionTable,
        width: usize,
        height: usize,
        rng: StdRng,
    ) -> Result<Self> {
        Self::with_selector(
            catalog,
            connections,
            width,
            height,
            RandomSelector::from_rng(rng),
        )
    }

    fn with_selector(
        catalog: TileCatalog,
        connections: ConnectionTable,
        width: usize,
        height: usize,
        random_selector: RandomSelector,
    ) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(ConfigurationError::InvalidDimensions { width, height }.into());
        }
        if catalog.is_empty() {
            return Err(ConfigurationError::EmptyCatalog.into());
        }
        let rules = AdjacencyRules::new(&catalog, connections)?;
        let grid = SuperpositionGrid::new(width, height, catalog.len());

        debug!(
            "Solver ready: {width}x{height} grid, {} variants, {} sockets",
            catalog.len(),
            rules.connections().socket_count()
        );

        Ok(Self {
            catalog,
            rules,
            grid,
            random_selector,
            state: SolveState::Running,
            collapses: 0,
            attempt: 1,
        })
    }

    /// Clear every exclusion and start a fresh attempt
    pub fn reset(&mut self) {
        self.grid.reset();
        self.state = SolveState::Running;
        self.collapses = 0;
        self.attempt += 1;
        debug!("Starting attempt {}", self.attempt);
    }

    /// Current state of the attempt
    pub const fn state(&self) -> SolveState {
        self.state
    }

    /// The superposition grid
    pub const fn grid(&self) -> &SuperpositionGrid {
        &self.grid
    }

    /// The tile catalog
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// The validated connection table
    pub const fn connections(&self) -> &ConnectionTable {
        self.rules.connections()
    }

    /// Catalog resolved against the connection table
    pub const fn rules(&self) -> &AdjacencyRules {
        &self.rules
    }

    /// Number of collapses performed in the current attempt
    pub const fn collapse_count(&self) -> usize {
        self.collapses
    }

    /// 1-based attempt counter, incremented by every reset
    pub const fn attempt(&self) -> usize {
        self.attempt
    }

    /// Perform one select, collapse and propagate step
    ///
    /// Once the attempt is terminal the grid is left untouched and the same
    /// state is returned again.
    pub fn step_once(&mut self) -> StepOutcome {
        let collapsed = self.step();
        StepOutcome {
            state: self.state,
            collapsed,
            snapshot: self.grid.snapshot(),
        }
    }

    /// Step until the attempt is solved or contradicted
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Cancelled`] if `cancel` trips; the attempt
    /// is discarded and the grid reset.
    pub fn solve_to_completion(&mut self, cancel: &CancellationToken) -> Result<SolveState> {
        while !self.state.is_terminal() {
            if let Err(error) = cancel.check() {
                debug!(
                    "Attempt {} cancelled after {} collapses",
                    self.attempt, self.collapses
                );
                self.reset();
                return Err(error);
            }
            self.step();
        }
        Ok(self.state)
    }

    /// Force `cell` to `variant` and propagate the consequences
    ///
    /// Forcing a variant already excluded from the cell empties it and ends
    /// the attempt in a contradiction at that cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell or variant index is out of range
    pub fn collapse_cell(&mut self, cell: usize, variant: usize) -> Result<SolveState> {
        if cell >= self.grid.cell_count() {
            return Err(GenerationError::InvalidCell {
                index: cell,
                cell_count: self.grid.cell_count(),
            });
        }
        if variant >= self.catalog.len() {
            return Err(GenerationError::InvalidTileIndex {
                index: variant,
                max_tiles: self.catalog.len(),
            });
        }
        if !self.state.is_terminal() {
            self.apply_collapse(cell, variant);
        }
        Ok(self.state)
    }

    /// The single variant of every cell, once solved
    pub fn decided_tiles(&self) -> Option<Array2<usize>> {
        if self.state != SolveState::Solved || !self.grid.is_decided() {
            return None;
        }
        Some(
            self.grid
                .snapshot()
                .map(|candidates| candidates.first().copied().unwrap_or_default()),
        )
    }

    fn step(&mut self) -> Option<(usize, usize)> {
        if self.state.is_terminal() {
            return None;
        }

        let cell = match select_cell(&self.grid, &mut self.random_selector) {
            Selection::Cell(cell) => cell,
            Selection::Solved => {
                debug!(
                    "Attempt {} solved after {} collapses",
                    self.attempt, self.collapses
                );
                self.state = SolveState::Solved;
                return None;
            }
            Selection::Contradiction { cell } => {
                self.contradiction(cell);
                return None;
            }
        };

        let Some(variant) = choose_variant(&self.grid, cell, &mut self.random_selector) else {
            self.contradiction(cell);
            return None;
        };

        self.apply_collapse(cell, variant);
        Some((cell, variant))
    }

    fn apply_collapse(&mut self, cell: usize, variant: usize) {
        let (x, y) = self.grid.coordinates(cell);
        trace!(
            "Collapsing cell {cell} ({x}, {y}) to variant {variant} (entropy {})",
            self.grid.entropy(cell)
        );

        self.grid.exclude_all_except(cell, variant);
        self.collapses += 1;
        if self.grid.entropy(cell) == 0 {
            self.contradiction(cell);
            return;
        }

        match propagate(&mut self.grid, &self.rules, cell) {
            Propagation::Settled { changed_cells } => {
                trace!("Propagation from cell {cell} settled, {changed_cells} cells narrowed");
            }
            Propagation::Contradiction { cell: emptied } => self.contradiction(emptied),
        }
    }

    fn contradiction(&mut self, cell: usize) {
        let (x, y) = self.grid.coordinates(cell);
        debug!(
            "Attempt {} hit a contradiction at cell {cell} ({x}, {y}) after {} collapses",
            self.attempt, self.collapses
        );
        self.state = SolveState::Contradiction { cell };
    }
}

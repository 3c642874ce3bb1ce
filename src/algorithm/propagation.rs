use std::collections::VecDeque;

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::connections::ConnectionTable;
use crate::algorithm::superposition::SuperpositionGrid;
use crate::io::error::ConfigurationError;
use crate::spatial::direction::Direction;
use crate::spatial::tiles::TileCatalog;

/// Catalog and connection table resolved to socket ids for fast lookups
#[derive(Clone, Debug)]
pub struct AdjacencyRules {
    variant_sockets: Vec<[usize; 4]>,
    connections: ConnectionTable,
}

impl AdjacencyRules {
    /// Resolve every variant's socket labels against the table
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingSocket`] if the table was built
    /// for a different catalog and lacks one of this catalog's labels.
    pub fn new(
        catalog: &TileCatalog,
        connections: ConnectionTable,
    ) -> Result<Self, ConfigurationError> {
        let mut variant_sockets = Vec::with_capacity(catalog.len());
        for (variant, tile) in catalog.variants().iter().enumerate() {
            let mut ids = [0; 4];
            for (slot, socket) in ids.iter_mut().zip(&tile.sockets) {
                *slot = connections.id_of(socket).ok_or_else(|| {
                    ConfigurationError::MissingSocket {
                        socket: socket.clone(),
                        variant,
                    }
                })?;
            }
            variant_sockets.push(ids);
        }
        Ok(Self {
            variant_sockets,
            connections,
        })
    }

    /// Number of resolved variants
    pub fn variant_count(&self) -> usize {
        self.variant_sockets.len()
    }

    /// The underlying connection table
    pub const fn connections(&self) -> &ConnectionTable {
        &self.connections
    }

    /// Socket id a variant exposes on one side
    pub fn socket(&self, variant: usize, direction: Direction) -> Option<usize> {
        self.variant_sockets
            .get(variant)
            .and_then(|ids| ids.get(direction.index()))
            .copied()
    }

    /// Socket ids exposed on each side by a cell's remaining candidates
    pub fn exposed_sockets(&self, grid: &SuperpositionGrid, cell: usize) -> [TileBitset; 4] {
        let mut exposed: [TileBitset; 4] =
            std::array::from_fn(|_| TileBitset::new(self.connections.socket_count()));
        for variant in grid.candidates(cell) {
            for direction in Direction::ALL {
                if let (Some(id), Some(side)) = (
                    self.socket(variant, direction),
                    exposed.get_mut(direction.index()),
                ) {
                    side.insert(id);
                }
            }
        }
        exposed
    }

    /// Exclude neighbor variants whose facing socket is not in `allowed`
    ///
    /// `facing` is the neighbor's side that points back at the source cell.
    /// Returns whether the neighbor changed.
    pub fn restrict(
        &self,
        grid: &mut SuperpositionGrid,
        neighbor: usize,
        facing: Direction,
        allowed: &TileBitset,
    ) -> bool {
        let mut changed = false;
        for variant in grid.candidates(neighbor) {
            let fits = self
                .socket(variant, facing)
                .is_some_and(|id| allowed.contains(id));
            if !fits {
                changed |= grid.exclude(neighbor, variant);
            }
        }
        changed
    }
}

/// Result of a propagation cascade
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// No further cell changes; the grid is locally arc-consistent
    Settled {
        /// Number of times a neighbor lost candidates
        changed_cells: usize,
    },
    /// A cell ran out of candidates and the cascade stopped
    Contradiction {
        /// The emptied cell
        cell: usize,
    },
}

/// Propagate exclusions outward from `origin` until nothing changes
///
/// Uses a FIFO worklist of cells to re-check, so stack depth stays constant
/// regardless of grid size. Stops at the first cell that reaches entropy 0.
pub fn propagate(
    grid: &mut SuperpositionGrid,
    rules: &AdjacencyRules,
    origin: usize,
) -> Propagation {
    let mut worklist = VecDeque::from([origin]);
    let mut queued = TileBitset::new(grid.cell_count());
    queued.insert(origin);
    let mut changed_cells = 0;

    while let Some(cell) = worklist.pop_front() {
        queued.remove(cell);
        let exposed = rules.exposed_sockets(grid, cell);

        for (direction, sockets) in Direction::ALL.into_iter().zip(&exposed) {
            let Some(neighbor) = grid.neighbor(cell, direction) else {
                continue;
            };
            let allowed = rules.connections().allowed_union(sockets);

            if rules.restrict(grid, neighbor, direction.opposite(), &allowed) {
                changed_cells += 1;
                if grid.entropy(neighbor) == 0 {
                    return Propagation::Contradiction { cell: neighbor };
                }
                if queued.insert(neighbor) {
                    worklist.push_back(neighbor);
                }
            }
        }
    }

    Propagation::Settled { changed_cells }
}

/// Check that every adjacent pair of cells supports each other's candidates
///
/// Each remaining candidate must expose, on the side facing a neighbor, a
/// socket compatible with at least one socket the neighbor exposes back.
/// Holds after every cascade that settles; says nothing about global
/// solvability.
pub fn is_arc_consistent(grid: &SuperpositionGrid, rules: &AdjacencyRules) -> bool {
    (0..grid.cell_count()).all(|cell| {
        let exposed = rules.exposed_sockets(grid, cell);
        Direction::ALL
            .into_iter()
            .zip(&exposed)
            .all(|(direction, sockets)| {
                grid.neighbor(cell, direction).is_none_or(|neighbor| {
                    let allowed = rules.connections().allowed_union(sockets);
                    grid.candidates(neighbor).into_iter().all(|variant| {
                        rules
                            .socket(variant, direction.opposite())
                            .is_some_and(|id| allowed.contains(id))
                    })
                })
            })
    })
}

//! Socket-constrained wave function collapse for tile map generation
//!
//! Tiles expose a connector label ("socket") on each side. The solver fills a
//! rectangular grid so that every pair of adjacent tiles faces compatible
//! sockets, collapsing the least uncertain cell and propagating exclusions
//! until the grid is solved or a cell runs out of candidates.

#![forbid(unsafe_code)]

/// Solver core: candidate grid, connection rules, selection and propagation
pub mod algorithm;
/// Configuration, sprites, rendering, export and the command-line surface
pub mod io;
/// Directions and tile variant data
pub mod spatial;

pub use algorithm::executor::{SolveState, Solver, StepOutcome};
pub use io::error::{ConfigurationError, GenerationError, Result};

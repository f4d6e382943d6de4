//! Wave function collapse over a fixed grid of edge-matching tiles
//!
//! Every cell starts as the full tile alphabet. Collapsing a cell narrows its
//! neighbors' candidates, forced cells collapse in turn, and a cell that runs
//! out of candidates rolls the grid back to the checkpoint taken before the
//! step. Resolved cells are reported as a lazy stream of collapse events.

#![forbid(unsafe_code)]

/// Constraint propagation, selection, checkpointing and the driver
pub mod algorithm;
/// Errors, configuration and the sprite, canvas and command-line collaborators
pub mod io;
/// Directions, tiles and the cell grid
pub mod spatial;

pub use algorithm::executor::{CollapseEvent, CollapseEvents, Engine, Solution, SolverConfig};
pub use io::error::{CollapseError, Result};

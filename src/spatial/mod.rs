//! Spatial data structures
//!
//! This module contains:
//! - The shared direction table
//! - Tile identifiers, descriptors and the alphabet
//! - The cell grid

/// Grid directions and their opposites
pub mod direction;
/// Cell grid and per-cell state
pub mod grid;
/// Tile labels, descriptors and alphabet validation
pub mod tiles;

pub use direction::Direction;
pub use grid::{Cell, CellState, Grid};
pub use tiles::{Alphabet, Tile, TileId};

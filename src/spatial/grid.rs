//! Dense grid of cells holding either candidate sets or resolved tiles
//!
//! The grid owns every cell. Outside code gets read-only views through
//! [`Grid::get`]; mutation is reserved for the propagation and collapse
//! operations inside this crate, which keeps candidate sets monotone between
//! checkpoints.

use ndarray::Array2;

use crate::algorithm::bitset::CandidateSet;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, illegal_state, invalid_configuration};
use crate::spatial::direction::Direction;
use crate::spatial::tiles::{Alphabet, TileId};

/// State of a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState {
    /// Still undecided; holds every tile that remains possible
    Superposed(CandidateSet),
    /// Resolved to a single tile
    Collapsed(TileId),
}

/// One grid position and its state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    y: usize,
    x: usize,
    state: CellState,
}

impl Cell {
    /// Row index
    pub const fn y(&self) -> usize {
        self.y
    }

    /// Column index
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Current state
    pub const fn state(&self) -> &CellState {
        &self.state
    }

    /// Whether the cell has been resolved
    pub const fn is_collapsed(&self) -> bool {
        matches!(self.state, CellState::Collapsed(_))
    }

    /// Resolved tile, if any
    pub const fn tile(&self) -> Option<TileId> {
        match self.state {
            CellState::Collapsed(tile) => Some(tile),
            CellState::Superposed(_) => None,
        }
    }

    /// Remaining candidates, if still superposed
    pub const fn candidates(&self) -> Option<&CandidateSet> {
        match &self.state {
            CellState::Superposed(candidates) => Some(candidates),
            CellState::Collapsed(_) => None,
        }
    }

    /// Informal entropy: candidate count, or 1 once collapsed
    pub fn entropy(&self) -> usize {
        match &self.state {
            CellState::Superposed(candidates) => candidates.len(),
            CellState::Collapsed(_) => 1,
        }
    }
}

/// Rectangular grid of cells with dimensions fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
    tile_count: usize,
}

impl Grid {
    /// Create a grid where every cell may still be any tile of the alphabet
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if either dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`, or the alphabet is empty
    pub fn initialise(width: usize, height: usize, alphabet: &Alphabet) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;
        if alphabet.is_empty() {
            return Err(invalid_configuration(
                "alphabet",
                &"[]",
                &"at least one tile is required",
            ));
        }

        let tile_count = alphabet.len();
        let cells = Array2::from_shape_fn((height, width), |(y, x)| Cell {
            y,
            x,
            state: CellState::Superposed(CandidateSet::full(tile_count)),
        });

        Ok(Self { cells, tile_count })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Alphabet size the grid was built for
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Read-only view of a cell
    pub fn get(&self, y: usize, x: usize) -> Option<&Cell> {
        self.cells.get([y, x])
    }

    /// Coordinates of the neighbor in `direction`, if inside the grid
    pub fn neighbor(&self, y: usize, x: usize, direction: Direction) -> Option<(usize, usize)> {
        direction.step(y, x, self.rows(), self.cols())
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of cells not yet collapsed
    pub fn count_superposed(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_collapsed()).count()
    }

    /// Whether every cell has been collapsed
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Resolved tile array, available once every cell is collapsed
    pub fn tiles(&self) -> Option<Array2<TileId>> {
        if !self.is_complete() {
            return None;
        }
        let mut tiles = Array2::from_elem(self.cells.dim(), TileId::new(0));
        for (tile, cell) in tiles.iter_mut().zip(self.cells.iter()) {
            *tile = cell.tile()?;
        }
        Some(tiles)
    }

    /// Narrow a superposed cell's candidates to those also in `allowed`
    ///
    /// Returns the candidate count after narrowing. The set may become empty;
    /// the caller decides what an empty set means.
    pub(crate) fn retain_candidates(
        &mut self,
        y: usize,
        x: usize,
        allowed: &CandidateSet,
    ) -> Result<usize> {
        let cell = self
            .cells
            .get_mut([y, x])
            .ok_or_else(|| illegal_state("reduce", [y, x], &"cell is outside the grid"))?;
        match &mut cell.state {
            CellState::Superposed(candidates) => {
                candidates.intersect_with(allowed);
                Ok(candidates.len())
            }
            CellState::Collapsed(tile) => Err(illegal_state(
                "reduce",
                [y, x],
                &format!("cell already collapsed to {tile}"),
            )),
        }
    }

    /// Resolve a superposed cell to one of its candidates
    pub(crate) fn set_collapsed(&mut self, y: usize, x: usize, tile: TileId) -> Result<()> {
        let cell = self
            .cells
            .get_mut([y, x])
            .ok_or_else(|| illegal_state("collapse", [y, x], &"cell is outside the grid"))?;
        match &cell.state {
            CellState::Superposed(candidates) if candidates.contains(tile) => {}
            CellState::Superposed(_) => {
                return Err(illegal_state(
                    "collapse",
                    [y, x],
                    &format!("tile {tile} is not a remaining candidate"),
                ));
            }
            CellState::Collapsed(existing) => {
                return Err(illegal_state(
                    "collapse",
                    [y, x],
                    &format!("cell already collapsed to {existing}"),
                ));
            }
        }
        cell.state = CellState::Collapsed(tile);
        Ok(())
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid_configuration(
            parameter,
            &value,
            &"must be greater than zero",
        ));
    }
    if value > MAX_GRID_DIMENSION {
        return Err(invalid_configuration(
            parameter,
            &value,
            &format!("must not exceed {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}

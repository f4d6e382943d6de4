use crate::{algorithm::bitset::CandidateSet, spatial::Grid, spatial::TileId};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Cells that have been narrowed but not forced, keyed by `(row, col)`
///
/// Ordered so that iteration, and therefore tie-breaking, is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    cells: BTreeSet<(usize, usize)>,
}

impl Frontier {
    /// Create an empty frontier
    pub const fn new() -> Self {
        Self {
            cells: BTreeSet::new(),
        }
    }

    /// Add a cell
    pub fn insert(&mut self, y: usize, x: usize) {
        self.cells.insert((y, x));
    }

    /// Remove a cell if present
    pub fn remove(&mut self, y: usize, x: usize) {
        self.cells.remove(&(y, x));
    }

    /// Test membership
    pub fn contains(&self, y: usize, x: usize) -> bool {
        self.cells.contains(&(y, x))
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().copied()
    }
}

/// Policy for choosing among frontier cells of equal candidate count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Uniformly random among ties, drawn from the seeded generator
    #[default]
    Random,
    /// First tie in row-major order
    RowMajor,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "row-major" | "row_major" | "rowmajor" => Ok(Self::RowMajor),
            other => Err(format!(
                "unknown tie-break policy '{other}' (expected 'random' or 'row-major')"
            )),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::RowMajor => f.write_str("row-major"),
        }
    }
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
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

    /// Uniform index in `0..len`, or `None` when `len` is zero
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniformly chosen element of `items`
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        let index = self.choose_index(items.len())?;
        items.get(index).copied()
    }

    /// Uniformly chosen member of a candidate set
    pub fn choose_candidate(&mut self, candidates: &CandidateSet) -> Option<TileId> {
        let index = self.choose_index(candidates.len())?;
        candidates.nth(index)
    }
}

/// Pick the opening cell uniformly over the whole grid
pub fn select_initial(grid: &Grid, selector: &mut RandomSelector) -> Option<(usize, usize)> {
    let index = selector.choose_index(grid.len())?;
    let cols = grid.cols();
    Some((index / cols, index % cols))
}

/// Frontier cells sharing the smallest candidate count
///
/// Collapsed cells are ignored should any linger in the frontier.
pub fn lowest_entropy_cells(grid: &Grid, frontier: &Frontier) -> Vec<(usize, usize)> {
    let mut lowest = usize::MAX;
    let mut ties = Vec::new();

    for (y, x) in frontier.iter() {
        let Some(count) = grid
            .get(y, x)
            .and_then(|cell| cell.candidates())
            .map(CandidateSet::len)
        else {
            continue;
        };

        if count < lowest {
            lowest = count;
            ties.clear();
        }
        if count == lowest {
            ties.push((y, x));
        }
    }

    ties
}

/// Choose the next decision cell from the frontier
///
/// Returns `None` when the frontier holds no superposed cell.
pub fn select_target(
    grid: &Grid,
    frontier: &Frontier,
    tie_break: TieBreak,
    selector: &mut RandomSelector,
) -> Option<(usize, usize)> {
    let ties = lowest_entropy_cells(grid, frontier);
    match tie_break {
        TieBreak::Random => selector.choose(&ties),
        TieBreak::RowMajor => ties.first().copied(),
    }
}

use crate::{algorithm::selection::Frontier, spatial::Grid};

/// Full snapshot of the mutable solver state around one decision step
///
/// The random generator is not part of the snapshot; a retry after a restore
/// continues the same random stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    grid: Grid,
    frontier: Frontier,
    remaining: usize,
}

impl Checkpoint {
    /// Snapshot the grid, frontier and remaining-count
    pub fn capture(grid: &Grid, frontier: &Frontier, remaining: usize) -> Self {
        Self {
            grid: grid.clone(),
            frontier: frontier.clone(),
            remaining,
        }
    }

    /// Consume the snapshot, writing it back over the live state
    pub fn restore(self, grid: &mut Grid, frontier: &mut Frontier, remaining: &mut usize) {
        *grid = self.grid;
        *frontier = self.frontier;
        *remaining = self.remaining;
    }

    /// Snapshotted grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Snapshotted remaining-count
    pub const fn remaining(&self) -> usize {
        self.remaining
    }
}

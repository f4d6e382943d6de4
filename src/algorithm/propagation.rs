use crate::{
    algorithm::adjacency::AdjacencyRule,
    algorithm::selection::Frontier,
    io::error::{CollapseError, Result, illegal_state},
    spatial::{Direction, Grid, TileId},
};
use std::collections::VecDeque;

/// Outcome of narrowing one cell against a collapsed neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Exactly one candidate remains; the cell must collapse to it
    Forced(TileId),
    /// More than one candidate remains
    Narrowed(usize),
}

/// Remove candidates of `(y, x)` that cannot sit next to `constraining`
///
/// `direction` is the step from the constraining cell to this one, so a
/// candidate `T` survives iff `compatible(constraining, T, direction)`.
///
/// # Errors
///
/// Returns `Contradiction` when no candidate survives, and `IllegalState`
/// when the cell is already collapsed or outside the grid
pub fn reduce(
    grid: &mut Grid,
    rule: &AdjacencyRule,
    y: usize,
    x: usize,
    direction: Direction,
    constraining: TileId,
) -> Result<Reduction> {
    let allowed = rule.allowed(constraining, direction).ok_or_else(|| {
        illegal_state(
            "reduce",
            [y, x],
            &format!("tile {constraining} is outside the alphabet"),
        )
    })?;

    let remaining = grid.retain_candidates(y, x, allowed)?;

    match remaining {
        0 => Err(CollapseError::Contradiction { position: [y, x] }),
        1 => grid
            .get(y, x)
            .and_then(|cell| cell.candidates())
            .and_then(|candidates| candidates.single())
            .map(Reduction::Forced)
            .ok_or_else(|| illegal_state("reduce", [y, x], &"singleton set has no member")),
        count => Ok(Reduction::Narrowed(count)),
    }
}

/// Inform every unresolved neighbor of a freshly collapsed cell
///
/// Neighbors left with several candidates join the frontier; neighbors left
/// with one are queued for collapse and leave the frontier.
///
/// # Errors
///
/// Returns `Contradiction` as soon as any neighbor runs out of candidates,
/// leaving later neighbors untouched, and `IllegalState` if `(y, x)` is not
/// collapsed
pub fn propagate(
    grid: &mut Grid,
    rule: &AdjacencyRule,
    frontier: &mut Frontier,
    pending: &mut PendingCollapses,
    y: usize,
    x: usize,
) -> Result<()> {
    let tile = grid
        .get(y, x)
        .and_then(|cell| cell.tile())
        .ok_or_else(|| illegal_state("propagate", [y, x], &"cell is not collapsed"))?;

    for direction in Direction::ALL {
        let Some((ny, nx)) = grid.neighbor(y, x, direction) else {
            continue;
        };
        // Collapsed cells are never propagated into
        if grid.get(ny, nx).is_none_or(|cell| cell.is_collapsed()) {
            continue;
        }

        match reduce(grid, rule, ny, nx, direction, tile)? {
            Reduction::Forced(_) => {
                frontier.remove(ny, nx);
                pending.push(ny, nx);
            }
            Reduction::Narrowed(_) => {
                frontier.insert(ny, nx);
            }
        }
    }

    Ok(())
}

/// Queue of cells reduced to a single candidate and awaiting collapse
///
/// Replaces the recursive collapse-propagate-collapse chain with a flat loop.
#[derive(Debug, Clone, Default)]
pub struct PendingCollapses {
    queue: VecDeque<(usize, usize)>,
}

impl PendingCollapses {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Queue a forced cell, skipping it if already queued
    pub fn push(&mut self, y: usize, x: usize) {
        if !self.queue.contains(&(y, x)) {
            self.queue.push_back((y, x));
        }
    }

    /// Remove and return the next forced cell
    pub fn take_next(&mut self) -> Option<(usize, usize)> {
        self.queue.pop_front()
    }

    /// Drop every queued cell
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get the number of queued cells
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

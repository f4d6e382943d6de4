use crate::{
    algorithm::adjacency::AdjacencyRule,
    algorithm::checkpoint::Checkpoint,
    algorithm::propagation::{self, PendingCollapses, Reduction, propagate},
    algorithm::selection::{Frontier, RandomSelector, TieBreak, select_initial, select_target},
    io::configuration::{DEFAULT_MAX_RETRIES, DEFAULT_SEED},
    io::error::{CollapseError, Result, illegal_driver_state, illegal_state},
    spatial::{Alphabet, Direction, Grid, TileId},
};
use ndarray::Array2;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

/// Runtime parameters of one solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Seed for every random choice the driver makes
    pub seed: u64,
    /// Consecutive rollbacks tolerated before the run fails
    pub max_retries: usize,
    /// Optional cap on rollbacks across the whole run
    pub max_total_rollbacks: Option<usize>,
    /// How to choose among frontier cells of equal candidate count
    pub tie_break: TieBreak,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_retries: DEFAULT_MAX_RETRIES,
            max_total_rollbacks: None,
            tie_break: TieBreak::default(),
        }
    }
}

/// Phase of the driver state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Nothing committed yet; the next step opens on a uniformly random cell
    Start,
    /// Decision steps on the lowest-entropy frontier cell
    Loop,
    /// Every cell is collapsed
    Done,
    /// An error ended the run
    Failed,
}

/// One cell resolved to a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollapseEvent {
    /// Row of the resolved cell
    pub y: usize,
    /// Column of the resolved cell
    pub x: usize,
    /// Tile the cell resolved to
    pub tile: TileId,
}

/// Result of a single driver step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step committed; events are in the order the cells resolved
    Committed(Vec<CollapseEvent>),
    /// A contradiction was hit and the checkpoint restored
    RolledBack {
        /// Cell whose candidates ran out
        position: [usize; 2],
    },
    /// The driver is done or failed and makes no further progress
    Finished,
}

/// Counters accumulated over a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Driver steps that committed
    pub committed_steps: usize,
    /// Cells resolved by committed steps
    pub collapses: usize,
    /// Checkpoint restores across the whole run
    pub rollbacks: usize,
    /// Longest run of consecutive rollbacks
    pub longest_retry_streak: usize,
}

/// Wave function collapse solver over a fixed grid
///
/// Owns the grid, frontier, remaining-count and random generator, and drives
/// the Start, Loop, Done state machine. Every step either commits with fewer
/// cells remaining or is rolled back in full.
#[derive(Debug, Clone)]
pub struct Engine {
    alphabet: Alphabet,
    rule: AdjacencyRule,
    grid: Grid,
    frontier: Frontier,
    pending: PendingCollapses,
    remaining: usize,
    selector: RandomSelector,
    config: SolverConfig,
    state: DriverState,
    consecutive_rollbacks: usize,
    stats: SolverStats,
}

impl Engine {
    /// Create an engine with the default configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if a dimension is zero or too large
    pub fn initialise(width: usize, height: usize, alphabet: Alphabet) -> Result<Self> {
        Self::with_config(width, height, alphabet, SolverConfig::default())
    }

    /// Create an engine with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if a dimension is zero or too large
    pub fn with_config(
        width: usize,
        height: usize,
        alphabet: Alphabet,
        config: SolverConfig,
    ) -> Result<Self> {
        let grid = Grid::initialise(width, height, &alphabet)?;
        let rule = AdjacencyRule::new(&alphabet);
        let remaining = grid.len();

        debug!(
            width,
            height,
            tiles = alphabet.len(),
            seed = config.seed,
            tie_break = %config.tie_break,
            "engine initialised"
        );

        Ok(Self {
            alphabet,
            rule,
            grid,
            frontier: Frontier::new(),
            pending: PendingCollapses::new(),
            remaining,
            selector: RandomSelector::new(config.seed),
            config,
            state: DriverState::Start,
            consecutive_rollbacks: 0,
            stats: SolverStats::default(),
        })
    }

    /// Access the grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Access the alphabet
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Access the adjacency table
    pub const fn rule(&self) -> &AdjacencyRule {
        &self.rule
    }

    /// Access the frontier
    pub const fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Cells not yet collapsed
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Current driver phase
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Configuration the engine was built with
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Counters so far
    pub const fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Collapse one cell to a random candidate and cascade, without checkpointing
    ///
    /// A failure leaves the grid as the cascade left it and moves the driver
    /// to `Failed`.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the cell is collapsed or outside the grid, and
    /// `Contradiction` if the cascade empties a candidate set
    pub fn collapse(&mut self, y: usize, x: usize) -> Result<Vec<CollapseEvent>> {
        let mut events = Vec::new();
        let outcome = self.cascade(y, x, &mut events);
        self.after_raw_operation(outcome)?;
        Ok(events)
    }

    /// Narrow one cell against a constraining tile, without checkpointing
    ///
    /// `direction` is the step from the constraining cell to `(y, x)`. A cell
    /// left with one candidate collapses and cascades; otherwise it joins the
    /// frontier. Failures move the driver to `Failed`.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the cell is collapsed or outside the grid, and
    /// `Contradiction` if any candidate set becomes empty
    pub fn reduce(
        &mut self,
        y: usize,
        x: usize,
        direction: Direction,
        constraining: TileId,
    ) -> Result<Vec<CollapseEvent>> {
        let mut events = Vec::new();
        self.pending.clear();
        let outcome = propagation::reduce(
            &mut self.grid,
            &self.rule,
            y,
            x,
            direction,
            constraining,
        )
        .and_then(|reduction| match reduction {
            Reduction::Forced(_) => {
                self.frontier.remove(y, x);
                self.pending.push(y, x);
                self.drain_pending(&mut events)
            }
            Reduction::Narrowed(_) => {
                self.frontier.insert(y, x);
                Ok(())
            }
        });
        self.after_raw_operation(outcome)?;
        Ok(events)
    }

    /// Run one driver step
    ///
    /// # Errors
    ///
    /// Returns `ContradictionExhausted` once a retry cap is exceeded, and
    /// `IllegalState` if the frontier is empty while cells remain
    pub fn step(&mut self) -> Result<StepOutcome> {
        match self.state {
            DriverState::Done | DriverState::Failed => return Ok(StepOutcome::Finished),
            DriverState::Start | DriverState::Loop => {}
        }
        if self.remaining == 0 {
            self.state = DriverState::Done;
            return Ok(StepOutcome::Finished);
        }

        let Some((y, x)) = self.select() else {
            self.state = DriverState::Failed;
            return Err(illegal_driver_state(
                "select",
                &format!("frontier is empty with {} cells remaining", self.remaining),
            ));
        };

        let checkpoint = Checkpoint::capture(&self.grid, &self.frontier, self.remaining);
        let mut events = Vec::new();

        match self.cascade(y, x, &mut events) {
            Ok(()) => Ok(self.commit(events)),
            Err(CollapseError::Contradiction { position }) => {
                checkpoint.restore(&mut self.grid, &mut self.frontier, &mut self.remaining);
                self.pending.clear();
                self.record_rollback(position)
            }
            Err(error) => {
                self.state = DriverState::Failed;
                Err(error)
            }
        }
    }

    /// Consume the engine into a lazy stream of collapse events
    pub const fn run(self) -> CollapseEvents {
        CollapseEvents {
            engine: self,
            buffered: VecDeque::new(),
            finished: false,
        }
    }

    /// Drive the engine to completion
    ///
    /// # Errors
    ///
    /// Returns the first error the event stream yields
    pub fn solve(self) -> Result<Solution> {
        let mut stream = self.run();
        for event in stream.by_ref() {
            event?;
        }
        stream.into_engine().into_solution()
    }

    /// Package a finished grid
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if any cell is still unresolved
    pub fn into_solution(self) -> Result<Solution> {
        let tiles = self.grid.tiles().ok_or_else(|| {
            illegal_driver_state(
                "solve",
                &format!("{} cells unresolved after the run", self.remaining),
            )
        })?;

        Ok(Solution {
            tiles,
            alphabet: self.alphabet,
            stats: self.stats,
        })
    }

    fn select(&mut self) -> Option<(usize, usize)> {
        match self.state {
            DriverState::Start => select_initial(&self.grid, &mut self.selector),
            DriverState::Loop | DriverState::Done | DriverState::Failed => select_target(
                &self.grid,
                &self.frontier,
                self.config.tie_break,
                &mut self.selector,
            ),
        }
    }

    fn commit(&mut self, events: Vec<CollapseEvent>) -> StepOutcome {
        self.consecutive_rollbacks = 0;
        self.stats.committed_steps += 1;
        self.stats.collapses += events.len();
        self.state = if self.remaining == 0 {
            DriverState::Done
        } else {
            DriverState::Loop
        };

        debug!(
            step = self.stats.committed_steps,
            resolved = events.len(),
            remaining = self.remaining,
            "step committed"
        );
        StepOutcome::Committed(events)
    }

    fn record_rollback(&mut self, position: [usize; 2]) -> Result<StepOutcome> {
        self.consecutive_rollbacks += 1;
        self.stats.rollbacks += 1;
        self.stats.longest_retry_streak = self
            .stats
            .longest_retry_streak
            .max(self.consecutive_rollbacks);

        debug!(
            y = position[0],
            x = position[1],
            consecutive = self.consecutive_rollbacks,
            total = self.stats.rollbacks,
            "contradiction, checkpoint restored"
        );

        let total_exceeded = self
            .config
            .max_total_rollbacks
            .is_some_and(|cap| self.stats.rollbacks > cap);
        if self.consecutive_rollbacks > self.config.max_retries || total_exceeded {
            self.state = DriverState::Failed;
            warn!(
                rollbacks = self.stats.rollbacks,
                remaining = self.remaining,
                "giving up after repeated contradictions"
            );
            return Err(CollapseError::ContradictionExhausted {
                rollbacks: self.stats.rollbacks,
                remaining: self.remaining,
                grid: Box::new(self.grid.clone()),
            });
        }

        Ok(StepOutcome::RolledBack { position })
    }

    fn after_raw_operation(&mut self, outcome: Result<()>) -> Result<()> {
        self.pending.clear();
        if let Err(error) = outcome {
            self.state = DriverState::Failed;
            return Err(error);
        }
        if self.remaining == 0 {
            self.state = DriverState::Done;
        } else if self.state == DriverState::Start && self.remaining < self.grid.len() {
            self.state = DriverState::Loop;
        }
        Ok(())
    }

    /// Collapse `(y, x)` to a random candidate, then every cell it forces
    fn cascade(&mut self, y: usize, x: usize, events: &mut Vec<CollapseEvent>) -> Result<()> {
        self.pending.clear();
        let candidates = self
            .grid
            .get(y, x)
            .ok_or_else(|| illegal_state("collapse", [y, x], &"cell is outside the grid"))?
            .candidates()
            .ok_or_else(|| illegal_state("collapse", [y, x], &"cell is already collapsed"))?;
        let tile = self
            .selector
            .choose_candidate(candidates)
            .ok_or_else(|| illegal_state("collapse", [y, x], &"candidate set is empty"))?;

        self.assign(y, x, tile, events)?;
        self.drain_pending(events)
    }

    fn drain_pending(&mut self, events: &mut Vec<CollapseEvent>) -> Result<()> {
        while let Some((y, x)) = self.pending.take_next() {
            let forced = self
                .grid
                .get(y, x)
                .and_then(|cell| cell.candidates())
                .and_then(|candidates| candidates.single());
            if let Some(tile) = forced {
                self.assign(y, x, tile, events)?;
            }
        }
        Ok(())
    }

    fn assign(
        &mut self,
        y: usize,
        x: usize,
        tile: TileId,
        events: &mut Vec<CollapseEvent>,
    ) -> Result<()> {
        let remaining = self.remaining.checked_sub(1).ok_or_else(|| {
            illegal_state("collapse", [y, x], &"no cells remain to collapse")
        })?;
        self.grid.set_collapsed(y, x, tile)?;
        self.frontier.remove(y, x);
        self.remaining = remaining;
        trace!(y, x, tile = self.alphabet.label(tile), "collapsed");
        events.push(CollapseEvent { y, x, tile });

        propagate(
            &mut self.grid,
            &self.rule,
            &mut self.frontier,
            &mut self.pending,
            y,
            x,
        )
    }
}

/// Lazy, non-restartable stream of collapse events
///
/// Each `next` call advances the driver only as far as needed. Events of a
/// step are released only once the step commits. After an error or the last
/// event the stream yields `None` forever.
#[derive(Debug)]
pub struct CollapseEvents {
    engine: Engine,
    buffered: VecDeque<CollapseEvent>,
    finished: bool,
}

impl CollapseEvents {
    /// Engine state as of the last committed or rolled back step
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Recover the engine, e.g. to read the final grid
    pub fn into_engine(self) -> Engine {
        self.engine
    }
}

impl Iterator for CollapseEvents {
    type Item = Result<CollapseEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.buffered.pop_front() {
                return Some(Ok(event));
            }
            if self.finished {
                return None;
            }
            match self.engine.step() {
                Ok(StepOutcome::Committed(events)) => self.buffered.extend(events),
                Ok(StepOutcome::RolledBack { .. }) => {}
                Ok(StepOutcome::Finished) => {
                    self.finished = true;
                    return None;
                }
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

impl FusedIterator for CollapseEvents {}

/// Completed grid with the run that produced it
#[derive(Debug, Clone)]
pub struct Solution {
    tiles: Array2<TileId>,
    alphabet: Alphabet,
    stats: SolverStats,
}

impl Solution {
    /// Resolved tile per cell, indexed `[row, col]`
    pub const fn tiles(&self) -> &Array2<TileId> {
        &self.tiles
    }

    /// Alphabet the tiles refer to
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of collapse events the driver emitted
    pub const fn events(&self) -> usize {
        self.stats.collapses
    }

    /// Counters of the run
    pub const fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Tile label at a cell
    pub fn label(&self, y: usize, x: usize) -> Option<&str> {
        self.tiles.get([y, x]).map(|&tile| self.alphabet.label(tile))
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.rows() {
            let labels: Vec<&str> = row.iter().map(|&tile| self.alphabet.label(tile)).collect();
            writeln!(f, "{}", labels.join(" "))?;
        }
        Ok(())
    }
}

//! Command-line interface for solving a grid from sprites or plain labels

use crate::algorithm::executor::{Engine, Solution, SolverConfig};
use crate::algorithm::selection::TieBreak;
use crate::io::canvas::Canvas;
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT, DEFAULT_SEED, DEFAULT_WIDTH,
};
use crate::io::error::Result;
use crate::io::progress::SolveProgress;
use crate::io::tileset::SpriteSet;
use crate::spatial::Alphabet;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Fill a grid with edge-matching tiles using wave function collapse"
)]
#[command(group(ArgGroup::new("source").required(true).args(["tiles", "alphabet"])))]
/// Command-line arguments for the solver
pub struct Cli {
    /// Directory of PNG sprites named by tile label (e.g. `corner_AABB.png`)
    #[arg(long, value_name = "DIR")]
    pub tiles: Option<PathBuf>,

    /// Comma-separated tile labels for a text-only run
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    pub alphabet: Vec<String>,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Consecutive rollbacks tolerated before giving up
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: usize,

    /// Rollbacks tolerated across the whole run
    #[arg(long)]
    pub max_total_rollbacks: Option<usize>,

    /// Tie-break among equally constrained cells: `random` or `row-major`
    #[arg(long, default_value_t = TieBreak::Random)]
    pub tie_break: TieBreak,

    /// Canvas PNG path, used with `--tiles`
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Solver parameters taken from the flags
    pub const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            seed: self.seed,
            max_retries: self.max_retries,
            max_total_rollbacks: self.max_total_rollbacks,
            tie_break: self.tie_break,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Drives one solve from parsed arguments to canvas or printed layout
#[derive(Debug)]
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Solve, then save the canvas or print the label grid
    ///
    /// # Errors
    ///
    /// Returns an error if loading, solving or saving fails
    // Printing the layout is the output of a text-only run
    #[allow(clippy::print_stdout)]
    pub fn run(&self) -> Result<Solution> {
        let (solution, canvas) = self.solve()?;

        if let Some(canvas) = canvas {
            canvas.save(&self.cli.output)?;
            info!(path = %self.cli.output.display(), "canvas saved");
        } else {
            print!("{solution}");
        }

        Ok(solution)
    }

    /// Solve and paint, without writing any output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile set or alphabet is invalid
    /// - The grid dimensions are rejected
    /// - Contradictions exceed the retry caps
    pub fn solve(&self) -> Result<(Solution, Option<Canvas>)> {
        let sprites = self.cli.tiles.as_deref().map(SpriteSet::load).transpose()?;
        let alphabet = match &sprites {
            Some(sprites) => sprites.alphabet().clone(),
            None => Alphabet::from_labels(&self.cli.alphabet)?,
        };

        let engine = Engine::with_config(
            self.cli.width,
            self.cli.height,
            alphabet,
            self.cli.solver_config(),
        )?;
        let cells = engine.grid().len();
        info!(
            width = self.cli.width,
            height = self.cli.height,
            tiles = engine.alphabet().len(),
            "solving"
        );

        let progress = if self.cli.should_show_progress() {
            SolveProgress::new(cells)
        } else {
            SolveProgress::hidden(cells)
        };
        let mut canvas = sprites
            .as_ref()
            .map(|sprites| Canvas::for_sprites(self.cli.width, self.cli.height, sprites));

        let mut stream = engine.run();
        while let Some(event) = stream.next() {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    progress.abandon("gave up");
                    return Err(e);
                }
            };

            progress.record_event();
            progress.record_rollbacks(stream.engine().stats().rollbacks);
            if let (Some(canvas), Some(sprites)) = (canvas.as_mut(), sprites.as_ref()) {
                canvas.paint(&event, sprites)?;
            }
        }
        progress.finish();

        let solution = stream.into_engine().into_solution()?;
        info!(
            steps = solution.stats().committed_steps,
            rollbacks = solution.stats().rollbacks,
            "solved"
        );
        Ok((solution, canvas))
    }
}

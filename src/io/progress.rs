//! Terminal progress for a single solve, fed from the collapse event stream

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static CELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Cells: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress over the cells of one grid
///
/// Only committed events advance the bar, so it never moves backwards after
/// a rollback.
pub struct SolveProgress {
    bar: ProgressBar,
}

impl SolveProgress {
    /// Visible bar over `cells` cells
    pub fn new(cells: usize) -> Self {
        let bar = ProgressBar::new(cells as u64);
        bar.set_style(CELL_STYLE.clone());
        Self { bar }
    }

    /// Bar that tracks position without drawing
    pub fn hidden(cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(cells as u64);
        Self { bar }
    }

    /// Count one resolved cell
    pub fn record_event(&self) {
        self.bar.inc(1);
    }

    /// Show the rollback tally next to the bar
    pub fn record_rollbacks(&self, rollbacks: usize) {
        if rollbacks > 0 {
            self.bar.set_message(format!("({rollbacks} rollbacks)"));
        }
    }

    /// Cells resolved so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Leave the bar on screen at its final position
    pub fn finish(&self) {
        self.bar.finish();
    }

    /// Stop the bar after a failed run
    pub fn abandon(&self, reason: &str) {
        self.bar.abandon_with_message(reason.to_string());
    }
}

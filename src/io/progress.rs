//! Attempt and collapse progress display

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows how many cells the current attempt has decided
///
/// The bar is reused across attempts; a contradiction rewinds it and bumps
/// the attempt counter in the prefix.
pub struct ProgressManager {
    bar: ProgressBar,
    cell_count: usize,
}

impl ProgressManager {
    /// Create a bar sized for a grid of `cell_count` cells
    pub fn new(cell_count: usize) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self {
            bar,
            cell_count,
        }
    }

    /// Create a bar that draws nothing
    pub fn hidden(cell_count: usize) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            cell_count,
        }
    }

    /// Rewind the bar for a new attempt
    pub fn start_attempt(&self, attempt: usize) {
        self.bar.set_length(self.cell_count as u64);
        self.bar.set_position(0);
        self.bar.set_prefix(format!("Attempt {attempt}"));
        self.bar.set_message(String::new());
    }

    /// Report the number of decided cells
    pub fn update(&self, decided_cells: usize) {
        self.bar.set_position(decided_cells.min(self.cell_count) as u64);
    }

    /// Note a contradiction at a cell before the next attempt starts
    pub fn contradiction(&self, x: usize, y: usize) {
        self.bar
            .set_message(format!("contradiction at ({x}, {y}), retrying"));
    }

    /// Clear the display
    pub fn finish(&self, message: &str) {
        self.bar.set_position(self.cell_count as u64);
        self.bar.finish_with_message(message.to_string());
    }
}

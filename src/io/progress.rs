//! Progress display for scoring and search, batching large file sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Phase of work shown for the current file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Cutting tiles and building cost tables
    Scoring,
    /// Filling grid positions
    Searching,
    /// Compositing and writing outputs
    Writing,
    /// All outputs written
    Done,
}

impl Phase {
    const fn label(self) -> &'static str {
        match self {
            Self::Scoring => "scoring",
            Self::Searching => "search",
            Self::Writing => "writing",
            Self::Done => "done",
        }
    }
}

/// Coordinates progress display for batch operations
///
/// Each file gets a bar counting filled grid positions. Once a batch is
/// larger than `MAX_INDIVIDUAL_PROGRESS_BARS`, only the most recent files
/// keep a bar and a single batch bar counts finished files.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
    current: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>24} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_count: 0,
            current: None,
        }
    }

    /// Prepare bars for a batch of files
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Number of files in the batch
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Start tracking a file whose grid has `tile_count` positions
    pub fn start_file(&mut self, path: &Path, tile_count: usize) {
        let bar = ProgressBar::new(tile_count as u64);
        bar.set_style(FILE_STYLE.clone());
        bar.set_prefix(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        bar.set_message(Phase::Scoring.label());

        // Rolling window: drop the oldest bar once the window is full
        if self.file_bars.len() >= MAX_INDIVIDUAL_PROGRESS_BARS {
            let oldest = self.file_bars.remove(0);
            self.multi_progress.remove(&oldest);
        }
        let bar = self.multi_progress.add(bar);
        self.file_bars.push(bar.clone());
        self.current = Some(bar);
    }

    /// Show which phase the current file is in
    pub fn set_phase(&self, phase: Phase) {
        if let Some(ref bar) = self.current {
            bar.set_message(phase.label());
        }
    }

    /// Report the number of filled positions and the best cost so far
    pub fn update_position(&self, position: usize, best_cost: f64) {
        if let Some(ref bar) = self.current {
            bar.set_position(position as u64);
            bar.set_message(format!("{} cost {best_cost:.0}", Phase::Searching.label()));
        }
    }

    /// Mark the current file as finished
    pub fn complete_file(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.set_message(Phase::Done.label());
            bar.finish();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}

//! Per-page tile progress with automatic batching for long page runs

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display while pages are rendered
///
/// Shows one bar per recent page (tiles placed out of tiles in the grid) and,
/// for long runs, an extra bar counting finished pages.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    page_bars: Vec<ProgressBar>,
    /// Stores (`label`, `tiles_placed`, `tile_count`) for rolling window display
    page_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Pages: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            page_bars: Vec::new(),
            page_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on page count
    pub fn initialize(&mut self, page_count: usize) {
        if page_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(page_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..page_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(TILE_STYLE.clone());
            self.page_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register a page that is about to be composed
    pub fn start_page(&mut self, index: usize, label: &str, tile_count: usize) {
        if index >= self.page_states.len() {
            self.page_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.page_states.get_mut(index) {
            *state = (label.to_owned(), 0, tile_count);
        }
        self.update_bars();
    }

    /// Report how many tiles of a page have been placed
    pub fn update_tiles(&mut self, index: usize, placed: usize) {
        if let Some(state) = self.page_states.get_mut(index) {
            state.1 = placed;
        }
        self.update_bars();
    }

    /// Mark a page as written and advance the batch bar
    pub fn complete_page(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.page_states.get_mut(index) {
            state.0 = format!("✓ {} ({:.1}s)", state.0, elapsed.as_secs_f64());
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All pages rendered");
        }
        let _ = self.multi_progress.clear();
    }

    /// Labels and progress of the pages currently shown, oldest first
    pub fn visible_pages(&self) -> Vec<(String, usize, usize)> {
        let active: Vec<_> = self
            .page_states
            .iter()
            .filter(|(label, _, _)| !label.is_empty())
            .cloned()
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        active.get(start..).map(<[_]>::to_vec).unwrap_or_default()
    }

    fn update_bars(&self) {
        let visible = self.visible_pages();

        for (bar_idx, (label, placed, total)) in visible.iter().enumerate() {
            if let Some(bar) = self.page_bars.get(bar_idx) {
                bar.set_length(*total as u64);
                bar.set_position(*placed as u64);
                let width = total.to_string().len();
                bar.set_message(format!("{placed:>width$}/{total}"));
                bar.set_prefix(label.clone());
            }
        }

        for bar in self.page_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}

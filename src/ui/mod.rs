//! Live progress display

use crate::events::{EventSink, SyncEvent};
use indicatif::{ProgressBar, ProgressStyle};

/// Event sink that drives a terminal spinner.
///
/// Durable events are printed as their own lines above the spinner; skip
/// notices only update the spinner message so large unchanged trees don't
/// flood the terminal.
pub struct ProgressSink {
    bar: ProgressBar,
}

impl ProgressSink {
    /// Create a new spinner-backed sink
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }

        Self { bar }
    }
}

impl EventSink for ProgressSink {
    fn emit(&mut self, event: &SyncEvent) {
        if event.is_durable() {
            self.bar.println(event.to_string());
        } else {
            self.bar.set_message(event.to_string());
        }
    }
}

impl Default for ProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressSink {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

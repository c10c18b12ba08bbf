//! Progress reporting

use crate::engine::ReplicationEvent;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner-style reporter for a replication run.
///
/// The total number of items is unknown until the walk ends, so the bar
/// only counts processed items (copied, created, skipped or failed).
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new_spinner())
    }

    /// Reporter that draws nothing (non-interactive output, tests)
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{elapsed}] {pos} items | {msg}")
        {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        Self { bar }
    }

    /// Mark the start of a run.
    pub fn start(&self, source: &str, destination: &str) {
        self.bar.enable_steady_tick(Duration::from_millis(120));
        self.bar
            .set_message(format!("Copying {} -> {}", source, destination));
    }

    /// Update the display for one engine event.
    pub fn handle(&self, event: &ReplicationEvent) {
        match event {
            ReplicationEvent::FolderCreated { path, .. } => {
                self.bar.inc(1);
                self.bar.set_message(format!("Created folder {}", path));
            }
            ReplicationEvent::FolderReused { path } => {
                self.bar.inc(1);
                self.bar.set_message(format!("Skipped folder {}", path));
            }
            ReplicationEvent::FileCopied { path } => {
                self.bar.inc(1);
                self.bar.set_message(format!("Copied {}", path));
            }
            ReplicationEvent::FileSkipped { path } => {
                self.bar.inc(1);
                self.bar.set_message(format!("Skipped {}", path));
            }
            ReplicationEvent::RateLimited {
                path,
                attempt,
                wait,
            } => {
                self.bar.set_message(format!(
                    "Rate limited on {}, retrying in {}s (attempt {})",
                    path,
                    wait.as_secs(),
                    attempt
                ));
            }
            ReplicationEvent::Failure { path, kind, detail } => {
                self.bar.inc(1);
                self.bar
                    .println(format!("ERROR {} {}: {}", kind.label(), path, detail));
            }
        }
    }

    /// Stop the spinner, leaving `message` on screen.
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Stop the spinner and clear it.
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

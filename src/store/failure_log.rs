//! Append-only failure log
//!
//! One human-readable line per failure:
//! `[2025-01-31T10:22:03.123456] Path: docs/report.pdf | Error: ...`.
//! Writing is best-effort; a log that cannot be written never stops the run.

use chrono::Local;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default failure log file name
pub const DEFAULT_FAILURE_LOG: &str = "failed_files.log";

/// Path recorded for errors that escape the engine
pub const FATAL_PATH: &str = "FATAL_ERROR";

#[derive(Debug, Clone)]
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one failure line. Errors writing the log are only traced.
    pub fn append(&self, path: &str, error: &dyn Display) {
        let line = format_line(&Local::now().format("%Y-%m-%dT%H:%M:%S%.6f"), path, error);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = result {
            tracing::warn!(
                log = %self.path.display(),
                failed_path = path,
                "could not write failure log: {}",
                e
            );
        }
    }

    /// Whether the log file exists and holds at least one entry
    pub fn has_entries(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|m| m.len() > 0)
            .unwrap_or(false)
    }
}

fn format_line(timestamp: &dyn Display, path: &str, error: &dyn Display) -> String {
    // Keep one record per line even if the provider message spans several.
    let detail = error.to_string().replace(['\r', '\n'], " ");
    format!("[{}] Path: {} | Error: {}\n", timestamp, path, detail)
}

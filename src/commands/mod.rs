//! Drivers
//!
//! `copy` (terminal) and `serve` (HTTP form) both go through [`run_job`],
//! which owns the checkpoint and failure log for one engine run.

pub mod copy;
pub mod serve;

use crate::engine::{ReplicationCallback, ReplicationStats, Replicator};
use crate::remote::RemoteTree;
use crate::store::{FailureLog, JsonProgressStore, ProgressStore, FATAL_PATH};
use crate::types::{ForkError, ProgressState};
use crate::Config;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

/// Outcome of one run, plus cumulative totals from the checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub source: String,
    pub destination: String,

    /// Counters for this run only
    pub stats: ReplicationStats,

    /// Files copied across all runs sharing the checkpoint
    pub total_files_copied: usize,

    /// Folders created across all runs sharing the checkpoint (root excluded)
    pub total_folders_created: usize,

    pub failure_log: PathBuf,

    /// Failure log exists and is non-empty
    pub has_failures: bool,
}

impl CopyReport {
    fn new(
        source: &str,
        destination: &str,
        stats: ReplicationStats,
        state: &ProgressState,
        failures: &FailureLog,
    ) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            stats,
            total_files_copied: state.copied_file_count(),
            total_folders_created: state.created_folder_count(),
            failure_log: failures.path().to_path_buf(),
            has_failures: failures.has_entries(),
        }
    }

    /// Plain-text summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!(
                "Summary: Copied {} files and created {} folders.",
                self.total_files_copied, self.total_folders_created
            ),
            format!(
                "  This run: {} copied, {} folders created, {} skipped, {} not copyable, {} failed",
                self.stats.files_copied,
                self.stats.folders_created,
                self.stats.files_skipped + self.stats.folders_reused,
                self.stats.files_not_copyable,
                self.stats.failures
            ),
        ];
        if self.has_failures {
            lines.push(format!(
                "Some items failed to copy. Check '{}' for details.",
                self.failure_log.display()
            ));
        } else {
            lines.push("All items copied successfully!".to_string());
        }
        lines.join("\n")
    }
}

/// Options for one job beyond the resolved [`Config`]
#[derive(Default)]
pub struct JobHooks<'a> {
    pub on_event: Option<&'a ReplicationCallback<'a>>,
    pub cancel: Option<&'a AtomicBool>,
}

/// Load the checkpoint, run the engine once, and build the report.
///
/// Errors escaping the engine are appended to the failure log under
/// [`FATAL_PATH`]; validation errors and interrupts are not.
pub fn run_job(
    remote: &mut dyn RemoteTree,
    config: &Config,
    source: &str,
    destination: &str,
    hooks: JobHooks<'_>,
) -> Result<CopyReport, ForkError> {
    let failures = FailureLog::new(&config.failure_log);
    let result = replicate_with_checkpoint(remote, config, &failures, source, destination, hooks);

    if let Err(err) = &result {
        if !err.is_validation_error() && !matches!(err, ForkError::Interrupted) {
            failures.append(FATAL_PATH, err);
        }
    }
    result
}

fn replicate_with_checkpoint(
    remote: &mut dyn RemoteTree,
    config: &Config,
    failures: &FailureLog,
    source: &str,
    destination: &str,
    hooks: JobHooks<'_>,
) -> Result<CopyReport, ForkError> {
    let mut store = JsonProgressStore::new(&config.progress_file);
    let mut state = store.load()?;

    let mut replicator = Replicator::new(remote, &mut store, failures)
        .with_policy(config.retry_policy())
        .with_page_size(config.page_size);
    if let Some(callback) = hooks.on_event {
        replicator = replicator.on_event(callback);
    }
    if let Some(flag) = hooks.cancel {
        replicator = replicator.with_cancel(flag);
    }

    let stats = replicator.run(source, destination, &mut state)?;
    Ok(CopyReport::new(source, destination, stats, &state, failures))
}

/// Normalize the two user-supplied folder references.
pub(crate) fn require_folder_ids(
    source: Option<&str>,
    destination: Option<&str>,
) -> Result<(String, String), ForkError> {
    let source = source.map(crate::config::parse_folder_id).unwrap_or_default();
    let destination = destination
        .map(crate::config::parse_folder_id)
        .unwrap_or_default();

    if source.is_empty() || destination.is_empty() {
        return Err(ForkError::InvalidArgument(
            "Both source and destination folder IDs are required".to_string(),
        ));
    }
    Ok((source, destination))
}

//! Error types for dfork

use crate::remote::ProviderError;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for dfork operations
#[derive(Debug, Error)]
pub enum ForkError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied an unusable argument (empty folder id, etc.)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No usable credential for the remote service
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// Remote file-tree service rejected a request
    #[error("Remote API error: {0}")]
    Provider(#[from] ProviderError),

    /// Checkpoint could not be read, parsed or written
    #[error("Progress file {path}: {reason}")]
    Progress { path: PathBuf, reason: String },

    /// Operator interrupted the run between two checkpoints
    #[error("Interrupted: progress has been saved")]
    Interrupted,
}

impl ForkError {
    /// Check if this error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, ForkError::InvalidArgument(_) | ForkError::Config(_))
    }

    /// Check if a rerun with the same checkpoint can pick up where this one stopped
    pub fn is_resumable(&self) -> bool {
        matches!(
            self,
            ForkError::Interrupted | ForkError::Provider(_) | ForkError::Io(_)
        )
    }

    pub(crate) fn progress(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ForkError::Progress {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

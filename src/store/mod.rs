//! Checkpoint persistence
//!
//! The engine saves the full [`ProgressState`] after every folder creation
//! and every file copy. The JSON store writes to a `.part` file, syncs it,
//! and renames it over the checkpoint, so a crash mid-save leaves the
//! previous checkpoint intact.

pub mod failure_log;

use crate::types::{ForkError, ProgressState};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub use failure_log::{FailureLog, FATAL_PATH};

/// Default checkpoint file name
pub const DEFAULT_PROGRESS_FILE: &str = "copy_progress.json";

/// Load/save access to the persisted checkpoint. Single writer only.
pub trait ProgressStore {
    /// Load the last saved state, or an empty state if nothing was saved yet.
    fn load(&self) -> Result<ProgressState, ForkError>;

    /// Overwrite the saved state with `state`.
    fn save(&mut self, state: &ProgressState) -> Result<(), ForkError>;
}

/// JSON file checkpoint
#[derive(Debug, Clone)]
pub struct JsonProgressStore {
    path: PathBuf,
}

impl JsonProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the checkpoint so the next run starts from scratch.
    ///
    /// Returns `true` if a file was removed.
    pub fn discard(&self) -> Result<bool, ForkError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ForkError::progress(&self.path, e)),
        }
    }

    fn part_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".part");
        self.path.with_file_name(name)
    }
}

impl ProgressStore for JsonProgressStore {
    fn load(&self) -> Result<ProgressState, ForkError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProgressState::new()),
            Err(e) => return Err(ForkError::progress(&self.path, e)),
        };

        serde_json::from_str(&content)
            .map_err(|e| ForkError::progress(&self.path, format!("failed to parse: {e}")))
    }

    fn save(&mut self, state: &ProgressState) -> Result<(), ForkError> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| ForkError::progress(&self.path, format!("failed to serialize: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ForkError::progress(&self.path, e))?;
        }

        let part_path = self.part_path();
        let mut part_file =
            File::create(&part_path).map_err(|e| ForkError::progress(&part_path, e))?;
        part_file
            .write_all(json.as_bytes())
            .map_err(|e| ForkError::progress(&part_path, e))?;
        part_file
            .sync_all()
            .map_err(|e| ForkError::progress(&part_path, e))?;

        // Drop the file handle before rename (required on Windows)
        drop(part_file);

        fs::rename(&part_path, &self.path).map_err(|e| ForkError::progress(&self.path, e))
    }
}

/// In-memory checkpoint that counts saves
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    saved: Option<ProgressState>,
    saves: usize,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn last_saved(&self) -> Option<&ProgressState> {
        self.saved.as_ref()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Result<ProgressState, ForkError> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, state: &ProgressState) -> Result<(), ForkError> {
        self.saved = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}

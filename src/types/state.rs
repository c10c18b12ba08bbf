//! ProgressState - the resumable checkpoint
//!
//! Holds the folder mapping (source folder id -> destination folder id) and
//! the set of source file ids already copied. Serialized as
//! `{"folder_map": {...}, "copied_files": [...]}`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Checkpoint of a replication run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(default)]
    folder_map: BTreeMap<String, String>,

    #[serde(default)]
    copied_files: BTreeSet<String>,
}

impl ProgressState {
    /// Create an empty checkpoint
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source -> destination` unless `source` is already mapped.
    ///
    /// Returns `true` when a new entry was added. An existing mapping is
    /// never replaced.
    pub fn map_folder(&mut self, source: &str, destination: &str) -> bool {
        if self.folder_map.contains_key(source) {
            return false;
        }
        self.folder_map
            .insert(source.to_string(), destination.to_string());
        true
    }

    /// Destination folder recorded for `source`, if any
    pub fn destination_of(&self, source: &str) -> Option<&str> {
        self.folder_map.get(source).map(String::as_str)
    }

    pub fn is_folder_mapped(&self, source: &str) -> bool {
        self.folder_map.contains_key(source)
    }

    /// Add a file id to the copied set. Returns `true` if it was not there yet.
    pub fn mark_copied(&mut self, file_id: &str) -> bool {
        self.copied_files.insert(file_id.to_string())
    }

    pub fn is_copied(&self, file_id: &str) -> bool {
        self.copied_files.contains(file_id)
    }

    /// Iterate over `(source, destination)` folder pairs
    pub fn folder_mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.folder_map
            .iter()
            .map(|(src, dst)| (src.as_str(), dst.as_str()))
    }

    /// Iterate over copied source file ids
    pub fn copied_files(&self) -> impl Iterator<Item = &str> {
        self.copied_files.iter().map(String::as_str)
    }

    pub fn mapped_folder_count(&self) -> usize {
        self.folder_map.len()
    }

    pub fn copied_file_count(&self) -> usize {
        self.copied_files.len()
    }

    /// Folders created so far, not counting the root pair
    pub fn created_folder_count(&self) -> usize {
        self.folder_map.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.folder_map.is_empty() && self.copied_files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_folder_never_remaps() {
        let mut state = ProgressState::new();

        assert!(state.map_folder("src-1", "dst-1"));
        assert!(!state.map_folder("src-1", "dst-other"));

        assert_eq!(state.destination_of("src-1"), Some("dst-1"));
        assert_eq!(state.mapped_folder_count(), 1);
    }

    #[test]
    fn test_mark_copied_is_monotonic() {
        let mut state = ProgressState::new();

        assert!(state.mark_copied("file-1"));
        assert!(!state.mark_copied("file-1"));
        assert!(state.is_copied("file-1"));
        assert!(!state.is_copied("file-2"));
        assert_eq!(state.copied_file_count(), 1);
    }

    #[test]
    fn test_created_folder_count_excludes_root() {
        let mut state = ProgressState::new();
        assert_eq!(state.created_folder_count(), 0);

        state.map_folder("root-src", "root-dst");
        assert_eq!(state.created_folder_count(), 0);

        state.map_folder("folder-1", "new-1");
        assert_eq!(state.created_folder_count(), 1);
    }

    #[test]
    fn test_json_layout_uses_checkpoint_field_names() {
        let mut state = ProgressState::new();
        state.map_folder("root-src", "root-dst");
        state.mark_copied("file-1");

        let value = serde_json::to_value(&state).expect("serialize state");
        assert_eq!(value["folder_map"]["root-src"], "root-dst");
        assert_eq!(value["copied_files"][0], "file-1");
    }

    #[test]
    fn test_json_missing_fields_default_to_empty() {
        let state: ProgressState = serde_json::from_str("{}").expect("parse empty object");
        assert!(state.is_empty());

        let state: ProgressState =
            serde_json::from_str(r#"{"copied_files": ["a", "b", "a"]}"#).expect("parse");
        assert_eq!(state.copied_file_count(), 2);
        assert_eq!(state.mapped_folder_count(), 0);
    }
}

//! # dfork - Resumable Google Drive Folder Copy
//!
//! Duplicates a Drive folder tree into another folder without ever copying
//! the same file twice, even across interrupted runs.
//!
//! The [`engine`] walks the source tree through a [`remote::RemoteTree`]
//! handle, saving a checkpoint after every folder it creates and every file
//! it copies. Failures that only affect one item go to an append-only
//! failure log and the walk moves on.

// Module declarations
pub mod commands;
pub mod config;
pub mod engine;
pub mod remote;
pub mod store;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use engine::{replicate, ReplicationStats, Replicator};
pub use remote::{Credentials, DriveClient, MemoryTree, ProviderError, RemoteTree};
pub use store::{FailureLog, JsonProgressStore, ProgressStore};
pub use types::{ForkError, ItemKind, ProgressState, TreeItem};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

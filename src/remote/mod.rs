//! Remote file-tree service contract
//!
//! The engine only needs three operations from the provider: list a
//! folder's children page by page, create a folder, and copy a file into a
//! new parent. Every failure carries an optional machine-readable reason
//! code which the engine inspects for copy retries.

pub mod drive;
pub mod memory;

use crate::types::TreeItem;
use std::fmt;

pub use drive::{Credentials, DriveClient};
pub use memory::{MemoryTree, RemoteCall};

/// One page of a folder listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub items: Vec<TreeItem>,

    /// Continuation token; `None` on the last page
    pub next_page_token: Option<String>,
}

/// Failure reported by the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    /// HTTP status, absent for transport failures
    pub status: Option<u16>,

    /// Provider reason code (e.g. `rateLimitExceeded`)
    pub reason: Option<String>,

    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            reason: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.reason.as_deref()) {
            (Some(status), Some(reason)) => {
                write!(f, "HTTP {} ({}): {}", status, reason, self.message)
            }
            (Some(status), None) => write!(f, "HTTP {}: {}", status, self.message),
            (None, Some(reason)) => write!(f, "{}: {}", reason, self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Authenticated handle to a remote file hierarchy
pub trait RemoteTree {
    /// List one page of `folder_id`'s children.
    fn list_children(
        &mut self,
        folder_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<ListPage, ProviderError>;

    /// Create a folder named `name` under `parent_id`, returning the new id.
    fn create_folder(&mut self, name: &str, parent_id: &str) -> Result<String, ProviderError>;

    /// Copy `file_id` into `new_parent_id`, keeping its name.
    fn copy_file(&mut self, file_id: &str, new_parent_id: &str) -> Result<(), ProviderError>;
}

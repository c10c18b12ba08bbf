//! In-memory remote tree
//!
//! Keeps a folder hierarchy in maps, records every call made against it,
//! and can be scripted to fail specific listings, folder creations or
//! file copies. Created folders get ids `created-1`, `created-2`, ...

use super::{ListPage, ProviderError, RemoteTree};
use crate::types::TreeItem;
use std::collections::{HashMap, VecDeque};

/// A call observed by [`MemoryTree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    List {
        folder_id: String,
        page_token: Option<String>,
    },
    CreateFolder {
        name: String,
        parent_id: String,
    },
    CopyFile {
        file_id: String,
        parent_id: String,
    },
}

#[derive(Debug, Default)]
pub struct MemoryTree {
    children: HashMap<String, Vec<TreeItem>>,
    max_page_size: Option<usize>,
    list_failures: HashMap<String, ProviderError>,
    create_failures: HashMap<String, ProviderError>,
    copy_failures: HashMap<String, VecDeque<ProviderError>>,
    created_count: usize,
    calls: Vec<RemoteCall>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subfolder `id` named `name` under `parent`.
    pub fn add_folder(&mut self, parent: &str, id: &str, name: &str) -> &mut Self {
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(TreeItem::folder(id, name));
        self
    }

    /// Add a file `id` named `name` under `parent`.
    pub fn add_file(&mut self, parent: &str, id: &str, name: &str) -> &mut Self {
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(TreeItem::file(id, name));
        self
    }

    /// Cap page size below whatever the caller asks for, to force pagination.
    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = Some(size.max(1));
        self
    }

    /// Every listing of `folder_id` fails with `error`.
    pub fn fail_listing(&mut self, folder_id: &str, error: ProviderError) -> &mut Self {
        self.list_failures.insert(folder_id.to_string(), error);
        self
    }

    /// Creating a folder named `name` fails with `error`.
    pub fn fail_create(&mut self, name: &str, error: ProviderError) -> &mut Self {
        self.create_failures.insert(name.to_string(), error);
        self
    }

    /// The next copies of `file_id` fail with `errors`, one per call, in order.
    pub fn fail_copy(
        &mut self,
        file_id: &str,
        errors: impl IntoIterator<Item = ProviderError>,
    ) -> &mut Self {
        self.copy_failures
            .entry(file_id.to_string())
            .or_default()
            .extend(errors);
        self
    }

    pub fn calls(&self) -> &[RemoteCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of `create_folder` calls seen
    pub fn create_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RemoteCall::CreateFolder { .. }))
            .count()
    }

    /// File ids passed to `copy_file`, in call order (retries included)
    pub fn copy_calls(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RemoteCall::CopyFile { file_id, .. } => Some(file_id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of `list_children` calls seen for `folder_id`
    pub fn list_calls(&self, folder_id: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RemoteCall::List { folder_id: id, .. } if id == folder_id))
            .count()
    }
}

impl RemoteTree for MemoryTree {
    fn list_children(
        &mut self,
        folder_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<ListPage, ProviderError> {
        self.calls.push(RemoteCall::List {
            folder_id: folder_id.to_string(),
            page_token: page_token.map(str::to_string),
        });

        if let Some(error) = self.list_failures.get(folder_id) {
            return Err(error.clone());
        }

        let offset = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| ProviderError::new("invalid page token").with_status(400))?,
            None => 0,
        };
        let mut size = (page_size as usize).max(1);
        if let Some(max) = self.max_page_size {
            size = size.min(max);
        }

        let all = self.children.get(folder_id).map(Vec::as_slice).unwrap_or(&[]);
        let end = (offset + size).min(all.len());
        let items = all.get(offset..end).map(<[TreeItem]>::to_vec).unwrap_or_default();
        let next_page_token = (end < all.len()).then(|| end.to_string());

        Ok(ListPage {
            items,
            next_page_token,
        })
    }

    fn create_folder(&mut self, name: &str, parent_id: &str) -> Result<String, ProviderError> {
        self.calls.push(RemoteCall::CreateFolder {
            name: name.to_string(),
            parent_id: parent_id.to_string(),
        });

        if let Some(error) = self.create_failures.get(name) {
            return Err(error.clone());
        }

        self.created_count += 1;
        let id = format!("created-{}", self.created_count);
        self.children.entry(id.clone()).or_default();
        Ok(id)
    }

    fn copy_file(&mut self, file_id: &str, new_parent_id: &str) -> Result<(), ProviderError> {
        self.calls.push(RemoteCall::CopyFile {
            file_id: file_id.to_string(),
            parent_id: new_parent_id.to_string(),
        });

        if let Some(error) = self
            .copy_failures
            .get_mut(file_id)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        Ok(())
    }
}

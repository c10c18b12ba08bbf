//! TreeItem - One child entry returned by a folder listing

/// Whether a listed item is a folder or a regular file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Folder,
    File,
}

/// A child of a remote folder. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    /// Provider identifier
    pub id: String,

    /// Display name
    pub name: String,

    pub kind: ItemKind,
}

impl TreeItem {
    /// Create a folder item
    pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Folder,
        }
    }

    /// Create a file item
    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::File,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }
}

//! The vault and workspace operations calpro needs from its host.
//!
//! Everything that touches notes goes through [`Host`], so the calendar logic
//! runs the same against a directory on disk or the in-memory [`MemoryHost`].

mod memory;

pub use memory::{HostCall, MemoryHost};

use async_trait::async_trait;

use crate::error::CalProResult;

/// An item in the vault, addressed by its normalized vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(String),
    Folder(String),
}

impl Entry {
    pub fn path(&self) -> &str {
        match self {
            Entry::File(path) | Entry::Folder(path) => path,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }
}

#[async_trait]
pub trait Host: Send + Sync {
    /// Whether anything exists at `path`.
    async fn exists(&self, path: &str) -> CalProResult<bool>;

    /// Create one folder. Fails if the parent folder is missing.
    async fn create_folder(&self, path: &str) -> CalProResult<()>;

    async fn lookup(&self, path: &str) -> CalProResult<Option<Entry>>;

    /// Create a new file with `content`. Fails if something already exists
    /// at `path`.
    async fn create(&self, path: &str, content: &str) -> CalProResult<Entry>;

    async fn read(&self, entry: &Entry) -> CalProResult<String>;

    /// Show the note at `path` to the user.
    async fn open(&self, path: &str) -> CalProResult<()>;

    /// Show a short preview of the note at `path`.
    async fn emit_hover_preview(&self, path: &str) -> CalProResult<()>;
}

//! In-memory host, used by tests and embedders.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{Entry, Host};
use crate::error::{CalProError, CalProResult};
use crate::resolver::normalize_path;

/// A host operation, as recorded by [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Exists(String),
    CreateFolder(String),
    Lookup(String),
    Create { path: String, content: String },
    Read(String),
    Open(String),
    HoverPreview(String),
}

#[derive(Default)]
struct MemoryState {
    folders: BTreeSet<String>,
    files: BTreeMap<String, String>,
    calls: Vec<HostCall>,
}

/// Vault held in memory. Records every call made through [`Host`].
#[derive(Default)]
pub struct MemoryHost {
    state: Mutex<MemoryState>,
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

impl MemoryState {
    fn folder_exists(&self, path: &str) -> bool {
        path.is_empty() || self.folders.contains(path)
    }

    fn add_folder_all(&mut self, path: &str) {
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            self.folders.insert(current.clone());
        }
    }

    fn entry(&self, path: &str) -> Option<Entry> {
        if self.files.contains_key(path) {
            Some(Entry::File(path.to_string()))
        } else if !path.is_empty() && self.folders.contains(path) {
            Some(Entry::Folder(path.to_string()))
        } else {
            None
        }
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent folders.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        let path = normalize_path(path);
        {
            let mut state = self.lock();
            state.add_folder_all(parent_of(&path));
            state.files.insert(path, content.to_string());
        }
        self
    }

    pub fn with_folder(self, path: &str) -> Self {
        self.lock().add_folder_all(&normalize_path(path));
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.lock().files.get(&normalize_path(path)).cloned()
    }

    pub fn has_folder(&self, path: &str) -> bool {
        self.lock().folder_exists(&normalize_path(path))
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: HostCall) -> MutexGuard<'_, MemoryState> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl Host for MemoryHost {
    async fn exists(&self, path: &str) -> CalProResult<bool> {
        let state = self.record(HostCall::Exists(path.to_string()));
        let path = normalize_path(path);
        Ok(state.folder_exists(&path) || state.files.contains_key(&path))
    }

    async fn create_folder(&self, path: &str) -> CalProResult<()> {
        let mut state = self.record(HostCall::CreateFolder(path.to_string()));
        let path = normalize_path(path);

        if state.entry(&path).is_some() {
            return Err(CalProError::Host(format!("Folder already exists: {}", path)));
        }
        if !state.folder_exists(parent_of(&path)) {
            return Err(CalProError::Host(format!("Parent folder missing for {}", path)));
        }

        state.folders.insert(path);
        Ok(())
    }

    async fn lookup(&self, path: &str) -> CalProResult<Option<Entry>> {
        let state = self.record(HostCall::Lookup(path.to_string()));
        Ok(state.entry(&normalize_path(path)))
    }

    async fn create(&self, path: &str, content: &str) -> CalProResult<Entry> {
        let mut state = self.record(HostCall::Create {
            path: path.to_string(),
            content: content.to_string(),
        });
        let path = normalize_path(path);

        if state.entry(&path).is_some() {
            return Err(CalProError::Host(format!("File already exists: {}", path)));
        }
        if !state.folder_exists(parent_of(&path)) {
            return Err(CalProError::Host(format!("Parent folder missing for {}", path)));
        }

        state.files.insert(path.clone(), content.to_string());
        Ok(Entry::File(path))
    }

    async fn read(&self, entry: &Entry) -> CalProResult<String> {
        let state = self.record(HostCall::Read(entry.path().to_string()));
        state
            .files
            .get(entry.path())
            .cloned()
            .ok_or_else(|| CalProError::Host(format!("Not a file: {}", entry.path())))
    }

    async fn open(&self, path: &str) -> CalProResult<()> {
        self.lock().calls.push(HostCall::Open(path.to_string()));
        Ok(())
    }

    async fn emit_hover_preview(&self, path: &str) -> CalProResult<()> {
        self.lock().calls.push(HostCall::HoverPreview(path.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_folder_requires_parent() {
        let host = MemoryHost::new();

        assert!(host.create_folder("a/b").await.is_err());
        host.create_folder("a").await.unwrap();
        host.create_folder("a/b").await.unwrap();
        assert!(host.create_folder("a/b").await.is_err());
        assert!(host.exists("a/b").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_and_read_file() {
        let host = MemoryHost::new().with_folder("Notes");

        let entry = host.create("Notes/today.md", "hello").await.unwrap();
        assert!(entry.is_file());
        assert_eq!(host.read(&entry).await.unwrap(), "hello");
        assert!(host.create("Notes/today.md", "again").await.is_err());
        assert!(host.create("Missing/today.md", "").await.is_err());
    }

    #[tokio::test]
    async fn test_lookup_distinguishes_files_and_folders() {
        let host = MemoryHost::new().with_file("A/B/note.md", "x");

        assert_eq!(
            host.lookup("A/B").await.unwrap(),
            Some(Entry::Folder("A/B".to_string()))
        );
        assert_eq!(
            host.lookup("A/B/note.md").await.unwrap(),
            Some(Entry::File("A/B/note.md".to_string()))
        );
        assert_eq!(host.lookup("A/C").await.unwrap(), None);
        assert!(host.read(&Entry::Folder("A/B".to_string())).await.is_err());
    }

    #[tokio::test]
    async fn test_calls_are_recorded_until_cleared() {
        let host = MemoryHost::new().with_folder("Notes");

        host.exists("Notes").await.unwrap();
        host.open("Notes/a.md").await.unwrap();
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Exists("Notes".to_string()),
                HostCall::Open("Notes/a.md".to_string()),
            ]
        );

        host.clear_calls();
        assert!(host.calls().is_empty());

        host.emit_hover_preview("Notes/a.md").await.unwrap();
        assert_eq!(host.calls(), vec![HostCall::HoverPreview("Notes/a.md".to_string())]);
    }
}

//! In-memory File System
//!
//! A `FileSystem` backed by a shared map. Used by tests and anywhere a build
//! should run without touching disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// In-memory file system; clones share the same files
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Insert or replace a file
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.lock().insert(path.into(), content.into());
    }

    /// Content of a file, if present
    pub fn get(&self, path: &Path) -> Option<String> {
        self.lock().get(path).cloned()
    }

    /// All paths, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, String>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.get(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.insert(path, content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.lock()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }
}

//! Content hash tracking for change detection
//!
//! Editors often touch a file without changing it. A change is only acted
//! on when the content hash differs from the last one seen.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::ContentHash;

/// What the tracker concluded about a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChange {
    /// New file or different content
    Modified,
    /// Tracked file no longer readable
    Removed,
    /// Same content as last seen, or an untracked file that cannot be read
    Unchanged,
}

/// Last seen content hash per file
#[derive(Debug, Default)]
pub struct ContentTracker {
    hashes: HashMap<PathBuf, ContentHash>,
}

impl ContentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current hashes of `paths`; unreadable files are skipped
    pub fn seed(&mut self, paths: &[PathBuf], fs: &dyn FileSystem) {
        for path in paths {
            if let Ok(hash) = fs.hash(path) {
                self.hashes.insert(path.clone(), hash);
            }
        }
    }

    /// Compare `path` against the last seen hash and remember the new one
    pub fn observe(&mut self, path: &Path, fs: &dyn FileSystem) -> ContentChange {
        match fs.hash(path) {
            Ok(hash) => {
                if self.hashes.get(path) == Some(&hash) {
                    return ContentChange::Unchanged;
                }
                self.hashes.insert(path.to_path_buf(), hash);
                ContentChange::Modified
            }
            Err(_) => {
                if self.hashes.remove(path).is_some() {
                    ContentChange::Removed
                } else {
                    ContentChange::Unchanged
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

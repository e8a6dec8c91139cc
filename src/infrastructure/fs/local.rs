//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes are atomic (temp file + rename) and skip files whose content is
/// already identical, so unchanged outputs keep their timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        if let Ok(existing) = std::fs::read(path) {
            if existing == content.as_bytes() {
                return Ok(());
            }
        }
        atomic_write(path, content.as_bytes())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(path).map_err(|e| FsError::from_io(path, e))
    }
}

/// Write `content` to `path` atomically, creating parent directories.
///
/// The data goes to a temp file in the same directory which is then renamed
/// over the destination, so readers never observe a half-written file.
pub fn atomic_write(path: &Path, content: &[u8]) -> FsResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(path, e))?;
    temp.write_all(content)
        .and_then(|_| temp.flush())
        .map_err(|e| FsError::from_io(path, e))?;
    temp.persist(path)
        .map_err(|e| FsError::from_io(path, e.error))?;
    Ok(())
}

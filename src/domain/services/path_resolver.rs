//! Path Resolver
//!
//! Resolves an include path against the including file's directory. Purely
//! lexical: the file system is never touched, so a path that does not exist
//! still resolves and fails later when the compiler opens it.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Error when a raw path cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path is empty or whitespace only
    #[error("path is empty")]
    Empty,
}

/// A resolved path and how it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub was_relative: bool,
}

/// Resolve `raw_path` against `base_dir`.
///
/// Backslashes are treated as separators and `.`/`..` segments are collapsed.
/// Absolute inputs ignore `base_dir`.
pub fn resolve(base_dir: &Path, raw_path: &str) -> Result<ResolvedPath, PathError> {
    if raw_path.trim().is_empty() {
        return Err(PathError::Empty);
    }

    let unified = raw_path.replace('\\', "/");
    let candidate = Path::new(&unified);
    let was_relative = !candidate.is_absolute();

    let joined = if was_relative {
        base_dir.join(candidate)
    } else {
        candidate.to_path_buf()
    };

    Ok(ResolvedPath {
        path: normalize(&joined),
        was_relative,
    })
}

/// Collapse `.` and `..` segments without consulting the file system.
///
/// `..` above the root is dropped; leading `..` on a relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

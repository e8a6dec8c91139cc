//! Partial Override Resolver
//!
//! Sass treats `_name.scss` as a partial. An import of `name` picks up
//! `_name.scss` when it exists, even if `name.scss` exists too. This depends
//! on what is on disk right now, so the probe runs on every resolution and
//! nothing is cached: the last observed state wins.

use std::path::{Path, PathBuf};

use crate::domain::ports::FileSystem;

/// File name prefix marking a partial
pub const PARTIAL_PREFIX: char = '_';

/// Whether `path` names a partial file
pub fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(PARTIAL_PREFIX))
}

/// Prefer the `_`-prefixed sibling of `path` when it exists
pub fn apply_partial_override(path: &Path, fs: &dyn FileSystem) -> PathBuf {
    if is_partial(path) {
        return path.to_path_buf();
    }

    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return path.to_path_buf();
    };

    let sibling = path.with_file_name(format!("{}{}", PARTIAL_PREFIX, name));
    if fs.exists(&sibling) {
        sibling
    } else {
        path.to_path_buf()
    }
}

/// The plain sibling a partial takes over, e.g. `theme.scss` for `_theme.scss`
///
/// Imports that resolved to the plain file before the partial appeared now
/// resolve to the partial, so both names must be treated as changed.
pub fn shadowed_sibling(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let plain = name.strip_prefix(PARTIAL_PREFIX)?;
    if plain.is_empty() {
        return None;
    }
    Some(path.with_file_name(plain))
}

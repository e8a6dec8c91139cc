//! Include statements and the paths they resolve to

use std::ops::Range;
use std::path::{Path, PathBuf};

/// One include-statement scan result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeMatch {
    /// Byte span of the whole statement, keyword through terminator
    pub span: Range<usize>,
    /// Raw path tokens in source order; empty when the statement is not an include
    pub tokens: Vec<String>,
}

impl IncludeMatch {
    /// Offset just past the statement, where the next scan starts
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Whether the statement named any files
    pub fn is_include(&self) -> bool {
        !self.tokens.is_empty()
    }
}

/// A raw include token resolved to a concrete path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedInclude {
    /// Token as written in the source
    pub token: String,
    /// Absolute path after extension, relative-path and partial resolution
    pub path: PathBuf,
    /// Whether the token was relative to the including file
    pub was_relative: bool,
    /// Whether the `_`-prefixed sibling replaced the named file
    pub overridden: bool,
}

impl ResolvedInclude {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

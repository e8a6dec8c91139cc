//! Ignore patterns value object
//!
//! Loads `.kilnignore` plus the `[build].ignore` config list and matches
//! them with gitignore semantics.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the ignore file looked up at the build root
pub const IGNORE_FILE_NAME: &str = ".kilnignore";

/// Maximum file size for `.kilnignore` (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Compiled set of ignore patterns rooted at the build root.
#[derive(Debug)]
pub struct IgnorePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Create an empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Load `.kilnignore` from `root` and append `extra` patterns.
    ///
    /// A missing ignore file is not an error.
    pub fn load(root: &Path, extra: &[String]) -> Result<Self, IgnoreError> {
        let ignore_path = root.join(IGNORE_FILE_NAME);

        let content = if ignore_path.exists() {
            let metadata = fs::metadata(&ignore_path)?;
            if metadata.len() > MAX_FILE_SIZE {
                return Err(IgnoreError::FileTooLarge {
                    path: ignore_path,
                    size: metadata.len(),
                    limit: MAX_FILE_SIZE,
                });
            }
            fs::read_to_string(&ignore_path)?
        } else {
            String::new()
        };

        let mut lines: Vec<&str> = content.lines().collect();
        lines.extend(extra.iter().map(String::as_str));
        Self::from_lines(root, &ignore_path, &lines)
    }

    /// Parse patterns from string content.
    pub fn from_content(root: &Path, source_path: &Path, content: &str) -> Result<Self, IgnoreError> {
        let lines: Vec<&str> = content.lines().collect();
        Self::from_lines(root, source_path, &lines)
    }

    fn from_lines(root: &Path, source_path: &Path, lines: &[&str]) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for (line_num, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(IgnoreError::TooManyPatterns {
                    path: source_path.to_path_buf(),
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            if let Err(e) = builder.add_line(Some(source_path.to_path_buf()), trimmed) {
                return Err(IgnoreError::InvalidPattern {
                    path: source_path.to_path_buf(),
                    line: line_num + 1,
                    pattern: trimmed.to_string(),
                    message: e.to_string(),
                });
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check if a path (relative to the root, or absolute under it) is ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if self.pattern_count == 0 {
            return false;
        }
        let rel = path.strip_prefix(self.matcher.path()).unwrap_or(path);
        if rel.is_absolute() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel, is_dir)
            .is_ignore()
    }

    /// Get the number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Check if this is an empty pattern set.
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Errors that can occur when loading ignore patterns.
#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error(".kilnignore exceeds {}KB limit ({size} bytes): {}", .limit / 1024, .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error(".kilnignore has {count} patterns, exceeds {limit} limit: {}", .path.display())]
    TooManyPatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    #[error("invalid ignore pattern at {}:{line}: '{pattern}' - {message}", .path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    #[error("failed to build ignore matcher: {0}")]
    BuildFailed(String),

    #[error("IO error reading .kilnignore: {0}")]
    Io(#[from] std::io::Error),
}

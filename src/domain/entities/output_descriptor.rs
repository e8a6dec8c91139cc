//! OutputDescriptor entity - one artifact a source file produces
//!
//! Engines decide the descriptors, fill in `compiled` (or `error`) during
//! generation, and the orchestrator persists the ones that succeeded.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// An output artifact ready to be generated and written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    /// Destination path (absolute)
    path: PathBuf,
    /// Content carried forward into generation
    contents: String,
    /// Generated content, set once generation succeeds
    pub compiled: Option<String>,
    /// Fatal generation error for this artifact
    pub error: Option<String>,
}

impl OutputDescriptor {
    /// Create a descriptor for `path` carrying `contents` into generation
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            compiled: None,
            error: None,
        }
    }

    /// Descriptor whose content is already generated
    pub fn generated(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            path: path.into(),
            contents: String::new(),
            compiled: Some(content),
            error: None,
        }
    }

    /// Get the destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the content handed to generation
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Whether generation produced content without error
    pub fn is_generated(&self) -> bool {
        self.compiled.is_some() && self.error.is_none()
    }

    /// Content to persist: the generated text if any
    pub fn output(&self) -> Option<&str> {
        if self.error.is_some() {
            return None;
        }
        self.compiled.as_deref()
    }

    /// SHA-256 of the content to persist
    pub fn content_hash(&self) -> Option<ContentHash> {
        self.output().map(ContentHash::from_content)
    }
}

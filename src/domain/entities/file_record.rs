//! FileRecord entity - one source file under processing
//!
//! The orchestrator creates a record per discovered file and drives it
//! through the engine hooks. Each hook moves the record forward one state;
//! a record never re-enters an earlier state within a pass.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::{OutputDescriptor, ResolvedInclude};
use crate::domain::value_objects::{PipelineFeatures, StyleOptions};
use crate::error::{KilnError, KilnResult};

/// Processing state of a [`FileRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingState {
    Discovered,
    Classified,
    IncludesResolved,
    OutputDecided,
    Generated,
    Persisted,
    Skipped,
    Errored,
}

impl ProcessingState {
    /// Whether no further transition is possible
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProcessingState::Persisted | ProcessingState::Skipped | ProcessingState::Errored
        )
    }

    fn successor(self) -> Option<ProcessingState> {
        match self {
            ProcessingState::Discovered => Some(ProcessingState::Classified),
            ProcessingState::Classified => Some(ProcessingState::IncludesResolved),
            ProcessingState::IncludesResolved => Some(ProcessingState::OutputDecided),
            ProcessingState::OutputDecided => Some(ProcessingState::Generated),
            ProcessingState::Generated => Some(ProcessingState::Persisted),
            _ => None,
        }
    }

    /// Whether `self -> next` is a legal transition
    pub fn can_advance_to(self, next: ProcessingState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            ProcessingState::Skipped | ProcessingState::Errored => true,
            other => self.successor() == Some(other),
        }
    }
}

/// A source file and everything learned about it during one pass
#[derive(Debug, Clone)]
pub struct FileRecord {
    path: PathBuf,
    contents: String,
    state: ProcessingState,
    /// File is include-only and never produces standalone output
    pub is_partial: bool,
    /// Set when the file must not produce output
    pub skip_reason: Option<String>,
    /// Locally resolved style configuration
    pub options: StyleOptions,
    /// Generic passes the orchestrator may run over this file
    pub features: PipelineFeatures,
    /// Includes discovered for this file, in source order
    pub includes: Vec<ResolvedInclude>,
    /// Fatal error for this file
    pub error: Option<String>,
    /// Non-fatal problems (e.g. a side artifact failed to write)
    pub warnings: Vec<String>,
    /// Extra generated artifacts, such as source maps
    ///
    /// Persisted after the primary outputs; a failed write is only a warning.
    pub side_outputs: Vec<OutputDescriptor>,
}

impl FileRecord {
    /// Create a record in the `Discovered` state
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            state: ProcessingState::Discovered,
            is_partial: false,
            skip_reason: None,
            options: StyleOptions::default(),
            features: PipelineFeatures::default(),
            includes: Vec::new(),
            error: None,
            warnings: Vec::new(),
            side_outputs: Vec::new(),
        }
    }

    /// Resolved local options for this file
    pub fn with_options(mut self, options: StyleOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the absolute source path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw source text
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Get the current state
    pub fn state(&self) -> ProcessingState {
        self.state
    }

    /// Whether an engine asked for this file to be skipped
    pub fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }

    /// Move to `next`, rejecting backward and post-terminal transitions
    pub fn advance(&mut self, next: ProcessingState) -> KilnResult<()> {
        if !self.state.can_advance_to(next) {
            return Err(KilnError::InvalidTransition {
                path: self.path.clone(),
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Record a fatal error and end in `Errored`
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        if !self.state.is_terminal() {
            self.state = ProcessingState::Errored;
        }
    }
}

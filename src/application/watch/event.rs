//! Watch event types and debouncing state

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::application::pipeline::BuildReport;

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted { root: String, extensions: Vec<String> },
    /// Source or config file changed
    FileChanged { path: String },
    /// Build started
    BuildStarted { files: usize },
    /// Build completed
    BuildComplete {
        persisted: usize,
        skipped: usize,
        errored: usize,
        warnings: usize,
    },
    /// Error occurred, for one file or for the watcher itself
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        message: String,
    },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Summary event for a finished build
    pub fn build_complete(report: &BuildReport) -> Self {
        WatchEvent::BuildComplete {
            persisted: report.persisted,
            skipped: report.skipped,
            errored: report.errored,
            warnings: report.warnings,
        }
    }

    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Watcher state for debouncing
#[derive(Debug, Default)]
pub struct WatcherState {
    pending_changes: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
}

impl WatcherState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Check if the debounce period has passed and there are pending changes
    pub fn should_rebuild(&self) -> bool {
        match self.last_change {
            Some(last) => {
                !self.pending_changes.is_empty()
                    && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
            }
            None => false,
        }
    }

    /// Take all pending changes, sorted, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        self.last_change = None;
        std::mem::take(&mut self.pending_changes).into_iter().collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}

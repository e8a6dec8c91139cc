//! Watch Use Case implementation

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::application::pipeline::{BuildPipeline, BuildReport};
use crate::config::CONFIG_FILE_NAME;
use crate::error::{KilnError, KilnResult};

use super::cache::{ContentChange, ContentTracker};
use super::event::{WatchEvent, WatcherState};

/// Kind of file the watcher reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchedFile {
    /// A file some engine builds
    Source,
    /// A `kiln.toml` whose subtree must be rebuilt
    Config,
}

/// Watch Use Case
///
/// Runs an initial build, then rebuilds whatever a change affects.
/// This is the main entry point for the `kiln watch` command.
pub struct WatchUseCase {
    pipeline: BuildPipeline,
}

impl WatchUseCase {
    pub fn new(pipeline: BuildPipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &BuildPipeline {
        &self.pipeline
    }

    /// Start watching (blocking)
    ///
    /// Blocks until `running` is cleared. A build in progress when that
    /// happens still finishes.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> KilnResult<()>
    where
        F: Fn(WatchEvent),
    {
        let root = self.pipeline.root().to_path_buf();
        on_event(WatchEvent::WatchStarted {
            root: root.display().to_string(),
            extensions: self
                .pipeline
                .registry()
                .engines()
                .iter()
                .flat_map(|engine| engine.source_extensions().iter().map(|e| e.to_string()))
                .collect(),
        });

        let mut tracker = ContentTracker::new();
        let sources = match self.pipeline.discover_sources() {
            Ok(sources) => sources,
            Err(e) => {
                on_event(WatchEvent::Error {
                    path: None,
                    message: e.to_string(),
                });
                return Err(e);
            }
        };
        tracker.seed(&sources, self.pipeline.file_system());
        self.run_build(&sources, &on_event);

        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| KilnError::Watch(e.to_string()))?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| KilnError::Watch(e.to_string()))?;

        // notify sometimes reports existing files right after registration
        let cooldown_end = Instant::now() + Duration::from_millis(500);
        while Instant::now() < cooldown_end && running.load(Ordering::SeqCst) {
            let _ = rx.recv_timeout(Duration::from_millis(50));
        }

        let mut state = WatcherState::new();
        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                if self.classify(&path).is_some() {
                    match tracker.observe(&path, self.pipeline.file_system()) {
                        ContentChange::Unchanged => {}
                        ContentChange::Modified | ContentChange::Removed => state.add_change(path),
                    }
                }
            }

            if state.should_rebuild() {
                let changes = state.take_changes();
                self.handle_changes(&changes, &on_event);
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    /// Whether the watcher reacts to `path`, and how
    pub fn classify(&self, path: &Path) -> Option<WatchedFile> {
        if path.file_name().is_some_and(|name| name == CONFIG_FILE_NAME) {
            return Some(WatchedFile::Config);
        }
        if self.pipeline.is_buildable(path) {
            return Some(WatchedFile::Source);
        }
        None
    }

    /// Rebuild everything affected by a debounced batch of changes
    pub fn handle_changes<F>(&self, changes: &[PathBuf], on_event: &F) -> BuildReport
    where
        F: Fn(WatchEvent),
    {
        let mut changed_sources: Vec<PathBuf> = Vec::new();
        let mut config_dirs: Vec<PathBuf> = Vec::new();

        for path in changes {
            on_event(WatchEvent::FileChanged {
                path: path.display().to_string(),
            });
            match self.classify(path) {
                Some(WatchedFile::Source) => changed_sources.push(path.clone()),
                Some(WatchedFile::Config) => {
                    if let Some(dir) = path.parent() {
                        config_dirs.push(dir.to_path_buf());
                    }
                }
                None => {}
            }
        }

        if !config_dirs.is_empty() {
            info!(count = config_dirs.len(), "configuration changed");
            if config_dirs.iter().any(|dir| dir == self.pipeline.root()) {
                match self.pipeline.reload_root_config() {
                    Ok(warnings) => {
                        for warning in warnings {
                            warn!("{}", warning);
                        }
                    }
                    Err(e) => on_event(WatchEvent::Error {
                        path: Some(self.pipeline.root().join(CONFIG_FILE_NAME).display().to_string()),
                        message: e.to_string(),
                    }),
                }
            }
            self.pipeline.config_resolver().invalidate();
            match self.pipeline.discover_sources() {
                Ok(sources) => changed_sources.extend(
                    sources
                        .into_iter()
                        .filter(|s| config_dirs.iter().any(|dir| s.starts_with(dir))),
                ),
                Err(e) => on_event(WatchEvent::Error {
                    path: None,
                    message: e.to_string(),
                }),
            }
        }

        let targets = self.pipeline.rebuild_targets(&changed_sources);
        debug!(changes = changes.len(), targets = targets.len(), "rebuilding");
        self.run_build(&targets, on_event)
    }

    fn run_build<F>(&self, paths: &[PathBuf], on_event: &F) -> BuildReport
    where
        F: Fn(WatchEvent),
    {
        on_event(WatchEvent::BuildStarted { files: paths.len() });

        // Shutdown waits for the current build instead of cancelling it.
        let cancel = AtomicBool::new(false);
        let report = self.pipeline.build(paths, &cancel);

        for outcome in report.outcomes.iter().filter(|o| o.is_errored()) {
            on_event(WatchEvent::Error {
                path: Some(outcome.path.display().to_string()),
                message: outcome.error.clone().unwrap_or_default(),
            });
        }
        on_event(WatchEvent::build_complete(&report));
        report
    }
}

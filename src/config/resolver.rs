//! Cascading per-directory configuration
//!
//! Every directory between the build root and a file may carry its own
//! `kiln.toml`. Only the `[sass]` table cascades; the nearest directory wins
//! per field and the root config (with env overrides) is the base.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, RwLock};

use tracing::warn;

use crate::domain::value_objects::StyleOptions;

use super::loader;
use super::types::{Config, SassConfig, CONFIG_FILE_NAME};

/// Resolves local `StyleOptions` for files under one build root
#[derive(Debug)]
pub struct ConfigResolver {
    root: PathBuf,
    /// Root `[sass]` table; replaced when the root `kiln.toml` is reloaded
    base: RwLock<SassConfig>,
    /// Parsed `[sass]` table per directory; `None` when the directory has none
    cache: Mutex<HashMap<PathBuf, Option<SassConfig>>>,
}

impl ConfigResolver {
    /// `config` is the already-loaded root configuration
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            root: root.into(),
            base: RwLock::new(config.sass),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The root `[sass]` table every file inherits from
    pub fn base(&self) -> SassConfig {
        *self.base.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Swap in a freshly loaded root configuration and drop cached directories
    pub fn set_base(&self, config: &Config) {
        *self.base.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = config.sass;
        self.invalidate();
    }

    /// Options for the file at `path`
    pub fn resolve_for(&self, path: &Path) -> StyleOptions {
        let base = self.base();
        let Some(dir) = path.parent() else {
            return base.to_options();
        };
        let Ok(relative) = dir.strip_prefix(&self.root) else {
            return base.to_options();
        };

        // Nearest directory first, stopping before the root itself.
        let mut merged = SassConfig::default();
        let mut current = self.root.join(relative);
        while current != self.root {
            if let Some(local) = self.local_config(&current) {
                merged = merged.inherit(local);
            }
            if !current.pop() {
                break;
            }
        }

        merged.inherit(base).to_options()
    }

    /// Forget cached directory configs, e.g. after a `kiln.toml` changed
    pub fn invalidate(&self) {
        self.lock().clear();
    }

    fn local_config(&self, dir: &Path) -> Option<SassConfig> {
        if let Some(cached) = self.lock().get(dir) {
            return *cached;
        }

        let file = dir.join(CONFIG_FILE_NAME);
        let parsed = if file.is_file() {
            match loader::load_with_warnings(&file) {
                Ok((config, warnings)) => {
                    for warning in warnings {
                        warn!("{}", warning);
                    }
                    Some(config.sass)
                }
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "ignoring invalid nested config");
                    None
                }
            }
        } else {
            None
        };

        self.lock().insert(dir.to_path_buf(), parsed);
        parsed
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Option<SassConfig>>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

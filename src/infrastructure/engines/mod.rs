//! Engines
//!
//! Concrete implementations of the `Engine` port, one per file family, and
//! the registry that picks an engine by file extension.

pub mod sass;

pub use sass::SassEngine;

use std::path::Path;
use std::sync::Arc;

use crate::domain::ports::{Engine, FileSystem, StyleCompiler};

/// Build every engine shipped with Kiln
pub fn all_engines(
    compiler: Arc<dyn StyleCompiler>,
    fs: Arc<dyn FileSystem>,
) -> Vec<Box<dyn Engine>> {
    vec![Box::new(SassEngine::new(compiler, fs))]
}

/// Maps file extensions to engines
#[derive(Default)]
pub struct EngineRegistry {
    engines: Vec<Box<dyn Engine>>,
}

impl EngineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in engine
    pub fn with_defaults(compiler: Arc<dyn StyleCompiler>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            engines: all_engines(compiler, fs),
        }
    }

    /// Add an engine; earlier registrations win on overlapping extensions
    pub fn register(mut self, engine: Box<dyn Engine>) -> Self {
        self.engines.push(engine);
        self
    }

    /// Engine handling `path`, if any
    pub fn engine_for(&self, path: &Path) -> Option<&dyn Engine> {
        self.engines
            .iter()
            .find(|engine| engine.handles(path))
            .map(|engine| engine.as_ref())
    }

    /// Whether some engine handles `path`
    pub fn is_source(&self, path: &Path) -> bool {
        self.engine_for(path).is_some()
    }

    /// Registered engines
    pub fn engines(&self) -> &[Box<dyn Engine>] {
        &self.engines
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.engines.iter().map(|engine| engine.name()))
            .finish()
    }
}

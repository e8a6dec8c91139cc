//! Command handlers for the kiln binary

pub mod build;
pub mod deps;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use kiln::application::BuildPipeline;
use kiln::config::Config;
use kiln::domain::ports::FileSystem;
use kiln::infrastructure::{EngineRegistry, LocalFs, SasscCompiler};

/// Canonical build root, failing early when it does not exist
pub fn canonical_root(root: &Path) -> Result<PathBuf> {
    root.canonicalize()
        .with_context(|| format!("build root not found: {}", root.display()))
}

/// Load the configuration for `root` and wire up the local pipeline
pub fn open_pipeline(root: &Path, json: bool) -> Result<BuildPipeline> {
    let (config, warnings) = Config::load_for_root(root)?;
    for warning in &warnings {
        if json {
            tracing::warn!("{}", warning);
        } else {
            eprintln!("warning: {}", warning);
        }
    }

    let fs: Arc<dyn FileSystem> = Arc::new(LocalFs::new());
    let compiler = SasscCompiler::new(config.compiler.program.clone())
        .with_include_paths(config.compiler.include_paths_under(root));
    if !compiler.is_available() {
        tracing::warn!(
            program = %compiler.program().display(),
            "style compiler not found; every build will fail"
        );
    }

    let registry = EngineRegistry::with_defaults(Arc::new(compiler), fs.clone());
    Ok(BuildPipeline::new(root, config, registry, fs)?)
}

/// Path of `path` relative to `root` for display
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

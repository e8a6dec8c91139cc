//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{OutputStyle, StyleOptions};
use crate::error::KilnResult;

use super::loader::{self, ConfigWarning};

/// Name of the configuration file, at the build root and in any subdirectory
pub const CONFIG_FILE_NAME: &str = "kiln.toml";

/// Style options for a directory tree
///
/// Every field is optional so that a nested `kiln.toml` only overrides what
/// it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SassConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_style: Option<OutputStyle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_source_maps: Option<bool>,
}

impl SassConfig {
    /// Fill unset fields from `parent`
    pub fn inherit(self, parent: SassConfig) -> SassConfig {
        SassConfig {
            output_style: self.output_style.or(parent.output_style),
            generate_source_maps: self.generate_source_maps.or(parent.generate_source_maps),
        }
    }

    /// Concrete options, falling back to the defaults
    pub fn to_options(self) -> StyleOptions {
        let defaults = StyleOptions::default();
        StyleOptions {
            output_style: self.output_style.unwrap_or(defaults.output_style),
            generate_source_maps: self
                .generate_source_maps
                .unwrap_or(defaults.generate_source_maps),
        }
    }
}

/// External compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_program")]
    pub program: PathBuf,

    /// Extra load paths, relative to the build root unless absolute
    #[serde(default)]
    pub include_paths: Vec<PathBuf>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            include_paths: Vec::new(),
        }
    }
}

fn default_program() -> PathBuf {
    PathBuf::from(crate::infrastructure::compiler::DEFAULT_PROGRAM)
}

impl CompilerConfig {
    /// Include paths made absolute against `root`
    pub fn include_paths_under(&self, root: &Path) -> Vec<PathBuf> {
        self.include_paths
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { root.join(p) })
            .collect()
    }
}

/// Build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BuildConfig {
    /// Gitignore-style exclusions on top of `.kilnignore`
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Worker threads; all available cores when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl BuildConfig {
    /// Effective worker count, never zero
    pub fn effective_jobs(&self) -> usize {
        match self.jobs {
            Some(n) if n > 0 => n,
            _ => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sass: SassConfig,

    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> KilnResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> KilnResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from the build root, the user config, or defaults, then apply
    /// environment overrides
    pub fn load_for_root(root: &Path) -> KilnResult<(Self, Vec<ConfigWarning>)> {
        loader::load_for_root(root)
    }

    /// Apply environment variable overrides (KILN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}

//! Engine port - the lifecycle every file-type processor implements
//!
//! The orchestrator drives each file through the hooks in a fixed order:
//!
//! 1. `pre_process` - classify the file (partial, skipped, opted-out passes)
//! 2. `discover_includes` - report dependency edges
//! 3. `decide_output_paths` - one descriptor per artifact
//! 4. `generate_output` - fill each descriptor
//!
//! Failures are recorded on the record or descriptor, never returned, so one
//! file cannot abort its siblings.

use std::path::Path;

use crate::domain::entities::{FileRecord, OutputDescriptor, ResolvedInclude};

/// Outcome of include discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeDiscovery {
    /// Includes in source order, duplicates kept
    Supported(Vec<ResolvedInclude>),
    /// The engine has no include syntax
    Unsupported,
}

impl IncludeDiscovery {
    /// Resolved includes, empty when unsupported
    pub fn into_includes(self) -> Vec<ResolvedInclude> {
        match self {
            IncludeDiscovery::Supported(includes) => includes,
            IncludeDiscovery::Unsupported => Vec::new(),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, IncludeDiscovery::Supported(_))
    }
}

/// A processor for one family of source files
pub trait Engine: Send + Sync {
    /// Display name used in logs and reports
    fn name(&self) -> &'static str;

    /// Source extensions this engine handles, with leading dot
    fn source_extensions(&self) -> &'static [&'static str];

    /// Extension of the primary output, with leading dot
    fn output_extension(&self) -> &'static str;

    /// Classify the file and declare which generic passes apply to it
    fn pre_process(&self, record: &mut FileRecord);

    /// Find the files this file includes
    fn discover_includes(&self, _path: &Path, _contents: &str) -> IncludeDiscovery {
        IncludeDiscovery::Unsupported
    }

    /// Decide the artifacts this file produces
    fn decide_output_paths(&self, record: &FileRecord) -> Vec<OutputDescriptor>;

    /// Produce the content of one artifact
    fn generate_output(&self, record: &mut FileRecord, output: &mut OutputDescriptor);

    /// Whether this engine handles `path`, by extension (case-insensitive)
    fn handles(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.source_extensions()
            .iter()
            .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Default destination: the source path with the output extension
    fn default_output_path(&self, source: &Path) -> std::path::PathBuf {
        source.with_extension(self.output_extension().trim_start_matches('.'))
    }
}

//! Sass Engine
//!
//! Compiles `.scss` files to `.css` through the `StyleCompiler` port.
//!
//! Partial handling follows the Sass rules:
//! - a file whose name starts with `_` is a partial and is only ever included
//! - an import of `name` resolves to `_name.scss` when that file exists, even
//!   if `name.scss` exists too
//!
//! Supported import forms (single or double quotes, mixed freely):
//!
//! ```text
//! @import "x";
//! @import "_x.scss";
//! @import "../x";
//! @import "x", "y", "z";
//! ```
//!
//! `@import url(...)` is plain CSS and is not treated as an include.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{FileRecord, OutputDescriptor, ResolvedInclude};
use crate::domain::ports::{
    CompileRequest, Engine, FileSystem, IncludeDiscovery, StyleCompiler,
};
use crate::domain::services::{
    apply_partial_override, is_partial, resolve, with_extension, IncludeExtractor,
};
use crate::domain::value_objects::PipelineFeatures;

/// Extension of a Sass source file
pub const SCSS_EXTENSION: &str = ".scss";

/// Extension of the compiled output
pub const CSS_EXTENSION: &str = ".css";

/// Path segment of the compiler's own cache directory
const SASS_CACHE_SEGMENT: &str = "/.sass-cache/";

/// Skip reason recorded for files inside the cache directory
pub const SASS_CACHE_SKIP_REASON: &str = "Ignoring .sass-cache folder";

/// Sass/SCSS engine
pub struct SassEngine {
    compiler: Arc<dyn StyleCompiler>,
    fs: Arc<dyn FileSystem>,
    extractor: IncludeExtractor,
}

impl SassEngine {
    pub fn new(compiler: Arc<dyn StyleCompiler>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            compiler,
            fs,
            extractor: IncludeExtractor::new("@import"),
        }
    }

    /// Turn one raw token into the file it names
    fn resolve_token(&self, base_dir: &Path, token: &str) -> Option<ResolvedInclude> {
        let with_ext = with_extension(token, SCSS_EXTENSION);
        let resolved = match resolve(base_dir, &with_ext) {
            Ok(resolved) => resolved,
            Err(e) => {
                debug!(token, error = %e, "skipping unresolvable import token");
                return None;
            }
        };

        let path = apply_partial_override(&resolved.path, self.fs.as_ref());
        Some(ResolvedInclude {
            token: token.to_string(),
            overridden: path != resolved.path,
            path,
            was_relative: resolved.was_relative,
        })
    }

    fn attach_source_map(&self, record: &mut FileRecord, output_path: &Path, map: Option<String>) {
        let map_path = source_map_path(output_path);
        match map {
            Some(map) => record
                .side_outputs
                .push(OutputDescriptor::generated(map_path, map)),
            None => {
                warn!(path = %map_path.display(), "compiler returned no source map");
                record.warnings.push(format!(
                    "Compiler returned no source map for {}",
                    map_path.display()
                ));
            }
        }
    }
}

/// `<output>.map`, next to the compiled file
pub fn source_map_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_os_string();
    name.push(".map");
    PathBuf::from(name)
}

impl Engine for SassEngine {
    fn name(&self) -> &'static str {
        "Sass"
    }

    fn source_extensions(&self) -> &'static [&'static str] {
        &[SCSS_EXTENSION]
    }

    fn output_extension(&self) -> &'static str {
        CSS_EXTENSION
    }

    fn pre_process(&self, record: &mut FileRecord) {
        // The compiler owns the whole file; no generic text pass may touch it.
        record.features = PipelineFeatures::empty();

        record.is_partial = is_partial(record.path());

        let unified = record.path().to_string_lossy().replace('\\', "/");
        if unified.contains(SASS_CACHE_SEGMENT) {
            record.skip_reason = Some(SASS_CACHE_SKIP_REASON.to_string());
        }
    }

    fn discover_includes(&self, path: &Path, contents: &str) -> IncludeDiscovery {
        let base_dir = path.parent().unwrap_or_else(|| Path::new("/"));

        let includes: Vec<ResolvedInclude> = self
            .extractor
            .matches(contents)
            .flat_map(|statement| statement.tokens)
            .filter_map(|token| self.resolve_token(base_dir, &token))
            .collect();

        debug!(file = %path.display(), count = includes.len(), "discovered sass imports");
        IncludeDiscovery::Supported(includes)
    }

    fn decide_output_paths(&self, record: &FileRecord) -> Vec<OutputDescriptor> {
        vec![OutputDescriptor::new(
            self.default_output_path(record.path()),
            record.contents(),
        )]
    }

    fn generate_output(&self, record: &mut FileRecord, output: &mut OutputDescriptor) {
        let options = record.options;
        let request = CompileRequest {
            source: output.contents(),
            source_path: record.path(),
            output_path: output.path(),
            style: options.output_style,
            source_map: options.generate_source_maps,
        };

        match self.compiler.compile(&request) {
            Ok(compiled) => {
                output.compiled = Some(compiled.css);
                if options.generate_source_maps {
                    let output_path = output.path().to_path_buf();
                    self.attach_source_map(record, &output_path, compiled.source_map);
                }
            }
            Err(e) => {
                output.error = Some(e.message);
            }
        }
    }
}

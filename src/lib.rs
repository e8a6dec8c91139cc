//! Kiln - incremental content build engine
//!
//! Kiln walks a site directory, hands every source file to the engine
//! registered for its extension, tracks include dependencies between files,
//! and writes the compiled outputs next to their sources. The bundled Sass
//! engine compiles `.scss` to `.css` through an external compiler and
//! understands Sass partials.
//!
//! ## Layers
//!
//! - `domain` - entities, value objects, services and ports
//! - `application` - build pipeline, dependency graph, watch use case
//! - `infrastructure` - file systems, the sassc compiler, engines
//! - `config` - `kiln.toml` loading and per-directory resolution

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    BuildPipeline, BuildReport, DependencyGraph, FileOutcome, WatchEvent, WatchUseCase,
};
pub use config::{Config, ConfigResolver, ConfigWarning};
pub use domain::entities::{FileRecord, OutputDescriptor, ProcessingState, ResolvedInclude};
pub use domain::ports::{Engine, FileSystem, IncludeDiscovery, StyleCompiler};
pub use domain::value_objects::{OutputStyle, StyleOptions};
pub use error::{KilnError, KilnResult};
pub use infrastructure::{EngineRegistry, LocalFs, MemoryFs, SassEngine, SasscCompiler};

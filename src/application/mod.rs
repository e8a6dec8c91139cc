//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain file-type rules (those live in engines)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildPipeline` - Discover, process and persist source files
//! - `WatchUseCase` - Rebuild continuously as files change
//!
//! ## State
//!
//! - `DependencyGraph` - Include edges reported by engines

pub mod dependency_graph;
pub mod pipeline;
pub mod watch;

pub use dependency_graph::DependencyGraph;
pub use pipeline::{
    BuildPipeline, BuildReport, FileOutcome, IGNORED_SKIP_REASON, PARTIAL_SKIP_REASON,
};
pub use watch::{
    ContentChange, ContentTracker, WatchEvent, WatchUseCase, WatchedFile, WatcherState,
    DEBOUNCE_MS,
};

//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure provides the concrete implementations.

pub mod engine;
pub mod file_system;
pub mod style_compiler;

pub use engine::{Engine, IncludeDiscovery};
pub use file_system::{FileSystem, FsError, FsResult};
pub use style_compiler::{CompileError, CompileRequest, CompiledStyle, StyleCompiler};

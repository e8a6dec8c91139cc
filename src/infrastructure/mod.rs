//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory)
//! - `compiler/` - External style compilers (sassc)
//! - `engines/` - Engine implementations and the engine registry

pub mod compiler;
pub mod engines;
pub mod fs;

// Re-export for convenience
pub use compiler::SasscCompiler;
pub use engines::{all_engines, EngineRegistry, SassEngine};
pub use fs::{LocalFs, MemoryFs};

//! Domain Layer
//!
//! The include-resolution core of Kiln - pure logic with I/O only through ports.
//!
//! ## Structure
//!
//! - `entities/` - Records flowing through the pipeline (FileRecord, OutputDescriptor, includes)
//! - `value_objects/` - Immutable value types (OutputStyle, ContentHash, IgnorePatterns)
//! - `services/` - Path resolution, include extraction, partial override
//! - `ports/` - Interface definitions (Engine, FileSystem, StyleCompiler)
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - file existence and writes go through the `FileSystem` port
//! 2. **Pure Functions** - services are stateless and safe to call from any thread
//! 3. **Ports & Adapters** - engines and compilers are trait objects

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

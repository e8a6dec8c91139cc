//! StyleCompiler port - the external Sass compiler
//!
//! The compiler is opaque and possibly slow. Errors come back as free text
//! and are passed to the user verbatim; file/line attribution is the
//! compiler's job, which is why the request carries both paths.

use std::path::Path;

use thiserror::Error;

use crate::domain::value_objects::OutputStyle;

/// One compilation call
#[derive(Debug, Clone, Copy)]
pub struct CompileRequest<'a> {
    /// Raw source text
    pub source: &'a str,
    /// Source path, used for error attribution and relative imports
    pub source_path: &'a Path,
    /// Output path, used for error attribution and source map links
    pub output_path: &'a Path,
    pub style: OutputStyle,
    pub source_map: bool,
}

/// Successful compilation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStyle {
    pub css: String,
    /// Present only when a source map was requested
    pub source_map: Option<String>,
}

/// Compiler failure with the compiler's own message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External style compiler
pub trait StyleCompiler: Send + Sync {
    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompiledStyle, CompileError>;
}

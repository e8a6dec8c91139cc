//! sassc Style Compiler
//!
//! Implements the StyleCompiler port by running the `sassc` executable.
//! The source is staged in a temp directory under its own file name so the
//! compiler's messages and the source map keep the real names; the staged
//! path is rewritten back to the real source path in error text.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::ports::{CompileError, CompileRequest, CompiledStyle, StyleCompiler};

/// Program name looked up on `PATH` when none is configured
pub const DEFAULT_PROGRAM: &str = "sassc";

/// Style compiler backed by the `sassc` command line tool
#[derive(Debug, Clone)]
pub struct SasscCompiler {
    program: PathBuf,
    include_paths: Vec<PathBuf>,
}

impl Default for SasscCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl SasscCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            include_paths: Vec::new(),
        }
    }

    /// Extra load paths, searched after the source's own directory
    pub fn with_include_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.include_paths = paths;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Check if the compiler can be started
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Arguments for one compilation, input and output last
    fn command_args(&self, request: &CompileRequest<'_>, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        if let Some(dir) = request.source_path.parent() {
            args.push("--load-path".into());
            args.push(dir.as_os_str().to_os_string());
        }
        for path in &self.include_paths {
            args.push("--load-path".into());
            args.push(path.as_os_str().to_os_string());
        }

        args.push("--style".into());
        args.push(request.style.compiler_name().into());

        if request.source_map {
            args.push("--sourcemap".into());
        }

        args.push(input.as_os_str().to_os_string());
        args.push(output.as_os_str().to_os_string());
        args
    }
}

fn file_name_or(path: &Path, fallback: &str) -> OsString {
    path.file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| fallback.into())
}

impl StyleCompiler for SasscCompiler {
    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompiledStyle, CompileError> {
        let staging = tempfile::tempdir()
            .map_err(|e| CompileError::new(format!("failed to create staging directory: {}", e)))?;

        let input = staging.path().join(file_name_or(request.source_path, "input.scss"));
        let output = staging.path().join(file_name_or(request.output_path, "output.css"));

        std::fs::write(&input, request.source)
            .map_err(|e| CompileError::new(format!("failed to stage {}: {}", input.display(), e)))?;

        debug!(
            program = %self.program.display(),
            source = %request.source_path.display(),
            style = %request.style,
            source_map = request.source_map,
            "running style compiler"
        );

        let result = Command::new(&self.program)
            .args(self.command_args(request, &input, &output))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                CompileError::new(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let message = stderr
                .trim_end()
                .replace(&*input.to_string_lossy(), &request.source_path.to_string_lossy());
            return Err(CompileError::new(if message.is_empty() {
                format!("{} exited with {}", self.program.display(), result.status)
            } else {
                message
            }));
        }

        let css = std::fs::read_to_string(&output)
            .map_err(|e| CompileError::new(format!("failed to read compiler output: {}", e)))?;

        let source_map = if request.source_map {
            let mut map_name = output.clone().into_os_string();
            map_name.push(".map");
            std::fs::read_to_string(PathBuf::from(map_name)).ok()
        } else {
            None
        };

        Ok(CompiledStyle { css, source_map })
    }
}

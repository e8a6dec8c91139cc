//! Isolated site directory for integration tests.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tempfile::TempDir;

use kiln::application::BuildPipeline;
use kiln::config::Config;
use kiln::domain::ports::{FileSystem, StyleCompiler};
use kiln::infrastructure::{EngineRegistry, LocalFs};

/// Result of running the kiln binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A temporary site root
pub struct TestSite {
    dir: TempDir,
    root: PathBuf,
}

impl TestSite {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        // Canonical so paths match what the binary and the walker report
        let root = dir.path().canonicalize().expect("canonicalize temp dir");
        Self { dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a site-relative path
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write fixture");
        self
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("read {}: {}", relative, e))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Pipeline over this site with the given compiler and config
    pub fn pipeline_with(&self, compiler: Arc<dyn StyleCompiler>, config: Config) -> BuildPipeline {
        Self::pipeline_at_with(&self.root, compiler, config)
    }

    /// Pipeline over an arbitrary root, for use off the test thread
    pub fn pipeline_at(root: &Path, compiler: Arc<dyn StyleCompiler>) -> BuildPipeline {
        Self::pipeline_at_with(root, compiler, Config::default())
    }

    fn pipeline_at_with(root: &Path, compiler: Arc<dyn StyleCompiler>, config: Config) -> BuildPipeline {
        let fs: Arc<dyn FileSystem> = Arc::new(LocalFs::new());
        let registry = EngineRegistry::with_defaults(compiler, fs.clone());
        BuildPipeline::new(root, config, registry, fs).expect("create pipeline")
    }

    /// Pipeline with default config
    pub fn pipeline(&self, compiler: Arc<dyn StyleCompiler>) -> BuildPipeline {
        self.pipeline_with(compiler, Config::default())
    }

    /// Run the kiln binary with the site root as working directory
    pub fn run(&self, args: &[&str], env: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_kiln"));
        cmd.args(args)
            .current_dir(&self.root)
            .env_remove("KILN_OUTPUT_STYLE")
            .env_remove("KILN_SOURCE_MAPS")
            .env_remove("KILN_COMPILER")
            .env_remove("RUST_LOG");
        for (key, value) in env {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("run kiln binary");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Keep the directory alive for the lifetime of the site
    pub fn temp_dir(&self) -> &TempDir {
        &self.dir
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

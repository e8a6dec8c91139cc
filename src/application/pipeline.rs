//! Build pipeline
//!
//! Drives every source file through the engine lifecycle and persists the
//! results. Used by both the build and watch commands.
//!
//! ## Flow (per file)
//!
//! 1. Pick the engine by extension, read the source, resolve local options
//! 2. `pre_process` - partial / skip classification
//! 3. `discover_includes` - edges go to the dependency graph
//! 4. `decide_output_paths` + `generate_output`
//! 5. Write each output through the `FileSystem` port
//!
//! A file's failure is captured in its [`FileOutcome`] and never aborts
//! sibling files.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::DependencyGraph;
use crate::config::{Config, ConfigResolver, ConfigWarning};
use crate::domain::entities::{FileRecord, ProcessingState};
use crate::domain::ports::{Engine, FileSystem, FsError, IncludeDiscovery};
use crate::domain::services::shadowed_sibling;
use crate::domain::value_objects::IgnorePatterns;
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::engines::EngineRegistry;

/// Skip reason recorded for partial files
pub const PARTIAL_SKIP_REASON: &str = "partial";

/// Skip reason recorded for files matched by ignore patterns
pub const IGNORED_SKIP_REASON: &str = "ignored";

/// What happened to one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Engine that handled the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<&'static str>,
    pub state: ProcessingState,
    pub is_partial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    /// Resolved includes in source order
    pub includes: Vec<PathBuf>,
    /// Files written: primary outputs then side artifacts
    pub written: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// The source no longer exists
    #[serde(skip)]
    pub missing: bool,
}

impl FileOutcome {
    fn from_record(record: FileRecord, engine: &'static str, written: Vec<PathBuf>) -> Self {
        Self {
            path: record.path().to_path_buf(),
            engine: Some(engine),
            state: record.state(),
            is_partial: record.is_partial,
            includes: record.includes.iter().map(|i| i.path.clone()).collect(),
            written,
            skip_reason: record.skip_reason,
            error: record.error,
            warnings: record.warnings,
            missing: false,
        }
    }

    fn failed(path: &Path, engine: Option<&'static str>, message: String) -> Self {
        Self {
            path: path.to_path_buf(),
            engine,
            state: ProcessingState::Errored,
            is_partial: false,
            skip_reason: None,
            includes: Vec::new(),
            written: Vec::new(),
            error: Some(message),
            warnings: Vec::new(),
            missing: false,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.state == ProcessingState::Persisted
    }

    pub fn is_skipped(&self) -> bool {
        self.state == ProcessingState::Skipped
    }

    pub fn is_errored(&self) -> bool {
        self.state == ProcessingState::Errored
    }
}

/// Result of one build pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// One outcome per processed file, sorted by path
    pub outcomes: Vec<FileOutcome>,
    pub persisted: usize,
    pub skipped: usize,
    pub errored: usize,
    pub warnings: usize,
    /// Files never started because the build was cancelled
    pub cancelled: usize,
}

impl BuildReport {
    fn from_outcomes(mut outcomes: Vec<FileOutcome>, cancelled: usize) -> Self {
        outcomes.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            persisted: outcomes.iter().filter(|o| o.is_persisted()).count(),
            skipped: outcomes.iter().filter(|o| o.is_skipped()).count(),
            errored: outcomes.iter().filter(|o| o.is_errored()).count(),
            warnings: outcomes.iter().map(|o| o.warnings.len()).sum(),
            outcomes,
            cancelled,
        }
    }

    /// Check if the build finished without file errors
    pub fn is_success(&self) -> bool {
        self.errored == 0 && self.cancelled == 0
    }

    /// Outcome for `path`, if it was processed
    pub fn outcome(&self, path: &Path) -> Option<&FileOutcome> {
        self.outcomes
            .binary_search_by(|o| o.path.as_path().cmp(path))
            .ok()
            .map(|i| &self.outcomes[i])
    }
}

/// Orchestrates builds for one root directory
pub struct BuildPipeline {
    root: PathBuf,
    config: Config,
    registry: EngineRegistry,
    fs: Arc<dyn FileSystem>,
    resolver: ConfigResolver,
    ignore: IgnorePatterns,
    pool: rayon::ThreadPool,
    graph: RwLock<DependencyGraph>,
    write_locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl BuildPipeline {
    /// Create a pipeline for `root`
    ///
    /// Loads `.kilnignore` and starts the worker pool sized by `[build].jobs`.
    pub fn new(
        root: impl Into<PathBuf>,
        config: Config,
        registry: EngineRegistry,
        fs: Arc<dyn FileSystem>,
    ) -> KilnResult<Self> {
        let root = root.into();
        let ignore = IgnorePatterns::load(&root, &config.build.ignore)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.build.effective_jobs())
            .thread_name(|i| format!("kiln-worker-{}", i))
            .build()
            .map_err(|e| KilnError::WorkerPool(e.to_string()))?;
        let resolver = ConfigResolver::new(root.clone(), &config);

        Ok(Self {
            root,
            config,
            registry,
            fs,
            resolver,
            ignore,
            pool,
            graph: RwLock::new(DependencyGraph::new()),
            write_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// File system port used for reads and writes
    pub fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Per-directory configuration resolver
    pub fn config_resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Re-read the root `kiln.toml` and apply its `[sass]` table to later builds
    ///
    /// `[compiler]` and `[build]` are fixed for the pipeline's lifetime. On
    /// error the previous options stay in effect.
    pub fn reload_root_config(&self) -> KilnResult<Vec<ConfigWarning>> {
        let (config, warnings) = Config::load_for_root(&self.root)?;
        self.resolver.set_base(&config);
        info!(root = %self.root.display(), "root configuration reloaded");
        Ok(warnings)
    }

    /// Snapshot of the dependency graph
    pub fn dependency_graph(&self) -> DependencyGraph {
        self.graph
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether `path` is a source file this pipeline would build
    pub fn is_buildable(&self, path: &Path) -> bool {
        self.registry.is_source(path) && !self.ignore.is_ignored(path, false)
    }

    /// All source files under the root, sorted
    ///
    /// Hidden files and `.gitignore` are respected, then `.kilnignore` and
    /// `[build].ignore`.
    pub fn discover_sources(&self) -> KilnResult<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(KilnError::DirectoryNotFound {
                path: self.root.clone(),
            });
        }

        let mut sources = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .require_git(false)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.into_path();
            if self.is_buildable(&path) {
                sources.push(path);
            }
        }

        sources.sort();
        debug!(root = %self.root.display(), count = sources.len(), "discovered sources");
        Ok(sources)
    }

    /// Run one file through the engine lifecycle
    ///
    /// Never fails; problems are captured on the outcome.
    pub fn process_file(&self, path: &Path) -> FileOutcome {
        let Some(engine) = self.registry.engine_for(path) else {
            let message = KilnError::NoEngine {
                path: path.to_path_buf(),
            }
            .to_string();
            return FileOutcome::failed(path, None, message);
        };

        let contents = match self.fs.read(path) {
            Ok(contents) => contents,
            Err(e) => {
                let mut outcome = FileOutcome::failed(path, Some(engine.name()), e.to_string());
                outcome.missing = matches!(e, FsError::NotFound(_));
                return outcome;
            }
        };

        let mut record = FileRecord::new(path, contents).with_options(self.resolver.resolve_for(path));
        let written = self.run_lifecycle(engine, &mut record);

        let outcome = FileOutcome::from_record(record, engine.name(), written);
        match &outcome.error {
            Some(error) => warn!(file = %path.display(), error = %error, "build failed"),
            None => debug!(file = %path.display(), state = ?outcome.state, "processed"),
        }
        outcome
    }

    fn run_lifecycle(&self, engine: &dyn Engine, record: &mut FileRecord) -> Vec<PathBuf> {
        let mut written = Vec::new();

        if self.ignore.is_ignored(record.path(), false) {
            record.skip_reason = Some(IGNORED_SKIP_REASON.to_string());
        } else {
            engine.pre_process(record);
        }
        if !step(record, ProcessingState::Classified) {
            return written;
        }
        if record.is_skipped() {
            step(record, ProcessingState::Skipped);
            return written;
        }

        let discovery = engine.discover_includes(record.path(), record.contents());
        record.includes = discovery.into_includes();
        if !step(record, ProcessingState::IncludesResolved) {
            return written;
        }

        if record.is_partial {
            record.skip_reason = Some(PARTIAL_SKIP_REASON.to_string());
            step(record, ProcessingState::Skipped);
            return written;
        }

        let mut outputs = engine.decide_output_paths(record);
        if !step(record, ProcessingState::OutputDecided) {
            return written;
        }

        for output in &mut outputs {
            engine.generate_output(record, output);
            if let Some(error) = output.error.take() {
                record.fail(error);
                return written;
            }
        }
        if !step(record, ProcessingState::Generated) {
            return written;
        }

        for output in &outputs {
            let Some(content) = output.output() else {
                continue;
            };
            if let Err(e) = self.persist(output.path(), content) {
                record.fail(e.to_string());
                return written;
            }
            written.push(output.path().to_path_buf());
        }

        // Side artifacts only follow a fully persisted primary output.
        for side in std::mem::take(&mut record.side_outputs) {
            let Some(content) = side.output() else {
                continue;
            };
            match self.persist(side.path(), content) {
                Ok(()) => written.push(side.path().to_path_buf()),
                Err(e) => {
                    warn!(path = %side.path().display(), error = %e, "failed to write side artifact");
                    record
                        .warnings
                        .push(format!("Failed to write {}. {}", side.path().display(), e));
                }
            }
        }
        step(record, ProcessingState::Persisted);

        written
    }

    /// Write one artifact, serialized with any other writer of the same path
    fn persist(&self, path: &Path, content: &str) -> Result<(), FsError> {
        let lock = self.write_lock(path);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.fs.write(path, content)
    }

    fn write_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self
            .write_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(path.to_path_buf()).or_default().clone()
    }

    /// Build `paths` in parallel
    ///
    /// Once `cancel` is set no new file is started; files already running
    /// finish. Every processed file's edges are recorded in the graph.
    pub fn build(&self, paths: &[PathBuf], cancel: &AtomicBool) -> BuildReport {
        let unique: BTreeSet<&PathBuf> = paths.iter().collect();
        let queue: Vec<&PathBuf> = unique.into_iter().collect();

        info!(files = queue.len(), jobs = self.pool.current_num_threads(), "build started");

        let outcomes: Vec<FileOutcome> = self.pool.install(|| {
            queue
                .par_iter()
                .filter_map(|path| {
                    if cancel.load(Ordering::SeqCst) {
                        return None;
                    }
                    Some(self.process_file(path))
                })
                .collect()
        });
        let cancelled = queue.len() - outcomes.len();

        self.record_edges(&outcomes);

        let report = BuildReport::from_outcomes(outcomes, cancelled);
        info!(
            persisted = report.persisted,
            skipped = report.skipped,
            errored = report.errored,
            warnings = report.warnings,
            cancelled = report.cancelled,
            "build complete"
        );
        report
    }

    /// Discover and build everything under the root
    pub fn build_all(&self, cancel: &AtomicBool) -> KilnResult<BuildReport> {
        let sources = self.discover_sources()?;
        Ok(self.build(&sources, cancel))
    }

    /// Files to rebuild after `changed` files were modified, created or deleted
    ///
    /// The changed sources that still exist (partials included, so their own
    /// edges are refreshed) plus every file that transitively includes any of
    /// them, sorted. A changed partial also counts as a change to the plain
    /// sibling it shadows, since imports of that name now resolve to it.
    /// Deleted files drop out of the graph.
    pub fn rebuild_targets(&self, changed: &[PathBuf]) -> Vec<PathBuf> {
        let mut seeds: Vec<PathBuf> = changed.to_vec();
        seeds.extend(changed.iter().filter_map(|path| shadowed_sibling(path)));

        let affected = {
            let graph = self.graph.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            graph.affected_by(&seeds)
        };

        let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
        for path in changed {
            if !self.fs.exists(path) {
                self.graph
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .remove(path);
                continue;
            }
            if self.is_buildable(path) {
                targets.insert(path.clone());
            }
        }
        targets.extend(affected.into_iter().filter(|p| self.is_buildable(p)));

        debug!(changed = changed.len(), targets = targets.len(), "incremental rebuild");
        targets.into_iter().collect()
    }

    /// Rebuild what `changed` affects; see [`BuildPipeline::rebuild_targets`]
    pub fn rebuild_for(&self, changed: &[PathBuf], cancel: &AtomicBool) -> BuildReport {
        let targets = self.rebuild_targets(changed);
        self.build(&targets, cancel)
    }

    /// Includes of one file without building it
    pub fn discover_includes(&self, path: &Path) -> KilnResult<IncludeDiscovery> {
        let engine = self.registry.engine_for(path).ok_or_else(|| KilnError::NoEngine {
            path: path.to_path_buf(),
        })?;
        let contents = self.fs.read(path)?;
        Ok(engine.discover_includes(path, &contents))
    }

    fn record_edges(&self, outcomes: &[FileOutcome]) {
        let mut graph = self.graph.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        for outcome in outcomes {
            if outcome.missing {
                graph.remove(&outcome.path);
            } else if outcome.engine.is_some() {
                graph.record(&outcome.path, outcome.includes.clone());
            }
        }
    }
}

impl std::fmt::Debug for BuildPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildPipeline")
            .field("root", &self.root)
            .field("engines", &self.registry)
            .field("jobs", &self.pool.current_num_threads())
            .finish()
    }
}

/// Advance `record`, turning an illegal transition into a file error
fn step(record: &mut FileRecord, next: ProcessingState) -> bool {
    match record.advance(next) {
        Ok(()) => true,
        Err(e) => {
            record.fail(e.to_string());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CompileError, CompileRequest, CompiledStyle, StyleCompiler};
    use crate::infrastructure::fs::MemoryFs;

    /// Echoes the source back, or fails when it contains `!fail`
    struct EchoCompiler;

    impl StyleCompiler for EchoCompiler {
        fn compile(&self, request: &CompileRequest<'_>) -> Result<CompiledStyle, CompileError> {
            if request.source.contains("!fail") {
                return Err(CompileError::new(format!(
                    "Error: invalid token\n  on line 1 of {}",
                    request.source_path.display()
                )));
            }
            Ok(CompiledStyle {
                css: format!("/* {} */{}", request.style, request.source),
                source_map: request.source_map.then(|| "{\"version\":3}".to_string()),
            })
        }
    }

    fn pipeline(fs: &MemoryFs) -> BuildPipeline {
        let shared: Arc<dyn FileSystem> = Arc::new(fs.clone());
        let registry = EngineRegistry::with_defaults(Arc::new(EchoCompiler), shared.clone());
        let mut config = Config::default();
        config.build.jobs = Some(2);
        BuildPipeline::new("/nonexistent-kiln-root", config, registry, shared).unwrap()
    }

    /// Memory file system rejecting writes whose path ends with `suffix`
    struct RejectingFs {
        inner: MemoryFs,
        suffix: &'static str,
    }

    impl FileSystem for RejectingFs {
        fn read(&self, path: &Path) -> Result<String, FsError> {
            self.inner.read(path)
        }

        fn write(&self, path: &Path, content: &str) -> Result<(), FsError> {
            if path.to_string_lossy().ends_with(self.suffix) {
                return Err(FsError::PermissionDenied(path.to_path_buf()));
            }
            self.inner.write(path, content)
        }

        fn exists(&self, path: &Path) -> bool {
            self.inner.exists(path)
        }

        fn remove(&self, path: &Path) -> Result<(), FsError> {
            self.inner.remove(path)
        }
    }

    fn source_map_pipeline(fs: &MemoryFs, reject: &'static str) -> BuildPipeline {
        let shared: Arc<dyn FileSystem> = Arc::new(RejectingFs {
            inner: fs.clone(),
            suffix: reject,
        });
        let registry = EngineRegistry::with_defaults(Arc::new(EchoCompiler), shared.clone());
        let mut config = Config::default();
        config.sass.generate_source_maps = Some(true);
        BuildPipeline::new("/nonexistent-kiln-root", config, registry, shared).unwrap()
    }

    fn p(s: &str) -> PathBuf {
        PathBuf::from(format!("/nonexistent-kiln-root/{}", s))
    }

    #[test]
    fn standalone_file_is_persisted() {
        let fs = MemoryFs::new().with_file(p("main.scss"), "a{b:c}");
        let pipeline = pipeline(&fs);

        let outcome = pipeline.process_file(&p("main.scss"));

        assert!(outcome.is_persisted());
        assert_eq!(outcome.engine, Some("Sass"));
        assert_eq!(outcome.written, vec![p("main.css")]);
        assert_eq!(fs.get(&p("main.css")).as_deref(), Some("/* compact */a{b:c}"));
    }

    #[test]
    fn partial_is_skipped_but_reports_includes() {
        let fs = MemoryFs::new()
            .with_file(p("_base.scss"), "@import 'vars';")
            .with_file(p("_vars.scss"), "");
        let pipeline = pipeline(&fs);

        let outcome = pipeline.process_file(&p("_base.scss"));

        assert!(outcome.is_skipped());
        assert!(outcome.is_partial);
        assert_eq!(outcome.skip_reason.as_deref(), Some(PARTIAL_SKIP_REASON));
        assert_eq!(outcome.includes, vec![p("_vars.scss")]);
        assert!(outcome.written.is_empty());
        assert!(fs.get(&p("_base.css")).is_none());
    }

    #[test]
    fn compile_error_is_captured_and_nothing_written() {
        let fs = MemoryFs::new().with_file(p("bad.scss"), "a { !fail }");
        let pipeline = pipeline(&fs);

        let outcome = pipeline.process_file(&p("bad.scss"));

        assert!(outcome.is_errored());
        assert!(outcome.error.as_deref().unwrap().starts_with("Error: invalid token"));
        assert!(fs.get(&p("bad.css")).is_none());
    }

    #[test]
    fn source_map_persisted_after_primary_output() {
        let fs = MemoryFs::new().with_file(p("main.scss"), "a{}");
        let pipeline = source_map_pipeline(&fs, ".never");

        let outcome = pipeline.process_file(&p("main.scss"));

        assert!(outcome.is_persisted());
        assert_eq!(outcome.written, vec![p("main.css"), p("main.css.map")]);
        assert_eq!(fs.get(&p("main.css.map")).as_deref(), Some("{\"version\":3}"));
    }

    #[test]
    fn source_map_write_failure_is_a_warning() {
        let fs = MemoryFs::new().with_file(p("main.scss"), "a{}");
        let pipeline = source_map_pipeline(&fs, ".map");

        let outcome = pipeline.process_file(&p("main.scss"));

        assert!(outcome.is_persisted());
        assert_eq!(outcome.written, vec![p("main.css")]);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("main.css.map"));
    }

    #[test]
    fn failed_primary_write_leaves_no_source_map() {
        let fs = MemoryFs::new().with_file(p("main.scss"), "a{}");
        let pipeline = source_map_pipeline(&fs, ".css");

        let outcome = pipeline.process_file(&p("main.scss"));

        assert!(outcome.is_errored());
        assert!(outcome.written.is_empty());
        assert!(fs.get(&p("main.css")).is_none());
        assert!(fs.get(&p("main.css.map")).is_none());
    }

    #[test]
    fn unknown_extension_is_an_error_outcome() {
        let fs = MemoryFs::new().with_file(p("notes.txt"), "hi");
        let pipeline = pipeline(&fs);

        let outcome = pipeline.process_file(&p("notes.txt"));

        assert!(outcome.is_errored());
        assert_eq!(outcome.engine, None);
        assert!(outcome.error.unwrap().contains("no engine registered"));
    }

    #[test]
    fn missing_source_is_flagged() {
        let fs = MemoryFs::new();
        let pipeline = pipeline(&fs);

        let outcome = pipeline.process_file(&p("gone.scss"));

        assert!(outcome.is_errored());
        assert!(outcome.missing);
    }

    #[test]
    fn build_report_is_sorted_and_counted() {
        let fs = MemoryFs::new()
            .with_file(p("z.scss"), "z{}")
            .with_file(p("a.scss"), "a{}")
            .with_file(p("_p.scss"), "")
            .with_file(p("bad.scss"), "!fail");
        let pipeline = pipeline(&fs);
        let cancel = AtomicBool::new(false);

        let report = pipeline.build(
            &[p("z.scss"), p("bad.scss"), p("a.scss"), p("_p.scss"), p("a.scss")],
            &cancel,
        );

        let paths: Vec<_> = report.outcomes.iter().map(|o| o.path.clone()).collect();
        assert_eq!(paths, vec![p("_p.scss"), p("a.scss"), p("bad.scss"), p("z.scss")]);
        assert_eq!(report.persisted, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errored, 1);
        assert!(!report.is_success());
        assert!(report.outcome(&p("a.scss")).unwrap().is_persisted());
    }

    #[test]
    fn cancelled_build_starts_nothing() {
        let fs = MemoryFs::new().with_file(p("a.scss"), "a{}");
        let pipeline = pipeline(&fs);
        let cancel = AtomicBool::new(true);

        let report = pipeline.build(&[p("a.scss")], &cancel);

        assert!(report.outcomes.is_empty());
        assert_eq!(report.cancelled, 1);
        assert!(fs.get(&p("a.css")).is_none());
    }

    #[test]
    fn rebuild_for_partial_rebuilds_dependents() {
        let fs = MemoryFs::new()
            .with_file(p("main.scss"), "@import 'vars';")
            .with_file(p("other.scss"), "b{}")
            .with_file(p("_vars.scss"), "$x: 1;");
        let pipeline = pipeline(&fs);
        let cancel = AtomicBool::new(false);
        pipeline.build(&[p("main.scss"), p("other.scss"), p("_vars.scss")], &cancel);

        let report = pipeline.rebuild_for(&[p("_vars.scss")], &cancel);

        let paths: Vec<_> = report.outcomes.iter().map(|o| o.path.clone()).collect();
        assert_eq!(paths, vec![p("_vars.scss"), p("main.scss")]);
        assert!(report.outcome(&p("main.scss")).unwrap().is_persisted());
    }

    #[test]
    fn rebuild_for_new_partial_rebuilds_files_importing_its_plain_name() {
        let fs = MemoryFs::new()
            .with_file(p("main.scss"), "@import 'theme';")
            .with_file(p("theme.scss"), "plain{}");
        let pipeline = pipeline(&fs);
        let cancel = AtomicBool::new(false);
        pipeline.build(&[p("main.scss"), p("theme.scss")], &cancel);
        assert_eq!(pipeline.dependency_graph().includes_of(&p("main.scss")), &[p("theme.scss")]);

        fs.insert(p("_theme.scss"), "partial{}");
        let report = pipeline.rebuild_for(&[p("_theme.scss")], &cancel);

        let paths: Vec<_> = report.outcomes.iter().map(|o| o.path.clone()).collect();
        assert_eq!(paths, vec![p("_theme.scss"), p("main.scss")]);
        assert!(report.outcome(&p("main.scss")).unwrap().is_persisted());
        assert_eq!(
            pipeline.dependency_graph().includes_of(&p("main.scss")),
            &[p("_theme.scss")]
        );
    }

    #[test]
    fn rebuild_for_deleted_partial_rebuilds_its_importers() {
        let fs = MemoryFs::new()
            .with_file(p("main.scss"), "@import 'theme';")
            .with_file(p("theme.scss"), "plain{}")
            .with_file(p("_theme.scss"), "partial{}");
        let pipeline = pipeline(&fs);
        let cancel = AtomicBool::new(false);
        pipeline.build(&[p("main.scss"), p("theme.scss"), p("_theme.scss")], &cancel);

        fs.remove(&p("_theme.scss")).unwrap();
        let report = pipeline.rebuild_for(&[p("_theme.scss")], &cancel);

        let paths: Vec<_> = report.outcomes.iter().map(|o| o.path.clone()).collect();
        assert_eq!(paths, vec![p("main.scss")]);
        assert_eq!(
            pipeline.dependency_graph().includes_of(&p("main.scss")),
            &[p("theme.scss")]
        );
    }

    #[test]
    fn rebuild_for_deleted_file_drops_its_edges() {
        let fs = MemoryFs::new()
            .with_file(p("main.scss"), "@import 'vars';")
            .with_file(p("_vars.scss"), "@import 'colors';")
            .with_file(p("_colors.scss"), "");
        let pipeline = pipeline(&fs);
        let cancel = AtomicBool::new(false);
        pipeline.build(&[p("main.scss"), p("_vars.scss")], &cancel);
        assert_eq!(
            pipeline.dependency_graph().dependents_of(&p("_colors.scss")),
            vec![p("_vars.scss")]
        );

        fs.remove(&p("_vars.scss")).unwrap();
        let report = pipeline.rebuild_for(&[p("_vars.scss")], &cancel);

        assert!(pipeline
            .dependency_graph()
            .dependents_of(&p("_colors.scss"))
            .is_empty());
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].path, p("main.scss"));
    }

    #[test]
    fn ignore_patterns_skip_files() {
        let fs = MemoryFs::new().with_file(p("vendor/lib.scss"), "a{}");
        let shared: Arc<dyn FileSystem> = Arc::new(fs.clone());
        let registry = EngineRegistry::with_defaults(Arc::new(EchoCompiler), shared.clone());
        let mut config = Config::default();
        config.build.ignore = vec!["vendor/".to_string()];
        let pipeline =
            BuildPipeline::new("/nonexistent-kiln-root", config, registry, shared).unwrap();

        let outcome = pipeline.process_file(&p("vendor/lib.scss"));

        assert!(!pipeline.is_buildable(&p("vendor/lib.scss")));
        assert!(outcome.is_skipped());
        assert_eq!(outcome.skip_reason.as_deref(), Some(IGNORED_SKIP_REASON));
    }

    #[test]
    fn discover_includes_without_building() {
        let fs = MemoryFs::new()
            .with_file(p("main.scss"), "@import \"_vars\"; @import 'mixins.scss';")
            .with_file(p("_vars.scss"), "")
            .with_file(p("_mixins.scss"), "");
        let pipeline = pipeline(&fs);

        let includes = pipeline
            .discover_includes(&p("main.scss"))
            .unwrap()
            .into_includes();

        let paths: Vec<_> = includes.into_iter().map(|i| i.path).collect();
        assert_eq!(paths, vec![p("_vars.scss"), p("_mixins.scss")]);
        assert!(fs.get(&p("main.css")).is_none());
    }

    #[test]
    fn discover_sources_requires_existing_root() {
        let fs = MemoryFs::new();
        let pipeline = pipeline(&fs);

        assert!(matches!(
            pipeline.discover_sources(),
            Err(KilnError::DirectoryNotFound { .. })
        ));
    }
}

//! Include dependency graph
//!
//! Engines only report edges; the orchestrator owns the graph. Forward edges
//! keep source order (duplicates included), reverse edges are a set.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

/// File -> included files, plus the reverse index
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    includes: BTreeMap<PathBuf, Vec<PathBuf>>,
    dependents: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the edges of `file`
    pub fn record(&mut self, file: &Path, includes: Vec<PathBuf>) {
        self.unlink(file);
        for include in &includes {
            self.dependents
                .entry(include.clone())
                .or_default()
                .insert(file.to_path_buf());
        }
        self.includes.insert(file.to_path_buf(), includes);
    }

    /// Drop `file` as an includer; files including it keep their edges
    pub fn remove(&mut self, file: &Path) {
        self.unlink(file);
        self.includes.remove(file);
    }

    /// Includes of `file` in source order
    pub fn includes_of(&self, file: &Path) -> &[PathBuf] {
        self.includes.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Files that include `file` directly, sorted
    pub fn dependents_of(&self, file: &Path) -> Vec<PathBuf> {
        self.dependents
            .get(file)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every file that transitively includes any of `changed`, sorted.
    ///
    /// The changed files themselves are not part of the result unless they
    /// depend on one another. Cycles terminate.
    pub fn affected_by(&self, changed: &[PathBuf]) -> Vec<PathBuf> {
        let mut seen: BTreeSet<PathBuf> = BTreeSet::new();
        let mut queue: VecDeque<&Path> = changed.iter().map(PathBuf::as_path).collect();

        while let Some(file) = queue.pop_front() {
            let Some(parents) = self.dependents.get(file) else {
                continue;
            };
            for parent in parents {
                if seen.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }

        seen.into_iter().collect()
    }

    /// Number of files with recorded edges
    pub fn len(&self) -> usize {
        self.includes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }

    fn unlink(&mut self, file: &Path) {
        let Some(old) = self.includes.get(file) else {
            return;
        };
        for include in old {
            if let Some(set) = self.dependents.get_mut(include) {
                set.remove(file);
                if set.is_empty() {
                    self.dependents.remove(include);
                }
            }
        }
    }
}

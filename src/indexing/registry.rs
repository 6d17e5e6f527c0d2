//! Lazily created project indexers, one per project root.
//!
//! Each project sits behind its own lock: a flush or full rebuild takes the
//! write lock, so it never overlaps a query or another flush on the same
//! project. Separate projects never share state.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::indexing::{IndexStats, ProjectIndexer};
use crate::query::{CompletionList, Query, QueryResolver};
use crate::storage::IndexSnapshot;
use crate::IndexResult;

pub type SharedProject = Arc<RwLock<ProjectIndexer>>;

#[derive(Default)]
pub struct ProjectRegistry {
    roots: Vec<PathBuf>,
    projects: RwLock<HashMap<PathBuf, SharedProject>>,
}

impl ProjectRegistry {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            projects: RwLock::new(HashMap::new()),
        }
    }

    /// The registered project root containing `file`, preferring the deepest.
    pub fn project_root_for(&self, file: &Path) -> Option<&Path> {
        self.roots
            .iter()
            .filter(|root| file.starts_with(root))
            .max_by_key(|root| root.components().count())
            .map(PathBuf::as_path)
    }

    /// The indexer for `root`, loading its settings on first use.
    pub fn project(&self, root: &Path) -> IndexResult<SharedProject> {
        if let Some(project) = self.projects.read().get(root) {
            return Ok(Arc::clone(project));
        }

        let mut projects = self.projects.write();
        if let Some(project) = projects.get(root) {
            return Ok(Arc::clone(project));
        }

        tracing::debug!("[registry] loading project {}", root.display());
        let project = Arc::new(RwLock::new(ProjectIndexer::load(root)?));
        projects.insert(root.to_path_buf(), Arc::clone(&project));
        Ok(project)
    }

    /// Full rebuild of one project's index.
    pub fn generate(&self, root: &Path) -> IndexResult<IndexStats> {
        self.project(root)?.write().generate()
    }

    /// Full rebuild of every registered project.
    ///
    /// A failing project does not stop the others.
    pub fn generate_all(&self) -> Vec<(PathBuf, IndexResult<IndexStats>)> {
        self.roots
            .iter()
            .map(|root| (root.clone(), self.generate(root)))
            .collect()
    }

    /// Drop a project's cached indexer and settings, then index it again.
    pub fn reload(&self, root: &Path) -> IndexResult<IndexStats> {
        self.projects.write().remove(root);
        self.generate(root)
    }

    /// Re-parse a saved file.
    ///
    /// Returns `Ok(false)` when no project indexes the file.
    pub fn reindex_file(&self, path: &Path) -> IndexResult<bool> {
        let Some(root) = self.project_root_for(path) else {
            tracing::debug!("[registry] {} belongs to no project", path.display());
            return Ok(false);
        };

        let project = self.project(root)?;
        let mut project = project.write();
        if !project.owns(path) {
            return Ok(false);
        }
        project.reindex_file(path)?;
        Ok(true)
    }

    /// Answer a completion query.
    ///
    /// Standard-library prefixes never touch a project. Any failure degrades
    /// to `None` so the host can fall back to its own suggestions.
    pub fn query(&self, query: &Query<'_>) -> Option<CompletionList> {
        if let Some(result) = QueryResolver::builtin(query.prefix) {
            return Some(result);
        }

        let root = self.project_root_for(query.file_path)?;
        let project = match self.project(root) {
            Ok(project) => project,
            Err(e) => {
                tracing::warn!("[registry] {e}");
                return None;
            }
        };
        let mut project = project.write();
        QueryResolver::resolve(&mut project, query)
    }

    /// Complete a module path inside `require("...")` for `file`'s project.
    pub fn complete_require(&self, file: &Path, text_before_cursor: &str) -> Option<CompletionList> {
        let root = self.project_root_for(file)?;
        let project = self.project(root).ok()?;
        let project = project.read();
        project.complete_require(text_before_cursor)
    }

    pub fn dump_index(&self, root: &Path) -> IndexResult<IndexSnapshot> {
        Ok(self.project(root)?.read().snapshot())
    }
}

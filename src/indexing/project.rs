//! Project-level indexing.
//!
//! A [`ProjectIndexer`] owns the symbol table of one project and knows which
//! source root, and therefore which module path, every file belongs to.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::indexing::{FileIndexer, FileWalker};
use crate::parsing::paths::{module_path_from_file, resolve_source_root};
use crate::query::{CompletionList, complete_require_path};
use crate::storage::{GLOBAL_MODULE, IndexSnapshot, SymbolTable};
use crate::{IndexError, IndexResult};

/// Outcome of a full project walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub files_indexed: usize,
    pub files_failed: usize,
    pub modules: usize,
    pub classes: usize,
}

pub struct ProjectIndexer {
    root: PathBuf,
    settings: Settings,
    /// Configured source roots joined onto the project root
    source_roots: Vec<PathBuf>,
    table: SymbolTable,
    indexed: bool,
}

impl ProjectIndexer {
    /// Create an indexer from `<root>/.luadex/settings.toml`.
    pub fn load(root: impl Into<PathBuf>) -> IndexResult<Self> {
        let root = root.into();
        let settings = Settings::load_for_project(&root)?;
        Self::with_settings(root, settings)
    }

    pub fn with_settings(root: impl Into<PathBuf>, settings: Settings) -> IndexResult<Self> {
        let root = root.into();
        settings.validate(&root)?;

        let source_roots = settings
            .indexing
            .source_roots
            .iter()
            .map(|r| resolve_source_root(&root, r))
            .collect();

        Ok(Self {
            root,
            settings,
            source_roots,
            table: SymbolTable::new(),
            indexed: false,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Whether a full walk has completed since creation.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// The most specific source root containing `path`.
    fn source_root_for(&self, path: &Path) -> Option<&Path> {
        self.source_roots
            .iter()
            .filter(|root| path.starts_with(root))
            .max_by_key(|root| root.components().count())
            .map(PathBuf::as_path)
    }

    pub fn module_path_for(&self, path: &Path) -> Option<String> {
        module_path_under(path, self.source_root_for(path)?)
    }

    /// Whether `path` is a source file this project indexes.
    pub fn owns(&self, path: &Path) -> bool {
        self.module_path_for(path).is_some()
    }

    /// Rebuild the whole table from the files on disk.
    ///
    /// Unreadable files are logged and skipped. Each file is indexed once,
    /// under its most specific source root.
    pub fn generate(&mut self) -> IndexResult<IndexStats> {
        let mut table = SymbolTable::new();
        let mut stats = IndexStats::default();
        let walker = FileWalker::new(self.settings.indexing.ignore_patterns.clone());

        for source_root in &self.source_roots {
            if !source_root.is_dir() {
                tracing::warn!(
                    "[project] source root {} does not exist",
                    source_root.display()
                );
                continue;
            }

            for path in walker.walk(source_root) {
                if self.source_root_for(&path) != Some(source_root.as_path()) {
                    continue;
                }
                let Some(module_path) = module_path_under(&path, source_root) else {
                    continue;
                };

                match FileIndexer::new(&mut table, module_path).parse_file(&path) {
                    Ok(()) => stats.files_indexed += 1,
                    Err(e) => {
                        tracing::warn!("[project] skipping {}: {e}", path.display());
                        stats.files_failed += 1;
                    }
                }
            }
        }

        stats.modules = table.module_count();
        stats.classes = table.class_count();
        self.table = table;
        self.indexed = true;

        tracing::info!(
            "[project] indexed {}: {} files ({} failed), {} modules, {} classes",
            self.root.display(),
            stats.files_indexed,
            stats.files_failed,
            stats.modules,
            stats.classes
        );
        Ok(stats)
    }

    /// Re-parse one file from disk, replacing its module's entries.
    pub fn reindex_file(&mut self, path: &Path) -> IndexResult<()> {
        let mut indexer = self
            .file_indexer(path)
            .ok_or_else(|| IndexError::NotInSourceRoot {
                path: path.to_path_buf(),
            })?;
        indexer.parse_file(path)
    }

    /// The indexer responsible for `path`, bound to this project's table.
    pub fn file_indexer(&mut self, path: &Path) -> Option<FileIndexer<'_>> {
        let module_path = self.module_path_for(path)?;
        Some(FileIndexer::new(&mut self.table, module_path))
    }

    /// Like [`ProjectIndexer::file_indexer`], tracking the class at `cursor`.
    pub fn query_indexer(&mut self, path: &Path, cursor: usize) -> Option<FileIndexer<'_>> {
        let module_path = self.module_path_for(path)?;
        Some(FileIndexer::for_query(&mut self.table, module_path, cursor))
    }

    /// Complete a module path typed inside `require("...")`.
    pub fn complete_require(&self, text_before_cursor: &str) -> Option<CompletionList> {
        complete_require_path(&self.source_roots, text_before_cursor)
    }

    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot::from_table(&self.table)
    }

    /// Write the snapshot to the configured dump path and return that path.
    pub fn dump_index(&self) -> IndexResult<PathBuf> {
        let path = self.root.join(&self.settings.debug.dump_path);
        self.snapshot().write_to(&path)?;
        tracing::info!("[project] wrote index dump to {}", path.display());
        Ok(path)
    }
}

/// Module path of `path` under `source_root`.
///
/// A file that would map onto the global root is not indexed.
fn module_path_under(path: &Path, source_root: &Path) -> Option<String> {
    let module_path = module_path_from_file(path, source_root)?;
    if module_path == GLOBAL_MODULE {
        tracing::warn!(
            "[project] {} shadows the global root {GLOBAL_MODULE}, skipping",
            path.display()
        );
        return None;
    }
    Some(module_path)
}

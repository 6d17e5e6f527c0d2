//! Completion queries against a project index.
//!
//! [`QueryResolver`] answers "what can follow `head.`" at a cursor position.
//! Standard-library namespaces are answered from a fixed table; everything
//! else re-parses the current buffer into the project's table and resolves
//! the prefix through `FileIndexer::index_value`.

pub mod prefix;
pub mod require;

use serde::Serialize;
use std::path::Path;

use crate::builtins;
use crate::indexing::ProjectIndexer;
use crate::symbol::{Symbol, SymbolSet};

pub use prefix::{Prefix, word_before};
pub use require::complete_require_path;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub name: String,
    /// Kind shown next to the name (`function`, `module`, ...).
    pub detail: String,
    pub insert_text: String,
}

impl Completion {
    pub fn new(name: &str, detail: &str, insert_text: &str) -> Self {
        Self {
            name: name.to_string(),
            detail: detail.to_string(),
            insert_text: insert_text.to_string(),
        }
    }

    pub fn label(&self) -> String {
        format!("{}\t{}", self.name, self.detail)
    }
}

impl From<&Symbol> for Completion {
    fn from(symbol: &Symbol) -> Self {
        Self::new(&symbol.name, symbol.kind.as_str(), &symbol.insert_text)
    }
}

/// Sorted candidates plus hints for the host's own suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionList {
    pub items: Vec<Completion>,
    pub inhibit_word_completions: bool,
    pub inhibit_explicit_completions: bool,
}

impl CompletionList {
    pub fn from_symbols(symbols: &SymbolSet) -> Self {
        Self {
            items: symbols.sorted().iter().map(Completion::from).collect(),
            inhibit_word_completions: true,
            inhibit_explicit_completions: false,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|c| c.name.as_str()).collect()
    }

    /// `(label, insert_text)` pairs in list order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.items
            .iter()
            .map(|c| (c.label(), c.insert_text.clone()))
            .collect()
    }
}

/// A completion request from the host.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    pub file_path: &'a Path,
    /// Current, possibly unsaved, buffer content.
    pub buffer: &'a str,
    /// Byte offset of the cursor in `buffer`.
    pub cursor: usize,
    pub prefix: &'a str,
}

pub struct QueryResolver;

impl QueryResolver {
    /// Answer a standard-library namespace prefix such as `math.`.
    pub fn builtin(prefix: &str) -> Option<CompletionList> {
        let prefix = Prefix::parse(prefix)?;
        let namespace = builtins::namespace(prefix.head())?;
        Some(CompletionList::from_symbols(&namespace.symbols()))
    }

    /// Resolve `query` against `project`.
    ///
    /// Indexes the project first if it has not been indexed yet. The buffer
    /// is flushed into the table, replacing the module's indexed view with
    /// the unsaved content.
    pub fn resolve(project: &mut ProjectIndexer, query: &Query<'_>) -> Option<CompletionList> {
        if let Some(result) = Self::builtin(query.prefix) {
            return Some(result);
        }
        Prefix::parse(query.prefix)?;

        if !project.owns(query.file_path) {
            tracing::debug!(
                "[query] {} is outside the source roots",
                query.file_path.display()
            );
            return None;
        }

        if !project.is_indexed() {
            if let Err(e) = project.generate() {
                tracing::warn!("[query] indexing {} failed: {e}", project.root().display());
                return None;
            }
        }

        let mut indexer = project.query_indexer(query.file_path, query.cursor)?;
        indexer.parse_content(query.buffer);
        indexer.index_value(query.prefix)
    }

    /// Like [`QueryResolver::resolve`], taking the prefix from the buffer.
    pub fn resolve_at(
        project: &mut ProjectIndexer,
        file_path: &Path,
        buffer: &str,
        cursor: usize,
    ) -> Option<CompletionList> {
        let query = Query {
            file_path,
            buffer,
            cursor,
            prefix: word_before(buffer, cursor),
        };
        Self::resolve(project, &query)
    }
}


//! Per-file symbol extraction.
//!
//! A [`FileIndexer`] walks one source unit line by line, accumulates the
//! module's symbols, its classes and its `require` aliases, and publishes the
//! result into the project's [`SymbolTable`] on [`FileIndexer::flush`].
//!
//! In query mode the indexer also remembers which class encloses a cursor
//! offset, so `self.` can be resolved.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::builtins;
use crate::indexing::InheritanceResolver;
use crate::parsing::paths::last_segment;
use crate::parsing::{LineMatch, classify};
use crate::query::{CompletionList, Prefix};
use crate::storage::{ClassEntry, ClassMetadata, GLOBAL_MODULE, SymbolTable};
use crate::symbol::{Symbol, SymbolSet};
use crate::{IndexError, IndexResult};

#[derive(Debug, Default, Clone)]
struct PendingClass {
    symbols: SymbolSet,
    bases: Vec<String>,
}

pub struct FileIndexer<'a> {
    table: &'a mut SymbolTable,
    module_path: String,
    offset: usize,
    query_offset: Option<usize>,
    aliases: HashMap<String, String>,
    module_symbols: SymbolSet,
    /// Classes keyed by simple name, in order of first appearance.
    classes: IndexMap<String, PendingClass>,
    /// Class whose body subsequent `self.x = ...` lines belong to.
    current_class: Option<String>,
    /// Class of the last method header before the query offset.
    enclosing_class: Option<String>,
}

impl<'a> FileIndexer<'a> {
    pub fn new(table: &'a mut SymbolTable, module_path: impl Into<String>) -> Self {
        Self {
            table,
            module_path: module_path.into(),
            offset: 0,
            query_offset: None,
            aliases: HashMap::new(),
            module_symbols: SymbolSet::new(),
            classes: IndexMap::new(),
            current_class: None,
            enclosing_class: None,
        }
    }

    /// An indexer that tracks the class enclosing `cursor` (a byte offset).
    pub fn for_query(
        table: &'a mut SymbolTable,
        module_path: impl Into<String>,
        cursor: usize,
    ) -> Self {
        let mut indexer = Self::new(table, module_path);
        indexer.query_offset = Some(cursor);
        indexer
    }

    pub fn parse_file(&mut self, path: &Path) -> IndexResult<()> {
        let content = fs::read_to_string(path).map_err(|source| IndexError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_content(&content);
        Ok(())
    }

    /// Parse `text` from scratch and flush the result.
    pub fn parse_content(&mut self, text: &str) {
        self.reset();

        for raw_line in text.split_inclusive('\n') {
            let line = raw_line.trim_end_matches(['\n', '\r']);
            self.parse_line(line);
            self.offset += raw_line.len();
        }

        tracing::debug!(
            "[indexer] parsed {}: {} symbols, {} classes, {} aliases",
            self.module_path,
            self.module_symbols.len(),
            self.classes.len(),
            self.aliases.len()
        );
        self.flush();
    }

    fn reset(&mut self) {
        self.offset = 0;
        self.aliases.clear();
        self.module_symbols = SymbolSet::new();
        self.classes.clear();
        self.current_class = None;
        self.enclosing_class = None;
    }

    fn parse_line(&mut self, line: &str) {
        let Some(matched) = classify(line, self.current_class.is_some()) else {
            return;
        };

        match matched {
            LineMatch::Import { alias, module } => {
                self.aliases.insert(alias.to_string(), module);
            }
            LineMatch::ClassDecl { name, base } => {
                let resolved = base.and_then(|base| self.resolve_or_warn(name, base));
                let class = self.classes.entry(name.to_string()).or_default();
                class.bases.extend(resolved);
            }
            LineMatch::Implement { class, bases } => {
                let resolved: Vec<String> = bases
                    .into_iter()
                    .filter_map(|base| self.resolve_or_warn(class, base))
                    .collect();
                self.classes
                    .entry(class.to_string())
                    .or_default()
                    .bases
                    .extend(resolved);
            }
            LineMatch::Method { class, name, args } => {
                self.classes
                    .entry(class.to_string())
                    .or_default()
                    .symbols
                    .insert(Symbol::function(name, args));
                self.current_class = Some(class.to_string());

                if self.query_offset.is_some_and(|cursor| self.offset < cursor) {
                    self.enclosing_class = Some(class.to_string());
                }
            }
            LineMatch::Function { name, args } => {
                self.module_symbols.insert(Symbol::function(name, args));
            }
            LineMatch::Variable { name } => {
                self.module_symbols.insert(Symbol::variable(name));
            }
            LineMatch::Field { name } => {
                if let Some(class) = self
                    .current_class
                    .as_ref()
                    .and_then(|c| self.classes.get_mut(c))
                {
                    class.symbols.insert(Symbol::variable(name));
                }
            }
        }
    }

    fn resolve_or_warn(&self, class: &str, base: &str) -> Option<String> {
        match self.resolve_base_class_path(class, base) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("[indexer] {}: {e}", self.module_path);
                None
            }
        }
    }

    /// Resolve a base-class name used in `class(...)` or `implement(...)`.
    ///
    /// An imported alias resolves by convention to the class named after the
    /// last segment of the required module: with `Base = require("core.Base")`
    /// the base is `core.Base.Base`. Any other name must be a class declared
    /// earlier in this file.
    pub fn resolve_base_class_path(&self, class: &str, name: &str) -> IndexResult<String> {
        if let Some(target) = self.aliases.get(name) {
            return Ok(format!("{target}.{}", last_segment(target)));
        }
        if self.classes.contains_key(name) {
            return Ok(format!("{}.{name}", self.module_path));
        }
        Err(IndexError::UnresolvedBase {
            class: format!("{}.{class}", self.module_path),
            name: name.to_string(),
        })
    }

    /// Publish the accumulated symbols into the shared table.
    ///
    /// Every class becomes a `Class` symbol of the module and gets its own
    /// entry at `module.Class`. Prior entries of this module are replaced.
    pub fn flush(&mut self) {
        let mut module_symbols = self.module_symbols.clone();
        let mut entries = Vec::with_capacity(self.classes.len());

        for (name, class) in &self.classes {
            module_symbols.insert(Symbol::class(name.as_str()));
            entries.push(ClassEntry {
                path: format!("{}.{name}", self.module_path),
                symbols: class.symbols.clone(),
                metadata: ClassMetadata {
                    bases: class.bases.clone(),
                },
            });
        }

        self.table
            .replace_module(&self.module_path, module_symbols, entries);
    }

    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Class path enclosing the query offset, if any.
    pub fn enclosing_class(&self) -> Option<String> {
        self.enclosing_class
            .as_ref()
            .map(|c| format!("{}.{c}", self.module_path))
    }

    /// Resolve a `head.member` / `head:member` prefix against the table.
    ///
    /// Tried in order: `self`, a class, a module alias, a standard-library
    /// namespace. The first non-empty result wins.
    pub fn index_value(&self, prefix: &str) -> Option<CompletionList> {
        let prefix = Prefix::parse(prefix)?;
        let head = prefix.head();

        let symbols = (head == "self")
            .then(|| self.resolve_self())
            .flatten()
            .or_else(|| self.resolve_class(head))
            .or_else(|| self.resolve_module(head))
            .or_else(|| builtins::namespace(head).map(|ns| ns.symbols()))?;

        tracing::debug!(
            "[query] {} resolved '{head}' to {} candidates",
            self.module_path,
            symbols.len()
        );
        Some(CompletionList::from_symbols(&symbols))
    }

    fn resolve_self(&self) -> Option<SymbolSet> {
        let class = self.enclosing_class()?;
        non_empty(InheritanceResolver::new(self.table).merged_members(&class, false))
    }

    fn resolve_class(&self, head: &str) -> Option<SymbolSet> {
        let local = format!("{}.{head}", self.module_path);
        let class_path = if self.table.has_class(&local) {
            local
        } else {
            let target = self.alias_target(head)?;
            let imported = format!("{target}.{}", last_segment(target));
            if !self.table.has_class(&imported) {
                return None;
            }
            imported
        };
        non_empty(InheritanceResolver::new(self.table).merged_members(&class_path, true))
    }

    fn resolve_module(&self, head: &str) -> Option<SymbolSet> {
        let path = if head == GLOBAL_MODULE {
            GLOBAL_MODULE
        } else {
            self.alias_target(head)?
        };
        self.table.get(path).cloned().and_then(non_empty)
    }
}

fn non_empty(set: SymbolSet) -> Option<SymbolSet> {
    if set.is_empty() { None } else { Some(set) }
}

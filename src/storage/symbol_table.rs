//! Project-wide symbol table.
//!
//! Maps module paths and class paths to their symbol sets, and class paths to
//! their declared bases. One table belongs to exactly one project; file
//! indexers publish into it through [`SymbolTable::replace_module`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::builtins;
use crate::symbol::SymbolSet;

/// Path of the synthetic entry for Lua's implicit global namespace.
pub const GLOBAL_MODULE: &str = "_G";

/// Declared bases of a class, in declaration order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    pub bases: Vec<String>,
}

/// Everything one file contributes to the table for a single class.
#[derive(Debug, Clone, Default)]
pub struct ClassEntry {
    pub path: String,
    pub symbols: SymbolSet,
    pub metadata: ClassMetadata,
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolSet>,
    classes: HashMap<String, ClassMetadata>,
    /// Class paths each module declared on its last flush.
    module_classes: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(GLOBAL_MODULE.to_string(), builtins::global_symbols());
        Self {
            entries,
            classes: HashMap::new(),
            module_classes: HashMap::new(),
        }
    }

    /// Set the symbols at `path`, replacing whatever was there.
    pub fn add(&mut self, path: impl Into<String>, symbols: SymbolSet) {
        self.entries.insert(path.into(), symbols);
    }

    pub fn get(&self, path: &str) -> Option<&SymbolSet> {
        self.entries.get(path)
    }

    pub fn has_class(&self, path: &str) -> bool {
        self.classes.contains_key(path)
    }

    pub fn class_metadata(&self, path: &str) -> Option<&ClassMetadata> {
        self.classes.get(path)
    }

    /// Publish one file's results.
    ///
    /// The module entry and every class entry are overwritten. Classes the
    /// module declared previously but not anymore are dropped together with
    /// their metadata.
    pub fn replace_module(&mut self, module_path: &str, symbols: SymbolSet, classes: Vec<ClassEntry>) {
        if module_path == GLOBAL_MODULE {
            tracing::warn!("[table] refusing to overwrite the global root {GLOBAL_MODULE}");
            return;
        }

        let declared: Vec<String> = classes.iter().map(|c| c.path.clone()).collect();

        if let Some(previous) = self.module_classes.remove(module_path) {
            for stale in previous.iter().filter(|p| !declared.contains(p)) {
                tracing::debug!("[table] dropping stale class {stale}");
                self.entries.remove(stale);
                self.classes.remove(stale);
            }
        }

        for class in classes {
            self.add(class.path.clone(), class.symbols);
            self.classes.insert(class.path, class.metadata);
        }

        self.add(module_path, symbols);
        self.module_classes.insert(module_path.to_string(), declared);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &SymbolSet)> {
        self.entries.iter()
    }

    pub fn classes(&self) -> impl Iterator<Item = (&String, &ClassMetadata)> {
        self.classes.iter()
    }

    /// Number of indexed modules, not counting the global root.
    pub fn module_count(&self) -> usize {
        self.module_classes.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

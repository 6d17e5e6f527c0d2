//! Ancestor collection over declared class bases.

use indexmap::IndexSet;

use crate::storage::SymbolTable;
use crate::symbol::{Symbol, SymbolKind, SymbolSet};

/// Walks class metadata in a [`SymbolTable`].
pub struct InheritanceResolver<'a> {
    table: &'a SymbolTable,
}

impl<'a> InheritanceResolver<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// The seed class plus every direct and transitive base.
    ///
    /// Membership in the result doubles as the visited set, so cyclic
    /// declarations (`A` bases `B`, `B` bases `A`) terminate.
    pub fn collect_bases(&self, seed: &str) -> IndexSet<String> {
        let mut visited = IndexSet::new();
        visited.insert(seed.to_string());
        let mut to_visit = vec![seed.to_string()];

        while let Some(current) = to_visit.pop() {
            let Some(metadata) = self.table.class_metadata(&current) else {
                continue;
            };
            for base in &metadata.bases {
                if visited.insert(base.clone()) {
                    to_visit.push(base.clone());
                }
            }
        }

        visited
    }

    /// Merge the symbols of `class_path` and all its ancestors.
    ///
    /// With `functions_only`, fields are left out: outside a method only
    /// callable members are offered.
    pub fn merged_members(&self, class_path: &str, functions_only: bool) -> SymbolSet {
        let mut merged = SymbolSet::new();
        for class in self.collect_bases(class_path) {
            if let Some(symbols) = self.table.get(&class) {
                merged.merge_filtered(symbols, |s: &Symbol| {
                    !functions_only || s.kind == SymbolKind::Function
                });
            }
        }
        merged
    }
}

//! Debug export of a symbol table.
//!
//! The snapshot is write-only: nothing in the crate reads it back.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::IndexResult;
use crate::storage::{ClassMetadata, SymbolTable};
use crate::symbol::Symbol;

/// Sorted, serializable view of a [`SymbolTable`].
#[derive(Debug, Clone, Serialize)]
pub struct IndexSnapshot {
    /// Module and class paths to their symbols, sorted by name.
    pub symbols: BTreeMap<String, Vec<Symbol>>,
    pub classes: BTreeMap<String, ClassMetadata>,
}

impl IndexSnapshot {
    pub fn from_table(table: &SymbolTable) -> Self {
        Self {
            symbols: table
                .entries()
                .map(|(path, set)| (path.clone(), set.sorted()))
                .collect(),
            classes: table
                .classes()
                .map(|(path, meta)| (path.clone(), meta.clone()))
                .collect(),
        }
    }

    pub fn to_json(&self) -> IndexResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the snapshot as pretty JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> IndexResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

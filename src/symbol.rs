//! Completion symbols and keyed symbol sets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Variable,
    Function,
    Class,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completion-eligible entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub insert_text: String,
}

impl Symbol {
    pub fn variable(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            insert_text: name.clone(),
            name,
            kind: SymbolKind::Variable,
        }
    }

    /// A function whose snippet places the cursor before the parameter list.
    ///
    /// `args` is echoed verbatim, e.g. `move(dx, dy)` becomes `move($0dx, dy)`.
    pub fn function(name: impl Into<String>, args: &str) -> Self {
        let name = name.into();
        Self {
            insert_text: format!("{name}($0{args})"),
            name,
            kind: SymbolKind::Function,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            insert_text: name.clone(),
            name,
            kind: SymbolKind::Class,
        }
    }

    /// Label shown in a completion list: `name\tkind`.
    pub fn label(&self) -> String {
        format!("{}\t{}", self.name, self.kind)
    }
}

/// Symbols keyed by `(name, kind)`.
///
/// A variable and a function with the same name live side by side; inserting
/// the same key twice keeps the last symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolSet {
    entries: IndexMap<(String, SymbolKind), Symbol>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol) {
        self.entries
            .insert((symbol.name.clone(), symbol.kind), symbol);
    }

    pub fn get(&self, name: &str, kind: SymbolKind) -> Option<&Symbol> {
        self.entries.get(&(name.to_string(), kind))
    }

    pub fn contains(&self, name: &str, kind: SymbolKind) -> bool {
        self.get(name, kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every symbol of `other` accepted by `filter` into this set.
    pub fn merge_filtered(&mut self, other: &SymbolSet, filter: impl Fn(&Symbol) -> bool) {
        for symbol in other.iter().filter(|s| filter(s)) {
            self.insert(symbol.clone());
        }
    }

    /// Symbols ordered by name, then kind.
    pub fn sorted(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.entries.values().cloned().collect();
        symbols.sort_by(|a, b| a.name.cmp(&b.name).then(a.kind.cmp(&b.kind)));
        symbols
    }
}

impl FromIterator<Symbol> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        let mut set = SymbolSet::new();
        for symbol in iter {
            set.insert(symbol);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_snippet_echoes_args() {
        let symbol = Symbol::function("move", "dx, dy");
        assert_eq!(symbol.insert_text, "move($0dx, dy)");
        assert_eq!(symbol.label(), "move\tfunction");
    }

    #[test]
    fn test_same_name_different_kind_does_not_collide() {
        let mut set = SymbolSet::new();
        set.insert(Symbol::variable("size"));
        set.insert(Symbol::function("size", ""));

        assert_eq!(set.len(), 2);
        assert!(set.contains("size", SymbolKind::Variable));
        assert!(set.contains("size", SymbolKind::Function));
    }

    #[test]
    fn test_reinsert_replaces() {
        let mut set = SymbolSet::new();
        set.insert(Symbol::function("run", "a"));
        set.insert(Symbol::function("run", "a, b"));

        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("run", SymbolKind::Function).unwrap().insert_text,
            "run($0a, b)"
        );
    }

    #[test]
    fn test_sorted_by_name() {
        let set: SymbolSet = ["zeta", "alpha", "mid"]
            .into_iter()
            .map(Symbol::variable)
            .collect();
        let names: Vec<_> = set.sorted().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}

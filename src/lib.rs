pub mod builtins;
pub mod cli;
pub mod config;
pub mod error;
pub mod indexing;
pub mod logging;
pub mod parsing;
pub mod query;
pub mod storage;
pub mod symbol;

pub use config::Settings;
pub use error::{IndexError, IndexResult};
pub use indexing::{
    FileIndexer, IndexStats, InheritanceResolver, ProjectIndexer, ProjectRegistry,
};
pub use query::{Completion, CompletionList, Query, QueryResolver};
pub use storage::{ClassMetadata, IndexSnapshot, SymbolTable};
pub use symbol::{Symbol, SymbolKind, SymbolSet};

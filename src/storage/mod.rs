pub mod dump;
pub mod symbol_table;

pub use dump::IndexSnapshot;
pub use symbol_table::{ClassEntry, ClassMetadata, GLOBAL_MODULE, SymbolTable};

pub mod file_indexer;
pub mod inheritance;
pub mod project;
pub mod registry;
pub mod walker;

pub use file_indexer::FileIndexer;
pub use inheritance::InheritanceResolver;
pub use project::{IndexStats, ProjectIndexer};
pub use registry::{ProjectRegistry, SharedProject};
pub use walker::FileWalker;

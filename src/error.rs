//! Error types for indexing and configuration.
//!
//! Every failure the indexer can hit is local: one unreadable file or one
//! unresolved base class never aborts the rest of a project. Callers decide
//! whether to log and continue or to surface the error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No source roots configured for project '{project}'")]
    MissingConfiguration { project: PathBuf },

    #[error("Invalid source root '{root}': {reason}")]
    InvalidSourceRoot { root: PathBuf, reason: String },

    #[error("File '{path}' is not under any configured source root")]
    NotInSourceRoot { path: PathBuf },

    #[error("Unresolved base '{name}' for class '{class}'")]
    UnresolvedBase { class: String, name: String },

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type IndexResult<T> = Result<T, IndexError>;

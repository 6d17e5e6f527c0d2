//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module.

pub mod dump;
pub mod index;
pub mod init;
pub mod query;

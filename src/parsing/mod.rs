pub mod paths;
pub mod patterns;

pub use paths::{SOURCE_EXTENSION, module_path_from_file};
pub use patterns::{LineMatch, classify};

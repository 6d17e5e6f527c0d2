//! Module path computation from file paths.
//!
//! A module path is the file's location relative to its source root with
//! separators turned into dots and the `.lua` extension removed:
//! `<root>/lib/net/http.lua` becomes `lib.net.http`.

use std::path::{Component, Path, PathBuf};

/// Extension of indexable source files, without the dot.
pub const SOURCE_EXTENSION: &str = "lua";

/// Resolve a configured source root against the project root.
///
/// `.` and empty roots denote the project root itself.
pub fn resolve_source_root(project_root: &Path, source_root: &Path) -> PathBuf {
    let mut resolved = project_root.to_path_buf();
    for component in source_root.components() {
        if let Component::Normal(part) = component {
            resolved.push(part);
        }
    }
    resolved
}

/// Whether `path` names an indexable source file.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Compute the dotted module path of `file_path` under `source_root`.
///
/// Returns `None` when the file is outside the root or is not a source file.
pub fn module_path_from_file(file_path: &Path, source_root: &Path) -> Option<String> {
    if !is_source_file(file_path) {
        return None;
    }

    let relative = file_path.strip_prefix(source_root).ok()?;
    let stem = relative.with_extension("");

    let mut parts = Vec::new();
    for component in stem.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("."))
    }
}

/// The final dotted segment of a module path: `lib.net.http` -> `http`.
pub fn last_segment(module_path: &str) -> &str {
    module_path.rsplit('.').next().unwrap_or(module_path)
}

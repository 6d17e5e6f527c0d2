//! Completion of module paths inside `require("...")`.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::{Completion, CompletionList};

static REQUIRE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\s*\(?\s*["']([^"']*)$"#).unwrap());

/// Extensions listed as requirable modules.
const MODULE_EXTENSIONS: &[&str] = &["lua", "luac"];

/// The partial module path of an unterminated `require` call ending the text.
pub fn require_path_prefix(text_before_cursor: &str) -> Option<&str> {
    REQUIRE_PREFIX
        .captures(text_before_cursor)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// List subdirectories and modules matching a partial `require` path.
///
/// For `require("lib.net.` the directory `<root>/lib/net` of every source
/// root is listed. Returns `None` if the text does not end inside a
/// `require` string.
pub fn complete_require_path(source_roots: &[PathBuf], text_before_cursor: &str) -> Option<CompletionList> {
    let partial = require_path_prefix(text_before_cursor)?;
    let segments: Vec<&str> = partial.split('.').collect();
    let directories = &segments[..segments.len() - 1];

    if !directories.iter().all(|d| is_path_segment(d)) {
        return None;
    }

    let mut items = Vec::new();
    for root in source_roots {
        let dir = directories.iter().fold(root.clone(), |acc, d| acc.join(d));
        if dir.is_dir() {
            list_directory(&dir, &mut items);
        }
    }

    items.sort_by(|a: &Completion, b| a.name.cmp(&b.name).then(a.detail.cmp(&b.detail)));
    items.dedup();

    Some(CompletionList {
        items,
        inhibit_word_completions: true,
        inhibit_explicit_completions: true,
    })
}

fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

fn list_directory(dir: &Path, items: &mut Vec<Completion>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("[require] cannot list {}: {e}", dir.display());
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            items.push(Completion::new(name, "subdirectory", name));
        } else if let Some(stem) = module_stem(&path) {
            items.push(Completion::new(stem, "module", stem));
        }
    }
}

fn module_stem(path: &Path) -> Option<&str> {
    let ext = path.extension()?.to_str()?;
    if MODULE_EXTENSIONS.contains(&ext) {
        path.file_stem()?.to_str()
    } else {
        None
    }
}

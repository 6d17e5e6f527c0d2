//! File system walker for discovering Lua sources under a source root
//!
//! Directory traversal supports:
//! - .gitignore rules
//! - Custom ignore patterns from configuration
//! - Hidden file handling

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::parsing::paths::is_source_file;

/// Walks source roots to find files to index
pub struct FileWalker {
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(ignore_patterns: Vec<String>) -> Self {
        Self { ignore_patterns }
    }

    /// Walk a directory and return the Lua files beneath it, sorted by path
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> {
        let mut builder = WalkBuilder::new(root);

        builder
            .hidden(false) // The root itself may live in a hidden directory
            .git_ignore(true) // Respect .gitignore files
            .git_global(false)
            .git_exclude(true) // Respect .git/info/exclude
            .follow_links(false)
            .max_depth(None)
            .require_git(false) // Allow gitignore to work in non-git directories
            .sort_by_file_name(|a, b| a.cmp(b))
            // Skip hidden files and directories below the root
            .filter_entry(|entry| {
                entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
            });

        builder.add_custom_ignore_filename(".luadexignore");

        // Exclusions are added as negated override globs
        let mut override_builder = ignore::overrides::OverrideBuilder::new(root);
        for pattern in &self.ignore_patterns {
            if let Err(e) = override_builder.add(&format!("!{pattern}")) {
                tracing::warn!("[walker] invalid ignore pattern '{pattern}': {e}");
            }
        }

        match override_builder.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => tracing::warn!("[walker] ignoring override patterns: {e}"),
        }

        builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("[walker] skipping entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| is_source_file(path))
    }

    /// Count files that would be indexed (useful for dry runs)
    pub fn count_files(&self, root: &Path) -> usize {
        self.walk(root).count()
    }
}

impl Default for FileWalker {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

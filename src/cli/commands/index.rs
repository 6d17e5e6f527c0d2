//! Index and Reindex commands.

use anyhow::{Context, Result};
use std::path::Path;

use crate::indexing::ProjectRegistry;

pub fn run_index(registry: &ProjectRegistry, project_root: &Path, dump: bool) -> Result<()> {
    let stats = registry
        .generate(project_root)
        .with_context(|| format!("indexing {}", project_root.display()))?;

    println!(
        "Indexed {} files ({} failed): {} modules, {} classes",
        stats.files_indexed, stats.files_failed, stats.modules, stats.classes
    );

    if dump {
        let path = registry.project(project_root)?.read().dump_index()?;
        println!("Wrote index dump to {}", path.display());
    }
    Ok(())
}

pub fn run_reindex(registry: &ProjectRegistry, file: &Path) -> Result<()> {
    if registry.reindex_file(file)? {
        println!("Reindexed {}", file.display());
    } else {
        println!("{} is not part of an indexed project", file.display());
    }
    Ok(())
}

//! Dump command.

use anyhow::Result;
use std::path::Path;

use crate::indexing::ProjectRegistry;

/// Index the project and write its snapshot.
///
/// Without `output` the configured dump path is used; `-` prints to stdout.
pub fn run_dump(registry: &ProjectRegistry, project_root: &Path, output: Option<&Path>) -> Result<()> {
    registry.generate(project_root)?;

    match output {
        Some(path) if path == Path::new("-") => {
            println!("{}", registry.dump_index(project_root)?.to_json()?);
        }
        Some(path) => {
            registry.dump_index(project_root)?.write_to(path)?;
            println!("Wrote index dump to {}", path.display());
        }
        None => {
            let path = registry.project(project_root)?.read().dump_index()?;
            println!("Wrote index dump to {}", path.display());
        }
    }
    Ok(())
}

//! Init and Config commands.

use anyhow::{Result, anyhow};
use std::path::Path;

use crate::config::Settings;

/// Create `.luadex/settings.toml` under `project_root`.
pub fn run_init(project_root: &Path, force: bool) -> Result<()> {
    let path = Settings::init_config_file(project_root, force).map_err(|e| anyhow!("{e}"))?;
    println!("Created configuration file at: {}", path.display());
    println!("Edit this file to customize your settings.");
    Ok(())
}

/// Print the effective settings.
pub fn run_config(project_root: &Path, settings: &Settings) -> Result<()> {
    println!("Configuration for {}", project_root.display());
    println!("{}", "=".repeat(50));
    println!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}

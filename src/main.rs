use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use luadex::Settings;
use luadex::cli::commands::{dump, index, init, query};
use luadex::cli::{Cli, Commands};
use luadex::indexing::ProjectRegistry;
use luadex::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let project_root = match cli.project {
        Some(path) => std::path::absolute(path)?,
        None => std::env::current_dir()?,
    };

    if let Commands::Init { force } = cli.command {
        logging::init();
        return init::run_init(&project_root, force);
    }

    // Settings are loaded once here for logging; the registry loads its own
    // copy per project.
    let settings = match Settings::load_for_project(&project_root) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            eprintln!("Using default configuration for now.");
            Settings::default()
        }
    };
    logging::init_with_config(&settings.logging);

    let registry = ProjectRegistry::new([project_root.clone()]);

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Index { dump } => index::run_index(&registry, &project_root, dump),
        Commands::Reindex { file } => index::run_reindex(&registry, &absolute(&file)?),
        Commands::Query {
            file,
            prefix,
            offset,
            json,
        } => query::run_query(
            &registry,
            query::QueryArgs {
                file: &absolute(&file)?,
                prefix: prefix.as_deref(),
                offset,
                json,
            },
        ),
        Commands::Require { file, text } => {
            query::run_require(&registry, &absolute(&file)?, &text)
        }
        Commands::Dump { output } => dump::run_dump(&registry, &project_root, output.as_deref()),
        Commands::Config => init::run_config(&project_root, &settings),
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}

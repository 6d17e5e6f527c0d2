//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Parser)]
#[command(
    name = "luadex",
    version,
    about = "Static symbol index and completion for Lua projects",
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short, long, global = true, env = "LUADEX_PROJECT")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create .luadex/settings.toml with default values
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Index every source file of the project
    Index {
        /// Also write the index dump to the configured path
        #[arg(long)]
        dump: bool,
    },

    /// Re-parse a single saved file
    Reindex {
        /// File to re-parse
        file: PathBuf,
    },

    /// Complete a `head.` or `head:` prefix inside a file
    Query {
        /// File the cursor is in
        file: PathBuf,

        /// Text before the cursor, e.g. `self.` or `math.`
        #[arg(long)]
        prefix: Option<String>,

        /// Byte offset of the cursor (defaults to the end of the file)
        #[arg(long)]
        offset: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Complete a module path inside `require("...")`
    Require {
        /// File the cursor is in
        file: PathBuf,

        /// Line text before the cursor
        #[arg(long)]
        text: String,
    },

    /// Write the index as JSON
    Dump {
        /// Output file (defaults to the configured dump path, `-` for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display active settings
    Config,
}

//! Query and Require commands.

use anyhow::{Context, Result};
use std::path::Path;

use crate::indexing::ProjectRegistry;
use crate::query::{CompletionList, Query, word_before};

pub struct QueryArgs<'a> {
    pub file: &'a Path,
    pub prefix: Option<&'a str>,
    pub offset: Option<usize>,
    pub json: bool,
}

pub fn run_query(registry: &ProjectRegistry, args: QueryArgs<'_>) -> Result<()> {
    let buffer = std::fs::read_to_string(args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let cursor = args.offset.unwrap_or(buffer.len()).min(buffer.len());
    let prefix = args.prefix.unwrap_or_else(|| word_before(&buffer, cursor));

    let query = Query {
        file_path: args.file,
        buffer: &buffer,
        cursor,
        prefix,
    };
    print_completions(registry.query(&query), args.json)
}

pub fn run_require(registry: &ProjectRegistry, file: &Path, text: &str) -> Result<()> {
    print_completions(registry.complete_require(file, text), false)
}

fn print_completions(result: Option<CompletionList>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        Some(list) => {
            for (label, insert_text) in list.pairs() {
                println!("{label}\t{insert_text}");
            }
        }
        None => eprintln!("No completions"),
    }
    Ok(())
}

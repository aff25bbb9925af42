//! Diff command
//!
//! Usage: bundiff diff <OLDER> <NEWER> [--api <FILE>] [--format text|json] [--fail-on-change]
//!
//! Each side is an exploded module directory or a `.json` tree saved by
//! `bundiff tree`.

use super::{load_resolver, EngineArgs, Input};
use bundiff_core::diff::render_human_summary;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown summary
    Text,
    /// Full delta tree as JSON
    Json,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Older module (directory or saved tree)
    pub older: PathBuf,

    /// Newer module (directory or saved tree)
    pub newer: PathBuf,

    /// API description (JSON) used for both sides
    #[arg(long)]
    pub api: Option<PathBuf>,

    /// API description for the older side (overrides --api)
    #[arg(long)]
    pub older_api: Option<PathBuf>,

    /// API description for the newer side (overrides --api)
    #[arg(long)]
    pub newer_api: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Exit with status 2 when the modules differ
    #[arg(long)]
    pub fail_on_change: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let differ = args.engine.differ()?;
    let older_resolver = load_resolver(args.older_api.as_deref().or(args.api.as_deref()))?;
    let newer_resolver = load_resolver(args.newer_api.as_deref().or(args.api.as_deref()))?;
    let older_input = Input::classify(&args.older);
    let newer_input = Input::classify(&args.newer);

    let (older, newer) = rayon::join(
        || older_input.load(&differ, &older_resolver),
        || newer_input.load(&differ, &newer_resolver),
    );
    let older = older.map_err(|e| e as Box<dyn std::error::Error>)?;
    let newer = newer.map_err(|e| e as Box<dyn std::error::Error>)?;

    let delta = differ.diff(&older, &newer);

    match args.format {
        OutputFormat::Text => print!("{}", render_human_summary(&delta)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&delta.to_data()?)?),
    }

    if args.fail_on_change && !delta.is_unchanged() {
        std::process::exit(2);
    }
    Ok(())
}

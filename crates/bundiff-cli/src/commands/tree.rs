//! Tree command
//!
//! Usage: bundiff tree <DIR> [--api <FILE>] [--output <FILE>]

use super::{load_resolver, EngineArgs};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Exploded module directory
    pub dir: PathBuf,

    /// API description (JSON) for the module
    #[arg(long)]
    pub api: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Execute tree command
pub fn execute(args: TreeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let differ = args.engine.differ()?;
    let resolver = load_resolver(args.api.as_deref())?;

    let tree = differ.tree_from_dir(&args.dir, &resolver)?;
    let json = serde_json::to_string_pretty(&tree.to_data()?)?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, json)?;
        println!("✓ Tree written to {}", output_path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

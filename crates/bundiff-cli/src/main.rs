//! bundiff CLI
//!
//! Command-line interface for extracting and comparing module structure trees

use bundiff_core::logging_facility::{self, Profile};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "bundiff")]
#[command(about = "bundiff - Structural diff for packaged modules", long_about = None)]
struct Cli {
    /// Logging profile (dev, production, test); logging is off when omitted
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract the structure tree of one exploded module as JSON
    Tree(commands::tree::TreeArgs),
    /// Compare two modules (directories or saved trees)
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log_profile {
        logging_facility::init(profile);
    }

    let result = match cli.command {
        Commands::Tree(args) => commands::tree::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! CanopyLayer CLI - Command-line interface
//!
//! This binary provides a command-line interface to the CanopyLayer
//! library: range queries over a tile batch, point inspection with
//! interaction history, and batch summaries.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "canopylayer", version, about = "Search and analysis for tree-canopy tile batches")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Query a batch by canopy range and change filters
    Search(commands::search::SearchArgs),
    /// Inspect points and show area analysis with interaction history
    Inspect(commands::inspect::InspectArgs),
    /// Show summary statistics for a batch
    Info(commands::info::InfoArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Search(args) => commands::search::run(args),
        Command::Inspect(args) => commands::inspect::run(args),
        Command::Info(args) => commands::info::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

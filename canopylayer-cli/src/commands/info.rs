//! Batch summary command.

use std::path::PathBuf;

use canopylayer::TileBatch;
use clap::Args;

use crate::error::CliError;

/// Arguments for the `info` subcommand.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Path to the batch file (JSON array of tile records)
    pub batch: PathBuf,
}

/// Run the `info` subcommand.
pub fn run(args: InfoArgs) -> Result<(), CliError> {
    let batch = TileBatch::from_json_file(&args.batch)?;
    println!("Batch: {}", args.batch.display());
    println!("{}", batch.summary());
    Ok(())
}

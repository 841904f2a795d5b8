//! CLI error types.

use canopylayer::BatchError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The record batch could not be loaded.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// A point argument was not a valid `LAT,LON` pair.
    #[error("Invalid point '{0}': expected LAT,LON in decimal degrees")]
    InvalidPoint(String),

    /// Result rows could not be serialized for output.
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

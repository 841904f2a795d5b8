//! Record batch loading.
//!
//! The core consumes a finite, in-memory batch of decoded samples.
//! Raster decoding itself happens upstream; this module handles the
//! handoff format, a JSON array of records, and computes the batch
//! summary the CLI displays.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::record::TileRecord;

/// Errors that can occur while loading a record batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The batch file could not be read.
    #[error("Failed to read batch file: {0}")]
    Io(#[from] std::io::Error),

    /// The batch contents are not a valid JSON array of records.
    #[error("Failed to parse batch JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A finite, in-memory batch of decoded tile records.
#[derive(Debug, Clone, Default)]
pub struct TileBatch {
    records: Vec<TileRecord>,
}

impl TileBatch {
    /// Wrap an already-decoded set of records.
    pub fn from_records(records: Vec<TileRecord>) -> Self {
        Self { records }
    }

    /// Load a batch from a JSON file containing an array of records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let batch = Self::from_json_str(&contents)?;
        info!(
            path = %path.as_ref().display(),
            records = batch.len(),
            "loaded tile batch"
        );
        Ok(batch)
    }

    /// Parse a batch from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<TileRecord> = serde_json::from_str(json)?;
        Ok(Self { records })
    }

    /// The records in decode order.
    pub fn records(&self) -> &[TileRecord] {
        &self.records
    }

    /// Consume the batch, yielding the records (e.g. for index
    /// construction).
    pub fn into_records(self) -> Vec<TileRecord> {
        self.records
    }

    /// Number of records in the batch.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compute summary statistics over the batch.
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            records: self.records.len(),
            ..BatchSummary::default()
        };
        if self.records.is_empty() {
            return summary;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for record in &self.records {
            min = min.min(record.canopy_level);
            max = max.max(record.canopy_level);
            sum += record.canopy_level;
            if record.gain {
                summary.gain_records += 1;
            }
            if record.loss {
                summary.loss_records += 1;
            }
        }
        summary.min_canopy = min;
        summary.max_canopy = max;
        summary.mean_canopy = sum / self.records.len() as f64;
        summary
    }
}

/// Summary statistics for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchSummary {
    /// Total record count.
    pub records: usize,
    /// Lowest canopy level in the batch (0 for an empty batch).
    pub min_canopy: f64,
    /// Highest canopy level in the batch (0 for an empty batch).
    pub max_canopy: f64,
    /// Mean canopy level (0 for an empty batch).
    pub mean_canopy: f64,
    /// Records with observed gain.
    pub gain_records: usize,
    /// Records with observed loss.
    pub loss_records: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Records: {}", self.records)?;
        writeln!(
            f,
            "Canopy:  min {:.1}%, max {:.1}%, mean {:.1}%",
            self.min_canopy, self.max_canopy, self.mean_canopy
        )?;
        write!(
            f,
            "Change:  {} gain, {} loss",
            self.gain_records, self.loss_records
        )
    }
}

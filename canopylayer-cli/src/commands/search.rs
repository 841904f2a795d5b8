//! Range-query search command.

use std::path::PathBuf;

use canopylayer::{SearchCriteria, SortStrategy, TileBatch, TileIndex, TileSearch};
use clap::{Args, ValueEnum};
use tracing::debug;

use crate::error::CliError;

/// Arguments for the `search` subcommand.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Path to the batch file (JSON array of tile records)
    pub batch: PathBuf,

    /// Minimum canopy level, inclusive (0-100)
    #[arg(long)]
    pub min_canopy: Option<f64>,

    /// Maximum canopy level, inclusive (0-100)
    #[arg(long)]
    pub max_canopy: Option<f64>,

    /// Earliest acceptable loss year (calendar year, e.g. 2005)
    #[arg(long)]
    pub min_loss_year: Option<i32>,

    /// Latest acceptable loss year (calendar year)
    #[arg(long)]
    pub max_loss_year: Option<i32>,

    /// Only records with (true) or without (false) observed gain
    #[arg(long)]
    pub gain: Option<bool>,

    /// Only records with (true) or without (false) observed loss
    #[arg(long)]
    pub loss: Option<bool>,

    /// Sort strategy used to build the index
    #[arg(long, value_enum, default_value_t = StrategyArg::Native)]
    pub strategy: StrategyArg,

    /// Emit matches as JSON rows instead of a table
    #[arg(long)]
    pub json: bool,
}

/// CLI-facing sort strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Standard library stable sort
    Native,
    /// Hybrid insertion/merge sort
    Hybrid,
}

impl From<StrategyArg> for SortStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Native => SortStrategy::Native,
            StrategyArg::Hybrid => SortStrategy::Hybrid,
        }
    }
}

impl SearchArgs {
    /// Translate the flag set into query criteria.
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            min_canopy: self.min_canopy,
            max_canopy: self.max_canopy,
            min_loss_year: self.min_loss_year,
            max_loss_year: self.max_loss_year,
            has_gain: self.gain,
            has_loss: self.loss,
        }
    }
}

/// Run the `search` subcommand.
pub fn run(args: SearchArgs) -> Result<(), CliError> {
    let batch = TileBatch::from_json_file(&args.batch)?;
    let index = TileIndex::build(batch.into_records(), args.strategy.into());
    debug!(records = index.len(), "index ready");

    let results = index.search(&args.criteria());
    let rows = results.to_rows();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:>10} {:>10} {:>8} {:>5} {:>5} {:>9}",
        "lat", "lon", "canopy", "gain", "loss", "loss_year"
    );
    for row in &rows {
        println!(
            "{:>10.4} {:>10.4} {:>7.1}% {:>5} {:>5} {:>9}",
            row.lat,
            row.lon,
            row.canopy_level,
            row.gain,
            row.loss,
            if row.loss { row.loss_year.to_string() } else { "-".to_string() },
        );
    }
    println!("{} match(es)", rows.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> SearchArgs {
        SearchArgs {
            batch: PathBuf::from("batch.json"),
            min_canopy: None,
            max_canopy: None,
            min_loss_year: None,
            max_loss_year: None,
            gain: None,
            loss: None,
            strategy: StrategyArg::Native,
            json: false,
        }
    }

    #[test]
    fn test_criteria_from_unset_flags_is_unconstrained() {
        assert!(base_args().criteria().is_unconstrained());
    }

    #[test]
    fn test_criteria_carries_flags() {
        let mut args = base_args();
        args.min_canopy = Some(40.0);
        args.loss = Some(true);
        args.min_loss_year = Some(2003);

        let criteria = args.criteria();
        assert_eq!(criteria.min_canopy, Some(40.0));
        assert_eq!(criteria.has_loss, Some(true));
        assert_eq!(criteria.min_loss_year, Some(2003));
        assert_eq!(criteria.max_canopy, None);
    }

    #[test]
    fn test_strategy_arg_maps_to_sort_strategy() {
        assert_eq!(SortStrategy::from(StrategyArg::Native), SortStrategy::Native);
        assert_eq!(SortStrategy::from(StrategyArg::Hybrid), SortStrategy::Hybrid);
    }
}

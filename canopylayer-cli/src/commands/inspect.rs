//! Point-inspection command.
//!
//! Replays one or more coordinates through an inspection session, the
//! same path a dashboard click takes, and prints the formatted report
//! for each point.

use std::path::PathBuf;

use canopylayer::{InspectionSession, TileBatch};
use clap::Args;

use crate::error::CliError;

/// Arguments for the `inspect` subcommand.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Path to the batch file (JSON array of tile records)
    pub batch: PathBuf,

    /// Points to inspect, each as LAT,LON in decimal degrees
    #[arg(required = true)]
    pub points: Vec<String>,
}

/// Run the `inspect` subcommand.
pub fn run(args: InspectArgs) -> Result<(), CliError> {
    let batch = TileBatch::from_json_file(&args.batch)?;
    let mut session = InspectionSession::new();

    for (i, raw) in args.points.iter().enumerate() {
        let (lat, lon) = parse_point(raw)?;
        let report = session.inspect(batch.records(), lat, lon);

        if i > 0 {
            println!();
        }
        println!("{}", report.click_summary);
        println!("{}", report.area_analysis);
        println!("{}", report.queue_display);
        println!("{}", report.average_canopy);
        println!("{}", report.recent_history);
    }
    Ok(())
}

/// Parse a `LAT,LON` argument into decimal degrees.
fn parse_point(raw: &str) -> Result<(f64, f64), CliError> {
    let invalid = || CliError::InvalidPoint(raw.to_string());

    let (lat, lon) = raw.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;
    Ok((lat, lon))
}

//! Interactive inspection session.
//!
//! An [`InspectionSession`] is the click-handling entry point of the
//! dashboard: each inspected coordinate updates the recent-points
//! window and the interaction log, runs the area aggregator over the
//! full batch, and yields the formatted display strings the rendering
//! layer shows. One session per user; the structures it owns are not
//! designed for shared concurrent mutation.

use tracing::{debug, info};

use crate::analysis::{analyze_area, AreaSummary, DEFAULT_DEGREE_RANGE};
use crate::history::{InspectedPoint, InteractionLog, RecentPointsWindow};
use crate::record::TileRecord;

/// Points kept for rolling-average statistics.
pub const WINDOW_CAPACITY: usize = 3;

/// Interaction summaries kept in the history log.
pub const LOG_CAPACITY: usize = 10;

/// Formatted display strings produced for one inspection.
///
/// These are the five texts the display collaborator renders: the
/// click summary, the area analysis, the point-queue display, the
/// rolling-average line, and the recent-history line.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionReport {
    /// Summary of the clicked point.
    pub click_summary: String,
    /// Multi-line area-analysis text.
    pub area_analysis: String,
    /// The recent-points queue, oldest to newest.
    pub queue_display: String,
    /// Rolling average over the recent-points window.
    pub average_canopy: String,
    /// The interaction log, most recent first.
    pub recent_history: String,
}

impl InspectionReport {
    /// The report returned when no record matches the inspected
    /// coordinate. A defined response, not a failure.
    pub fn no_data() -> Self {
        Self {
            click_summary: "Click on a point to see canopy data".to_string(),
            area_analysis: "Click to see area analysis".to_string(),
            queue_display: "Point queue: Empty".to_string(),
            average_canopy: "Average canopy log: None".to_string(),
            recent_history: "Full log: Empty".to_string(),
        }
    }
}

/// Session state for interactive point inspection.
pub struct InspectionSession {
    window: RecentPointsWindow,
    log: InteractionLog,
    degree_range: f64,
}

impl InspectionSession {
    /// Create a session with the default window and log capacities.
    pub fn new() -> Self {
        Self::with_capacities(WINDOW_CAPACITY, LOG_CAPACITY)
    }

    /// Create a session with explicit capacities.
    pub fn with_capacities(window_capacity: usize, log_capacity: usize) -> Self {
        Self {
            window: RecentPointsWindow::new(window_capacity),
            log: InteractionLog::new(log_capacity),
            degree_range: DEFAULT_DEGREE_RANGE,
        }
    }

    /// The recent-points window, for direct statistical access.
    pub fn window(&self) -> &RecentPointsWindow {
        &self.window
    }

    /// The interaction log, for direct enumeration.
    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    /// Inspect a coordinate against the full record batch.
    ///
    /// Looks the coordinate up by exact match; a coordinate with no
    /// record yields the defined no-data report. On a hit the area
    /// aggregator runs over the batch, the point enters the window,
    /// and a summary line enters the log.
    pub fn inspect(&mut self, batch: &[TileRecord], lat: f64, lon: f64) -> InspectionReport {
        let record = match batch.iter().find(|r| r.lat == lat && r.lon == lon) {
            Some(record) => *record,
            None => {
                debug!(lat, lon, "no record at inspected coordinate");
                return InspectionReport::no_data();
            }
        };

        let area = analyze_area(batch, lat, lon, self.degree_range);
        let status = point_status(&record);

        self.window.push(InspectedPoint::new(lat, lon, record));
        self.log.append(format!(
            "Lat {:.4}, Lon {:.4}: Canopy {:.1}%, {} | Area: {}",
            lat, lon, record.canopy_level, status, area.net_change
        ));

        info!(lat, lon, canopy = record.canopy_level, "inspected point");

        InspectionReport {
            click_summary: format!(
                "Clicked: Lat {:.4}, Lon {:.4}, Canopy Level: {:.1}%, {}",
                lat, lon, record.canopy_level, status
            ),
            area_analysis: self.format_area_analysis(&area),
            queue_display: self.format_queue_display(),
            average_canopy: self.format_average_canopy(),
            recent_history: self.format_recent_history(),
        }
    }

    fn format_area_analysis(&self, area: &AreaSummary) -> String {
        let side = self.degree_range * 2.0;
        format!(
            "{side:.0}°x{side:.0}° Area Analysis:\n\
             Forest Gain: {} points ({:.1}%)\n\
             Forest Loss: {} points ({:.1}%)\n\
             Total Data Points: {}\n\
             Overall Trend: {}",
            area.gain_points,
            area.gain_percentage,
            area.loss_points,
            area.loss_percentage,
            area.total_points,
            area.net_change
        )
    }

    fn format_queue_display(&self) -> String {
        if self.window.is_empty() {
            return "Point queue: Empty".to_string();
        }
        let points: Vec<String> = self
            .window
            .iter()
            .map(|p| {
                format!(
                    "({:.4}, {:.4}: {:.1}%)",
                    p.lat, p.lon, p.record.canopy_level
                )
            })
            .collect();
        format!("Point queue: {}", points.join(", "))
    }

    fn format_average_canopy(&self) -> String {
        match self.window.average_canopy() {
            Some(avg) => format!(
                "Average canopy of last {} points: {:.2}%",
                self.window.len(),
                avg
            ),
            None => "Average canopy log: None".to_string(),
        }
    }

    fn format_recent_history(&self) -> String {
        let entries: Vec<&str> = self.log.entries().collect();
        format!("Recent History: {}", entries.join(" | "))
    }
}

impl Default for InspectionSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Describe the gain/loss status of one record, e.g.
/// `"Gain detected, Loss in year 2005"`.
fn point_status(record: &TileRecord) -> String {
    let gain = if record.gain { "Gain detected" } else { "No gain" };
    let loss = match record.loss_calendar_year() {
        Some(year) => format!("Loss in year {}", year),
        None => "No loss".to_string(),
    };
    format!("{}, {}", gain, loss)
}

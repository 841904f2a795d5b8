//! Area-aggregate analysis around an inspected point.
//!
//! Given the full record batch and a center coordinate, the aggregator
//! counts gain and loss samples inside an axis-aligned lat/lon box and
//! classifies the net change. This is a full linear scan of the batch
//! per call; it runs only on user interaction, never per frame, so the
//! O(n) cost is acceptable.

use tracing::debug;

use crate::record::TileRecord;

/// Default half-width of the analysis box in degrees (a 10°×10° box).
pub const DEFAULT_DEGREE_RANGE: f64 = 5.0;

/// Axis-aligned geographic bounding box with inclusive bounds.
///
/// No geodesic correction is applied; the box is a plain rectangle in
/// lat/lon space, matching how the upstream raster grid is addressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBox {
    /// Minimum (southernmost) latitude.
    pub min_lat: f64,
    /// Maximum (northernmost) latitude.
    pub max_lat: f64,
    /// Minimum (westernmost) longitude.
    pub min_lon: f64,
    /// Maximum (easternmost) longitude.
    pub max_lon: f64,
}

impl GeoBox {
    /// Create a new bounding box.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Box centered on a point, extending `degree_range` degrees in
    /// each direction.
    pub fn around(center_lat: f64, center_lon: f64, degree_range: f64) -> Self {
        Self {
            min_lat: center_lat - degree_range,
            max_lat: center_lat + degree_range,
            min_lon: center_lon - degree_range,
            max_lon: center_lon + degree_range,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// Width of the box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

/// Net-change classification for an analyzed area.
///
/// An empty box is always `NoData`; `Neutral` is reserved for a
/// non-empty box whose gain and loss counts tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetChange {
    /// No samples fell inside the box.
    NoData,
    /// More gain samples than loss samples.
    NetGain,
    /// More loss samples than gain samples.
    NetLoss,
    /// Equal (nonzero-total) gain and loss counts.
    Neutral,
}

impl std::fmt::Display for NetChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetChange::NoData => write!(f, "No data"),
            NetChange::NetGain => write!(f, "Net Gain"),
            NetChange::NetLoss => write!(f, "Net Loss"),
            NetChange::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Aggregate counts and percentages for one analyzed area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSummary {
    /// Samples in the box with observed gain.
    pub gain_points: usize,
    /// Samples in the box with observed loss.
    pub loss_points: usize,
    /// Total samples in the box.
    pub total_points: usize,
    /// Gain percentage of the total, 0 when the box is empty.
    pub gain_percentage: f64,
    /// Loss percentage of the total, 0 when the box is empty.
    pub loss_percentage: f64,
    /// Net-change classification.
    pub net_change: NetChange,
}

impl AreaSummary {
    /// The summary reported for an empty box.
    pub fn no_data() -> Self {
        Self {
            gain_points: 0,
            loss_points: 0,
            total_points: 0,
            gain_percentage: 0.0,
            loss_percentage: 0.0,
            net_change: NetChange::NoData,
        }
    }
}

/// Analyze forest-cover changes in a box around a center point.
///
/// Scans the full batch (not the sorted index) for samples inside
/// `center ± degree_range` and computes gain/loss counts, percentages,
/// and the net-change classification. An empty box reports
/// [`NetChange::NoData`] with zero percentages rather than dividing by
/// zero.
pub fn analyze_area(
    batch: &[TileRecord],
    center_lat: f64,
    center_lon: f64,
    degree_range: f64,
) -> AreaSummary {
    let bounds = GeoBox::around(center_lat, center_lon, degree_range);

    let mut gain_points = 0;
    let mut loss_points = 0;
    let mut total_points = 0;

    for record in batch {
        if !bounds.contains(record.lat, record.lon) {
            continue;
        }
        total_points += 1;
        if record.gain {
            gain_points += 1;
        }
        if record.loss {
            loss_points += 1;
        }
    }

    if total_points == 0 {
        debug!(center_lat, center_lon, "area analysis found no samples");
        return AreaSummary::no_data();
    }

    let net_change = if gain_points > loss_points {
        NetChange::NetGain
    } else if loss_points > gain_points {
        NetChange::NetLoss
    } else {
        NetChange::Neutral
    };

    AreaSummary {
        gain_points,
        loss_points,
        total_points,
        gain_percentage: gain_points as f64 / total_points as f64 * 100.0,
        loss_percentage: loss_points as f64 / total_points as f64 * 100.0,
        net_change,
    }
}

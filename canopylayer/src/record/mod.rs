//! Tile record data model.
//!
//! A [`TileRecord`] is one decoded raster sample: a geographic coordinate
//! plus the forest-cover attributes observed there. Records are immutable
//! once constructed; everything downstream (the index, the history
//! structures, the aggregator) holds read-only views of them.

use serde::{Deserialize, Serialize};

/// Base calendar year for loss-year offsets.
///
/// The upstream dataset encodes the year of observed forest loss as a
/// small offset from 2000 (e.g. `5` means 2005).
pub const BASE_YEAR: i32 = 2000;

/// One decoded raster sample with geographic coordinate and
/// forest-cover attributes.
///
/// # Invariants
///
/// - `canopy_level` is a percentage in the 0–100 range.
/// - `loss_year` is an offset from [`BASE_YEAR`] and is only meaningful
///   when `loss` is `true`. Consumers must not interpret it otherwise;
///   [`TileRecord::loss_calendar_year`] enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Latitude in degrees (WGS84).
    pub lat: f64,
    /// Longitude in degrees (WGS84).
    pub lon: f64,
    /// Tree-cover percentage (0–100).
    pub canopy_level: f64,
    /// Forest gain observed at this sample.
    pub gain: bool,
    /// Forest loss observed at this sample.
    pub loss: bool,
    /// Year of loss as an offset from [`BASE_YEAR`]; ignored when
    /// `loss` is `false`.
    #[serde(default)]
    pub loss_year: u16,
}

impl TileRecord {
    /// Create a new tile record.
    pub fn new(lat: f64, lon: f64, canopy_level: f64, gain: bool, loss: bool, loss_year: u16) -> Self {
        Self {
            lat,
            lon,
            canopy_level,
            gain,
            loss,
            loss_year,
        }
    }

    /// The calendar year of observed loss, or `None` for a record
    /// without loss.
    pub fn loss_calendar_year(&self) -> Option<i32> {
        if self.loss {
            Some(BASE_YEAR + self.loss_year as i32)
        } else {
            None
        }
    }

    /// Check whether this record satisfies every set field of the
    /// given criteria.
    ///
    /// Unset fields impose no constraint. Loss-year bounds compare the
    /// calendar year (offset + 2000) and never match a record without
    /// loss, whatever its stored offset.
    pub fn matches(&self, criteria: &SearchCriteria) -> bool {
        if let Some(min) = criteria.min_canopy {
            if self.canopy_level < min {
                return false;
            }
        }
        if let Some(max) = criteria.max_canopy {
            if self.canopy_level > max {
                return false;
            }
        }
        if let Some(min_year) = criteria.min_loss_year {
            match self.loss_calendar_year() {
                Some(year) if year >= min_year => {}
                _ => return false,
            }
        }
        if let Some(max_year) = criteria.max_loss_year {
            match self.loss_calendar_year() {
                Some(year) if year <= max_year => {}
                _ => return false,
            }
        }
        if let Some(gain) = criteria.has_gain {
            if self.gain != gain {
                return false;
            }
        }
        if let Some(loss) = criteria.has_loss {
            if self.loss != loss {
                return false;
            }
        }
        true
    }
}

/// Search criteria for range-and-filter queries over a tile index.
///
/// Every field is optional; an unset field imposes no constraint, so
/// the default value matches every record. Canopy bounds are inclusive
/// and drive the binary-search phase of a query; the remaining fields
/// are evaluated linearly over the bounded range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchCriteria {
    /// Minimum canopy level (inclusive).
    pub min_canopy: Option<f64>,
    /// Maximum canopy level (inclusive).
    pub max_canopy: Option<f64>,
    /// Earliest acceptable loss year (calendar year, inclusive).
    pub min_loss_year: Option<i32>,
    /// Latest acceptable loss year (calendar year, inclusive).
    pub max_loss_year: Option<i32>,
    /// Require (or exclude) records with observed gain.
    pub has_gain: Option<bool>,
    /// Require (or exclude) records with observed loss.
    pub has_loss: Option<bool>,
}

impl SearchCriteria {
    /// Create criteria that match every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum canopy level (inclusive).
    pub fn with_min_canopy(mut self, min: f64) -> Self {
        self.min_canopy = Some(min);
        self
    }

    /// Set the maximum canopy level (inclusive).
    pub fn with_max_canopy(mut self, max: f64) -> Self {
        self.max_canopy = Some(max);
        self
    }

    /// Set the earliest acceptable loss year (calendar year).
    pub fn with_min_loss_year(mut self, year: i32) -> Self {
        self.min_loss_year = Some(year);
        self
    }

    /// Set the latest acceptable loss year (calendar year).
    pub fn with_max_loss_year(mut self, year: i32) -> Self {
        self.max_loss_year = Some(year);
        self
    }

    /// Require records with (or without) observed gain.
    pub fn with_gain(mut self, gain: bool) -> Self {
        self.has_gain = Some(gain);
        self
    }

    /// Require records with (or without) observed loss.
    pub fn with_loss(mut self, loss: bool) -> Self {
        self.has_loss = Some(loss);
        self
    }

    /// True when no field is set, i.e. the criteria match everything.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

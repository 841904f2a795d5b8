//! Query result collection.
//!
//! [`SearchResults`] is the ordered, append-only collection a range
//! query populates. Insertion order equals ascending canopy-level order
//! because the query engine walks the sorted index; this module does
//! not re-sort or deduplicate.

use serde::Serialize;

use crate::record::TileRecord;

/// Ordered, append-only collection of matching records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    records: Vec<TileRecord>,
}

impl SearchResults {
    /// Create an empty result collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a matching record. Duplicate coordinates pass through
    /// unchanged; the query engine appends in index order.
    pub fn append(&mut self, record: TileRecord) {
        self.records.push(record);
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate the matches in insertion (ascending canopy) order.
    pub fn iter(&self) -> std::slice::Iter<'_, TileRecord> {
        self.records.iter()
    }

    /// Borrow the matches as a slice.
    pub fn as_slice(&self) -> &[TileRecord] {
        &self.records
    }

    /// Convert to a row-oriented form for downstream rendering,
    /// one row per record with the same field set as [`TileRecord`].
    pub fn to_rows(&self) -> Vec<ResultRow> {
        self.records.iter().map(ResultRow::from).collect()
    }
}

impl IntoIterator for SearchResults {
    type Item = TileRecord;
    type IntoIter = std::vec::IntoIter<TileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a TileRecord;
    type IntoIter = std::slice::Iter<'a, TileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// One tabular row of a result set, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub lat: f64,
    pub lon: f64,
    pub canopy_level: f64,
    pub gain: bool,
    pub loss: bool,
    pub loss_year: u16,
}

impl From<&TileRecord> for ResultRow {
    fn from(record: &TileRecord) -> Self {
        Self {
            lat: record.lat,
            lon: record.lon,
            canopy_level: record.canopy_level,
            gain: record.gain,
            loss: record.loss,
            loss_year: record.loss_year,
        }
    }
}

//! Bounded interaction-history structures.
//!
//! Two fixed-capacity collections back the interactive session: a
//! [`RecentPointsWindow`] holding the last few inspected points for
//! rolling statistics, and an [`InteractionLog`] holding formatted
//! interaction summaries most-recent-first. Both evict their oldest
//! entry in O(1) once full, using a ring buffer rather than the walked
//! linked list an earlier design used. Neither is designed for shared
//! concurrent mutation; each session owns its own instances.

use std::collections::VecDeque;

use crate::record::TileRecord;

/// One inspected point: the clicked coordinate and the record found
/// there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InspectedPoint {
    pub lat: f64,
    pub lon: f64,
    pub record: TileRecord,
}

impl InspectedPoint {
    /// Create a new inspected point.
    pub fn new(lat: f64, lon: f64, record: TileRecord) -> Self {
        Self { lat, lon, record }
    }
}

/// Fixed-capacity FIFO of the most recently inspected points.
///
/// Insertion order defines recency; pushing past capacity drops the
/// oldest entry. Enumeration runs oldest-to-newest, the order the
/// display layer renders the point queue in.
#[derive(Debug, Clone)]
pub struct RecentPointsWindow {
    points: VecDeque<InspectedPoint>,
    capacity: usize,
}

impl RecentPointsWindow {
    /// Create an empty window with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point at the most-recent end, evicting the oldest
    /// entry when the window is full.
    pub fn push(&mut self, point: InspectedPoint) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Arithmetic mean of the canopy levels currently held, or `None`
    /// when the window is empty.
    pub fn average_canopy(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|p| p.record.canopy_level).sum();
        Some(sum / self.points.len() as f64)
    }

    /// Snapshot of the held points, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &InspectedPoint> {
        self.points.iter()
    }

    /// Number of points currently held.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no point has been inspected yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The fixed capacity set at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Fixed-capacity, most-recent-first log of interaction summaries.
///
/// Appending makes the new entry logically first; once at capacity the
/// oldest entry is discarded. Insert and evict are both O(1).
#[derive(Debug, Clone)]
pub struct InteractionLog {
    // Front is newest, back is oldest.
    entries: VecDeque<String>,
    capacity: usize,
}

impl InteractionLog {
    /// Create an empty log with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a new entry as the most recent, discarding the oldest
    /// once the log is at capacity.
    pub fn append(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Enumerate entries from most recent to oldest.
    ///
    /// The iterator borrows the log without mutating it, so it can be
    /// restarted by calling this again.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fixed capacity set at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

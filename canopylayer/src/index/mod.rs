//! Tile index and range-query engine.
//!
//! A [`TileIndex`] owns a batch of records sorted ascending by canopy
//! level and answers range-and-filter queries: canopy bounds are
//! resolved with binary search (O(log n) per bound), then the bounded
//! range is scanned linearly against the remaining criteria (O(k) in
//! the size of the range, not the whole index). The index is built
//! exactly once and never mutated; rebuilding means constructing a new
//! index.

use tracing::debug;

use crate::record::{SearchCriteria, TileRecord};
use crate::results::SearchResults;
use crate::sort::SortStrategy;

/// The one capability a tile search engine must provide.
///
/// There is a single conforming implementation ([`TileIndex`]); the
/// trait marks the seam where the dashboard layer consumes search
/// without caring how the index is organized.
pub trait TileSearch {
    /// Run a query and collect every matching record in ascending
    /// canopy-level order.
    fn search(&self, criteria: &SearchCriteria) -> SearchResults;
}

/// Sorted, immutable index over a batch of tile records.
#[derive(Debug, Clone)]
pub struct TileIndex {
    /// Records in non-decreasing canopy-level order; ties keep the
    /// batch's input order (the sort is stable).
    records: Vec<TileRecord>,
}

impl TileIndex {
    /// Build an index from a batch of records using the given sort
    /// strategy.
    ///
    /// Construction takes ownership of the batch; the unsorted order
    /// is not retained.
    pub fn build(mut records: Vec<TileRecord>, strategy: SortStrategy) -> Self {
        strategy.sort(&mut records);
        debug!(
            records = records.len(),
            strategy = %strategy,
            "built tile index"
        );
        Self { records }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The indexed records in ascending canopy-level order.
    pub fn records(&self) -> &[TileRecord] {
        &self.records
    }
}

impl TileSearch for TileIndex {
    fn search(&self, criteria: &SearchCriteria) -> SearchResults {
        let mut results = SearchResults::new();
        let mut start = 0;
        let mut end = self.records.len();

        if let Some(min) = criteria.min_canopy {
            match lower_bound(&self.records, min) {
                Some(idx) => start = idx,
                // No record reaches the minimum canopy level.
                None => return results,
            }
        }

        if let Some(max) = criteria.max_canopy {
            match upper_bound(&self.records, max) {
                Some(idx) => end = idx + 1,
                // No record is under the maximum canopy level.
                None => return results,
            }
        }

        // min_canopy > max_canopy derives start >= end: a valid query
        // with an empty range, not an error.
        if start >= end {
            return results;
        }

        for record in &self.records[start..end] {
            if record.matches(criteria) {
                results.append(*record);
            }
        }

        debug!(
            start,
            end,
            matched = results.len(),
            "range query complete"
        );
        results
    }
}

/// Leftmost index whose canopy level is `>= min_canopy`, or `None`
/// when no record qualifies.
fn lower_bound(records: &[TileRecord], min_canopy: f64) -> Option<usize> {
    let mut lo = 0;
    let mut hi = records.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if records[mid].canopy_level >= min_canopy {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    (lo < records.len()).then_some(lo)
}

/// Rightmost index whose canopy level is `<= max_canopy`, or `None`
/// when no record qualifies.
fn upper_bound(records: &[TileRecord], max_canopy: f64) -> Option<usize> {
    let mut lo = 0;
    let mut hi = records.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if records[mid].canopy_level <= max_canopy {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    // `lo` is one past the last qualifying index.
    lo.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lat: f64, lon: f64, canopy: f64, gain: bool, loss: bool, loss_year: u16) -> TileRecord {
        TileRecord::new(lat, lon, canopy, gain, loss, loss_year)
    }

    /// The three-record scenario used throughout the query tests.
    fn scenario_index() -> TileIndex {
        TileIndex::build(
            vec![
                record(0.0, 0.0, 10.0, false, false, 0),
                record(1.0, 1.0, 50.0, true, false, 0),
                record(2.0, 2.0, 90.0, false, true, 5),
            ],
            SortStrategy::Native,
        )
    }

    mod bounds {
        use super::*;

        fn index_of(canopy: &[f64]) -> Vec<TileRecord> {
            canopy
                .iter()
                .map(|&c| record(0.0, 0.0, c, false, false, 0))
                .collect()
        }

        #[test]
        fn test_lower_bound_finds_leftmost_qualifying() {
            let records = index_of(&[10.0, 20.0, 20.0, 30.0]);
            assert_eq!(lower_bound(&records, 15.0), Some(1));
            assert_eq!(lower_bound(&records, 20.0), Some(1));
            assert_eq!(lower_bound(&records, 5.0), Some(0));
        }

        #[test]
        fn test_lower_bound_none_when_all_below() {
            let records = index_of(&[10.0, 20.0, 30.0]);
            assert_eq!(lower_bound(&records, 31.0), None);
        }

        #[test]
        fn test_upper_bound_finds_rightmost_qualifying() {
            let records = index_of(&[10.0, 20.0, 20.0, 30.0]);
            assert_eq!(upper_bound(&records, 25.0), Some(2));
            assert_eq!(upper_bound(&records, 20.0), Some(2));
            assert_eq!(upper_bound(&records, 30.0), Some(3));
        }

        #[test]
        fn test_upper_bound_none_when_all_above() {
            let records = index_of(&[10.0, 20.0, 30.0]);
            assert_eq!(upper_bound(&records, 9.0), None);
        }

        #[test]
        fn test_bounds_on_empty_slice() {
            let records: Vec<TileRecord> = Vec::new();
            assert_eq!(lower_bound(&records, 0.0), None);
            assert_eq!(upper_bound(&records, 100.0), None);
        }
    }

    mod search {
        use super::*;

        #[test]
        fn test_build_sorts_by_canopy() {
            let index = scenario_index();
            let canopy: Vec<f64> = index.records().iter().map(|r| r.canopy_level).collect();
            assert_eq!(canopy, vec![10.0, 50.0, 90.0]);
        }

        #[test]
        fn test_unconstrained_query_returns_whole_index() {
            let index = scenario_index();
            let results = index.search(&SearchCriteria::new());
            assert_eq!(results.len(), 3);
            let canopy: Vec<f64> = results.iter().map(|r| r.canopy_level).collect();
            assert_eq!(canopy, vec![10.0, 50.0, 90.0]);
        }

        #[test]
        fn test_canopy_range_returns_bounded_records() {
            let index = scenario_index();
            let criteria = SearchCriteria::new().with_min_canopy(40.0).with_max_canopy(95.0);
            let results = index.search(&criteria);

            let canopy: Vec<f64> = results.iter().map(|r| r.canopy_level).collect();
            assert_eq!(canopy, vec![50.0, 90.0]);
        }

        #[test]
        fn test_loss_year_filter_within_range() {
            let index = scenario_index();
            let criteria = SearchCriteria::new().with_loss(true).with_min_loss_year(2003);
            let results = index.search(&criteria);

            // Only the loss record (offset 5 → 2005 >= 2003) matches.
            assert_eq!(results.len(), 1);
            assert_eq!(results.iter().next().unwrap().canopy_level, 90.0);
        }

        #[test]
        fn test_min_above_all_records_is_empty() {
            let index = scenario_index();
            let results = index.search(&SearchCriteria::new().with_min_canopy(100.0));
            assert!(results.is_empty());
        }

        #[test]
        fn test_max_below_all_records_is_empty() {
            let index = scenario_index();
            let results = index.search(&SearchCriteria::new().with_max_canopy(5.0));
            assert!(results.is_empty());
        }

        #[test]
        fn test_inverted_bounds_yield_empty_not_error() {
            let index = scenario_index();
            let criteria = SearchCriteria::new().with_min_canopy(80.0).with_max_canopy(20.0);
            assert!(index.search(&criteria).is_empty());
        }

        #[test]
        fn test_empty_index_yields_empty_for_any_query() {
            let index = TileIndex::build(Vec::new(), SortStrategy::Hybrid);
            assert!(index.is_empty());
            assert!(index.search(&SearchCriteria::new()).is_empty());
            assert!(index
                .search(&SearchCriteria::new().with_min_canopy(0.0))
                .is_empty());
        }

        #[test]
        fn test_repeated_queries_are_idempotent() {
            let index = scenario_index();
            let criteria = SearchCriteria::new().with_min_canopy(20.0);
            let first = index.search(&criteria);
            let second = index.search(&criteria);
            assert_eq!(first, second);
        }

        #[test]
        fn test_gain_filter_conjoined_with_canopy_bounds() {
            let index = scenario_index();
            let criteria = SearchCriteria::new()
                .with_min_canopy(40.0)
                .with_max_canopy(95.0)
                .with_gain(true);
            let results = index.search(&criteria);
            assert_eq!(results.len(), 1);
            assert_eq!(results.iter().next().unwrap().canopy_level, 50.0);
        }

        #[test]
        fn test_hybrid_built_index_searches_identically() {
            let batch = vec![
                record(0.0, 0.0, 10.0, false, false, 0),
                record(1.0, 1.0, 50.0, true, false, 0),
                record(2.0, 2.0, 90.0, false, true, 5),
            ];
            let native = TileIndex::build(batch.clone(), SortStrategy::Native);
            let hybrid = TileIndex::build(batch, SortStrategy::Hybrid);

            let criteria = SearchCriteria::new().with_min_canopy(40.0);
            assert_eq!(native.search(&criteria), hybrid.search(&criteria));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_record() -> impl Strategy<Value = TileRecord> {
            (
                -85.0..85.0f64,
                -180.0..180.0f64,
                0.0..=100.0f64,
                any::<bool>(),
                any::<bool>(),
                0u16..24,
            )
                .prop_map(|(lat, lon, canopy, gain, loss, loss_year)| {
                    TileRecord::new(lat, lon, canopy, gain, loss, loss_year)
                })
        }

        fn arb_criteria() -> impl Strategy<Value = SearchCriteria> {
            (
                proptest::option::of(0.0..=100.0f64),
                proptest::option::of(0.0..=100.0f64),
                proptest::option::of(2000i32..2024),
                proptest::option::of(2000i32..2024),
                proptest::option::of(any::<bool>()),
                proptest::option::of(any::<bool>()),
            )
                .prop_map(
                    |(min_canopy, max_canopy, min_loss_year, max_loss_year, has_gain, has_loss)| {
                        SearchCriteria {
                            min_canopy,
                            max_canopy,
                            min_loss_year,
                            max_loss_year,
                            has_gain,
                            has_loss,
                        }
                    },
                )
        }

        proptest! {
            #[test]
            fn test_search_agrees_with_naive_filter(
                batch in prop::collection::vec(arb_record(), 0..120),
                criteria in arb_criteria()
            ) {
                // The binary-search-bounded query must return exactly
                // the records a full scan of the sorted index accepts,
                // in the same order.
                let index = TileIndex::build(batch, SortStrategy::Native);
                let results = index.search(&criteria);

                let expected: Vec<TileRecord> = index
                    .records()
                    .iter()
                    .filter(|r| r.matches(&criteria))
                    .copied()
                    .collect();

                let actual: Vec<TileRecord> = results.into_iter().collect();
                prop_assert_eq!(actual, expected);
            }

            #[test]
            fn test_relaxing_a_bound_never_shrinks_results(
                batch in prop::collection::vec(arb_record(), 0..120),
                criteria in arb_criteria()
            ) {
                let index = TileIndex::build(batch, SortStrategy::Native);
                let constrained = index.search(&criteria).len();

                for relaxed in [
                    SearchCriteria { min_canopy: None, ..criteria },
                    SearchCriteria { max_canopy: None, ..criteria },
                    SearchCriteria { min_loss_year: None, ..criteria },
                    SearchCriteria { max_loss_year: None, ..criteria },
                    SearchCriteria { has_gain: None, ..criteria },
                    SearchCriteria { has_loss: None, ..criteria },
                ] {
                    prop_assert!(index.search(&relaxed).len() >= constrained);
                }
            }

            #[test]
            fn test_results_are_canopy_ordered(
                batch in prop::collection::vec(arb_record(), 0..120),
                criteria in arb_criteria()
            ) {
                let index = TileIndex::build(batch, SortStrategy::Hybrid);
                let results = index.search(&criteria);
                let ordered = results
                    .as_slice()
                    .windows(2)
                    .all(|w| w[0].canopy_level <= w[1].canopy_level);
                prop_assert!(ordered);
            }
        }
    }
}

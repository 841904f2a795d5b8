//! Sort engine for building the tile index.
//!
//! Orders a batch of [`TileRecord`]s ascending by canopy level. Two
//! interchangeable strategies are provided: the standard library's
//! stable sort, and a hybrid insertion/merge sort that sorts fixed-size
//! runs in place and then merges adjacent runs pairwise with doubling
//! width. Both are stable and must produce identical output for
//! identical input; the test suite asserts this equivalence.

use crate::record::TileRecord;

/// Run length for the hybrid strategy's insertion-sort phase.
pub const RUN_LENGTH: usize = 32;

/// Sorting strategy used to build a tile index.
///
/// The strategies are interchangeable: given identical input they
/// produce identical output order, including tie resolution (equal
/// canopy levels keep their input order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortStrategy {
    /// The standard library's stable comparison sort.
    #[default]
    Native,
    /// Hybrid insertion/merge sort with fixed-size runs.
    Hybrid,
}

impl SortStrategy {
    /// Sort records ascending by canopy level, stable.
    pub fn sort(&self, records: &mut [TileRecord]) {
        match self {
            SortStrategy::Native => native_sort(records),
            SortStrategy::Hybrid => hybrid_sort(records),
        }
    }
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortStrategy::Native => write!(f, "native"),
            SortStrategy::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Delegate to `slice::sort_by`, which is a stable merge sort.
///
/// `total_cmp` is used for the key comparison; canopy levels are
/// percentages in 0–100, so the total order agrees with the partial
/// order the hybrid strategy's `<=`/`>` comparisons induce.
fn native_sort(records: &mut [TileRecord]) {
    records.sort_by(|a, b| a.canopy_level.total_cmp(&b.canopy_level));
}

/// Hybrid insertion/merge sort.
///
/// Partitions the input into runs of [`RUN_LENGTH`], sorts each run in
/// place with insertion sort, then iteratively merges adjacent runs
/// pairwise, doubling the merge width until a single run remains.
fn hybrid_sort(records: &mut [TileRecord]) {
    let n = records.len();

    let mut start = 0;
    while start < n {
        let end = (start + RUN_LENGTH).min(n);
        insertion_sort(&mut records[start..end]);
        start = end;
    }

    let mut width = RUN_LENGTH;
    while width < n {
        let mut left = 0;
        while left < n {
            let mid = (left + width).min(n);
            let right = (left + 2 * width).min(n);
            // A lone tail run has nothing to merge with.
            if mid < right {
                merge(records, left, mid, right);
            }
            left += 2 * width;
        }
        width *= 2;
    }
}

/// In-place insertion sort of one run, shifting elements right while
/// the predecessor's key exceeds the current key. Stable: equal keys
/// never shift past each other.
fn insertion_sort(run: &mut [TileRecord]) {
    for i in 1..run.len() {
        let current = run[i];
        let mut j = i;
        while j > 0 && run[j - 1].canopy_level > current.canopy_level {
            run[j] = run[j - 1];
            j -= 1;
        }
        run[j] = current;
    }
}

/// Merge the two contiguous sorted runs `[left, mid)` and `[mid, right)`.
///
/// On equal keys the left run's record is emitted first, which is what
/// makes the overall sort stable.
fn merge(records: &mut [TileRecord], left: usize, mid: usize, right: usize) {
    let left_run = records[left..mid].to_vec();
    let right_run = records[mid..right].to_vec();

    let mut i = 0;
    let mut j = 0;
    let mut k = left;

    while i < left_run.len() && j < right_run.len() {
        if left_run[i].canopy_level <= right_run[j].canopy_level {
            records[k] = left_run[i];
            i += 1;
        } else {
            records[k] = right_run[j];
            j += 1;
        }
        k += 1;
    }
    while i < left_run.len() {
        records[k] = left_run[i];
        i += 1;
        k += 1;
    }
    while j < right_run.len() {
        records[k] = right_run[j];
        j += 1;
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records where `lat` encodes the input position, so stability is
    /// observable on equal canopy levels.
    fn tagged_records(canopy_levels: &[f64]) -> Vec<TileRecord> {
        canopy_levels
            .iter()
            .enumerate()
            .map(|(i, &canopy)| TileRecord::new(i as f64, 0.0, canopy, false, false, 0))
            .collect()
    }

    fn is_sorted(records: &[TileRecord]) -> bool {
        records
            .windows(2)
            .all(|w| w[0].canopy_level <= w[1].canopy_level)
    }

    #[test]
    fn test_native_sorts_ascending() {
        let mut records = tagged_records(&[90.0, 10.0, 50.0, 30.0, 70.0]);
        SortStrategy::Native.sort(&mut records);
        assert!(is_sorted(&records));
    }

    #[test]
    fn test_hybrid_sorts_ascending() {
        let mut records = tagged_records(&[90.0, 10.0, 50.0, 30.0, 70.0]);
        SortStrategy::Hybrid.sort(&mut records);
        assert!(is_sorted(&records));
    }

    #[test]
    fn test_hybrid_sorts_input_longer_than_one_run() {
        // 100 elements forces the merge phase (runs of 32).
        let canopy: Vec<f64> = (0..100).map(|i| ((i * 37) % 101) as f64).collect();
        let mut records = tagged_records(&canopy);
        SortStrategy::Hybrid.sort(&mut records);
        assert!(is_sorted(&records));
        assert_eq!(records.len(), 100);
    }

    #[test]
    fn test_empty_and_single_element() {
        for strategy in [SortStrategy::Native, SortStrategy::Hybrid] {
            let mut empty: Vec<TileRecord> = Vec::new();
            strategy.sort(&mut empty);
            assert!(empty.is_empty());

            let mut single = tagged_records(&[42.0]);
            strategy.sort(&mut single);
            assert_eq!(single[0].canopy_level, 42.0);
        }
    }

    #[test]
    fn test_stability_preserves_input_order_on_ties() {
        // Three records share canopy 50; their lat tags must stay in
        // input order after sorting.
        let records = tagged_records(&[50.0, 20.0, 50.0, 80.0, 50.0]);
        for strategy in [SortStrategy::Native, SortStrategy::Hybrid] {
            let mut sorted = records.clone();
            strategy.sort(&mut sorted);
            let tied_tags: Vec<f64> = sorted
                .iter()
                .filter(|r| r.canopy_level == 50.0)
                .map(|r| r.lat)
                .collect();
            assert_eq!(tied_tags, vec![0.0, 2.0, 4.0]);
        }
    }

    #[test]
    fn test_strategies_agree_on_already_sorted_input() {
        let canopy: Vec<f64> = (0..80).map(|i| i as f64).collect();
        let mut native = tagged_records(&canopy);
        let mut hybrid = native.clone();
        SortStrategy::Native.sort(&mut native);
        SortStrategy::Hybrid.sort(&mut hybrid);
        assert_eq!(native, hybrid);
    }

    #[test]
    fn test_equivalence_on_large_random_batch() {
        use rand::prelude::*;

        let mut rng = rand::rng();
        let canopy: Vec<f64> = (0..500).map(|_| rng.random_range(0.0..=100.0)).collect();

        let mut native = tagged_records(&canopy);
        let mut hybrid = native.clone();
        SortStrategy::Native.sort(&mut native);
        SortStrategy::Hybrid.sort(&mut hybrid);
        assert_eq!(native, hybrid);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(SortStrategy::Native.to_string(), "native");
        assert_eq!(SortStrategy::Hybrid.to_string(), "hybrid");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_sort_equivalence(
                canopy in prop::collection::vec(0.0..=100.0f64, 0..200)
            ) {
                // Both strategies must produce byte-for-byte identical
                // output order, including tie resolution.
                let mut native = tagged_records(&canopy);
                let mut hybrid = native.clone();

                SortStrategy::Native.sort(&mut native);
                SortStrategy::Hybrid.sort(&mut hybrid);

                prop_assert_eq!(native, hybrid);
            }

            #[test]
            fn test_hybrid_output_is_sorted_permutation(
                canopy in prop::collection::vec(0.0..=100.0f64, 0..200)
            ) {
                let mut records = tagged_records(&canopy);
                SortStrategy::Hybrid.sort(&mut records);

                prop_assert!(is_sorted(&records));

                // Same multiset of position tags, so nothing was lost
                // or duplicated.
                let mut tags: Vec<f64> = records.iter().map(|r| r.lat).collect();
                tags.sort_by(f64::total_cmp);
                let expected: Vec<f64> = (0..canopy.len()).map(|i| i as f64).collect();
                prop_assert_eq!(tags, expected);
            }

            #[test]
            fn test_equivalence_with_heavy_ties(
                // Keys drawn from a tiny set to force many ties.
                canopy in prop::collection::vec(prop::sample::select(
                    vec![0.0f64, 25.0, 50.0, 75.0, 100.0]), 0..150)
            ) {
                let mut native = tagged_records(&canopy);
                let mut hybrid = native.clone();

                SortStrategy::Native.sort(&mut native);
                SortStrategy::Hybrid.sort(&mut hybrid);

                prop_assert_eq!(native, hybrid);
            }
        }
    }
}

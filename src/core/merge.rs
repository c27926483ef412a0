//! Coalescing of raw ranges into a sorted, minimal range set.

use crate::domain::model::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the merger treats a range that overlaps the previous one instead of
/// starting exactly one past its end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Merge only when `start == previous_end + 1`; the merged end is the
    /// current range's end. Overlapping or contained ranges stay separate
    /// entries.
    StrictAdjacency,
    /// Merge when `start <= previous_end + 1`, extending to the larger end.
    #[default]
    OverlapSafe,
}

impl MergePolicy {
    fn joins(self, last: &Range, current: &Range) -> bool {
        match self {
            MergePolicy::StrictAdjacency => last.end.checked_add(1) == Some(current.start),
            MergePolicy::OverlapSafe => current.start <= last.end.saturating_add(1),
        }
    }

    fn joined_end(self, last: &Range, current: &Range) -> u32 {
        match self {
            MergePolicy::StrictAdjacency => current.end,
            MergePolicy::OverlapSafe => last.end.max(current.end),
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::StrictAdjacency => f.write_str("strict-adjacency"),
            MergePolicy::OverlapSafe => f.write_str("overlap-safe"),
        }
    }
}

/// Sorts `ranges` by `(start, end)` and folds neighbours together according to
/// `policy`.
pub fn merge_ranges(mut ranges: Vec<Range>, policy: MergePolicy) -> Vec<Range> {
    ranges.sort_unstable();

    let mut merged: Vec<Range> = Vec::with_capacity(ranges.len());
    for current in ranges {
        match merged.last_mut() {
            Some(last) if policy.joins(last, &current) => {
                last.end = policy.joined_end(last, &current);
            }
            _ => merged.push(current),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ranges(pairs: &[(u32, u32)]) -> Vec<Range> {
        pairs.iter().copied().map(Range::from).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_ranges(vec![], MergePolicy::StrictAdjacency).is_empty());
        assert!(merge_ranges(vec![], MergePolicy::OverlapSafe).is_empty());
    }

    #[test]
    fn test_adjacent_ranges_collapse_after_sorting() {
        let input = ranges(&[(0x41, 0x5A), (0x61, 0x7A), (0x5B, 0x60)]);

        for policy in [MergePolicy::StrictAdjacency, MergePolicy::OverlapSafe] {
            assert_eq!(
                merge_ranges(input.clone(), policy),
                ranges(&[(0x41, 0x7A)]),
                "policy {policy}"
            );
        }
    }

    #[test]
    fn test_non_adjacent_ranges_unchanged() {
        let input = ranges(&[(0x41, 0x5A), (0x100, 0x200)]);

        for policy in [MergePolicy::StrictAdjacency, MergePolicy::OverlapSafe] {
            assert_eq!(merge_ranges(input.clone(), policy), input);
        }
    }

    #[test]
    fn test_single_code_points_chain() {
        let input = ranges(&[(0x5F, 0x5F), (0x5D, 0x5D), (0x5E, 0x5E)]);
        assert_eq!(
            merge_ranges(input, MergePolicy::StrictAdjacency),
            ranges(&[(0x5D, 0x5F)])
        );
    }

    // Strict adjacency leaves overlapping entries side by side.
    #[test]
    fn test_strict_adjacency_keeps_overlap() {
        let input = ranges(&[(0x41, 0x5A), (0x50, 0x60)]);
        assert_eq!(
            merge_ranges(input, MergePolicy::StrictAdjacency),
            ranges(&[(0x41, 0x5A), (0x50, 0x60)])
        );
    }

    #[test]
    fn test_strict_adjacency_keeps_duplicates() {
        let input = ranges(&[(0xAA, 0xAA), (0xAA, 0xAA)]);
        assert_eq!(
            merge_ranges(input, MergePolicy::StrictAdjacency),
            ranges(&[(0xAA, 0xAA), (0xAA, 0xAA)])
        );
    }

    #[test]
    fn test_overlap_safe_absorbs_overlap_and_containment() {
        let input = ranges(&[(0x41, 0x5A), (0x50, 0x60), (0x42, 0x43), (0x61, 0x61)]);
        assert_eq!(
            merge_ranges(input, MergePolicy::OverlapSafe),
            ranges(&[(0x41, 0x61)])
        );
    }

    #[test]
    fn test_range_ending_at_u32_max() {
        let input = ranges(&[(0, 10), (u32::MAX - 1, u32::MAX), (5, u32::MAX)]);

        assert_eq!(
            merge_ranges(input.clone(), MergePolicy::OverlapSafe),
            ranges(&[(0, u32::MAX)])
        );
        assert_eq!(
            merge_ranges(input, MergePolicy::StrictAdjacency),
            ranges(&[(0, 10), (5, u32::MAX), (u32::MAX - 1, u32::MAX)])
        );
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(MergePolicy::default(), MergePolicy::OverlapSafe);
        assert_eq!(MergePolicy::StrictAdjacency.to_string(), "strict-adjacency");

        let policy: MergePolicy = serde_json::from_str("\"strict-adjacency\"").unwrap();
        assert_eq!(policy, MergePolicy::StrictAdjacency);
    }

    fn arb_ranges() -> impl Strategy<Value = Vec<Range>> {
        prop::collection::vec(
            (0u32..=0x10FFFF, 0u32..64).prop_map(|(start, width)| {
                Range::new(start, start.saturating_add(width).min(0x10FFFF))
            }),
            0..48,
        )
    }

    /// Ranges that never overlap, so both policies must agree.
    fn arb_disjoint_ranges() -> impl Strategy<Value = Vec<Range>> {
        prop::collection::vec((0u32..4, 0u32..8), 0..48)
            .prop_map(|steps| {
                let mut next = 0u32;
                let mut out = Vec::new();
                for (gap, width) in steps {
                    let start = next + gap;
                    let end = start + width;
                    out.push(Range::new(start, end));
                    next = end + 1;
                }
                out
            })
            .prop_shuffle()
    }

    fn covered(ranges: &[Range]) -> std::collections::BTreeSet<u32> {
        ranges.iter().flat_map(|r| r.start..=r.end).collect()
    }

    proptest! {
        #[test]
        fn prop_overlap_safe_is_idempotent(input in arb_ranges()) {
            let once = merge_ranges(input, MergePolicy::OverlapSafe);
            let twice = merge_ranges(once.clone(), MergePolicy::OverlapSafe);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_strict_adjacency_is_idempotent_without_overlap(input in arb_disjoint_ranges()) {
            let once = merge_ranges(input, MergePolicy::StrictAdjacency);
            let twice = merge_ranges(once.clone(), MergePolicy::StrictAdjacency);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_union_is_preserved(input in arb_ranges()) {
            let merged = merge_ranges(input.clone(), MergePolicy::OverlapSafe);
            prop_assert_eq!(covered(&merged), covered(&input));
        }

        #[test]
        fn prop_output_sorted_with_strict_gaps(input in arb_ranges()) {
            let merged = merge_ranges(input, MergePolicy::OverlapSafe);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].end + 1 < pair[1].start, "{:?}", pair);
            }
        }

        #[test]
        fn prop_policies_agree_without_overlap(input in arb_disjoint_ranges()) {
            let strict = merge_ranges(input.clone(), MergePolicy::StrictAdjacency);
            let safe = merge_ranges(input.clone(), MergePolicy::OverlapSafe);
            prop_assert_eq!(&strict, &safe);
            prop_assert_eq!(covered(&strict), covered(&input));
            for pair in strict.windows(2) {
                prop_assert!(pair[0].end + 1 < pair[1].start, "{:?}", pair);
            }
        }
    }
}

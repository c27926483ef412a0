use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A Unicode code point. No upper bound is enforced; whatever the source data
/// contains is accepted.
pub type CodePoint = u32;

/// Inclusive, contiguous interval of code points. `start <= end` always holds
/// for ranges produced by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: CodePoint,
    pub end: CodePoint,
}

impl Range {
    pub fn new(start: CodePoint, end: CodePoint) -> Self {
        debug_assert!(start <= end, "range start {start:#X} exceeds end {end:#X}");
        Self { start, end }
    }

    pub fn single(code_point: CodePoint) -> Self {
        Self::new(code_point, code_point)
    }

    /// Number of code points covered.
    pub fn size(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    pub fn contains(&self, code_point: CodePoint) -> bool {
        self.start <= code_point && code_point <= self.end
    }
}

impl From<(CodePoint, CodePoint)> for Range {
    fn from((start, end): (CodePoint, CodePoint)) -> Self {
        Self::new(start, end)
    }
}

/// One merged property class, sorted ascending by start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTable {
    pub property: String,
    pub ranges: Vec<Range>,
}

impl PropertyTable {
    pub fn new(property: impl Into<String>, ranges: Vec<Range>) -> Self {
        Self {
            property: property.into(),
            ranges,
        }
    }

    /// Membership test by binary search; relies on the ranges being sorted and
    /// disjoint, which holds for merger output.
    pub fn contains(&self, code_point: CodePoint) -> bool {
        self.ranges
            .binary_search_by(|range| {
                if range.end < code_point {
                    Ordering::Less
                } else if range.start > code_point {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn code_point_count(&self) -> u64 {
        self.ranges.iter().map(Range::size).sum()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Raw property-table text plus where it came from.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub origin: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub origin: String,
    pub tables: Vec<PropertyTable>,
    pub raw_range_count: usize,
}

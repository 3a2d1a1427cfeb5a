//! Busy intervals and the interval merger.
//!
//! Sorts intervals by start time and folds overlapping or touching neighbours
//! into a sorted, pairwise-disjoint list whose union equals the input's union.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open span of busy time `[start, end)`.
///
/// Stores normalize to UTC at the boundary; all wall-clock reasoning happens
/// in the engine's canonical timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, returning `None` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Half-open overlap test. Adjacent intervals do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Merge overlapping or touching intervals.
///
/// Returns a list sorted by start. Intervals where `next.start == last.end`
/// are joined into one. Empty or inverted intervals, which can only be built
/// through the public fields, are dropped.
pub fn merge(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals
        .iter()
        .filter(|iv| iv.start < iv.end)
        .copied()
        .collect();
    // Sort by start time (then by end time for stability).
    sorted.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for iv in sorted {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }

    merged
}

/// True when `[start, end)` does not overlap any interval in `busy`.
///
/// `busy` need not be merged; an empty or inverted query range is never
/// available.
pub fn is_available(busy: &[Interval], start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start < end && !busy.iter().any(|b| b.overlaps(start, end))
}

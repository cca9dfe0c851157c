//! Time intervals and the overlap-merging scan.
//!
//! All interval math in this crate operates on [`Interval`]s of
//! `NaiveDateTime` — wall-clock values already localized to the display
//! time zone. Intervals are half-open `[start, end)`; a zero-length
//! interval is degenerate and discarded wherever one would be produced.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// A half-open time interval `[start, end)` in display-zone wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Start of the interval (inclusive).
    pub start: NaiveDateTime,
    /// End of the interval (exclusive).
    pub end: NaiveDateTime,
}

impl Interval {
    /// Creates a new interval.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Returns the length of this interval.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns the length of this interval in whole minutes (floor).
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Returns `true` if this interval is zero-length or inverted.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Checks overlap under half-open semantics: a shared boundary point
    /// alone is not an overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Merges overlapping or touching intervals into a minimal disjoint set.
///
/// Input order is irrelevant. The output is sorted ascending by start,
/// pairwise disjoint, and minimal: adjacent touching intervals
/// (`a.end == b.start`) are merged. Degenerate intervals are discarded.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.retain(|iv| !iv.is_empty());
    if intervals.len() <= 1 {
        return intervals;
    }

    // Sort by start, then end, for deterministic output.
    intervals.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                // Overlapping or touching: extend the running interval.
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }

    merged
}

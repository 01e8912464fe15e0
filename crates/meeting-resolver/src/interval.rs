//! Busy intervals and the interval merger.
//!
//! Every participant's busy intervals are flattened into one list, sorted by
//! start time, and merged into the minimal set of disjoint intervals covering
//! the same time. The result is the shared-unavailability timeline: a moment
//! is busy if anyone is busy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ResolverError, Result};
use crate::source::BusyMap;

/// A half-open time range `[start, end)`. Always `start < end` when built
/// through [`TimeInterval::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Build an interval, rejecting empty or inverted ranges.
    ///
    /// # Errors
    /// Returns `ResolverError::Validation` if `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let interval = Self { start, end };
        interval.validate()?;
        Ok(interval)
    }

    /// Check the `start < end` invariant on an interval that arrived through
    /// deserialization or a struct literal.
    pub fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(ResolverError::Validation(format!(
                "interval start {} is not before end {}",
                self.start.to_rfc3339(),
                self.end.to_rfc3339()
            )));
        }
        Ok(())
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Adjacent intervals do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Merge overlapping or touching intervals.
///
/// Input order is arbitrary. Returns a sorted list of pairwise-disjoint
/// intervals whose union equals the union of the input. Intervals that touch
/// (`next.start == last.end`) are merged, as are intervals sharing a start, so
/// no two output intervals share a boundary. Merging an already merged list
/// returns it unchanged.
pub fn merge_intervals(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted = intervals.to_vec();
    // Sort by start time (then by end time for stability).
    sorted.sort_by_key(|interval| (interval.start, interval.end));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Flatten every participant's busy intervals and merge them into one
/// shared-unavailability timeline.
pub fn merge_busy_map(busy: &BusyMap) -> Vec<TimeInterval> {
    let all: Vec<TimeInterval> = busy.values().flatten().copied().collect();
    merge_intervals(&all)
}


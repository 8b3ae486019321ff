//! Interval algebra over epoch-millisecond instants.
//!
//! All boundaries are inclusive: an instant equal to `start` or `end` lies
//! inside the interval, so two intervals that merely touch are considered
//! overlapping. Every function here is total over well-formed intervals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, Result};

/// Milliseconds since the Unix epoch.
pub type Instant = i64;

/// A span of time between two instants, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: Instant,
    pub end: Instant,
}

impl Interval {
    pub const fn new(start: Instant, end: Instant) -> Self {
        debug_assert!(start <= end, "interval start after end");
        Self { start, end }
    }

    /// Build a query range that never reaches outside `[from, to]`.
    ///
    /// `from` is rounded up and `to` down to the millisecond. When both fall
    /// inside the same millisecond the range collapses to zero width, which
    /// resolves to no availability.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidInterval` if `from > to`.
    pub fn query(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        if from > to {
            return Err(AgendaError::InvalidInterval {
                start: from,
                end: to,
            });
        }

        let end = to.timestamp_millis();
        let mut start = from.timestamp_millis();
        if from.timestamp_subsec_nanos() % 1_000_000 != 0 {
            start += 1;
        }

        Ok(Self {
            start: start.min(end),
            end,
        })
    }

    /// Build an interval from wall-clock timestamps, rejecting `start > end`.
    ///
    /// Sub-millisecond precision is floored away.
    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AgendaError::InvalidInterval { start, end });
        }
        Ok(Self {
            start: start.timestamp_millis(),
            end: end.timestamp_millis(),
        })
    }

    /// Zero-length intervals are legal intermediates but never part of a result.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn duration_millis(&self) -> i64 {
        self.end - self.start
    }

    /// Shift both ends by the same number of milliseconds.
    pub const fn shifted(self, millis: i64) -> Self {
        Self {
            start: self.start + millis,
            end: self.end + millis,
        }
    }

    /// True when `other` lies entirely within `self`.
    pub const fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// True iff `range.start <= time <= range.end`.
pub fn is_time_in_range(time: Instant, range: Interval) -> bool {
    range.start <= time && time <= range.end
}

/// True iff any boundary of one interval falls inside the other.
///
/// Covers containment, partial overlap and touching boundaries. Two intervals
/// separated by a gap do not overlap. The relation is symmetric.
pub fn ranges_overlap(a: Interval, b: Interval) -> bool {
    is_time_in_range(a.start, b)
        || is_time_in_range(a.end, b)
        || is_time_in_range(b.start, a)
        || is_time_in_range(b.end, a)
}

/// The intersection of two intervals, or `None` when they do not overlap.
///
/// Touching intervals intersect in a zero-length interval.
pub fn overlap_interval(a: Interval, b: Interval) -> Option<Interval> {
    if !ranges_overlap(a, b) {
        return None;
    }
    Some(Interval {
        start: a.start.max(b.start),
        end: a.end.min(b.end),
    })
}

/// Remove the span of `to_exclude` from `reference`.
///
/// Returns the left remainder when `to_exclude` starts inside `reference`,
/// the right remainder when it ends inside, both when it sits in the middle.
/// When neither boundary falls inside, `reference` is returned unchanged if the
/// two are disjoint and nothing is returned if `to_exclude` swallows it.
///
/// Remainders may be zero-length when boundaries coincide.
pub fn subtract(to_exclude: Interval, reference: Interval) -> Vec<Interval> {
    let mut remainders = Vec::with_capacity(2);

    if is_time_in_range(to_exclude.start, reference) {
        remainders.push(Interval {
            start: reference.start,
            end: to_exclude.start,
        });
    }
    if is_time_in_range(to_exclude.end, reference) {
        remainders.push(Interval {
            start: to_exclude.end,
            end: reference.end,
        });
    }

    if remainders.is_empty() && !to_exclude.contains(&reference) {
        remainders.push(reference);
    }

    remainders
}

/// Merge overlapping or touching intervals.
///
/// Returns a sorted list in which no two intervals share an instant.
pub fn merge_overlapping(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
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

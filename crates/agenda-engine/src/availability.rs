//! Availability resolution -- combines opening, busy and recurring events into
//! the disjoint list of open intervals inside a query range.
//!
//! Opening and busy declarations are each clipped to the range (recurring ones
//! after weekly expansion), then every busy interval is carved out of every
//! open interval. What remains is the availability.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::event::Event;
use crate::interval::{merge_overlapping, overlap_interval, subtract, Interval};
use crate::recurrence::expand_weekly;

/// An available slot as a pair of wall-clock timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Resolve the open intervals of `events` inside `range`.
///
/// The result is sorted by start, pairwise disjoint, free of zero-length
/// intervals and contained in `range`. Busy intervals of zero length block
/// nothing.
pub fn resolve(events: &[Event], range: Interval) -> Vec<Interval> {
    let _span = debug_span!(
        "resolve",
        range_start = range.start,
        range_end = range.end,
        events = events.len()
    )
    .entered();

    // Open declarations may overlap one another; merging keeps the result disjoint.
    let open = merge_overlapping(effective_intervals(events, range, true));
    let closed = effective_intervals(events, range, false);

    debug!(open = open.len(), closed = closed.len(), "clipped events to range");

    if closed.is_empty() {
        return open;
    }

    let free = exclude_busy(open, &closed);
    debug!(available = free.len(), "resolved availability");
    free
}

/// Convert resolved intervals into wall-clock pairs.
///
/// `from` must be the query start the intervals were resolved against; every
/// interval is expressed as an offset from it.
pub fn to_availabilities(intervals: &[Interval], from: DateTime<Utc>) -> Vec<Availability> {
    let base = from.trunc_subsecs(3);
    let base_millis = base.timestamp_millis();
    let at = |instant: i64| base + TimeDelta::milliseconds(instant - base_millis);

    intervals
        .iter()
        .map(|interval| Availability {
            start_date: at(interval.start),
            end_date: at(interval.end),
        })
        .collect()
}

/// Clipped, non-empty intervals of one polarity, sorted by start.
///
/// Unique events are intersected with the range directly; recurring ones are
/// expanded into their weekly occurrences first.
fn effective_intervals(events: &[Event], range: Interval, opening: bool) -> Vec<Interval> {
    let (recurring, unique): (Vec<&Event>, Vec<&Event>) = events
        .iter()
        .filter(|e| e.is_opening() == opening)
        .partition(|e| e.is_recurring());

    let templates: Vec<Interval> = recurring.iter().map(|e| e.interval()).collect();

    let mut intervals: Vec<Interval> = unique
        .iter()
        .filter_map(|e| overlap_interval(e.interval(), range))
        .collect();
    intervals.extend(expand_weekly(&templates, range));

    intervals.retain(|i| !i.is_empty());
    intervals.sort_by_key(|i| i.start);
    intervals
}

/// Carve every busy interval out of every open interval.
///
/// Each pending fragment carries the index of the next busy interval to apply,
/// so the pieces left by one busy interval are still cut by the following ones.
fn exclude_busy(open: Vec<Interval>, closed: &[Interval]) -> Vec<Interval> {
    let mut pending: Vec<(Interval, usize)> = open.into_iter().rev().map(|i| (i, 0)).collect();
    let mut free = Vec::new();

    while let Some((fragment, next)) = pending.pop() {
        match closed.get(next) {
            None => free.push(fragment),
            Some(busy) => pending.extend(
                subtract(*busy, fragment)
                    .into_iter()
                    .rev()
                    .filter(|remainder| !remainder.is_empty())
                    .map(|remainder| (remainder, next + 1)),
            ),
        }
    }

    free.sort_by_key(|i| i.start);
    free
}

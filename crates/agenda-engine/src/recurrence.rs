//! Weekly recurrence expansion -- turns recurring templates into the concrete
//! occurrences that fall inside a query range.
//!
//! A template's own `start`/`end` is one anchor occurrence. Every other
//! occurrence is the anchor shifted by a whole number of weeks, forwards or
//! backwards in time.

use tracing::trace;

use crate::interval::{overlap_interval, Interval};

/// One week in milliseconds, the fixed recurrence period.
pub const WEEK_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

/// The occurrence of `template` shifted by `offset` weeks.
pub fn occurrence(template: Interval, offset: i64) -> Interval {
    template.shifted(offset * WEEK_MILLIS)
}

/// Expand weekly templates into every occurrence that overlaps `range`.
///
/// Each occurrence is clipped to `range`. Output follows template order, and
/// increasing week offset within a template; it is not globally sorted.
pub fn expand_weekly(templates: &[Interval], range: Interval) -> Vec<Interval> {
    let mut occurrences = Vec::new();

    for template in templates {
        let (first, last) = candidate_offsets(*template, range);
        let before = occurrences.len();

        occurrences.extend(
            (first..=last)
                .map(|offset| occurrence(*template, offset))
                .filter_map(|shifted| overlap_interval(shifted, range)),
        );

        trace!(
            template_start = template.start,
            template_end = template.end,
            first_offset = first,
            last_offset = last,
            kept = occurrences.len() - before,
            "expanded weekly template"
        );
    }

    occurrences
}

/// Closed range of week offsets that may intersect `range`.
///
/// Which of the four boundary offsets is the real first or last occurrence
/// depends on how the template straddles the range edges, so the span between
/// the smallest and largest of them is scanned and misses are dropped later.
fn candidate_offsets(template: Interval, range: Interval) -> (i64, i64) {
    let offsets = [
        (range.start - template.start).div_euclid(WEEK_MILLIS),
        (range.start - template.end).div_euclid(WEEK_MILLIS),
        (range.end - template.start).div_euclid(WEEK_MILLIS),
        (range.end - template.end).div_euclid(WEEK_MILLIS),
    ];

    offsets
        .into_iter()
        .fold((offsets[0], offsets[0]), |(first, last), offset| {
            (first.min(offset), last.max(offset))
        })
}

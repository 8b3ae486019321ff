//! Tests for weekly recurrence expansion.

use agenda_engine::recurrence::occurrence;
use agenda_engine::{expand_weekly, Interval, WEEK_MILLIS};
use chrono::{TimeZone, Utc};

fn ms(month: u32, day: u32, hour: u32, min: u32) -> i64 {
    Utc.with_ymd_and_hms(2022, month, day, hour, min, 0)
        .unwrap()
        .timestamp_millis()
}

fn slot(month: u32, day: u32, start: (u32, u32), end: (u32, u32)) -> Interval {
    Interval::new(ms(month, day, start.0, start.1), ms(month, day, end.0, end.1))
}

#[test]
fn period_is_seven_days() {
    assert_eq!(WEEK_MILLIS, 604_800_000);
}

#[test]
fn range_between_occurrences_yields_nothing() {
    // Thursday template, Saturday range.
    let template = slot(6, 2, (8, 0), (12, 0));
    let range = slot(6, 4, (8, 0), (12, 0));

    assert!(expand_weekly(&[template], range).is_empty());
}

#[test]
fn template_in_the_future_reaches_back_into_range() {
    let template = slot(6, 15, (8, 0), (12, 0));
    let range = slot(6, 8, (6, 0), (16, 0));

    assert_eq!(
        expand_weekly(&[template], range),
        vec![slot(6, 8, (8, 0), (12, 0))]
    );
}

#[test]
fn template_in_the_past_reaches_forward_into_range() {
    let template = slot(4, 7, (8, 0), (9, 30));
    let range = slot(6, 9, (6, 0), (16, 0));

    assert_eq!(
        expand_weekly(&[template], range),
        vec![slot(6, 9, (8, 0), (9, 30))]
    );
}

#[test]
fn several_templates_over_several_weeks() {
    // Thursday mornings and Friday evenings across a twelve-day range.
    let thursdays = slot(4, 7, (8, 0), (9, 30));
    let fridays = slot(10, 21, (18, 0), (19, 45));
    let range = Interval::new(ms(6, 6, 6, 0), ms(6, 18, 16, 0));

    let occurrences = expand_weekly(&[thursdays, fridays], range);

    // Template order first, then week order within each template.
    assert_eq!(
        occurrences,
        vec![
            slot(6, 9, (8, 0), (9, 30)),
            slot(6, 16, (8, 0), (9, 30)),
            slot(6, 10, (18, 0), (19, 45)),
            slot(6, 17, (18, 0), (19, 45)),
        ]
    );
}

#[test]
fn occurrences_straddling_range_edges_are_clipped() {
    let template = slot(7, 2, (8, 0), (18, 0));
    let range = Interval::new(ms(7, 9, 12, 0), ms(7, 16, 10, 0));

    assert_eq!(
        expand_weekly(&[template], range),
        vec![slot(7, 9, (12, 0), (18, 0)), slot(7, 16, (8, 0), (10, 0))]
    );
}

#[test]
fn range_inside_an_occurrence_is_returned_whole() {
    let template = slot(7, 2, (8, 0), (18, 0));
    let range = slot(7, 9, (9, 0), (13, 0));

    assert_eq!(expand_weekly(&[template], range), vec![range]);
}

#[test]
fn template_longer_than_range_after_many_weeks() {
    // Anchor a year earlier; the multi-day template still lands correctly.
    let template = Interval::new(
        Utc.with_ymd_and_hms(2021, 7, 3, 20, 0, 0).unwrap().timestamp_millis(),
        Utc.with_ymd_and_hms(2021, 7, 5, 6, 0, 0).unwrap().timestamp_millis(),
    );
    // 2021-07-03 + 52 weeks = 2022-07-02.
    let range = Interval::new(ms(7, 3, 0, 0), ms(7, 3, 23, 59));

    assert_eq!(expand_weekly(&[template], range), vec![range]);
}

#[test]
fn no_templates_yield_nothing() {
    let range = slot(7, 2, (0, 0), (23, 0));

    assert!(expand_weekly(&[], range).is_empty());
}

#[test]
fn occurrence_shifts_both_ends_by_whole_weeks() {
    let template = slot(7, 2, (8, 0), (18, 0));

    assert_eq!(occurrence(template, 1), slot(7, 9, (8, 0), (18, 0)));
    assert_eq!(occurrence(template, -1), slot(6, 25, (8, 0), (18, 0)));
    assert_eq!(occurrence(template, 0), template);
}

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use studyhub_core::timeline::{events_on_day, is_same_day};
use studyhub_core::{
    dedupe_events, month_grid, Event, EventKind, Placement, Timeline, DEFAULT_PAD_DAYS,
    MONTH_GRID_CELLS, VISIBLE_WINDOW_DAYS,
};
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn instant(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn event(label: &str, start: DateTime<Utc>, deadline: DateTime<Utc>) -> Event {
    Event {
        id: Uuid::new_v4(),
        label: label.to_string(),
        description: None,
        start,
        deadline,
        kind: EventKind::Task,
    }
}

#[test]
fn month_grid_is_42_strictly_increasing_days() {
    let grid = month_grid(day(2024, 3, 15));
    assert_eq!(grid.len(), MONTH_GRID_CELLS);
    for pair in grid.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::days(1));
    }
}

#[test]
fn march_2024_grid_pads_five_leading_and_six_trailing_days() {
    // March 1st 2024 is a Friday: 5 leading cells, 31 month cells, 6
    // trailing cells, ending April 6th.
    let grid = month_grid(day(2024, 3, 15));
    assert_eq!(grid[0], day(2024, 2, 25));
    assert_eq!(grid[5], day(2024, 3, 1));
    assert_eq!(grid[41], day(2024, 4, 6));
}

#[test]
fn padded_timeline_covers_all_events_plus_pad() {
    let events = vec![
        event("essay", instant(2024, 3, 10, 9), instant(2024, 3, 12, 17)),
        event("exam prep", instant(2024, 3, 14, 8), instant(2024, 3, 20, 18)),
    ];
    let timeline = Timeline::build(&events, 7, day(2024, 3, 15));

    let days = timeline.days();
    assert_eq!(days.first().copied(), Some(day(2024, 3, 3)));
    assert_eq!(days.last().copied(), Some(day(2024, 3, 27)));
    for e in &events {
        assert!(days[0] <= e.start.date_naive() - Duration::days(7));
        assert!(*days.last().unwrap() >= e.deadline.date_naive() + Duration::days(7));
    }
}

#[test]
fn empty_event_list_pads_around_the_fallback_day() {
    let timeline = Timeline::build(&[], DEFAULT_PAD_DAYS, day(2024, 3, 15));
    assert_eq!(timeline.days().first().copied(), Some(day(2024, 3, 8)));
    assert_eq!(timeline.days().last().copied(), Some(day(2024, 3, 22)));
    assert_eq!(timeline.days().len(), 15);
}

#[test]
fn zero_pad_timeline_has_no_margin() {
    let events = vec![event("a", instant(2024, 3, 10, 0), instant(2024, 3, 23, 0))];
    let timeline = Timeline::build(&events, 0, day(2024, 3, 15));
    assert_eq!(timeline.days().first().copied(), Some(day(2024, 3, 10)));
    assert_eq!(timeline.days().last().copied(), Some(day(2024, 3, 23)));
}

#[test]
fn window_shifts_by_seven_and_clamps_at_both_ends() {
    // 25-day sequence: Mar 3 .. Mar 27.
    let events = vec![
        event("essay", instant(2024, 3, 10, 9), instant(2024, 3, 12, 17)),
        event("exam prep", instant(2024, 3, 14, 8), instant(2024, 3, 20, 18)),
    ];
    let mut timeline = Timeline::build(&events, 7, day(2024, 3, 15));
    assert_eq!(timeline.days().len(), 25);
    assert_eq!(timeline.visible().len(), VISIBLE_WINDOW_DAYS);

    assert!(!timeline.shift_previous());

    assert!(timeline.shift_next());
    assert_eq!(timeline.offset(), 7);
    assert!(timeline.shift_next());
    // Clamped to 25 - 14 = 11, not 14.
    assert_eq!(timeline.offset(), 11);
    assert!(!timeline.shift_next());
    assert_eq!(timeline.offset(), 11);

    assert!(timeline.shift_previous());
    assert_eq!(timeline.offset(), 4);
    assert!(timeline.shift_previous());
    assert_eq!(timeline.offset(), 0);
    assert!(!timeline.shift_previous());
}

#[test]
fn window_never_shifts_when_sequence_fits_inside_it() {
    let mut timeline = Timeline::build(
        &[event("a", instant(2024, 3, 10, 0), instant(2024, 3, 11, 0))],
        0,
        day(2024, 3, 15),
    );
    assert_eq!(timeline.visible().len(), 2);
    assert!(!timeline.shift_next());
    assert!(!timeline.shift_previous());
}

/// Builds a timeline whose visible window is exactly Mar 10 .. Mar 23 2024.
fn window_mar_10_to_23() -> Timeline {
    let anchor = event("anchor", instant(2024, 3, 10, 0), instant(2024, 3, 23, 0));
    let timeline = Timeline::build(&[anchor], 0, day(2024, 3, 15));
    assert_eq!(timeline.visible().len(), 14);
    timeline
}

#[test]
fn event_overlapping_window_start_is_clipped_to_index_zero() {
    // Window [Mar 10 .. Mar 23], event Mar 5 .. Mar 12.
    let timeline = window_mar_10_to_23();
    let placement =
        timeline.placement(&event("early", instant(2024, 3, 5, 9), instant(2024, 3, 12, 9)));
    assert_eq!(
        placement,
        Placement {
            start_index: 0,
            span: 3
        }
    );
}

#[test]
fn event_fully_spanning_window_covers_all_fourteen_cells() {
    let timeline = window_mar_10_to_23();
    let placement =
        timeline.placement(&event("long", instant(2024, 3, 1, 0), instant(2024, 3, 30, 0)));
    assert_eq!(placement.start_index, 0);
    assert_eq!(placement.span, VISIBLE_WINDOW_DAYS);
}

#[test]
fn event_fully_outside_window_is_hidden() {
    let timeline = window_mar_10_to_23();

    let after = timeline.placement(&event("later", instant(2024, 4, 1, 0), instant(2024, 4, 5, 0)));
    assert_eq!(after, Placement::HIDDEN);
    assert!(!after.is_visible());

    let before =
        timeline.placement(&event("done", instant(2024, 3, 1, 0), instant(2024, 3, 8, 0)));
    assert_eq!(before, Placement::HIDDEN);
}

#[test]
fn single_day_event_occupies_one_cell() {
    let timeline = window_mar_10_to_23();
    let placement =
        timeline.placement(&event("quiz", instant(2024, 3, 14, 9), instant(2024, 3, 14, 10)));
    assert_eq!(
        placement,
        Placement {
            start_index: 4,
            span: 1
        }
    );
}

#[test]
fn inverted_event_range_is_silently_excluded() {
    let timeline = window_mar_10_to_23();
    let placement =
        timeline.placement(&event("bad", instant(2024, 3, 20, 0), instant(2024, 3, 12, 0)));
    assert_eq!(placement, Placement::HIDDEN);
}

#[test]
fn events_on_day_match_by_deadline_date_only() {
    let events = vec![
        event("due early", instant(2024, 3, 14, 0), instant(2024, 3, 15, 1)),
        event("due late", instant(2024, 3, 14, 0), instant(2024, 3, 15, 23)),
        event("due next day", instant(2024, 3, 14, 0), instant(2024, 3, 16, 0)),
    ];

    let due = events_on_day(&events, day(2024, 3, 15));
    let labels: Vec<&str> = due.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["due early", "due late"]);

    assert!(is_same_day(instant(2024, 3, 15, 23), day(2024, 3, 15)));
    assert!(!is_same_day(instant(2024, 3, 16, 0), day(2024, 3, 15)));
}

#[test]
fn dedupe_keeps_last_occurrence_in_first_seen_order() {
    let id_a = Uuid::new_v4();
    let id_b = Uuid::new_v4();
    let make = |id: Uuid, label: &str| Event {
        id,
        label: label.to_string(),
        description: None,
        start: instant(2024, 3, 10, 0),
        deadline: instant(2024, 3, 11, 0),
        kind: EventKind::Project,
    };

    let deduped = dedupe_events(vec![
        make(id_a, "v1"),
        make(id_b, "v2"),
        make(id_a, "v3"),
    ]);

    assert_eq!(deduped.len(), 2);
    assert_eq!(deduped[0].id, id_a);
    assert_eq!(deduped[0].label, "v3");
    assert_eq!(deduped[1].id, id_b);
    assert_eq!(deduped[1].label, "v2");
}

#[test]
fn event_kind_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&EventKind::Task).unwrap(), "\"task\"");
    assert_eq!(
        serde_json::to_string(&EventKind::Project).unwrap(),
        "\"project\""
    );
}

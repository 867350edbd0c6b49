//! Month-grid generation for the timetable view.
//!
//! # Invariants
//! - The grid is always exactly 42 cells (6 weeks of 7 days).
//! - Cells increase strictly by one calendar day with no gaps.
//! - The grid starts on a Sunday; leading/trailing cells come from the
//!   adjacent months.

use super::event::Event;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Fixed month-view size: 6 weeks of 7 days.
pub const MONTH_GRID_CELLS: usize = 42;

/// Produces the 42-cell Sunday-aligned grid containing `reference`'s month.
///
/// The cell at offset `first_of_month.weekday().num_days_from_sunday()`
/// is the first day of the month; months already starting on Sunday get
/// zero leading cells.
pub fn month_grid(reference: NaiveDate) -> Vec<NaiveDate> {
    let first_of_month = reference
        .with_day(1)
        .expect("day 1 exists in every month");
    let leading = i64::from(first_of_month.weekday().num_days_from_sunday());
    let grid_start = first_of_month - Duration::days(leading);

    (0..MONTH_GRID_CELLS as i64)
        .map(|offset| grid_start + Duration::days(offset))
        .collect()
}

/// Day-level equality, ignoring the time-of-day component.
pub fn is_same_day(instant: DateTime<Utc>, day: NaiveDate) -> bool {
    instant.date_naive() == day
}

/// Events whose deadline falls on the given grid cell.
pub fn events_on_day<'a>(events: &'a [Event], day: NaiveDate) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| is_same_day(event.deadline, day))
        .collect()
}

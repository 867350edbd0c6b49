//! Calendar and timeline projection logic.
//!
//! # Responsibility
//! - Project tasks and projects into a unified `Event` shape.
//! - Generate the 42-cell month grid for the timetable view.
//! - Generate the padded day sequence and sliding visible window for the
//!   Gantt view, and place event bars within that window.
//!
//! # Invariants
//! - All functions here are pure: same inputs, same output, no ambient
//!   clock or singleton state. "Today" is always an explicit argument.
//! - Malformed event ranges are excluded from placement (span 0), never
//!   surfaced as errors.

pub mod calendar;
pub mod event;
pub mod gantt;

pub use calendar::{events_on_day, is_same_day, month_grid, MONTH_GRID_CELLS};
pub use event::{dedupe_events, Event, EventKind};
pub use gantt::{
    Placement, Timeline, DEFAULT_PAD_DAYS, VISIBLE_WINDOW_DAYS, WINDOW_STEP_DAYS,
};

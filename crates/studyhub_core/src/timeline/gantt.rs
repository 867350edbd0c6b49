//! Padded day sequence and sliding visible window for the Gantt view.

use super::event::Event;
use chrono::{Duration, NaiveDate};

/// Number of days rendered at once.
pub const VISIBLE_WINDOW_DAYS: usize = 14;
/// Days the window moves per previous/next step (half the window).
pub const WINDOW_STEP_DAYS: usize = 7;
/// Default outward padding applied to both span bounds.
pub const DEFAULT_PAD_DAYS: u32 = 7;

/// Position of an event bar within the visible window.
///
/// `span == 0` means the event does not intersect the window and is not
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub start_index: usize,
    pub span: usize,
}

impl Placement {
    /// Placement of an event excluded from the current window.
    pub const HIDDEN: Placement = Placement {
        start_index: 0,
        span: 0,
    };

    pub fn is_visible(&self) -> bool {
        self.span > 0
    }
}

/// Contiguous day sequence spanning all events, with a sliding window.
///
/// The only mutable state is the window offset; the day sequence itself
/// never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    days: Vec<NaiveDate>,
    offset: usize,
}

impl Timeline {
    /// Builds the day sequence for `events`, padded by `pad_days` on each
    /// side. An empty event list spans `fallback_today` alone.
    pub fn build(events: &[Event], pad_days: u32, fallback_today: NaiveDate) -> Self {
        let earliest = events
            .iter()
            .map(|event| event.start.date_naive())
            .min()
            .unwrap_or(fallback_today);
        let latest = events
            .iter()
            .map(|event| event.deadline.date_naive())
            .max()
            .unwrap_or(fallback_today);
        // Globally inverted ranges still yield a well-formed sequence.
        let latest = latest.max(earliest);

        let pad = Duration::days(i64::from(pad_days));
        let first = earliest - pad;
        let last = latest + pad;

        let mut days = Vec::new();
        let mut day = first;
        while day <= last {
            days.push(day);
            day += Duration::days(1);
        }

        Self { days, offset: 0 }
    }

    /// Full padded day sequence.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Current window start index within the full sequence.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Currently visible day slice; up to 14 days, shorter when the full
    /// sequence is shorter.
    pub fn visible(&self) -> &[NaiveDate] {
        let end = (self.offset + VISIBLE_WINDOW_DAYS).min(self.days.len());
        &self.days[self.offset..end]
    }

    /// Moves the window 7 days later; clamped so the window never extends
    /// past the end of the sequence. Returns whether the offset changed.
    pub fn shift_next(&mut self) -> bool {
        if self.offset + VISIBLE_WINDOW_DAYS >= self.days.len() {
            return false;
        }
        self.offset = (self.offset + WINDOW_STEP_DAYS).min(self.days.len() - VISIBLE_WINDOW_DAYS);
        true
    }

    /// Moves the window 7 days earlier; clamped at the sequence start.
    /// Returns whether the offset changed.
    pub fn shift_previous(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        self.offset = self.offset.saturating_sub(WINDOW_STEP_DAYS);
        true
    }

    /// Places an event bar within the visible window using day-level
    /// equality.
    ///
    /// The bar starts at the first visible day equal to the event's start
    /// date, clipped to index 0 when the event begins before the window.
    /// It ends at the last visible day equal to the deadline date, clipped
    /// to the final index when the event ends after the window. An event
    /// that neither matches nor overlaps the window, or whose range is
    /// inverted, is hidden.
    pub fn placement(&self, event: &Event) -> Placement {
        let visible = self.visible();
        let (Some(&first), Some(&last)) = (visible.first(), visible.last()) else {
            return Placement::HIDDEN;
        };

        let start_day = event.start.date_naive();
        let deadline_day = event.deadline.date_naive();

        let start_index = if start_day < first {
            Some(0)
        } else {
            visible.iter().position(|day| *day == start_day)
        };
        let end_index = if deadline_day > last {
            Some(visible.len() - 1)
        } else {
            visible.iter().rposition(|day| *day == deadline_day)
        };

        match (start_index, end_index) {
            (Some(start), Some(end)) if start <= end => Placement {
                start_index: start,
                span: end - start + 1,
            },
            _ => Placement::HIDDEN,
        }
    }
}

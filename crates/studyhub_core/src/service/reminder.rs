//! Reminder scheduling math.
//!
//! Core validates the instant and computes the wait; actually delivering
//! the notification is the web shell's concern.

use chrono::{DateTime, Duration, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected reminder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// The requested instant is not strictly in the future.
    NotInFuture {
        fire_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

impl Display for ReminderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInFuture { fire_at, now } => {
                write!(f, "reminder time {fire_at} is not after {now}")
            }
        }
    }
}

impl Error for ReminderError {}

/// A validated one-shot reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSchedule {
    pub title: String,
    pub note: Option<String>,
    pub fire_at: DateTime<Utc>,
}

impl ReminderSchedule {
    /// Validates that `fire_at` is strictly after `now`.
    pub fn try_new(
        title: impl Into<String>,
        note: Option<String>,
        fire_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, ReminderError> {
        if fire_at <= now {
            return Err(ReminderError::NotInFuture { fire_at, now });
        }
        Ok(Self {
            title: title.into(),
            note,
            fire_at,
        })
    }

    /// Remaining wait from `now`, clamped at zero once due.
    pub fn delay_from(&self, now: DateTime<Utc>) -> Duration {
        (self.fire_at - now).max(Duration::zero())
    }
}

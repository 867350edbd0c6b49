//! Planner orchestration: fetch all, then compute.
//!
//! # Responsibility
//! - Gather the tasks and projects visible to one user, unify them into
//!   events and feed the timetable/Gantt projections.
//!
//! # Invariants
//! - Read failures degrade to an empty contribution with a warn log;
//!   the planner never surfaces fetch errors to the view.
//! - Projections are pure functions of fetched data, so a stale fetch
//!   result can be discarded by the caller without any guard state.

use crate::model::UserId;
use crate::repo::UserRepository;
use crate::timeline::{dedupe_events, month_grid, Event, Timeline};
use chrono::NaiveDate;
use log::warn;

/// Fetch-then-project facade for the timetable and Gantt views.
pub struct PlannerService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> PlannerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All events visible to the user: their tasks first, then their
    /// projects, collapsed by id (last occurrence wins).
    ///
    /// Each source that fails to load contributes an empty list.
    pub fn user_events(&self, user_id: UserId) -> Vec<Event> {
        let tasks = self.repo.list_user_tasks(user_id).unwrap_or_else(|err| {
            warn!(
                "event=planner_fetch module=service status=error source=tasks user_id={user_id} error={err}"
            );
            Vec::new()
        });
        let projects = self.repo.list_user_projects(user_id).unwrap_or_else(|err| {
            warn!(
                "event=planner_fetch module=service status=error source=projects user_id={user_id} error={err}"
            );
            Vec::new()
        });

        let mut events: Vec<Event> = tasks.iter().map(Event::from).collect();
        events.extend(projects.iter().map(Event::from));
        dedupe_events(events)
    }

    /// Padded Gantt timeline over the user's events.
    pub fn gantt_timeline(&self, user_id: UserId, pad_days: u32, today: NaiveDate) -> Timeline {
        Timeline::build(&self.user_events(user_id), pad_days, today)
    }

    /// 42-cell month grid for the timetable view.
    pub fn month_grid(&self, reference: NaiveDate) -> Vec<NaiveDate> {
        month_grid(reference)
    }
}

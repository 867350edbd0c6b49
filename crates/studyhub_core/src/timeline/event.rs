//! Unified event projection over tasks and projects.

use crate::model::{Project, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use uuid::Uuid;

/// Source kind of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Task,
    Project,
}

/// Read-only projection of a task or project for timeline rendering.
///
/// Events carry no identity beyond the source record's id and are
/// recomputed from fresh fetches on every render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    /// Task title or project name.
    pub label: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub kind: EventKind,
}

impl From<&Task> for Event {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            label: task.title.clone(),
            description: task.description.clone(),
            start: task.start_date,
            deadline: task.deadline,
            kind: EventKind::Task,
        }
    }
}

impl From<&Project> for Event {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            label: project.name.clone(),
            description: project.description.clone(),
            start: project.start_date,
            deadline: project.deadline,
            kind: EventKind::Project,
        }
    }
}

/// Collapses events sharing an id, keeping the last occurrence.
///
/// Output order is the order in which each id was first seen, matching
/// map-collapsing semantics: `[a1, b, a2]` becomes `[a2, b]`.
pub fn dedupe_events(events: Vec<Event>) -> Vec<Event> {
    let mut slot_by_id: HashMap<Uuid, usize> = HashMap::with_capacity(events.len());
    let mut unique: Vec<Event> = Vec::with_capacity(events.len());

    for event in events {
        match slot_by_id.entry(event.id) {
            Entry::Occupied(slot) => unique[*slot.get()] = event,
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(event);
            }
        }
    }

    unique
}

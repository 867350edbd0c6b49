//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `studyhub_core` linkage.
//! - Seed an in-memory database and print both planner projections as a
//!   quick end-to-end sanity check.

use chrono::{Duration, Utc};
use std::error::Error;
use studyhub_core::db::open_db_in_memory;
use studyhub_core::{
    NoopInvalidator, PlannerService, SqliteTaskRepository, SqliteUserRepository, Task,
    TaskService, User, UserService, DEFAULT_PAD_DAYS,
};

fn main() -> Result<(), Box<dyn Error>> {
    println!("studyhub_core ping={}", studyhub_core::ping());
    println!("studyhub_core version={}", studyhub_core::core_version());

    let conn = open_db_in_memory()?;
    let users = UserService::new(SqliteUserRepository::try_new(&conn)?, NoopInvalidator);
    let tasks = TaskService::new(SqliteTaskRepository::try_new(&conn)?, NoopInvalidator);

    let demo = User::new("Demo Student", "demo@studyhub.local");
    users.create_user(&demo)?;

    let now = Utc::now();
    tasks.create_task(&Task::new(
        "review lecture notes",
        None,
        now,
        now + Duration::days(3),
        demo.id,
    ))?;
    tasks.create_task(&Task::new(
        "submit essay draft",
        None,
        now + Duration::days(1),
        now + Duration::days(6),
        demo.id,
    ))?;

    println!("upcoming deadlines:");
    for task in tasks.list_upcoming(demo.id, now, 7)? {
        println!("  {} due {}", task.title, task.deadline.format("%Y-%m-%d"));
    }

    let planner = PlannerService::new(SqliteUserRepository::try_new(&conn)?);
    let today = now.date_naive();

    let timeline = planner.gantt_timeline(demo.id, DEFAULT_PAD_DAYS, today);
    let window: Vec<String> = timeline
        .visible()
        .iter()
        .map(|day| day.format("%m-%d").to_string())
        .collect();
    println!("gantt window: {}", window.join(" "));

    println!("month grid:");
    for week in planner.month_grid(today).chunks(7) {
        let row: Vec<String> = week.iter().map(|day| day.format("%m-%d").to_string()).collect();
        println!("  {}", row.join(" "));
    }

    Ok(())
}

//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Tie mutations to dashboard cache invalidation.
//!
//! # Invariants
//! - Services never bypass repository validation contracts.
//! - The service layer remains storage-agnostic.

pub mod note_service;
pub mod planner_service;
pub mod project_service;
pub mod reminder;
pub mod revalidate;
pub mod task_service;
pub mod user_service;

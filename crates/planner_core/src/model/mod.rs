//! Planner domain model: areas, projects with steps, goals and tasks.
//!
//! # Responsibility
//! - Define canonical data structures used by the store and the views.
//! - Keep the completion tri-state and derived-area rules in the types.
//!
//! # Invariants
//! - Every entity is identified by a stable, creation-ordered `Uuid` (v7).
//! - A task never stores an area; it is derived through its project.
//! - A task is never both completed and cancelled.

pub mod area;
pub mod goal;
pub mod progress;
pub mod project;
pub mod task;
pub mod validation;

use uuid::Uuid;

/// Generates a new creation-ordered entity id.
pub(crate) fn new_entity_id() -> Uuid {
    Uuid::now_v7()
}

/// Trims a title and rejects blank input.
pub(crate) fn normalize_title(value: &str) -> Result<String, validation::ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(validation::ValidationError::BlankTitle);
    }
    Ok(trimmed.to_string())
}

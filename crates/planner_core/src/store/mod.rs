//! In-memory entity store.
//!
//! # Responsibility
//! - Own the canonical area/project/goal/task collections.
//! - Provide whole-object insert/replace/remove by id with `NotFound`
//!   semantics.
//!
//! # Invariants
//! - The store itself enforces id uniqueness only; cross-entity rules
//!   (derived area, step membership, cascades) live in `service::planner`.
//!
//! # See also
//! - `service::planner` for the mutation surface callers use.

pub mod collection;
pub mod error;

pub use collection::{Collection, Entity};
pub use error::{EntityKind, ReferenceError, StoreError, StoreResult};

use crate::model::area::Area;
use crate::model::goal::Goal;
use crate::model::project::Project;
use crate::model::task::Task;

/// The four canonical collections.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    pub areas: Collection<Area>,
    pub projects: Collection<Project>,
    pub goals: Collection<Goal>,
    pub tasks: Collection<Task>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

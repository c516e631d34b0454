//! Planner use-case services.
//!
//! # Responsibility
//! - Expose the mutation and query surface over the entity store.
//! - Move whole-store snapshots in and out.

pub mod planner;
pub mod snapshot;

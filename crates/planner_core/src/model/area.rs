//! Area: a named, colored category for projects and goals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AreaId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    /// Display color token, opaque to the core.
    pub color: String,
}

impl Area {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::with_id(super::new_entity_id(), name, color)
    }

    /// Used by import paths where identity already exists.
    pub fn with_id(id: AreaId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Partial update for an area. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

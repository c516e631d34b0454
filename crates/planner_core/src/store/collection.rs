//! Insertion-ordered in-memory collection with replace-by-id semantics.

use super::error::{EntityKind, StoreError, StoreResult};
use crate::model::area::Area;
use crate::model::goal::Goal;
use crate::model::project::Project;
use crate::model::task::Task;
use uuid::Uuid;

/// A storable entity with a stable id.
pub trait Entity: Clone {
    const KIND: EntityKind;

    fn entity_id(&self) -> Uuid;
}

impl Entity for Area {
    const KIND: EntityKind = EntityKind::Area;

    fn entity_id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn entity_id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Goal {
    const KIND: EntityKind = EntityKind::Goal;

    fn entity_id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn entity_id(&self) -> Uuid {
        self.id()
    }
}

/// Owning collection of one entity family.
///
/// # Invariants
/// - Ids are unique.
/// - Iteration order is insertion order; `replace` keeps an item's position.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: T) -> StoreResult<()> {
        let id = item.entity_id();
        if self.contains(id) {
            return Err(StoreError::DuplicateId(T::KIND, id));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.items.iter().find(|item| item.entity_id() == id)
    }

    /// Like `get`, but absent ids are a `NotFound` error.
    pub fn require(&self, id: Uuid) -> StoreResult<&T> {
        self.get(id).ok_or(StoreError::NotFound(T::KIND, id))
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.position(id).is_some()
    }

    /// Replaces the stored item that has the same id.
    pub fn replace(&mut self, item: T) -> StoreResult<()> {
        let id = item.entity_id();
        let index = self
            .position(id)
            .ok_or(StoreError::NotFound(T::KIND, id))?;
        self.items[index] = item;
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> StoreResult<T> {
        let index = self
            .position(id)
            .ok_or(StoreError::NotFound(T::KIND, id))?;
        Ok(self.items.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|item| item.entity_id() == id)
    }
}

//! Generic ordered collection keyed by entity ID.

use crate::model::Entity;
use crate::store::{StoreError, StoreResult};

/// Where a new record lands in the collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    /// Newest first (projects, members, materials, suppliers, finance).
    Front,
    /// Append (teams, clocking entries).
    Back,
}

/// Ordered, validated collection of one entity type.
#[derive(Debug, Clone)]
pub struct EntityStore<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a store from seed records in their given order.
    ///
    /// Every record is validated and IDs must be unique.
    pub fn from_records(records: Vec<T>) -> StoreResult<Self> {
        let mut store = Self::new();
        for record in records {
            store.insert(record, InsertAt::Back)?;
        }
        Ok(store)
    }

    /// Current records in display order.
    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Looks a record up, mapping absence to `StoreError::NotFound`.
    pub fn require(&self, id: &str) -> StoreResult<&T> {
        self.get(id).ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    /// Validates and inserts a new record.
    ///
    /// # Errors
    /// - `DuplicateId` when the ID is already present.
    /// - `Validation` when the record is invalid.
    pub fn insert(&mut self, entity: T, at: InsertAt) -> StoreResult<&T> {
        if self.contains(entity.id()) {
            return Err(StoreError::DuplicateId {
                kind: T::KIND,
                id: entity.id().to_string(),
            });
        }
        entity.validate()?;
        let index = match at {
            InsertAt::Front => {
                self.items.insert(0, entity);
                0
            }
            InsertAt::Back => {
                self.items.push(entity);
                self.items.len() - 1
            }
        };
        Ok(&self.items[index])
    }

    /// Applies `change` to a copy of the record, validates, then commits.
    pub fn update<F>(&mut self, id: &str, change: F) -> StoreResult<&T>
    where
        F: FnOnce(&mut T),
    {
        self.try_update(id, |entity| {
            change(entity);
            Ok::<(), StoreError>(())
        })
    }

    /// Fallible variant of [`EntityStore::update`].
    ///
    /// Nothing is committed when `change` fails or the result is invalid.
    pub fn try_update<E, F>(&mut self, id: &str, change: F) -> Result<&T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut T) -> Result<(), E>,
    {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::not_found(T::KIND, id))?;
        let mut draft = self.items[index].clone();
        change(&mut draft)?;
        draft.validate().map_err(StoreError::from)?;
        self.items[index] = draft;
        Ok(&self.items[index])
    }

    /// Removes and returns the record.
    pub fn remove(&mut self, id: &str) -> StoreResult<T> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::not_found(T::KIND, id))?;
        Ok(self.items.remove(index))
    }

    /// Removes every record matching `predicate`, returning how many went.
    pub fn remove_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

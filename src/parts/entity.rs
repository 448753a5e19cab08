//! Normalized collection store keyed by entity id.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// An item stored in an [`EntityStore`].
pub trait Entity: Clone {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;

    /// Fold `patch` into `self` for `update`/`upsert`.
    ///
    /// Default implementation replaces the entity wholesale.
    fn merge(&mut self, patch: Self) {
        *self = patch;
    }
}

/// Normalized map of entities plus the ordered list of their ids.
///
/// Ids keep insertion order. `set_*` on an existing id replaces the entity
/// in place without moving it.
///
/// # Example
///
/// ```rust
/// use storeparts::parts::{Entity, EntityStore};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Toast {
///     id: u32,
///     text: String,
/// }
///
/// impl Entity for Toast {
///     type Id = u32;
///     fn id(&self) -> u32 {
///         self.id
///     }
/// }
///
/// let mut toasts = EntityStore::new(vec![]);
/// toasts.add_one(Toast { id: 1, text: "saved".into() });
/// toasts.add_one(Toast { id: 2, text: "synced".into() });
/// toasts.remove_one(&1);
/// assert_eq!(toasts.get_ids(), &[2]);
/// ```
#[derive(Clone, Debug)]
pub struct EntityStore<E: Entity> {
    ids: Vec<E::Id>,
    entities: HashMap<E::Id, E>,
    initial: Vec<E>,
}

impl<E: Entity> EntityStore<E> {
    pub fn new(initial: Vec<E>) -> Self {
        let mut store = Self {
            ids: Vec::new(),
            entities: HashMap::new(),
            initial,
        };
        store.initialize();
        store
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get_ids(&self) -> &[E::Id] {
        &self.ids
    }

    pub fn get_one(&self, id: &E::Id) -> Option<&E> {
        let entity = self.entities.get(id);
        if entity.is_none() {
            tracing::debug!(?id, "entity not found");
        }
        entity
    }

    /// Look up several ids; unknown ids yield `None` in their slot.
    pub fn get_many<'a>(&self, ids: impl IntoIterator<Item = &'a E::Id>) -> Vec<Option<&E>>
    where
        E::Id: 'a,
    {
        ids.into_iter().map(|id| self.get_one(id)).collect()
    }

    /// All entities in id order.
    pub fn get_all(&self) -> Vec<&E> {
        self.ids
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    /// Insert when the id is new; otherwise leave the store untouched.
    pub fn add_one(&mut self, entity: E) -> bool {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            return false;
        }
        self.ids.push(id.clone());
        self.entities.insert(id, entity);
        true
    }

    pub fn add_many(&mut self, entities: impl IntoIterator<Item = E>) {
        for entity in entities {
            self.add_one(entity);
        }
    }

    /// Replace the entity with the same id, or insert it.
    pub fn set_one(&mut self, entity: E) {
        let id = entity.id();
        if self.entities.insert(id.clone(), entity).is_none() {
            self.ids.push(id);
        }
    }

    pub fn set_many(&mut self, entities: impl IntoIterator<Item = E>) {
        for entity in entities {
            self.set_one(entity);
        }
    }

    /// Replace the whole collection.
    pub fn set_all(&mut self, entities: impl IntoIterator<Item = E>) {
        self.ids.clear();
        self.entities.clear();
        self.set_many(entities);
    }

    /// Merge into an existing entity; unknown ids are ignored.
    pub fn update_one(&mut self, patch: E) -> bool {
        match self.entities.get_mut(&patch.id()) {
            Some(existing) => {
                existing.merge(patch);
                true
            }
            None => false,
        }
    }

    pub fn update_many(&mut self, patches: impl IntoIterator<Item = E>) {
        for patch in patches {
            self.update_one(patch);
        }
    }

    /// Merge into an existing entity, or insert it.
    pub fn upsert_one(&mut self, entity: E) {
        let id = entity.id();
        match self.entities.get_mut(&id) {
            Some(existing) => existing.merge(entity),
            None => {
                self.ids.push(id.clone());
                self.entities.insert(id, entity);
            }
        }
    }

    pub fn upsert_many(&mut self, entities: impl IntoIterator<Item = E>) {
        for entity in entities {
            self.upsert_one(entity);
        }
    }

    pub fn remove_one(&mut self, id: &E::Id) -> Option<E> {
        let removed = self.entities.remove(id)?;
        self.ids.retain(|existing| existing != id);
        Some(removed)
    }

    pub fn remove_many<'a>(&mut self, ids: impl IntoIterator<Item = &'a E::Id>)
    where
        E::Id: 'a,
    {
        for id in ids {
            self.entities.remove(id);
        }
        let entities = &self.entities;
        self.ids.retain(|id| entities.contains_key(id));
    }

    pub fn remove_all(&mut self) {
        self.ids.clear();
        self.entities.clear();
    }

    /// Reset to the entities the store was created with.
    pub fn initialize(&mut self) {
        let initial = self.initial.clone();
        self.set_all(initial);
    }
}

//! Sparse, ID-keyed storage for netlist entities.
//!
//! Unlike a dense append-only arena, netlist entities are created with
//! caller-chosen IDs and may be deleted, so the [`Arena`] is keyed by the raw
//! ID and iterates in ascending ID order.

use crate::ids::EntityId;
use std::collections::btree_map::{self, BTreeMap};
use std::marker::PhantomData;

/// An ID-keyed container owning one kind of entity.
///
/// The arena does not check which netlist an ID belongs to; the owning
/// [`Netlist`](crate::Netlist) validates ownership before indexing.
#[derive(Debug, Clone)]
pub struct Arena<I: EntityId, T> {
    items: BTreeMap<u32, T>,
    _marker: PhantomData<I>,
}

impl<I: EntityId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EntityId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            _marker: PhantomData,
        }
    }

    /// Stores `item` under `id`, returning the previous occupant if any.
    pub fn insert(&mut self, id: I, item: T) -> Option<T> {
        self.items.insert(id.raw(), item)
    }

    /// Removes and returns the item stored under `id`.
    pub fn remove(&mut self, id: I) -> Option<T> {
        self.items.remove(&id.raw())
    }

    /// Returns a reference to the item with the given ID.
    pub fn get(&self, id: I) -> Option<&T> {
        self.items.get(&id.raw())
    }

    /// Returns a mutable reference to the item with the given ID.
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.items.get_mut(&id.raw())
    }

    /// Returns `true` if an item is stored under `id`.
    pub fn contains(&self, id: I) -> bool {
        self.items.contains_key(&id.raw())
    }

    /// Returns the number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over items in ascending ID order.
    pub fn values(&self) -> btree_map::Values<'_, u32, T> {
        self.items.values()
    }

    /// Iterates over mutable items in ascending ID order.
    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, u32, T> {
        self.items.values_mut()
    }

    /// Iterates over the stored raw IDs in ascending order.
    pub fn raw_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.keys().copied()
    }
}

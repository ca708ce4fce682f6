//! Append-only arena that owns every node of a tree.
//!
//! Values are never removed; the whole arena is dropped at once together with
//! the tree that owns it.

use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use super::ids::ArenaId;

#[derive(Debug, Clone)]
pub struct Arena<I, T> {
    entries: Vec<T>,
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Stores `value` and returns its handle.
    pub fn alloc(&mut self, value: T) -> I {
        let id = I::from_index(self.entries.len());
        self.entries.push(value);
        id
    }

    pub fn get(&self, id: I) -> Option<&T> {
        self.entries.get(id.index())
    }

    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.entries.get_mut(id.index())
    }

    /// Iterates over every handle and value in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, value)| (I::from_index(index), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        &self.entries[id.index()]
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        &mut self.entries[id.index()]
    }
}

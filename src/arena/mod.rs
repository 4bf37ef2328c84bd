/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

pub use error::NoMemory;

const MIN_ITEMS: usize = 16;

static NEXT_ARENA_TAG: AtomicU32 = AtomicU32::new(0);

/// Stable handle of an item stored in an [Arena].
///
/// Handles stay valid as long as the arena lives, since items are
/// never removed one by one. Each handle remembers the arena which
/// issued it, and other arenas reject it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ElementId {
    arena: u32,
    index: u32,
}

impl ElementId {
    /// Position of the item in its arena, in allocation order.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Memory usage figures of an [Arena].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArenaStats {
    /// Number of stored items.
    pub nr_items: usize,
    /// Number of items the current allocation can hold.
    pub capacity: usize,
    /// Bytes reserved for the item records, not counting heap
    /// data owned by the items themselves.
    pub allocated_bytes: usize,
}

/// Append-only typed storage.
///
/// Items are addressed by [ElementId] handles instead of pointers,
/// and links between items are plain handles too. Dropping the arena
/// drops every item in one flat pass, so deep trees never recurse.
#[derive(Debug)]
pub struct Arena<T> {
    tag: u32,
    items: Vec<T>,
}

impl<T> Arena<T> {
    pub fn new() -> Arena<T> {
        Arena::from_items(Vec::new())
    }

    fn from_items(items: Vec<T>) -> Arena<T> {
        // Tags only need to differ between live arenas
        let tag = NEXT_ARENA_TAG.fetch_add(1, Ordering::Relaxed);
        Arena { tag, items }
    }

    /// Creates an arena with room for at least `nr_items` items.
    pub fn with_capacity(nr_items: usize) -> Result<Arena<T>, NoMemory> {
        let mut items = Vec::new();
        items.try_reserve_exact(nr_items.max(MIN_ITEMS))?;
        Ok(Arena::from_items(items))
    }

    pub fn alloc(&mut self, item: T) -> Result<ElementId, NoMemory> {
        let index = u32::try_from(self.items.len()).map_err(|_| NoMemory)?;
        if self.items.len() == self.items.capacity() {
            self.items.try_reserve(self.items.len().max(MIN_ITEMS))?;
        }
        self.items.push(item);
        Ok(ElementId {
            arena: self.tag,
            index,
        })
    }

    pub fn get(&self, id: ElementId) -> Option<&T> {
        if id.arena != self.tag {
            return None;
        }
        self.items.get(id.index())
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut T> {
        if id.arena != self.tag {
            return None;
        }
        self.items.get_mut(id.index())
    }

    /// True if the handle was issued by this arena.
    pub fn contains(&self, id: ElementId) -> bool {
        id.arena == self.tag && id.index() < self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            nr_items: self.items.len(),
            capacity: self.items.capacity(),
            allocated_bytes: self.items.capacity() * std::mem::size_of::<T>(),
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena::new()
    }
}

#[cfg(test)]
mod tests;

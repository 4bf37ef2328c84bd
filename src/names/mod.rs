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

pub use error::BadNameTable;

/// A read-only list of known names.
///
/// Element and attribute names found in the input are looked up in
/// these tables, and only the index of the matching entry is stored
/// in the tree. The table borrows the caller's strings, so it must
/// outlive every [Document](crate::Document) using it.
///
/// # Examples
///
/// ```
/// use tagtree::NameTable;
///
/// let table = NameTable::new(&["config", "item"]);
/// assert_eq!(table.resolve("item", 128), Ok(Some(1)));
/// assert_eq!(table.resolve("other", 128), Ok(None));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NameTable<'n> {
    names: &'n [&'n str],
}

impl<'n> NameTable<'n> {
    pub fn new(names: &'n [&'n str]) -> NameTable<'n> {
        NameTable { names }
    }

    /// A table without entries. Every lookup misses.
    pub fn empty() -> NameTable<'n> {
        NameTable { names: &[] }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<&'n str> {
        self.names.get(index as usize).copied()
    }

    /// Finds the index of the given name.
    ///
    /// Only the first `max_len` bytes of both sides take part in the
    /// comparison. Empty names and empty tables never match.
    pub fn resolve(&self, name: &str, max_len: usize) -> Result<Option<u32>, BadNameTable> {
        if name.is_empty() {
            return Ok(None);
        }
        for (index, entry) in self.names.iter().enumerate() {
            if entry.is_empty() {
                return Err(BadNameTable { index });
            }
            if names_equal(entry, name, max_len) {
                return Ok(u32::try_from(index).ok());
            }
        }
        Ok(None)
    }
}

impl Default for NameTable<'_> {
    fn default() -> Self {
        NameTable::empty()
    }
}

/// Bounded, case sensitive name comparison.
pub(crate) fn names_equal(a: &str, b: &str, max_len: usize) -> bool {
    let a = &a.as_bytes()[..a.len().min(max_len)];
    let b = &b.as_bytes()[..b.len().min(max_len)];
    a == b
}

#[cfg(test)]
mod tests;

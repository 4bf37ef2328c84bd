/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

/// Error type for malformed name tables.
///
/// A name table must not contain empty entries. The index of the
/// first offending entry is reported so the caller can fix the
/// table they supplied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BadNameTable {
    pub index: usize,
}

impl Display for BadNameTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "empty entry at index {} in name table", self.index)
    }
}

impl Error for BadNameTable {}

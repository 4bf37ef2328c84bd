/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt::Display;

/// Error type for memory allocation failures.
///
/// Returned when growing the element storage, or any of the
/// buffers owned by the tree, fails. The parse is aborted and the
/// tree built so far is left intact.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NoMemory;

impl Display for NoMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not enough memory")
    }
}

impl Error for NoMemory {}

impl From<TryReserveError> for NoMemory {
    fn from(_: TryReserveError) -> Self {
        NoMemory
    }
}

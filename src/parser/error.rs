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

use crate::NoMemory;

/// Errors raised while scanning.
///
/// The scanner stops at the first error, and refuses further input
/// afterwards. Whatever was built into the tree before the error
/// stays there.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanError {
    /// Not enough memory to grow a buffer or the tree.
    NoMemory,
    /// Input does not follow the accepted grammar.
    BadInput(&'static str),
    /// The tree refused a value handed over by the scanner.
    Rejected(&'static str),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::NoMemory => write!(f, "not enough memory"),
            ScanError::BadInput(msg) => write!(f, "invalid input: {}", msg),
            ScanError::Rejected(msg) => write!(f, "rejected by the tree: {}", msg),
        }
    }
}

impl Error for ScanError {}

impl From<NoMemory> for ScanError {
    fn from(_: NoMemory) -> Self {
        ScanError::NoMemory
    }
}

pub(crate) mod description {
    pub(crate) const CLOSE_WITHOUT_OPEN: &str = "end tag without an open element";
    pub(crate) const TAG_MISMATCH: &str = "start and end tags have different names";
    pub(crate) const NO_ELEMENT: &str = "start tag closed without an element";
    pub(crate) const NAME_OVERFLOW: &str = "name is longer than the maximum name length";
    pub(crate) const VALUE_OVERFLOW: &str = "value is longer than the maximum value length";
    pub(crate) const INVALID_UTF8: &str = "names, values and text must be valid UTF-8";
    pub(crate) const REUSE_AFTER_ERROR: &str = "cannot continue after an error";
}

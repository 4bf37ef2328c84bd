/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

/// A position in the input byte stream.
///
/// Returned from [Document::location()](crate::Document::location).
/// The scanner looks one byte ahead, so the location trails the
/// appended input by one byte until the document is finalized.
/// After an error it points at the offending byte.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Location {
    /// Number of bytes scanned.
    pub bytes: usize,
    /// Number of newline characters scanned.
    pub lines: usize,
    /// Bytes scanned after the last newline character.
    pub column: usize,
}

impl Location {
    pub fn new() -> Self {
        Location::default()
    }

    pub(super) fn advance(&mut self, c: u8) {
        self.bytes += 1;
        if c == b'\n' {
            self.lines += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "byte: {}, line: {}, column: {}",
            self.bytes, self.lines, self.column
        )
    }
}

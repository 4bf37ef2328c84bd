/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub const DEFAULT_MAX_NAME_LENGTH: usize = 128;
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 128;

/// Limits and behaviour switches of the parser.
///
/// # Examples
///
/// ```
/// use tagtree::ParserOptions;
///
/// let options = ParserOptions::new()
///     .with_max_value_length(4096)
///     .with_dynamic_names(false);
/// assert_eq!(options.max_name_length(), 128);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParserOptions {
    max_name_length: usize,
    max_value_length: usize,
    dynamic_names: bool,
}

impl ParserOptions {
    pub fn new() -> ParserOptions {
        ParserOptions {
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
            dynamic_names: true,
        }
    }

    /// Longest accepted element or attribute name, in bytes.
    ///
    /// Name lookups compare at most this many bytes.
    pub fn with_max_name_length(mut self, len: usize) -> ParserOptions {
        self.max_name_length = len.max(1);
        self
    }

    /// Longest accepted attribute value or text run, in bytes.
    pub fn with_max_value_length(mut self, len: usize) -> ParserOptions {
        self.max_value_length = len.max(1);
        self
    }

    /// Whether element names missing from the element name table are
    /// stored as owned strings. When disabled they are a parse error.
    pub fn with_dynamic_names(mut self, enabled: bool) -> ParserOptions {
        self.dynamic_names = enabled;
        self
    }

    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    pub fn max_value_length(&self) -> usize {
        self.max_value_length
    }

    pub fn dynamic_names(&self) -> bool {
        self.dynamic_names
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions::new()
    }
}

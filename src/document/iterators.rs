/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::AttributeCursor;
use super::Cursor;

pub struct Attributes<'a> {
    current: AttributeCursor<'a>,
}

impl<'a> Attributes<'a> {
    pub fn new(first: AttributeCursor<'a>) -> Self {
        Attributes { current: first }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = AttributeCursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }
        let result = self.current;
        self.current = self.current.next();
        Some(result)
    }
}

pub struct Children<'a> {
    current: Cursor<'a>,
}

impl<'a> Children<'a> {
    pub fn new(first: Cursor<'a>) -> Self {
        Children { current: first }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }
        let result = self.current;
        self.current = self.current.next();
        Some(result)
    }
}

pub struct TextRuns<'a> {
    runs: std::slice::Iter<'a, String>,
}

impl<'a> TextRuns<'a> {
    pub(super) fn new(runs: &'a [String]) -> Self {
        TextRuns { runs: runs.iter() }
    }
}

impl<'a> Iterator for TextRuns<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.runs.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.runs.size_hint()
    }
}

impl ExactSizeIterator for TextRuns<'_> {}

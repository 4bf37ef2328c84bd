/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::ptr;

use crate::ElementId;
use crate::names::names_equal;

use super::AttributeCursor;
use super::Cursor;
use super::Document;
use super::DocumentError;
use super::Tree;
use super::description;

impl<'a> Tree<'a> {
    /// Pre-order walk from `start` using only the element links.
    ///
    /// Depth is counted from the start element, which is at depth 0.
    /// Children are entered only above `max_depth`, so no visited
    /// element is deeper than that. When a subtree is done the walk
    /// climbs to the next sibling of the closest ancestor that has
    /// one, which may be above the start element.
    pub(crate) fn search_elements(
        &'a self,
        start: ElementId,
        skip_start: bool,
        max_depth: usize,
        name: &str,
    ) -> Cursor<'a> {
        let max_depth = isize::try_from(max_depth).unwrap_or(isize::MAX);
        let mut current = start;
        let mut depth: isize = 0;
        let mut skip = skip_start;

        loop {
            if !skip && self.element_name_matches(current, name) {
                return Cursor::new(self, Some(current));
            }
            skip = false;

            let Some(element) = self.element(current) else {
                return Cursor::new(self, None);
            };
            if depth < max_depth {
                if let Some(child) = element.first_child {
                    current = child;
                    depth += 1;
                    continue;
                }
            }

            let mut node = element;
            loop {
                if let Some(next) = node.next {
                    current = next;
                    break;
                }
                let Some(parent) = node.parent.and_then(|id| self.element(id)) else {
                    return Cursor::new(self, None);
                };
                node = parent;
                depth -= 1;
            }
        }
    }

    pub(crate) fn search_attributes(
        &'a self,
        element: Option<ElementId>,
        start: usize,
        name: &str,
    ) -> AttributeCursor<'a> {
        let max_len = self.options.max_name_length();
        let found = element.and_then(|id| {
            self.element(id)?
                .attributes
                .iter()
                .enumerate()
                .skip(start)
                .find(|(_, attribute)| {
                    self.attribute_name(attribute)
                        .is_some_and(|s| names_equal(s, name, max_len))
                })
                .map(|(index, _)| (id, index))
        });
        match found {
            Some((id, index)) => AttributeCursor::new(self, Some(id), index),
            None => AttributeCursor::new(self, None, 0),
        }
    }
}

impl<'n> Document<'n> {
    fn check_cursor_tree(&self, tree: &Tree<'_>) -> Result<(), DocumentError> {
        if ptr::addr_eq(tree, &self.tree) {
            Ok(())
        } else {
            Err(DocumentError::InvalidArgument(description::FOREIGN_CURSOR))
        }
    }

    /// Finds an element with the given name.
    ///
    /// Without an offset the search starts at the first root element,
    /// otherwise at the offset element itself, which is returned when
    /// its name matches. Elements more than `max_depth` levels below
    /// the starting element are not visited.
    ///
    /// Returns a null cursor when nothing matches.
    pub fn find_element<'a>(
        &'a self,
        offset: Option<Cursor<'a>>,
        max_depth: usize,
        name: &str,
    ) -> Result<Cursor<'a>, DocumentError> {
        if name.is_empty() {
            return Err(DocumentError::InvalidArgument(description::EMPTY_NAME));
        }
        let start = match offset {
            Some(cursor) => {
                self.check_cursor_tree(cursor.tree)?;
                cursor.node
            }
            None => self.tree.first_root,
        };
        self.search_from(start, false, max_depth, name)
    }

    /// Finds the next element with the given name after `previous`
    /// in document order.
    ///
    /// Passing the previous result walks through all matches. The
    /// depth limit is counted from `previous`.
    pub fn find_next_element<'a>(
        &'a self,
        previous: Cursor<'a>,
        max_depth: usize,
        name: &str,
    ) -> Result<Cursor<'a>, DocumentError> {
        if name.is_empty() {
            return Err(DocumentError::InvalidArgument(description::EMPTY_NAME));
        }
        self.check_cursor_tree(previous.tree)?;
        self.search_from(previous.node, true, max_depth, name)
    }

    fn search_from<'a>(
        &'a self,
        start: Option<ElementId>,
        skip_start: bool,
        max_depth: usize,
        name: &str,
    ) -> Result<Cursor<'a>, DocumentError> {
        let tree = self.tree();
        match start {
            Some(start) => Ok(tree.search_elements(start, skip_start, max_depth, name)),
            None => Ok(Cursor::new(tree, None)),
        }
    }

    /// Finds an attribute with the given name.
    ///
    /// With an offset, the search continues after that attribute of
    /// the same element, and `element` is ignored. Otherwise the
    /// search starts at the first attribute of `element`.
    ///
    /// Returns a null cursor when nothing matches.
    pub fn find_attribute<'a>(
        &'a self,
        element: Option<Cursor<'a>>,
        offset: Option<AttributeCursor<'a>>,
        name: &str,
    ) -> Result<AttributeCursor<'a>, DocumentError> {
        if name.is_empty() {
            return Err(DocumentError::InvalidArgument(description::EMPTY_NAME));
        }
        let (node, start) = match (offset, element) {
            (Some(offset), _) => {
                self.check_cursor_tree(offset.tree)?;
                if offset.is_null() {
                    (None, 0)
                } else {
                    (offset.element, offset.index + 1)
                }
            }
            (None, Some(element)) => {
                self.check_cursor_tree(element.tree)?;
                (element.node, 0)
            }
            (None, None) => {
                return Err(DocumentError::InvalidArgument(description::NO_SEARCH_START));
            }
        };
        Ok(self.tree().search_attributes(node, start, name))
    }
}

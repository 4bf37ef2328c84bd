/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Debug;

use crate::ElementId;

use super::Attribute;
use super::AttributeType;
use super::AttributeValue;
use super::Attributes;
use super::Children;
use super::DocumentError;
use super::Element;
use super::Name;
use super::TextRuns;
use super::Tree;
use super::description;
use super::writer;

macro_rules! null_cursor_guard {
    ($x:expr) => {
        match $x.element() {
            Some(element) => element,
            None => return Cursor::new($x.tree, None),
        }
    };
}

/// A read-only position in a [Document](crate::Document).
///
/// A cursor either points at an element or is null. Navigation
/// methods return a null cursor when there is nowhere to go, and
/// every method of a null cursor returns a null cursor or an empty
/// value, so chained calls never fail.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    pub(super) tree: &'a Tree<'a>,
    pub(super) node: Option<ElementId>,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(tree: &'a Tree<'a>, node: Option<ElementId>) -> Cursor<'a> {
        Cursor { tree, node }
    }

    fn element(&self) -> Option<&'a Element> {
        self.node.and_then(|id| self.tree.element(id))
    }

    pub fn is_null(&self) -> bool {
        self.node.is_none()
    }

    /// Handle of the element, usable with the building methods of
    /// the document.
    pub fn id(&self) -> Option<ElementId> {
        self.node
    }

    pub fn next(self) -> Cursor<'a> {
        let element = null_cursor_guard!(self);
        Cursor::new(self.tree, element.next)
    }

    pub fn first_child(self) -> Cursor<'a> {
        let element = null_cursor_guard!(self);
        Cursor::new(self.tree, element.first_child)
    }

    pub fn last_child(self) -> Cursor<'a> {
        let element = null_cursor_guard!(self);
        Cursor::new(self.tree, element.last_child)
    }

    pub fn parent(self) -> Cursor<'a> {
        let element = null_cursor_guard!(self);
        Cursor::new(self.tree, element.parent)
    }

    pub fn first_attribute(self) -> AttributeCursor<'a> {
        AttributeCursor::new(self.tree, self.node, 0)
    }

    /// First attribute with the given name.
    pub fn find_attribute(self, name: &str) -> AttributeCursor<'a> {
        self.tree.search_attributes(self.node, 0, name)
    }

    //
    // Iterator methods
    //

    pub fn children(self) -> Children<'a> {
        Children::new(self.first_child())
    }

    pub fn attributes(self) -> Attributes<'a> {
        Attributes::new(self.first_attribute())
    }

    pub fn text_runs(self) -> TextRuns<'a> {
        TextRuns::new(self.element().map(|e| e.texts.as_slice()).unwrap_or(&[]))
    }

    //
    // Element property methods
    //

    /// Name of the element. Empty for null cursors and unnamed
    /// elements.
    pub fn name(&self) -> &'a str {
        self.node
            .and_then(|id| self.tree.element_name(id))
            .unwrap_or("")
    }

    /// How the element name is stored.
    pub fn stored_name(&self) -> Option<&'a Name> {
        self.element().map(|e| &e.name)
    }

    /// All text runs of the element joined together.
    pub fn text(&self) -> String {
        self.text_runs().collect()
    }

    pub fn has_children(&self) -> bool {
        self.element().is_some_and(|e| e.first_child.is_some())
    }
}

impl Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node {
            Some(id) => write!(f, "Cursor({:?} <{}>)", id, self.name()),
            None => write!(f, "Cursor(null)"),
        }
    }
}

/// Renders the element and its subtree.
impl std::fmt::Display for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writer::render(self.tree, self.node, false, f)
    }
}

/// A read-only position in the attribute list of an element.
///
/// Like [Cursor], this is either pointing at an attribute or null.
#[derive(Clone, Copy)]
pub struct AttributeCursor<'a> {
    pub(super) tree: &'a Tree<'a>,
    pub(super) element: Option<ElementId>,
    pub(super) index: usize,
}

impl<'a> AttributeCursor<'a> {
    pub(super) fn new(
        tree: &'a Tree<'a>,
        element: Option<ElementId>,
        index: usize,
    ) -> AttributeCursor<'a> {
        AttributeCursor {
            tree,
            element,
            index,
        }
    }

    fn attribute(&self) -> Option<&'a Attribute> {
        let id = self.element?;
        self.tree.element(id)?.attributes.get(self.index)
    }

    pub fn is_null(&self) -> bool {
        self.attribute().is_none()
    }

    pub fn next(self) -> AttributeCursor<'a> {
        if self.is_null() {
            return AttributeCursor::new(self.tree, None, 0);
        }
        AttributeCursor::new(self.tree, self.element, self.index + 1)
    }

    /// The element owning this attribute.
    pub fn element(&self) -> Cursor<'a> {
        let node = if self.is_null() { None } else { self.element };
        Cursor::new(self.tree, node)
    }

    /// Name of the attribute, empty for null cursors.
    pub fn name(&self) -> &'a str {
        self.attribute()
            .and_then(|a| self.tree.attribute_name(a))
            .unwrap_or("")
    }

    pub fn stored_name(&self) -> Option<&'a Name> {
        self.attribute().map(|a| &a.name)
    }

    pub fn kind(&self) -> AttributeType {
        self.attribute()
            .map(|a| a.value.kind())
            .unwrap_or(AttributeType::Unknown)
    }

    pub fn value(&self) -> Option<&'a AttributeValue> {
        self.attribute().map(|a| &a.value)
    }

    fn typed_value(&self) -> Result<&'a AttributeValue, DocumentError> {
        self.value()
            .ok_or(DocumentError::InvalidArgument(description::NULL_CURSOR))
    }

    pub fn int_value(&self) -> Result<i64, DocumentError> {
        match self.typed_value()? {
            AttributeValue::Integer(n) => Ok(*n),
            _ => Err(DocumentError::InvalidArgument(description::TYPE_MISMATCH)),
        }
    }

    pub fn float_value(&self) -> Result<f64, DocumentError> {
        match self.typed_value()? {
            AttributeValue::Float(x) => Ok(*x),
            _ => Err(DocumentError::InvalidArgument(description::TYPE_MISMATCH)),
        }
    }

    pub fn string_value(&self) -> Result<&'a str, DocumentError> {
        match self.typed_value()? {
            AttributeValue::Text(s) => Ok(s.as_str()),
            _ => Err(DocumentError::InvalidArgument(description::TYPE_MISMATCH)),
        }
    }
}

impl Debug for AttributeCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(value) => write!(f, "AttributeCursor({}={:?})", self.name(), value),
            None => write!(f, "AttributeCursor(null)"),
        }
    }
}

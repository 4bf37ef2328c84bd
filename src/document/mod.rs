/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod builder;
mod cursor;
mod error;
mod iterators;
mod query;
mod value;
mod writer;

use std::str::FromStr;

pub use cursor::AttributeCursor;
pub use cursor::Cursor;
pub use error::DocumentError;
use error::description;
pub use iterators::Attributes;
pub use iterators::Children;
pub use iterators::TextRuns;
pub use value::AttributeType;
pub use value::AttributeValue;
use value::owned;

use crate::Arena;
use crate::ArenaStats;
use crate::ElementId;
use crate::Location;
use crate::NameTable;
use crate::NoMemory;
use crate::NoopObserver;
use crate::ParseObserver;
use crate::ParserOptions;
use crate::Scanner;
use crate::names::names_equal;
use crate::parser;

use builder::Builder;

/// Name of an element or attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Name {
    /// Index into the element or attribute name table.
    Indexed(u32),
    /// A name missing from the table, stored as a copy.
    Owned(String),
    /// Elements created with an empty name. Serialized as `null`.
    Unnamed,
}

#[derive(Debug)]
pub(crate) struct Attribute {
    name: Name,
    value: AttributeValue,
}

#[derive(Debug)]
pub(crate) struct Element {
    name: Name,
    attributes: Vec<Attribute>,
    texts: Vec<String>,
    parent: Option<ElementId>,
    first_child: Option<ElementId>,
    last_child: Option<ElementId>,
    next: Option<ElementId>,
}

impl Element {
    fn new(name: Name, parent: Option<ElementId>) -> Element {
        Element {
            name,
            attributes: Vec::new(),
            texts: Vec::new(),
            parent,
            first_child: None,
            last_child: None,
            next: None,
        }
    }
}

fn reserve_one<T>(v: &mut Vec<T>) -> Result<(), NoMemory> {
    v.try_reserve(1)?;
    Ok(())
}

/// The element tree and the name tables used to build it.
pub(crate) struct Tree<'n> {
    elements: Arena<Element>,
    first_root: Option<ElementId>,
    last_root: Option<ElementId>,
    element_names: NameTable<'n>,
    attribute_names: NameTable<'n>,
    options: ParserOptions,
}

impl<'n> Tree<'n> {
    fn new(
        element_names: NameTable<'n>,
        attribute_names: NameTable<'n>,
        options: ParserOptions,
    ) -> Tree<'n> {
        Tree {
            elements: Arena::new(),
            first_root: None,
            last_root: None,
            element_names,
            attribute_names,
            options,
        }
    }

    pub(crate) fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    fn name_str<'a>(&'a self, name: &'a Name, table: NameTable<'n>) -> Option<&'a str> {
        match name {
            Name::Indexed(index) => table.get(*index),
            Name::Owned(s) => Some(s.as_str()),
            Name::Unnamed => None,
        }
    }

    pub(crate) fn element_name(&self, id: ElementId) -> Option<&str> {
        let element = self.elements.get(id)?;
        self.name_str(&element.name, self.element_names)
    }

    pub(crate) fn attribute_name<'a>(&'a self, attribute: &'a Attribute) -> Option<&'a str> {
        self.name_str(&attribute.name, self.attribute_names)
    }

    pub(crate) fn element_name_matches(&self, id: ElementId, name: &str) -> bool {
        self.element_name(id)
            .is_some_and(|s| names_equal(s, name, self.options.max_name_length()))
    }

    fn intern(&self, table: NameTable<'n>, name: &str, dynamic: bool) -> Result<Name, DocumentError> {
        if name.is_empty() {
            return Ok(Name::Unnamed);
        }
        match table.resolve(name, self.options.max_name_length())? {
            Some(index) => Ok(Name::Indexed(index)),
            None if dynamic => Ok(Name::Owned(owned(name)?)),
            None => Err(DocumentError::ParseError(description::UNKNOWN_ELEMENT_NAME)),
        }
    }

    fn check_element(&self, id: ElementId) -> Result<(), DocumentError> {
        if self.elements.contains(id) {
            Ok(())
        } else {
            Err(DocumentError::InvalidArgument(description::BAD_ELEMENT))
        }
    }

    pub(crate) fn create_element(
        &mut self,
        parent: Option<ElementId>,
        name: &str,
    ) -> Result<ElementId, DocumentError> {
        if let Some(parent) = parent {
            self.check_element(parent)?;
        }
        let name = self.intern(self.element_names, name, self.options.dynamic_names())?;
        let id = self.elements.alloc(Element::new(name, parent))?;

        let previous = match parent {
            Some(parent) => self.elements.get(parent).and_then(|p| p.last_child),
            None => self.last_root,
        };
        if let Some(previous) = previous {
            if let Some(sibling) = self.elements.get_mut(previous) {
                sibling.next = Some(id);
            }
        }
        match parent.and_then(|parent| self.elements.get_mut(parent)) {
            Some(parent) => {
                if parent.first_child.is_none() {
                    parent.first_child = Some(id);
                }
                parent.last_child = Some(id);
            }
            None => {
                if self.first_root.is_none() {
                    self.first_root = Some(id);
                }
                self.last_root = Some(id);
            }
        }
        Ok(id)
    }

    pub(crate) fn add_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        self.check_element(element)?;
        if name.is_empty() {
            return Err(DocumentError::InvalidArgument(description::EMPTY_NAME));
        }
        if value.is_empty() {
            return Err(DocumentError::InvalidArgument(description::EMPTY_VALUE));
        }
        let name = self.intern(self.attribute_names, name, true)?;
        let value = AttributeValue::infer(value)?;
        if let Some(element) = self.elements.get_mut(element) {
            reserve_one(&mut element.attributes)?;
            element.attributes.push(Attribute { name, value });
        }
        Ok(())
    }

    pub(crate) fn append_text(&mut self, element: ElementId, text: &str) -> Result<(), DocumentError> {
        self.check_element(element)?;
        if text.is_empty() {
            return Err(DocumentError::InvalidArgument(description::EMPTY_TEXT));
        }
        let text = owned(text)?;
        if let Some(element) = self.elements.get_mut(element) {
            reserve_one(&mut element.texts)?;
            element.texts.push(text);
        }
        Ok(())
    }
}

/// An element tree built from incrementally appended text.
///
/// Input can be given in any number of [append()](Document::append)
/// calls, split at arbitrary byte positions, and the resulting tree
/// is always the same. Element and attribute names are looked up in
/// the two name tables, and only the table index is stored for the
/// names found there.
///
/// # Examples
///
/// ```
/// use tagtree::{Document, DocumentError, NameTable};
///
/// # fn main() -> Result<(), DocumentError> {
/// let elements = ["config", "item"];
/// let attributes = ["id", "ratio"];
/// let mut doc = Document::new(NameTable::new(&elements), NameTable::new(&attributes));
/// doc.append(b"<config><item id=\"4\" rat")?;
/// doc.append(b"io=\"0.5\">first</item></config>")?;
/// doc.finalize()?;
///
/// let item = doc.find_element(None, 1, "item")?;
/// let id = doc.find_attribute(Some(item), None, "id")?;
/// assert_eq!(id.int_value()?, 4);
/// assert_eq!(item.text_runs().next(), Some("first"));
/// # Ok(())
/// # }
/// ```
pub struct Document<'n> {
    tree: Tree<'n>,
    scanner: Option<Scanner>,
    location: Location,
    observer: Box<dyn ParseObserver + 'n>,
}

impl<'n> Document<'n> {
    pub fn new(element_names: NameTable<'n>, attribute_names: NameTable<'n>) -> Document<'n> {
        Document::with_options(element_names, attribute_names, ParserOptions::new())
    }

    pub fn with_options(
        element_names: NameTable<'n>,
        attribute_names: NameTable<'n>,
        options: ParserOptions,
    ) -> Document<'n> {
        Document {
            tree: Tree::new(element_names, attribute_names, options),
            scanner: Some(Scanner::new(&options)),
            location: Location::new(),
            observer: Box::new(NoopObserver),
        }
    }

    /// Parses a complete text in one go.
    pub fn parse(
        element_names: NameTable<'n>,
        attribute_names: NameTable<'n>,
        text: &str,
    ) -> Result<Document<'n>, DocumentError> {
        let mut doc = Document::new(element_names, attribute_names);
        if !text.is_empty() {
            doc.append(text.as_bytes())?;
        }
        doc.finalize()?;
        Ok(doc)
    }

    pub fn set_observer(&mut self, observer: impl ParseObserver + 'n) {
        self.observer = Box::new(observer);
    }

    pub fn options(&self) -> &ParserOptions {
        &self.tree.options
    }

    /// Scans the next piece of input.
    ///
    /// The scanner looks one byte ahead, so the effect of the last
    /// byte only shows up after the next call or after
    /// [finalize()](Document::finalize). After an error the document
    /// refuses further input, but the tree built so far is kept.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), DocumentError> {
        if bytes.is_empty() {
            return Err(DocumentError::InvalidArgument(description::EMPTY_INPUT));
        }
        let Some(scanner) = self.scanner.as_mut() else {
            return Err(DocumentError::InvalidArgument(description::FINALIZED));
        };
        if scanner.is_poisoned() {
            // Only the first error goes to the observer
            return Err(DocumentError::ParseError(
                parser::description::REUSE_AFTER_ERROR,
            ));
        }
        let mut builder = Builder::new(&mut self.tree, self.observer.as_mut());
        let result = scanner.feed(&mut builder, bytes);
        self.location = scanner.location();
        result.map_err(|err| self.report(err.into()))
    }

    /// Ends the input and releases the scanning state.
    ///
    /// Calling it more than once is harmless. A document which
    /// stopped with an error is finalized without further checks.
    pub fn finalize(&mut self) -> Result<(), DocumentError> {
        let Some(mut scanner) = self.scanner.take() else {
            return Ok(());
        };
        if scanner.is_poisoned() {
            return Ok(());
        }
        let mut builder = Builder::new(&mut self.tree, self.observer.as_mut());
        let result = scanner.finish(&mut builder);
        self.location = scanner.location();
        result.map_err(|err| self.report(err.into()))
    }

    fn report(&mut self, err: DocumentError) -> DocumentError {
        self.observer.parse_error(&err, self.location);
        err
    }

    pub fn is_finalized(&self) -> bool {
        self.scanner.is_none()
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.tree.elements.stats()
    }

    pub fn nr_elements(&self) -> usize {
        self.tree.elements.len()
    }

    pub(crate) fn tree<'a>(&'a self) -> &'a Tree<'a> {
        &self.tree
    }

    /// Cursor at the first root element, or a null cursor for an
    /// empty document.
    pub fn root<'a>(&'a self) -> Cursor<'a> {
        Cursor::new(self.tree(), self.tree.first_root)
    }

    pub fn roots<'a>(&'a self) -> Children<'a> {
        Children::new(self.root())
    }

    /// Cursor for an element handle, null if the handle is not from
    /// this document.
    pub fn cursor<'a>(&'a self, id: ElementId) -> Cursor<'a> {
        let node = self.tree.elements.contains(id).then_some(id);
        Cursor::new(self.tree(), node)
    }

    /// Adds an element as the last child of `parent`, or as the last
    /// root element.
    ///
    /// Names missing from the element name table are copied if
    /// dynamic names are enabled, and rejected otherwise. An empty
    /// name creates an unnamed element.
    pub fn create_element(
        &mut self,
        parent: Option<ElementId>,
        name: &str,
    ) -> Result<ElementId, DocumentError> {
        self.tree.create_element(parent, name)
    }

    /// Appends an attribute with an inferred value type. Both the
    /// name and the value must be non-empty.
    pub fn add_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        self.tree.add_attribute(element, name, value)
    }

    pub fn append_text(&mut self, element: ElementId, text: &str) -> Result<(), DocumentError> {
        self.tree.append_text(element, text)
    }
}

impl std::fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writer::render(self.tree(), self.tree.first_root, true, f)
    }
}

impl std::fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nr_elements", &self.tree.elements.len())
            .field("location", &self.location)
            .field("finalized", &self.is_finalized())
            .finish()
    }
}

/// Parses a text without name tables. Every name is stored as a
/// copy.
impl FromStr for Document<'static> {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse(NameTable::empty(), NameTable::empty(), s)
    }
}

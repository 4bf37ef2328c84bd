/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt;
use std::fmt::Write;

use crate::ElementId;

use super::AttributeValue;
use super::Document;
use super::DocumentError;
use super::Element;
use super::Tree;
use super::description;

const NULL_NAME: &str = "null";

/// Writes into a byte slice, keeping the last byte for the NUL
/// terminator. Writing past the end fails, which stops rendering.
struct BoundedWriter<'b> {
    buf: &'b mut [u8],
    written: usize,
}

impl Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - 1 - self.written;
        let len = s.len().min(room);
        self.buf[self.written..self.written + len].copy_from_slice(&s.as_bytes()[..len]);
        self.written += len;
        if len < s.len() {
            Err(fmt::Error)
        } else {
            Ok(())
        }
    }
}

fn element_name<'a>(tree: &'a Tree<'_>, element: &'a Element) -> &'a str {
    tree.name_str(&element.name, tree.element_names)
        .unwrap_or(NULL_NAME)
}

fn write_indent<W: Write>(out: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    Ok(())
}

fn write_open<W: Write>(
    tree: &Tree<'_>,
    element: &Element,
    depth: usize,
    out: &mut W,
) -> fmt::Result {
    write_indent(out, depth)?;
    out.write_char('<')?;
    out.write_str(element_name(tree, element))?;
    for attribute in &element.attributes {
        out.write_char(' ')?;
        out.write_str(tree.attribute_name(attribute).unwrap_or(NULL_NAME))?;
        match &attribute.value {
            AttributeValue::Integer(n) => write!(out, "=\"{}\"", n)?,
            AttributeValue::Float(x) => write!(out, "=\"{:.6}\"", x)?,
            AttributeValue::Text(s) if s.is_empty() => out.write_str("=\"null\"")?,
            AttributeValue::Text(s) => write!(out, "=\"{}\"", s)?,
        }
    }
    let has_children = element.first_child.is_some();
    if has_children || !element.texts.is_empty() {
        out.write_char('>')?;
    }
    if has_children {
        out.write_char('\n')?;
    }
    Ok(())
}

fn write_close<W: Write>(
    tree: &Tree<'_>,
    element: &Element,
    depth: usize,
    out: &mut W,
) -> fmt::Result {
    let has_children = element.first_child.is_some();
    if has_children {
        write_indent(out, depth)?;
    }
    for text in &element.texts {
        out.write_str(if text.is_empty() { NULL_NAME } else { text })?;
    }
    if !has_children && element.texts.is_empty() {
        out.write_str("/>\n")
    } else {
        out.write_str("</")?;
        out.write_str(element_name(tree, element))?;
        out.write_str(">\n")
    }
}

/// Renders `start` and its subtree, and with `siblings` all the
/// following siblings of `start` too. The walk is iterative, so very
/// deep trees do not exhaust the stack.
pub(super) fn render<W: Write>(
    tree: &Tree<'_>,
    start: Option<ElementId>,
    siblings: bool,
    out: &mut W,
) -> fmt::Result {
    let Some(mut current) = start else {
        return Ok(());
    };
    let mut depth = 0;

    loop {
        let Some(element) = tree.element(current) else {
            return Ok(());
        };
        write_open(tree, element, depth, out)?;
        if let Some(child) = element.first_child {
            current = child;
            depth += 1;
            continue;
        }
        write_close(tree, element, depth, out)?;

        let mut node = element;
        loop {
            if depth == 0 && !siblings {
                return Ok(());
            }
            if let Some(next) = node.next {
                current = next;
                break;
            }
            if depth == 0 {
                return Ok(());
            }
            let Some(parent) = node.parent.and_then(|id| tree.element(id)) else {
                return Ok(());
            };
            depth -= 1;
            write_close(tree, parent, depth, out)?;
            node = parent;
        }
    }
}

impl Document<'_> {
    /// Writes the text form of the whole tree into `buf`.
    ///
    /// At most `buf.len() - 1` bytes are written, followed by a NUL
    /// byte. Output which does not fit is silently cut, check the
    /// returned length against the buffer size to detect it.
    ///
    /// Returns the number of bytes written, not counting the NUL.
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, DocumentError> {
        if buf.is_empty() {
            return Err(DocumentError::InvalidArgument(description::EMPTY_BUFFER));
        }
        let mut writer = BoundedWriter { buf, written: 0 };
        // An error here only means the buffer is full
        let _ = render(self.tree(), self.tree.first_root, true, &mut writer);
        let written = writer.written;
        writer.buf[written] = 0;
        Ok(written)
    }
}

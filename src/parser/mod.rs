/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;
mod location;
mod observer;
mod options;

pub use error::ScanError;
pub(crate) use error::description;
pub use location::Location;
pub use observer::LogObserver;
pub use observer::NoopObserver;
pub use observer::ParseObserver;
pub use options::DEFAULT_MAX_NAME_LENGTH;
pub use options::DEFAULT_MAX_VALUE_LENGTH;
pub use options::ParserOptions;

use crate::ElementId;

/// Receiver of the structure found by the [Scanner].
///
/// The scanner does not own any tree memory, it only calls these
/// methods as tags, attributes and text runs complete. Returning an
/// error from any of them stops the scan.
pub trait TreeSink {
    /// Creates a new element as the last child of `parent`, or as a
    /// new root element if there is no parent.
    fn start_element(
        &mut self,
        parent: Option<ElementId>,
        name: &str,
    ) -> Result<ElementId, ScanError>;

    fn attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), ScanError>;

    fn text(&mut self, element: ElementId, text: &str) -> Result<(), ScanError>;

    /// An attribute of the `<?...?>` prolog. These are not part of
    /// the tree and ignored by default.
    fn prolog_attribute(&mut self, _name: &str, _value: &str) -> Result<(), ScanError> {
        Ok(())
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId>;

    fn name_matches(&self, element: ElementId, name: &str) -> bool;
}

/// Scanner states. Several of them can be active at once, for
/// example an attribute value is always inside a start tag.
#[derive(Clone, Copy, Debug, Default)]
struct ScanState {
    comment_open: bool,
    prolog_open: bool,
    start_tag_open: bool,
    name_open: bool,
    end_tag_open: bool,
    content_open: bool,
    attribute_name_open: bool,
    attribute_value_open: bool,
    content_is_text: bool,
    /// Bytes of the `<!--` opener still to skip.
    comment_prefix: u8,
    /// Dashes seen right before the current comment byte.
    comment_dashes: u8,
}

const INITIAL_BUFFER_CAPACITY: usize = 32;

/// Bounded byte buffer for names, values and text runs.
struct Accumulator {
    buf: Vec<u8>,
    limit: usize,
    overflow: &'static str,
}

impl Accumulator {
    fn new(limit: usize, overflow: &'static str) -> Accumulator {
        Accumulator {
            buf: Vec::new(),
            limit,
            overflow,
        }
    }

    fn push(&mut self, c: u8) -> Result<(), ScanError> {
        if self.buf.len() >= self.limit {
            return Err(ScanError::BadInput(self.overflow));
        }
        if self.buf.len() == self.buf.capacity() {
            let extra = self.buf.capacity().max(INITIAL_BUFFER_CAPACITY);
            let extra = extra.min(self.limit - self.buf.len());
            self.buf
                .try_reserve_exact(extra)
                .map_err(|_| ScanError::NoMemory)?;
        }
        self.buf.push(c);
        Ok(())
    }

    fn clear(&mut self) {
        self.buf.clear();
    }

    fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn as_str(&self) -> Result<&str, ScanError> {
        std::str::from_utf8(&self.buf).map_err(|_| ScanError::BadInput(description::INVALID_UTF8))
    }
}

macro_rules! whitespace {
    () => {
        b' ' | b'\t' | b'\r' | b'\n' | 0
    };
}

macro_rules! quote {
    () => {
        b'"' | b'\''
    };
}

fn is_whitespace(c: u8) -> bool {
    matches!(c, whitespace!())
}

fn is_quote(c: u8) -> bool {
    matches!(c, quote!())
}

fn is_name_char(c: u8) -> bool {
    (c.is_ascii_graphic() && !matches!(c, b'<' | b'>' | b'/')) || c >= 0x80
}

fn opens_text(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c >= 0x80
}

/// Resumable scanner for the tag tree grammar.
///
/// Every byte is examined together with the byte before and the
/// byte after it, so the scanner keeps a three byte window and the
/// decision for a byte is made when the following byte arrives. The
/// whole scanning state lives in this struct, which makes the result
/// independent of how the input is split between
/// [feed()](Scanner::feed) calls.
///
/// Call [finish()](Scanner::finish) at the end of input to process
/// the last pending byte.
pub struct Scanner {
    state: ScanState,
    previous: u8,
    current: u8,
    next: u8,
    has_next: bool,
    name: Accumulator,
    value: Accumulator,
    element: Option<ElementId>,
    parent: Option<ElementId>,
    location: Location,
    poisoned: bool,
}

impl Scanner {
    pub fn new(options: &ParserOptions) -> Scanner {
        Scanner {
            state: ScanState::default(),
            previous: 0,
            current: 0,
            next: 0,
            has_next: false,
            name: Accumulator::new(options.max_name_length(), description::NAME_OVERFLOW),
            value: Accumulator::new(options.max_value_length(), description::VALUE_OVERFLOW),
            element: None,
            parent: None,
            location: Location::new(),
            poisoned: false,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// True after a scanning error. A poisoned scanner rejects all
    /// further input.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Scans the given bytes. The last byte stays pending until more
    /// input or the end of input arrives.
    pub fn feed<S: TreeSink + ?Sized>(
        &mut self,
        sink: &mut S,
        bytes: &[u8],
    ) -> Result<(), ScanError> {
        if self.poisoned {
            return Err(ScanError::BadInput(description::REUSE_AFTER_ERROR));
        }
        for &c in bytes {
            if !self.has_next {
                self.next = c;
                self.has_next = true;
                continue;
            }
            self.shift(c);
            if let Err(err) = self.step(sink) {
                self.poisoned = true;
                return Err(err);
            }
            self.location.advance(self.current);
        }
        Ok(())
    }

    /// Processes the pending byte. Constructs left open at the end
    /// of input are not an error, whatever was built stays in place.
    pub fn finish<S: TreeSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ScanError> {
        if self.poisoned {
            return Err(ScanError::BadInput(description::REUSE_AFTER_ERROR));
        }
        if self.has_next {
            self.has_next = false;
            self.shift(0);
            if let Err(err) = self.step(sink) {
                self.poisoned = true;
                return Err(err);
            }
            self.location.advance(self.current);
        }
        Ok(())
    }

    fn shift(&mut self, c: u8) {
        self.previous = self.current;
        self.current = self.next;
        self.next = c;
    }

    fn flush_text<S: TreeSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ScanError> {
        if self.state.content_is_text && !self.value.is_empty() {
            if let Some(target) = self.parent.or(self.element) {
                sink.text(target, self.value.as_str()?)?;
            }
        }
        self.value.clear();
        self.state.content_is_text = false;
        Ok(())
    }

    fn step<S: TreeSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ScanError> {
        let prev = self.previous;
        let cur = self.current;
        let next = self.next;

        // Comments are skipped entirely
        if !self.state.comment_open
            && !self.state.attribute_value_open
            && cur == b'<'
            && next == b'!'
        {
            self.state.comment_open = true;
            self.state.comment_prefix = 3;
            self.state.comment_dashes = 0;
            return Ok(());
        }
        if self.state.comment_open {
            if self.state.comment_prefix > 0 {
                self.state.comment_prefix -= 1;
                return Ok(());
            }
            match cur {
                b'-' => {
                    self.state.comment_dashes = self.state.comment_dashes.saturating_add(1);
                }
                b'>' if self.state.comment_dashes >= 2 => self.state.comment_open = false,
                _ => self.state.comment_dashes = 0,
            }
            return Ok(());
        }

        if self.state.attribute_value_open && !is_quote(cur) {
            return self.value.push(cur);
        }

        if cur == b'<' && next == b'?' {
            self.state.prolog_open = true;
            return Ok(());
        }
        if self.state.prolog_open && prev == b'?' && cur == b'>' {
            self.state.prolog_open = false;
            return Ok(());
        }

        if !self.state.start_tag_open && cur == b'<' && next.is_ascii_alphabetic() {
            self.flush_text(sink)?;
            self.state.start_tag_open = true;
            self.state.name_open = true;
            self.name.clear();
            return Ok(());
        }

        if self.state.name_open && (cur == b'>' || is_whitespace(cur)) {
            self.state.name_open = false;
            let parent = self.parent;
            let id = sink.start_element(parent, self.name.as_str()?)?;
            self.element = Some(id);
            self.name.clear();
            // falls through, the same byte may close the tag
        }

        if self.state.name_open && is_name_char(cur) {
            return self.name.push(cur);
        }

        if self.state.start_tag_open && cur == b'>' {
            self.state.start_tag_open = false;
            self.state.attribute_name_open = false;
            self.state.content_is_text = false;
            let element = self
                .element
                .ok_or(ScanError::BadInput(description::NO_ELEMENT))?;
            if prev != b'/' {
                self.parent = Some(element);
                self.value.clear();
                self.state.content_open = true;
            }
            return Ok(());
        }

        if cur == b'<' && next == b'/' && !self.state.content_open {
            return Err(ScanError::BadInput(description::CLOSE_WITHOUT_OPEN));
        }

        if self.state.content_open {
            if cur == b'<' && next == b'/' {
                self.flush_text(sink)?;
                self.state.end_tag_open = true;
                self.name.clear();
                self.element = self.parent;
                return Ok(());
            } else if self.state.content_is_text && !self.state.start_tag_open {
                return self.value.push(cur);
            } else if !self.state.content_is_text
                && !self.state.start_tag_open
                && !self.state.end_tag_open
                && opens_text(cur)
            {
                self.state.content_is_text = true;
                self.value.clear();
                return self.value.push(cur);
            }
        }

        if self.state.end_tag_open && is_name_char(cur) {
            return self.name.push(cur);
        }

        if self.state.end_tag_open && cur == b'>' {
            self.state.end_tag_open = false;
            let closing = self
                .element
                .ok_or(ScanError::BadInput(description::CLOSE_WITHOUT_OPEN))?;
            if !sink.name_matches(closing, self.name.as_str()?) {
                return Err(ScanError::BadInput(description::TAG_MISMATCH));
            }
            self.parent = sink.parent_of(closing);
            if self.parent.is_none() {
                self.state.content_open = false;
            }
            self.name.clear();
            self.value.clear();
            return Ok(());
        }

        if !self.state.attribute_name_open
            && !self.state.attribute_value_open
            && (self.state.start_tag_open || self.state.prolog_open)
            && is_whitespace(cur)
            && next.is_ascii_alphabetic()
        {
            self.state.attribute_name_open = true;
            self.name.clear();
            return Ok(());
        }

        if self.state.attribute_name_open {
            if cur == b'=' {
                self.state.attribute_name_open = false;
            } else if !is_whitespace(cur) {
                self.name.push(cur)?;
            }
            return Ok(());
        }

        if (self.state.start_tag_open || self.state.prolog_open) && is_quote(cur) {
            if !self.state.attribute_value_open {
                self.state.attribute_value_open = true;
                self.value.clear();
                return Ok(());
            }
            self.state.attribute_value_open = false;
            let name = self.name.as_str()?;
            let value = self.value.as_str()?;
            if self.state.start_tag_open {
                let element = self
                    .element
                    .ok_or(ScanError::BadInput(description::NO_ELEMENT))?;
                sink.attribute(element, name, value)?;
            } else {
                sink.prolog_attribute(name, value)?;
            }
            self.value.clear();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

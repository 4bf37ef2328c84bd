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

use crate::BadNameTable;
use crate::NoMemory;
use crate::ScanError;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum DocumentError {
    /// The caller passed something unusable, like an empty name or
    /// a cursor belonging to another document.
    InvalidArgument(&'static str),
    OutOfMemory,
    /// The input text does not follow the accepted grammar.
    ParseError(&'static str),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            DocumentError::OutOfMemory => write!(f, "not enough memory"),
            DocumentError::ParseError(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl Error for DocumentError {}

impl From<ScanError> for DocumentError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::NoMemory => DocumentError::OutOfMemory,
            ScanError::BadInput(msg) => DocumentError::ParseError(msg),
            ScanError::Rejected(msg) => DocumentError::InvalidArgument(msg),
        }
    }
}

impl From<DocumentError> for ScanError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::OutOfMemory => ScanError::NoMemory,
            DocumentError::ParseError(msg) => ScanError::BadInput(msg),
            DocumentError::InvalidArgument(msg) => ScanError::Rejected(msg),
        }
    }
}

impl From<NoMemory> for DocumentError {
    fn from(_: NoMemory) -> Self {
        DocumentError::OutOfMemory
    }
}

impl From<BadNameTable> for DocumentError {
    fn from(_: BadNameTable) -> Self {
        DocumentError::InvalidArgument(description::BAD_NAME_TABLE)
    }
}

pub(crate) mod description {
    pub(crate) const EMPTY_INPUT: &str = "no input bytes given";
    pub(crate) const FINALIZED: &str = "document is already finalized";
    pub(crate) const EMPTY_NAME: &str = "name must not be empty";
    pub(crate) const EMPTY_VALUE: &str = "attribute value must not be empty";
    pub(crate) const EMPTY_TEXT: &str = "text must not be empty";
    pub(crate) const BAD_ELEMENT: &str = "element does not belong to this document";
    pub(crate) const FOREIGN_CURSOR: &str = "cursor belongs to another document";
    pub(crate) const NULL_CURSOR: &str = "null cursor has no value";
    pub(crate) const TYPE_MISMATCH: &str = "attribute value has a different type";
    pub(crate) const NO_SEARCH_START: &str = "either an element or an attribute offset is needed";
    pub(crate) const EMPTY_BUFFER: &str = "output buffer has no room";
    pub(crate) const UNKNOWN_ELEMENT_NAME: &str = "element name is not in the name table";
    pub(crate) const BAD_NAME_TABLE: &str = "name table has an empty entry";
}

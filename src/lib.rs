/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod arena;
mod document;
mod names;
mod parser;

pub use arena::Arena;
pub use arena::ArenaStats;
pub use arena::ElementId;
pub use arena::NoMemory;

pub use names::BadNameTable;
pub use names::NameTable;

pub use parser::DEFAULT_MAX_NAME_LENGTH;
pub use parser::DEFAULT_MAX_VALUE_LENGTH;
pub use parser::Location;
pub use parser::LogObserver;
pub use parser::NoopObserver;
pub use parser::ParseObserver;
pub use parser::ParserOptions;
pub use parser::ScanError;
pub use parser::Scanner;
pub use parser::TreeSink;

pub use document::AttributeCursor;
pub use document::AttributeType;
pub use document::AttributeValue;
pub use document::Attributes;
pub use document::Children;
pub use document::Cursor;
pub use document::Document;
pub use document::DocumentError;
pub use document::Name;
pub use document::TextRuns;

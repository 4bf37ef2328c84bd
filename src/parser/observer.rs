/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use log::{debug, trace, warn};

use crate::DocumentError;
use crate::Location;

/// Receives diagnostic notifications from a parsing
/// [Document](crate::Document).
///
/// All methods have empty default implementations, so you only need
/// to write the ones you are interested in. The parser never prints
/// anything by itself.
pub trait ParseObserver {
    /// An attribute of the `<?...?>` prolog. Prolog attributes are
    /// not stored in the tree.
    fn prolog_attribute(&mut self, _name: &str, _value: &str) {}

    /// An element was created by the scanner.
    fn element_created(&mut self, _name: &str) {}

    /// Parsing stopped with an error.
    fn parse_error(&mut self, _error: &DocumentError, _location: Location) {}
}

/// Observer which ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

/// Observer which forwards notifications to the [log] facade.
///
/// Nothing is printed unless the application installs a logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl ParseObserver for LogObserver {
    fn prolog_attribute(&mut self, name: &str, value: &str) {
        debug!("prolog attribute {}={:?}", name, value);
    }

    fn element_created(&mut self, name: &str) {
        trace!("element <{}> created", name);
    }

    fn parse_error(&mut self, error: &DocumentError, location: Location) {
        warn!("parse failed at {}: {}", location, error);
    }
}

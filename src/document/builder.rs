/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::ElementId;
use crate::ParseObserver;
use crate::ScanError;
use crate::TreeSink;

use super::Tree;

/// Connects the scanner to a document tree for one scanning call.
pub(super) struct Builder<'d, 'n> {
    tree: &'d mut Tree<'n>,
    observer: &'d mut (dyn ParseObserver + 'n),
}

impl<'d, 'n> Builder<'d, 'n> {
    pub(super) fn new(
        tree: &'d mut Tree<'n>,
        observer: &'d mut (dyn ParseObserver + 'n),
    ) -> Builder<'d, 'n> {
        Builder { tree, observer }
    }
}

impl TreeSink for Builder<'_, '_> {
    fn start_element(
        &mut self,
        parent: Option<ElementId>,
        name: &str,
    ) -> Result<ElementId, ScanError> {
        let id = self.tree.create_element(parent, name)?;
        self.observer.element_created(name);
        Ok(id)
    }

    fn attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), ScanError> {
        Ok(self.tree.add_attribute(element, name, value)?)
    }

    fn text(&mut self, element: ElementId, text: &str) -> Result<(), ScanError> {
        Ok(self.tree.append_text(element, text)?)
    }

    fn prolog_attribute(&mut self, name: &str, value: &str) -> Result<(), ScanError> {
        self.observer.prolog_attribute(name, value);
        Ok(())
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.tree.element(element).and_then(|e| e.parent)
    }

    fn name_matches(&self, element: ElementId, name: &str) -> bool {
        self.tree.element_name_matches(element, name)
    }
}

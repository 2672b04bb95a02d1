// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text-selection lock.
//!
//! While an element is pressed with a pointer, dragging must not start a text
//! selection. [`TextSelection`] is a reference-counted registry shared by every
//! press engine of one document: the first [`TextSelection::acquire`] for a
//! target saves the current `user-select` value and applies `none`, the last
//! release restores the saved value. On iOS the lock applies to the whole
//! document, because `WebKit` there ignores `user-select` on the element itself.
//!
//! [`SelectionLock`] is the scoped acquisition. It releases exactly once:
//! either through [`SelectionLock::release`] or when dropped.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use crate::host::{ElementId, SelectionHost, SelectionTarget};

const NONE: &str = "none";

#[derive(Debug, Default)]
struct Held {
    count: usize,
    saved: String,
}

#[derive(Debug, Default)]
struct Registry {
    document: Option<Held>,
    elements: HashMap<ElementId, Held>,
}

impl Registry {
    fn acquire<H: SelectionHost + ?Sized>(&mut self, host: &H, target: SelectionTarget) {
        let held = match target {
            SelectionTarget::Document => self.document.get_or_insert_default(),
            SelectionTarget::Element(id) => self.elements.entry(id).or_default(),
        };
        if held.count == 0 {
            held.saved = host.user_select(target);
            host.set_user_select(target, NONE);
        }
        held.count += 1;
    }

    fn release<H: SelectionHost + ?Sized>(&mut self, host: &H, target: SelectionTarget) {
        let held = match target {
            SelectionTarget::Document => self.document.as_mut(),
            SelectionTarget::Element(id) => self.elements.get_mut(&id),
        };
        let Some(held) = held else {
            tracing::trace!(?target, "selection lock released after registry reset");
            return;
        };
        held.count -= 1;
        if held.count > 0 {
            return;
        }
        let saved = core::mem::take(&mut held.saved);
        match target {
            SelectionTarget::Document => self.document = None,
            SelectionTarget::Element(id) => {
                self.elements.remove(&id);
            }
        }
        // Someone else may have changed the style while we held it.
        if host.user_select(target) == NONE {
            host.set_user_select(target, &saved);
        }
    }

    fn count(&self, target: SelectionTarget) -> usize {
        match target {
            SelectionTarget::Document => self.document.as_ref().map_or(0, |h| h.count),
            SelectionTarget::Element(id) => self.elements.get(&id).map_or(0, |h| h.count),
        }
    }
}

/// Shared text-selection registry for one document.
#[derive(Clone, Debug, Default)]
pub struct TextSelection {
    registry: Rc<RefCell<Registry>>,
    document_scope: bool,
}

impl TextSelection {
    /// A registry that locks per element, or the whole document when
    /// `document_scope` is set (iOS).
    pub fn new(document_scope: bool) -> Self {
        Self {
            registry: Rc::default(),
            document_scope,
        }
    }

    /// Where a lock for `element` is applied.
    pub fn target_for(&self, element: ElementId) -> SelectionTarget {
        if self.document_scope {
            SelectionTarget::Document
        } else {
            SelectionTarget::Element(element)
        }
    }

    /// Disable text selection for `element` until the returned lock is released.
    pub fn acquire<H: SelectionHost + ?Sized>(
        &self,
        host: &Rc<H>,
        element: ElementId,
    ) -> SelectionLock<H> {
        let target = self.target_for(element);
        self.registry.borrow_mut().acquire(&**host, target);
        SelectionLock {
            host: Rc::clone(host),
            registry: self.clone(),
            target,
        }
    }

    /// Number of live locks on `target`.
    pub fn lock_count(&self, target: SelectionTarget) -> usize {
        self.registry.borrow().count(target)
    }

    /// Forget every lock without touching styles.
    ///
    /// Outstanding [`SelectionLock`]s become no-ops.
    pub fn reset(&self) {
        let mut registry = self.registry.borrow_mut();
        registry.document = None;
        registry.elements.clear();
    }
}

/// A held text-selection lock.
pub struct SelectionLock<H: SelectionHost + ?Sized> {
    host: Rc<H>,
    registry: TextSelection,
    target: SelectionTarget,
}

impl<H: SelectionHost + ?Sized> SelectionLock<H> {
    /// Where this lock is applied.
    pub fn target(&self) -> SelectionTarget {
        self.target
    }

    /// Release the lock now.
    pub fn release(self) {
        drop(self);
    }
}

impl<H: SelectionHost + ?Sized> Drop for SelectionLock<H> {
    fn drop(&mut self) {
        self.registry
            .registry
            .borrow_mut()
            .release(&*self.host, self.target);
    }
}

impl<H: SelectionHost + ?Sized> fmt::Debug for SelectionLock<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionLock")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

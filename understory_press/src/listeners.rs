// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of document- and window-level listeners.
//!
//! A press that starts on an element keeps listening on the document (and for
//! touch, on the window) until it ends, because the release may happen
//! anywhere. Every such listener lives in a [`GlobalListeners`] registry so it
//! can be removed in bulk when the press completes, is cancelled, or the
//! engine is torn down.
//!
//! The registry is generic over the handler payload; the press engine stores
//! a small enum naming which of its handlers to run.
//!
//! ```
//! use understory_press::listeners::{GlobalListeners, GlobalTarget};
//! use understory_press::EventKind;
//!
//! let mut listeners = GlobalListeners::new();
//! let id = listeners.add(GlobalTarget::Document, EventKind::PointerUp, "up", false);
//! listeners.add(GlobalTarget::Window, EventKind::Scroll, "scroll", true);
//!
//! let hits: Vec<_> = listeners.matching(EventKind::PointerUp, false).collect();
//! assert_eq!(hits, vec![(id, "up")]);
//!
//! assert_eq!(listeners.remove_all(), 2);
//! assert!(listeners.is_empty());
//! ```

use smallvec::SmallVec;

use crate::native::EventKind;

/// Global object a listener is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GlobalTarget {
    /// The document.
    Document,
    /// The window.
    Window,
}

/// Handle to a registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// One registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GlobalListener<H> {
    /// Handle returned by [`GlobalListeners::add`].
    pub id: ListenerId,
    /// Where the listener is attached.
    pub target: GlobalTarget,
    /// Event kind listened for.
    pub kind: EventKind,
    /// Whether the listener runs in the capture phase.
    pub capture: bool,
    /// Handler payload.
    pub handler: H,
}

/// Handle-based registry of global listeners.
#[derive(Clone, Debug)]
pub struct GlobalListeners<H> {
    entries: SmallVec<[GlobalListener<H>; 4]>,
    next_id: u32,
}

impl<H> Default for GlobalListeners<H> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 0,
        }
    }
}

impl<H: Copy> GlobalListeners<H> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return its handle.
    pub fn add(
        &mut self,
        target: GlobalTarget,
        kind: EventKind,
        handler: H,
        capture: bool,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(GlobalListener {
            id,
            target,
            kind,
            capture,
            handler,
        });
        id
    }

    /// Remove one listener; returns whether it was registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.id != id);
        self.entries.len() != before
    }

    /// Remove every listener, returning how many were removed.
    pub fn remove_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// Whether `id` is still registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|l| l.id == id)
    }

    /// Listeners for `kind` in the given phase, in registration order.
    pub fn matching(
        &self,
        kind: EventKind,
        capture: bool,
    ) -> impl Iterator<Item = (ListenerId, H)> + '_ {
        self.entries
            .iter()
            .filter(move |l| l.kind == kind && l.capture == capture)
            .map(|l| (l.id, l.handler))
    }

    /// All registered listeners.
    pub fn iter(&self) -> impl Iterator<Item = &GlobalListener<H>> + '_ {
        self.entries.iter()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

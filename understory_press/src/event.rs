// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press events and propagation control.
//!
//! A [`PressEvent`] is an immutable value. Whether the underlying native event
//! keeps propagating is decided separately, through a [`Propagation`] cell that
//! starts out as "stop" and that a callback or host listener may flip with
//! [`Propagation::continue_propagation`]. The engine reads every cell after the
//! callback and the host dispatch have run, and stops the native event only
//! when all of them still say stop.
//!
//! ## Minimal example
//!
//! ```
//! use understory_press::event::{PressContext, PressEvent, PressEventType};
//! use understory_press::{ElementId, Modifiers, PointerType};
//!
//! let event = PressEvent {
//!     kind: PressEventType::PressStart,
//!     pointer_type: PointerType::Mouse,
//!     target: ElementId(1),
//!     modifiers: Modifiers::SHIFT,
//! };
//! assert!(event.shift_key());
//!
//! let mut queue = std::collections::VecDeque::new();
//! let mut cx = PressContext::new(&mut queue);
//! assert!(cx.propagation().should_stop());
//! cx.continue_propagation();
//! assert!(!cx.propagation().should_stop());
//! ```

use alloc::collections::VecDeque;
use core::fmt;

use crate::host::ElementId;
use crate::native::{Modifiers, NativeEvent, PointerType};

/// Lifecycle point of a [`PressEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PressEventType {
    /// The press started, or the pointer re-entered the target.
    PressStart,
    /// The press ended, was cancelled, or the pointer left the target.
    PressEnd,
    /// The pointer or key was released over the target.
    PressUp,
    /// The press completed over the target.
    Press,
}

impl PressEventType {
    /// Name of the custom event dispatched on the host element.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PressStart => "pressstart",
            Self::PressEnd => "pressend",
            Self::PressUp => "pressup",
            Self::Press => "press",
        }
    }
}

impl fmt::Display for PressEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized press event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PressEvent {
    /// Lifecycle point.
    pub kind: PressEventType,
    /// Modality the press is attributed to.
    pub pointer_type: PointerType,
    /// The pressed element.
    pub target: ElementId,
    /// Modifier keys held by the originating native event.
    pub modifiers: Modifiers,
}

impl PressEvent {
    /// Shift was held.
    pub fn shift_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Control was held.
    pub fn ctrl_key(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Meta was held.
    pub fn meta_key(&self) -> bool {
        self.modifiers.contains(Modifiers::META)
    }

    /// Alt was held.
    pub fn alt_key(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }
}

/// Propagation decision for one callback or listener invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Propagation {
    stop: bool,
}

impl Default for Propagation {
    fn default() -> Self {
        Self { stop: true }
    }
}

impl Propagation {
    /// Let the native event keep propagating to ancestors.
    pub fn continue_propagation(&mut self) {
        self.stop = false;
    }

    /// Whether the native event should be stopped.
    pub fn should_stop(&self) -> bool {
        self.stop
    }
}

/// What a press callback receives besides the event.
///
/// Callbacks cannot call back into the engine that invoked them. Native
/// events they need the engine to see (for example a `pointercancel` that
/// pre-empts the press) go through [`PressContext::dispatch`]; the engine
/// processes them before its current dispatch returns.
pub struct PressContext<'a> {
    propagation: Propagation,
    queue: &'a mut VecDeque<NativeEvent>,
}

impl fmt::Debug for PressContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressContext")
            .field("propagation", &self.propagation)
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl<'a> PressContext<'a> {
    /// A context with a fresh propagation decision that queues into `queue`.
    pub fn new(queue: &'a mut VecDeque<NativeEvent>) -> Self {
        Self {
            propagation: Propagation::default(),
            queue,
        }
    }

    /// Let the native event keep propagating to ancestors.
    pub fn continue_propagation(&mut self) {
        self.propagation.continue_propagation();
    }

    /// The current propagation decision.
    pub fn propagation(&self) -> Propagation {
        self.propagation
    }

    /// Queue a native event for the engine that invoked this callback.
    pub fn dispatch(&mut self, event: NativeEvent) {
        self.queue.push_back(event);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard adapter.
//!
//! Enter and Space press an element the same way a pointer does. Which key is
//! valid depends on the element: text inputs handle both keys themselves,
//! checkboxes and radios only toggle on Space, and links only follow on Enter.
//!
//! On macOS, keys released while Meta is held never produce a `keyup`. The
//! adapter records every keydown seen while Meta is down and, when Meta is
//! released, dispatches the missing keyups itself so no press stays stuck.

use smallvec::SmallVec;

use crate::engine::{GlobalHandler, PressEngine};
use crate::host::{ElementId, ElementInfo, ElementKind, Host, Role};
use crate::native::{EventEffects, EventKind, KeyboardEvent, Modifiers, NativeEvent, PointerType};

/// Whether `event` may press an element described by `info`.
pub fn is_valid_keyboard_event(event: &KeyboardEvent, info: &ElementInfo) -> bool {
    let enter = event.is_enter();
    let space = event.is_space();
    if !enter && !space {
        return false;
    }
    match info.kind {
        ElementKind::TextInput => false,
        ElementKind::Checkable if !space => false,
        _ => match info.role {
            Some(Role::Link) => enter,
            None if info.kind == ElementKind::Anchor => enter,
            _ => true,
        },
    }
}

/// Whether the platform default of an activation key on `target` must be
/// prevented.
pub fn should_prevent_default_keyboard(event: &KeyboardEvent, target: &ElementInfo) -> bool {
    match target.kind {
        ElementKind::TextInput => true,
        ElementKind::Checkable => !event.is_space(),
        ElementKind::Button { native_activation } => !native_activation,
        ElementKind::Anchor => false,
        ElementKind::Other => true,
    }
}

impl<H: Host + ?Sized> PressEngine<H> {
    pub(crate) fn on_key_down(
        &mut self,
        element: ElementId,
        event: &KeyboardEvent,
    ) -> EventEffects {
        let mut effects = EventEffects::empty();
        if is_valid_keyboard_event(event, &self.host.element_info(element)) {
            if should_prevent_default_keyboard(event, &self.host.element_info(event.target)) {
                effects |= EventEffects::PREVENT_DEFAULT;
            }
            let mut stop = true;
            if !self.state.is_pressed && !event.repeat {
                self.begin_press(element, PointerType::Keyboard, None);
                stop = self.trigger_start(event.modifiers, PointerType::Keyboard);
                self.listen_document(EventKind::KeyUp, GlobalHandler::KeyUp);
            }
            if stop {
                effects |= EventEffects::STOP_PROPAGATION;
            }
        }

        if self.platform.mac {
            if event.key == "Meta" {
                if self.state.meta_key_events.is_none() {
                    self.state.meta_key_events = Some(SmallVec::new());
                }
            } else if event.modifiers.contains(Modifiers::META) {
                let recorded = self.state.meta_key_events.get_or_insert_default();
                recorded.retain(|e| e.key != event.key);
                recorded.push(event.clone());
            }
        }
        effects
    }

    pub(crate) fn on_key_up(&mut self, element: ElementId, event: &KeyboardEvent) -> EventEffects {
        if is_valid_keyboard_event(event, &self.host.element_info(element))
            && !event.repeat
            && self.state.target.is_some()
        {
            self.trigger_up(event.modifiers, PointerType::Keyboard);
        }
        self.settle_meta_key(event);
        EventEffects::empty()
    }

    pub(crate) fn on_global_key_up(&mut self, event: &KeyboardEvent) -> EventEffects {
        let Some(target) = self.state.target else {
            return EventEffects::empty();
        };
        let info = self.host.element_info(target);
        if !self.state.is_pressed || !is_valid_keyboard_event(event, &info) {
            self.settle_meta_key(event);
            return EventEffects::empty();
        }

        let mut effects = EventEffects::empty();
        if should_prevent_default_keyboard(event, &self.host.element_info(event.target)) {
            effects |= EventEffects::PREVENT_DEFAULT;
        }
        let inside = self.host.contains(target, event.target);
        self.trigger_end(event.modifiers, PointerType::Keyboard, inside);
        self.finish_press();

        // Space on a link-like element does not follow the link natively.
        if inside && !event.is_enter() && info.is_link() && !event.link_opened.get() {
            event.link_opened.set(true);
            tracing::debug!(?target, "opening link for space activation");
            self.host.open_link(target, event.modifiers);
        }
        self.settle_meta_key(event);
        effects
    }

    /// Forget a released key, or replay the keyups Meta swallowed.
    fn settle_meta_key(&mut self, event: &KeyboardEvent) {
        if event.key != "Meta" {
            if let Some(recorded) = self.state.meta_key_events.as_mut() {
                recorded.retain(|e| e.key != event.key);
            }
            return;
        }
        let Some(recorded) = self.state.meta_key_events.take() else {
            return;
        };
        for keydown in recorded {
            tracing::debug!(key = %keydown.key, "replaying keyup lost to meta");
            let keyup = NativeEvent::KeyUp(KeyboardEvent {
                repeat: false,
                ..keydown
            });
            self.host.dispatch_synthetic(&keyup);
            self.route(&keyup);
        }
    }
}

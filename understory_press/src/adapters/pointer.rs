// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unified pointer-event adapter.

use crate::engine::{GlobalHandler, PressEngine};
use crate::hit::{ContactPoint, is_over_target};
use crate::host::{ElementId, Host};
use crate::native::{EventEffects, EventKind, MouseEvent, PointerEvent, PointerType};
use crate::scoped::focus_without_scrolling;

impl<H: Host + ?Sized> PressEngine<H> {
    pub(crate) fn on_pointer_down(
        &mut self,
        element: ElementId,
        event: &PointerEvent,
    ) -> EventEffects {
        if event.button != 0 {
            return EventEffects::empty();
        }
        // Screen readers follow a virtual pointerdown with a click; the click
        // adapter fires the whole press then.
        if event.is_virtual(&self.platform) {
            self.state.pointer_type = Some(PointerType::Virtual);
            return EventEffects::empty();
        }

        let mut effects = EventEffects::empty();
        let info = self.host.element_info(element);
        if info.prevents_default_on_pointer_down() {
            effects |= EventEffects::PREVENT_DEFAULT;
        }
        if self.state.is_pressed {
            tracing::trace!(pointer_id = event.pointer_id, "ignoring second pointer");
            return effects | EventEffects::STOP_PROPAGATION;
        }

        let pointer_id = i64::from(event.pointer_id);
        self.begin_press(element, event.pointer_type, Some(pointer_id));
        if !self.config.is_disabled && !self.config.prevent_focus_on_press {
            focus_without_scrolling(&*self.host, element, &self.platform);
        }
        self.acquire_selection(element);
        let stop = self.trigger_start(event.modifiers, event.pointer_type);

        self.listen_document(EventKind::PointerMove, GlobalHandler::PointerMove);
        self.listen_document(EventKind::PointerUp, GlobalHandler::PointerUp);
        self.listen_document(EventKind::PointerCancel, GlobalHandler::PointerCancel);

        if stop {
            effects |= EventEffects::STOP_PROPAGATION;
        }
        effects
    }

    /// The compatibility `mousedown` that follows `pointerdown`.
    pub(crate) fn on_pointer_mode_mouse_down(
        &mut self,
        element: ElementId,
        event: &MouseEvent,
    ) -> EventEffects {
        if event.button != 0 {
            return EventEffects::empty();
        }
        // Keeps focus from moving on mousedown when the element isn't draggable.
        let mut effects = EventEffects::STOP_PROPAGATION;
        let info = self.host.element_info(element);
        if info.prevents_default_on_pointer_down() {
            effects |= EventEffects::PREVENT_DEFAULT;
        }
        effects
    }

    pub(crate) fn on_pointer_up(
        &mut self,
        element: ElementId,
        event: &PointerEvent,
    ) -> EventEffects {
        // A virtual pointerup is followed by its click.
        if self.state.pointer_type == Some(PointerType::Virtual) {
            return EventEffects::empty();
        }
        if event.button == 0 && is_over_target(&*self.host, &ContactPoint::from(event), element) {
            let pointer_type = self.state.pointer_type.unwrap_or(event.pointer_type);
            self.trigger_up(event.modifiers, pointer_type);
        }
        EventEffects::empty()
    }

    pub(crate) fn on_global_pointer_move(&mut self, event: &PointerEvent) {
        if self.state.active_pointer_id != Some(i64::from(event.pointer_id)) {
            return;
        }
        let Some(target) = self.state.target else {
            return;
        };
        let pointer_type = self.pointer_type();
        if is_over_target(&*self.host, &ContactPoint::from(event), target) {
            if !self.state.is_over_target {
                self.state.is_over_target = true;
                self.trigger_start(event.modifiers, pointer_type);
            }
        } else if self.state.is_over_target {
            self.state.is_over_target = false;
            self.trigger_end(event.modifiers, pointer_type, false);
            if self.config.should_cancel_on_pointer_exit {
                self.cancel_press(event.modifiers);
            }
        }
    }

    pub(crate) fn on_global_pointer_up(&mut self, event: &PointerEvent) {
        if self.state.active_pointer_id != Some(i64::from(event.pointer_id))
            || !self.state.is_pressed
            || event.button != 0
        {
            return;
        }
        let Some(target) = self.state.target else {
            return;
        };
        let pointer_type = self.pointer_type();
        if is_over_target(&*self.host, &ContactPoint::from(event), target) {
            self.trigger_end(event.modifiers, pointer_type, true);
        } else if self.state.is_over_target {
            self.trigger_end(event.modifiers, pointer_type, false);
        }
        self.finish_press();
    }
}

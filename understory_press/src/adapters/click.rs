// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click adapter.
//!
//! Physical presses are handled by the pointing adapters; the click that
//! trails them is swallowed. A click without a preceding press (screen
//! readers, `element.click()`) is turned into a complete virtual press.

use crate::engine::PressEngine;
use crate::host::{ElementId, Host};
use crate::native::{EventEffects, MouseEvent, PointerType};
use crate::scoped::focus_without_scrolling;

impl<H: Host + ?Sized> PressEngine<H> {
    pub(crate) fn on_click(&mut self, element: ElementId, event: &MouseEvent) -> EventEffects {
        if event.button != 0 || self.state.is_triggering_event {
            return EventEffects::empty();
        }
        let mut effects = EventEffects::empty();
        if self.config.is_disabled {
            effects |= EventEffects::PREVENT_DEFAULT;
        }

        let mut stop = true;
        if !self.state.ignore_click_after_press
            && !self.state.ignore_emulated_mouse_events
            && !self.state.is_pressed
            && (self.state.pointer_type == Some(PointerType::Virtual)
                || event.is_virtual_click(&self.platform))
        {
            if !self.config.is_disabled && !self.config.prevent_focus_on_press {
                focus_without_scrolling(&*self.host, element, &self.platform);
            }
            tracing::debug!(?element, "virtual click");
            self.state.target = Some(element);
            let modifiers = event.modifiers;
            let started = self.trigger_start(modifiers, PointerType::Virtual);
            let released = self.trigger_up(modifiers, PointerType::Virtual);
            let ended = self.trigger_end(modifiers, PointerType::Virtual, true);
            stop = started && released && ended;
        }

        self.state.ignore_emulated_mouse_events = false;
        self.state.ignore_click_after_press = false;
        if !self.state.is_pressed {
            self.state.pointer_type = None;
        }
        if stop {
            effects |= EventEffects::STOP_PROPAGATION;
        }
        effects
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse and touch adapter, for platforms without pointer events.
//!
//! After a touch that ends over the element the browser emulates
//! `mousedown`/`mouseup`/`click` for compatibility.
//! `ignore_emulated_mouse_events` swallows those until the document `mouseup`
//! or the trailing click resets it.

use crate::engine::{GlobalHandler, PressEngine};
use crate::hit::{ContactPoint, is_over_target};
use crate::host::{ElementId, Host};
use crate::listeners::GlobalTarget;
use crate::native::{EventEffects, EventKind, Modifiers, MouseEvent, PointerType, TouchEvent};
use crate::scoped::focus_without_scrolling;

fn stop_if(stop: bool) -> EventEffects {
    if stop {
        EventEffects::STOP_PROPAGATION
    } else {
        EventEffects::empty()
    }
}

impl<H: Host + ?Sized> PressEngine<H> {
    pub(crate) fn on_mouse_down(&mut self, element: ElementId, event: &MouseEvent) -> EventEffects {
        if event.button != 0 {
            return EventEffects::empty();
        }
        let mut effects = EventEffects::empty();
        let info = self.host.element_info(element);
        if info.prevents_default_on_pointer_down() {
            effects |= EventEffects::PREVENT_DEFAULT;
        }
        if self.state.is_pressed {
            return effects | EventEffects::STOP_PROPAGATION;
        }
        if self.state.ignore_emulated_mouse_events {
            // The emulated `mouseup` reaching the document clears the guard.
            self.listen_document(EventKind::MouseUp, GlobalHandler::MouseUp);
            return effects | EventEffects::STOP_PROPAGATION;
        }

        let pointer_type = if event.is_virtual_click(&self.platform) {
            PointerType::Virtual
        } else {
            PointerType::Mouse
        };
        self.begin_press(element, pointer_type, None);
        if !self.config.is_disabled && !self.config.prevent_focus_on_press {
            focus_without_scrolling(&*self.host, element, &self.platform);
        }
        self.acquire_selection(element);
        let stop = self.trigger_start(event.modifiers, pointer_type);
        self.listen_document(EventKind::MouseUp, GlobalHandler::MouseUp);
        effects | stop_if(stop)
    }

    pub(crate) fn on_mouse_enter(&mut self, event: &MouseEvent) -> EventEffects {
        let mut stop = true;
        if self.state.is_pressed && !self.state.ignore_emulated_mouse_events {
            self.state.is_over_target = true;
            stop = self.trigger_start(event.modifiers, self.pointer_type());
        }
        stop_if(stop)
    }

    pub(crate) fn on_mouse_leave(&mut self, event: &MouseEvent) -> EventEffects {
        let mut stop = true;
        if self.state.is_pressed && !self.state.ignore_emulated_mouse_events {
            self.state.is_over_target = false;
            stop = self.trigger_end(event.modifiers, self.pointer_type(), false);
            if self.config.should_cancel_on_pointer_exit {
                self.cancel_press(event.modifiers);
            }
        }
        stop_if(stop)
    }

    pub(crate) fn on_mouse_up(&mut self, event: &MouseEvent) -> EventEffects {
        if !self.state.ignore_emulated_mouse_events && event.button == 0 {
            self.trigger_up(event.modifiers, self.pointer_type());
        }
        EventEffects::empty()
    }

    pub(crate) fn on_global_mouse_up(&mut self, event: &MouseEvent) {
        if event.button != 0 {
            return;
        }
        let pointer_type = self.pointer_type();
        let target = self.state.target;
        let was_over_target = self.state.is_over_target;
        self.finish_press();

        if self.state.ignore_emulated_mouse_events {
            self.state.ignore_emulated_mouse_events = false;
            return;
        }
        let Some(target) = target else {
            return;
        };
        if is_over_target(&*self.host, &ContactPoint::from(event), target) {
            self.trigger_end(event.modifiers, pointer_type, true);
        } else if was_over_target {
            self.trigger_end(event.modifiers, pointer_type, false);
        }
    }

    pub(crate) fn on_touch_start(
        &mut self,
        element: ElementId,
        event: &TouchEvent,
    ) -> EventEffects {
        let Some(touch) = event.first_target_touch() else {
            return EventEffects::STOP_PROPAGATION;
        };
        if self.state.is_pressed {
            tracing::trace!(identifier = touch.identifier, "ignoring second touch");
            return EventEffects::STOP_PROPAGATION;
        }

        // Mouse events the browser emulates for this touch must be ignored.
        self.state.ignore_emulated_mouse_events = true;
        self.begin_press(element, PointerType::Touch, Some(touch.identifier));
        if !self.config.is_disabled && !self.config.prevent_focus_on_press {
            focus_without_scrolling(&*self.host, element, &self.platform);
        }
        self.acquire_selection(element);
        let stop = self.trigger_start(event.modifiers, PointerType::Touch);
        self.listen(
            GlobalTarget::Window,
            EventKind::Scroll,
            GlobalHandler::Scroll,
            true,
        );
        stop_if(stop)
    }

    pub(crate) fn on_touch_move(&mut self, element: ElementId, event: &TouchEvent) -> EventEffects {
        if !self.state.is_pressed {
            return EventEffects::STOP_PROPAGATION;
        }
        // Changes to other fingers are ignored.
        let active = self.state.active_pointer_id;
        let Some(touch) = active.and_then(|id| event.changed_touch(id)) else {
            return EventEffects::STOP_PROPAGATION;
        };
        let mut stop = true;
        if is_over_target(&*self.host, &ContactPoint::from(touch), element) {
            if !self.state.is_over_target {
                self.state.is_over_target = true;
                stop = self.trigger_start(event.modifiers, PointerType::Touch);
            }
        } else if self.state.is_over_target {
            self.state.is_over_target = false;
            stop = self.trigger_end(event.modifiers, PointerType::Touch, false);
            if self.config.should_cancel_on_pointer_exit {
                self.cancel_press(event.modifiers);
            }
        }
        stop_if(stop)
    }

    pub(crate) fn on_touch_end(&mut self, element: ElementId, event: &TouchEvent) -> EventEffects {
        if !self.state.is_pressed {
            return EventEffects::STOP_PROPAGATION;
        }
        let active = self.state.active_pointer_id;
        let Some(touch) = active.and_then(|id| event.changed_touch(id)) else {
            return EventEffects::STOP_PROPAGATION;
        };
        let mut stop = true;
        let over = is_over_target(&*self.host, &ContactPoint::from(touch), element);
        if over {
            self.trigger_up(event.modifiers, PointerType::Touch);
            stop = self.trigger_end(event.modifiers, PointerType::Touch, true);
        } else if self.state.is_over_target {
            stop = self.trigger_end(event.modifiers, PointerType::Touch, false);
        }
        self.finish_press();
        // Browsers only emulate mouse events for a touch released over the element.
        self.state.ignore_emulated_mouse_events = over;
        stop_if(stop)
    }

    pub(crate) fn on_touch_cancel(&mut self, event: &TouchEvent) -> EventEffects {
        if self.state.is_pressed {
            self.cancel_touch(event.modifiers);
        }
        EventEffects::STOP_PROPAGATION
    }

    /// A scroll that moves the pressed element cancels a touch press.
    pub(crate) fn on_global_scroll(&mut self, container: ElementId) {
        let Some(target) = self.state.target else {
            return;
        };
        if self.state.is_pressed && self.host.contains(container, target) {
            self.cancel_touch(Modifiers::empty());
        }
    }

    /// Cancelled touches are not followed by emulated mouse events.
    fn cancel_touch(&mut self, modifiers: Modifiers) {
        self.cancel_press(modifiers);
        self.state.ignore_emulated_mouse_events = false;
    }
}

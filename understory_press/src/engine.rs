// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The press state machine.
//!
//! ## Usage
//!
//! 1) Build an [`Interactions`] context once per document: it owns the host
//!    handle, the probed [`Platform`] and the shared [`TextSelection`] registry.
//! 2) Create one [`PressEngine`] per pressable element and
//!    [`attach`](PressEngine::attach) it.
//! 3) Forward every native event to [`PressEngine::dispatch`] and apply the
//!    returned [`EventEffects`] to the native event.
//! 4) [`detach`](PressEngine::detach) when the element goes away.
//!
//! ## Routing
//!
//! `dispatch` mimics DOM propagation for the listeners the engine owns:
//! window/document capture listeners first, then the element listeners of the
//! active adapter set (only when the event target is inside the bound
//! element), then document/window bubble listeners unless an element listener
//! stopped propagation. Global listeners removed by an earlier listener of the
//! same dispatch do not run.
//!
//! ## Re-entrancy
//!
//! Callbacks may queue native events through
//! [`PressContext::dispatch`](crate::event::PressContext::dispatch). They are
//! routed, first in first out, after the current event and before `dispatch`
//! returns. While a queued event is routed the engine counts as "triggering",
//! so queued `click`s are ignored. At most [`MAX_NESTED_DISPATCH`] queued
//! events are processed per outer dispatch.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::fmt;

use smallvec::SmallVec;

use crate::config::PressConfig;
use crate::error::BindError;
use crate::event::{PressContext, PressEvent, PressEventType, Propagation};
use crate::host::{ElementId, Host};
use crate::listeners::{GlobalListeners, GlobalTarget, ListenerId};
use crate::native::{EventEffects, EventKind, KeyboardEvent, Modifiers, NativeEvent, PointerType};
use crate::platform::{CapabilityProbe, Platform};
use crate::scoped::{SelectionLock, TextSelection};

/// Upper bound on callback-queued events routed per outer dispatch.
pub const MAX_NESTED_DISPATCH: usize = 32;

/// Element listeners wired when unified pointer events are available.
const POINTER_MODE_EVENTS: &[EventKind] = &[
    EventKind::PointerDown,
    EventKind::PointerUp,
    EventKind::MouseDown,
    EventKind::DragStart,
    EventKind::KeyDown,
    EventKind::KeyUp,
    EventKind::Click,
];

/// Element listeners wired on platforms without pointer events.
const FALLBACK_MODE_EVENTS: &[EventKind] = &[
    EventKind::MouseDown,
    EventKind::MouseEnter,
    EventKind::MouseLeave,
    EventKind::MouseUp,
    EventKind::TouchStart,
    EventKind::TouchMove,
    EventKind::TouchEnd,
    EventKind::TouchCancel,
    EventKind::DragStart,
    EventKind::KeyDown,
    EventKind::KeyUp,
    EventKind::Click,
];

/// Which adapter set handles pointing input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Unified pointer events.
    Pointer,
    /// Separate mouse and touch events.
    MouseTouch,
}

/// Handlers the engine installs on the document or window during a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlobalHandler {
    /// Hit-test the active pointer.
    PointerMove,
    /// End a pointer press.
    PointerUp,
    /// Cancel a pointer press.
    PointerCancel,
    /// End a mouse press.
    MouseUp,
    /// End a keyboard press.
    KeyUp,
    /// Cancel a touch press when its container scrolls.
    Scroll,
}

/// Per-element interaction state.
#[derive(Clone, Debug, Default)]
pub struct PressState {
    /// A press is in progress.
    pub is_pressed: bool,
    /// Pointer id or touch identifier owning the press.
    pub active_pointer_id: Option<i64>,
    /// Element the current (or last) press targeted.
    pub target: Option<ElementId>,
    /// The active contact is over the target.
    pub is_over_target: bool,
    /// Modality of the current press; set whenever `is_pressed` is.
    pub pointer_type: Option<PointerType>,
    /// A `pressstart` has fired without its `pressend`.
    pub did_fire_press_start: bool,
    /// Swallow the mouse events browsers emulate after a touch.
    pub ignore_emulated_mouse_events: bool,
    /// Swallow the click that trails a completed press.
    pub ignore_click_after_press: bool,
    /// A press event is being triggered, or its queued fallout routed.
    pub is_triggering_event: bool,
    /// Keydowns seen while Meta was held (macOS), in arrival order.
    pub meta_key_events: Option<SmallVec<[KeyboardEvent; 2]>>,
}

/// Shared context for every press engine of one document.
pub struct Interactions<H: Host + ?Sized> {
    host: Rc<H>,
    platform: Platform,
    selection: TextSelection,
}

impl<H: Host + ?Sized> Clone for Interactions<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
            platform: self.platform,
            selection: self.selection.clone(),
        }
    }
}

impl<H: Host + ?Sized> fmt::Debug for Interactions<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactions")
            .field("platform", &self.platform)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl<H: Host + ?Sized> Interactions<H> {
    /// Probe the platform and create a context.
    pub fn new(host: Rc<H>, probe: &(impl CapabilityProbe + ?Sized)) -> Self {
        Self::with_platform(host, Platform::detect(probe))
    }

    /// Create a context from an already known platform.
    pub fn with_platform(host: Rc<H>, platform: Platform) -> Self {
        Self {
            host,
            platform,
            selection: TextSelection::new(platform.ios),
        }
    }

    /// The host handle.
    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// The platform snapshot.
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// The shared text-selection registry.
    pub fn selection(&self) -> &TextSelection {
        &self.selection
    }

    /// Create an unbound press engine.
    pub fn press(&self, config: PressConfig) -> PressEngine<H> {
        PressEngine::new(self, config)
    }
}

/// Press state machine bound to one element.
pub struct PressEngine<H: Host + ?Sized> {
    pub(crate) host: Rc<H>,
    pub(crate) platform: Platform,
    selection: TextSelection,
    pub(crate) config: PressConfig,
    pub(crate) element: Option<ElementId>,
    pub(crate) state: PressState,
    pressed: bool,
    selection_lock: Option<SelectionLock<H>>,
    listeners: GlobalListeners<GlobalHandler>,
    pending: VecDeque<NativeEvent>,
}

impl<H: Host + ?Sized> fmt::Debug for PressEngine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressEngine")
            .field("element", &self.element)
            .field("mode", &self.mode())
            .field("pressed", &self.pressed)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("listeners", &self.listeners)
            .field("selection_lock", &self.selection_lock)
            .finish_non_exhaustive()
    }
}

impl<H: Host + ?Sized> PressEngine<H> {
    /// Create an unbound engine.
    pub fn new(interactions: &Interactions<H>, config: PressConfig) -> Self {
        Self {
            host: Rc::clone(&interactions.host),
            platform: interactions.platform,
            selection: interactions.selection.clone(),
            config,
            element: None,
            state: PressState::default(),
            pressed: false,
            selection_lock: None,
            listeners: GlobalListeners::new(),
            pending: VecDeque::new(),
        }
    }

    /// Bind the engine to `element`.
    ///
    /// Binding the element the engine is already bound to is a no-op.
    pub fn attach(&mut self, element: ElementId) -> Result<(), BindError> {
        match self.element {
            Some(current) if current == element => Ok(()),
            Some(current) => Err(BindError::AlreadyBound {
                current,
                requested: element,
            }),
            None => {
                tracing::debug!(?element, mode = ?self.mode(), "press engine attached");
                self.element = Some(element);
                Ok(())
            }
        }
    }

    /// Unbind the engine, releasing every scoped resource.
    ///
    /// A press in progress is dropped without emitting events. Calling this
    /// on an unbound engine does nothing.
    pub fn detach(&mut self) {
        let Some(element) = self.element.take() else {
            return;
        };
        let listeners = self.listeners.remove_all();
        let held_lock = self.selection_lock.take().is_some();
        tracing::debug!(
            ?element,
            mid_press = self.state.is_pressed,
            listeners,
            held_lock,
            "press engine detached"
        );
        self.state = PressState::default();
        self.pressed = false;
        self.pending.clear();
    }

    /// The bound element.
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Adapter set in use on this platform.
    pub fn mode(&self) -> InputMode {
        if self.platform.pointer_events {
            InputMode::Pointer
        } else {
            InputMode::MouseTouch
        }
    }

    /// Element-level events the active adapter set listens to.
    pub fn listened_events(&self) -> &'static [EventKind] {
        match self.mode() {
            InputMode::Pointer => POINTER_MODE_EVENTS,
            InputMode::MouseTouch => FALLBACK_MODE_EVENTS,
        }
    }

    /// Document and window listeners currently installed.
    pub fn global_listeners(&self) -> &GlobalListeners<GlobalHandler> {
        &self.listeners
    }

    /// Whether the element should render as pressed.
    pub fn is_pressed(&self) -> bool {
        self.config.is_pressed || self.pressed
    }

    /// Interaction state, for inspection.
    pub fn state(&self) -> &PressState {
        &self.state
    }

    /// Whether a text-selection lock is held.
    pub fn holds_selection_lock(&self) -> bool {
        self.selection_lock.is_some()
    }

    /// The configuration.
    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    /// Change the configuration.
    ///
    /// Allowing text selection mid-press releases the held lock right away.
    pub fn update_config(&mut self, f: impl FnOnce(&mut PressConfig)) {
        f(&mut self.config);
        if self.config.allow_text_selection_on_press {
            self.release_selection();
        }
    }

    /// Cancel the current press, if any.
    ///
    /// Fires a non-completing `pressend` carrying `modifiers` when a start is
    /// pending.
    pub fn cancel(&mut self, modifiers: Modifiers) {
        self.cancel_press(modifiers);
        self.drain_pending();
    }

    /// Route a native event through the engine's listeners.
    pub fn dispatch(&mut self, event: &NativeEvent) -> EventEffects {
        let effects = self.route(event);
        self.drain_pending();
        effects
    }

    pub(crate) fn route(&mut self, event: &NativeEvent) -> EventEffects {
        let Some(element) = self.element else {
            return EventEffects::empty();
        };
        let mut effects = self.run_global(event, true);
        if self.listened_events().contains(&event.kind())
            && self.host.contains(element, event.target())
        {
            effects |= self.handle_element_event(element, event);
        }
        if !effects.contains(EventEffects::STOP_PROPAGATION) {
            effects |= self.run_global(event, false);
        }
        effects
    }

    fn run_global(&mut self, event: &NativeEvent, capture: bool) -> EventEffects {
        let matched: SmallVec<[(ListenerId, GlobalHandler); 4]> =
            self.listeners.matching(event.kind(), capture).collect();
        let mut effects = EventEffects::empty();
        for (id, handler) in matched {
            if self.listeners.contains(id) {
                effects |= self.handle_global_event(handler, event);
            }
        }
        effects
    }

    fn handle_element_event(&mut self, element: ElementId, event: &NativeEvent) -> EventEffects {
        match (self.mode(), event) {
            (InputMode::Pointer, NativeEvent::PointerDown(e)) => self.on_pointer_down(element, e),
            (InputMode::Pointer, NativeEvent::PointerUp(e)) => self.on_pointer_up(element, e),
            (InputMode::Pointer, NativeEvent::MouseDown(e)) => {
                self.on_pointer_mode_mouse_down(element, e)
            }
            (InputMode::MouseTouch, NativeEvent::MouseDown(e)) => self.on_mouse_down(element, e),
            (InputMode::MouseTouch, NativeEvent::MouseEnter(e)) => self.on_mouse_enter(e),
            (InputMode::MouseTouch, NativeEvent::MouseLeave(e)) => self.on_mouse_leave(e),
            (InputMode::MouseTouch, NativeEvent::MouseUp(e)) => self.on_mouse_up(e),
            (InputMode::MouseTouch, NativeEvent::TouchStart(e)) => self.on_touch_start(element, e),
            (InputMode::MouseTouch, NativeEvent::TouchMove(e)) => self.on_touch_move(element, e),
            (InputMode::MouseTouch, NativeEvent::TouchEnd(e)) => self.on_touch_end(element, e),
            (InputMode::MouseTouch, NativeEvent::TouchCancel(e)) => self.on_touch_cancel(e),
            (_, NativeEvent::DragStart(_)) => {
                self.cancel_press(Modifiers::empty());
                EventEffects::empty()
            }
            (_, NativeEvent::KeyDown(e)) => self.on_key_down(element, e),
            (_, NativeEvent::KeyUp(e)) => self.on_key_up(element, e),
            (_, NativeEvent::Click(e)) => self.on_click(element, e),
            _ => EventEffects::empty(),
        }
    }

    fn handle_global_event(&mut self, handler: GlobalHandler, event: &NativeEvent) -> EventEffects {
        match (handler, event) {
            (GlobalHandler::PointerMove, NativeEvent::PointerMove(e)) => {
                self.on_global_pointer_move(e);
            }
            (GlobalHandler::PointerUp, NativeEvent::PointerUp(e)) => self.on_global_pointer_up(e),
            (GlobalHandler::PointerCancel, NativeEvent::PointerCancel(e)) => {
                self.cancel_press(e.modifiers);
            }
            (GlobalHandler::MouseUp, NativeEvent::MouseUp(e)) => self.on_global_mouse_up(e),
            (GlobalHandler::KeyUp, NativeEvent::KeyUp(e)) => {
                return self.on_global_key_up(e);
            }
            (GlobalHandler::Scroll, NativeEvent::Scroll(container)) => {
                self.on_global_scroll(*container);
            }
            _ => {}
        }
        EventEffects::empty()
    }

    fn drain_pending(&mut self) {
        let mut budget = MAX_NESTED_DISPATCH;
        while let Some(event) = self.pending.pop_front() {
            if budget == 0 {
                tracing::warn!(
                    dropped = self.pending.len() + 1,
                    "nested press dispatch limit reached; dropping queued events"
                );
                self.pending.clear();
                break;
            }
            budget -= 1;
            let prev = core::mem::replace(&mut self.state.is_triggering_event, true);
            let _ = self.route(&event);
            self.state.is_triggering_event = prev;
        }
    }

    /// Record the start of a press on `element`.
    pub(crate) fn begin_press(
        &mut self,
        element: ElementId,
        pointer_type: PointerType,
        pointer_id: Option<i64>,
    ) {
        self.state.is_pressed = true;
        self.state.is_over_target = true;
        self.state.active_pointer_id = pointer_id;
        self.state.pointer_type = Some(pointer_type);
        self.state.target = Some(element);
        self.state.ignore_click_after_press = false;
    }

    /// Clear the interaction after a release and drop scoped resources.
    pub(crate) fn finish_press(&mut self) {
        self.state.is_pressed = false;
        self.state.is_over_target = false;
        self.state.active_pointer_id = None;
        self.state.pointer_type = None;
        self.listeners.remove_all();
        self.release_selection();
    }

    /// Pointer type of the current press, defaulting to mouse.
    pub(crate) fn pointer_type(&self) -> PointerType {
        self.state.pointer_type.unwrap_or_default()
    }

    pub(crate) fn listen(
        &mut self,
        target: GlobalTarget,
        kind: EventKind,
        handler: GlobalHandler,
        capture: bool,
    ) {
        self.listeners.add(target, kind, handler, capture);
    }

    /// Install a bubble-phase document listener.
    pub(crate) fn listen_document(&mut self, kind: EventKind, handler: GlobalHandler) {
        self.listen(GlobalTarget::Document, kind, handler, false);
    }

    pub(crate) fn acquire_selection(&mut self, element: ElementId) {
        if self.config.allow_text_selection_on_press || self.selection_lock.is_some() {
            return;
        }
        self.selection_lock = Some(self.selection.acquire(&self.host, element));
    }

    pub(crate) fn release_selection(&mut self) {
        if let Some(lock) = self.selection_lock.take() {
            lock.release();
        }
    }

    /// Fire `pressstart`. Returns whether the native event should stop
    /// propagating.
    pub(crate) fn trigger_start(
        &mut self,
        modifiers: Modifiers,
        pointer_type: PointerType,
    ) -> bool {
        if self.config.is_disabled || self.state.did_fire_press_start {
            return false;
        }
        let prev = core::mem::replace(&mut self.state.is_triggering_event, true);
        let stop = self.emit(PressEventType::PressStart, pointer_type, modifiers);
        if let Some(on_change) = self.config.on_press_change.as_mut() {
            on_change(true);
        }
        self.state.is_triggering_event = prev;
        self.state.did_fire_press_start = true;
        self.pressed = true;
        stop
    }

    /// Fire `pressend`, then `press` when `was_pressed` and enabled.
    pub(crate) fn trigger_end(
        &mut self,
        modifiers: Modifiers,
        pointer_type: PointerType,
        was_pressed: bool,
    ) -> bool {
        if !self.state.did_fire_press_start {
            return false;
        }
        self.state.ignore_click_after_press = true;
        self.state.did_fire_press_start = false;
        let prev = core::mem::replace(&mut self.state.is_triggering_event, true);
        let mut stop = self.emit(PressEventType::PressEnd, pointer_type, modifiers);
        if let Some(on_change) = self.config.on_press_change.as_mut() {
            on_change(false);
        }
        self.pressed = false;
        if was_pressed && !self.config.is_disabled {
            stop &= self.emit(PressEventType::Press, pointer_type, modifiers);
        }
        self.state.is_triggering_event = prev;
        stop
    }

    /// Fire `pressup`, independent of start/end pairing.
    pub(crate) fn trigger_up(&mut self, modifiers: Modifiers, pointer_type: PointerType) -> bool {
        if self.config.is_disabled {
            return false;
        }
        let prev = core::mem::replace(&mut self.state.is_triggering_event, true);
        let stop = self.emit(PressEventType::PressUp, pointer_type, modifiers);
        self.state.is_triggering_event = prev;
        stop
    }

    /// Abort the press: non-completing end, then clear state and resources.
    pub(crate) fn cancel_press(&mut self, modifiers: Modifiers) {
        if !self.state.is_pressed {
            return;
        }
        tracing::debug!(pointer_type = ?self.state.pointer_type, "press cancelled");
        if self.state.is_over_target || self.state.did_fire_press_start {
            self.trigger_end(modifiers, self.pointer_type(), false);
        }
        self.finish_press();
    }

    fn emit(
        &mut self,
        kind: PressEventType,
        pointer_type: PointerType,
        modifiers: Modifiers,
    ) -> bool {
        let Some(target) = self.state.target.or(self.element) else {
            return true;
        };
        let event = PressEvent {
            kind,
            pointer_type,
            target,
            modifiers,
        };
        tracing::trace!(
            event = kind.as_str(),
            pointer_type = pointer_type.as_str(),
            ?target,
            "press event"
        );
        let callback_stop = match self.config.callback_mut(kind) {
            Some(callback) => {
                let mut cx = PressContext::new(&mut self.pending);
                callback(&event, &mut cx);
                cx.propagation().should_stop()
            }
            None => true,
        };
        let mut dispatched = Propagation::default();
        self.host.dispatch_press_event(&event, &mut dispatched);
        callback_stop && dispatched.should_stop()
    }
}

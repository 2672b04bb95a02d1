// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native input events as delivered by the host.
//!
//! These are plain values mirroring the subset of DOM `PointerEvent`,
//! `MouseEvent`, `TouchEvent` and `KeyboardEvent` fields the press engine
//! reads. Hosts translate whatever their platform hands them into a
//! [`NativeEvent`] and forward it to
//! [`PressEngine::dispatch`](crate::PressEngine::dispatch).
//!
//! The `target` of every event is the innermost element the platform
//! targeted, not the element the engine is bound to. The engine decides which
//! of its listeners see the event from that target.

use alloc::string::String;
use core::cell::Cell;

use kurbo::Point;
use smallvec::SmallVec;

use crate::host::ElementId;
use crate::platform::Platform;

bitflags::bitflags! {
    /// Keyboard modifier state carried by every native and press event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift is held.
        const SHIFT = 0b0000_0001;
        /// Control is held.
        const CTRL  = 0b0000_0010;
        /// Meta (Command / Windows) is held.
        const META  = 0b0000_0100;
        /// Alt (Option) is held.
        const ALT   = 0b0000_1000;
    }
}

bitflags::bitflags! {
    /// Side effects the host should apply to the native event after dispatch.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventEffects: u8 {
        /// Call `stopPropagation()` on the native event.
        const STOP_PROPAGATION = 0b0000_0001;
        /// Call `preventDefault()` on the native event.
        const PREVENT_DEFAULT  = 0b0000_0010;
    }
}

/// The input modality a press is attributed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// A mouse or trackpad.
    #[default]
    Mouse,
    /// A finger on a touch screen.
    Touch,
    /// A stylus.
    Pen,
    /// The Enter or Space key.
    Keyboard,
    /// Assistive technology or a programmatic `click()`.
    Virtual,
}

impl PointerType {
    /// The DOM spelling of this pointer type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mouse => "mouse",
            Self::Touch => "touch",
            Self::Pen => "pen",
            Self::Keyboard => "keyboard",
            Self::Virtual => "virtual",
        }
    }
}

/// Event kinds, used to key listener registrations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `pointerdown`
    PointerDown,
    /// `pointermove`
    PointerMove,
    /// `pointerup`
    PointerUp,
    /// `pointercancel`
    PointerCancel,
    /// `mousedown`
    MouseDown,
    /// `mouseenter`
    MouseEnter,
    /// `mouseleave`
    MouseLeave,
    /// `mouseup`
    MouseUp,
    /// `click`
    Click,
    /// `touchstart`
    TouchStart,
    /// `touchmove`
    TouchMove,
    /// `touchend`
    TouchEnd,
    /// `touchcancel`
    TouchCancel,
    /// `keydown`
    KeyDown,
    /// `keyup`
    KeyUp,
    /// `dragstart`
    DragStart,
    /// `scroll`
    Scroll,
}

/// A pointer event (`pointerdown`, `pointermove`, `pointerup`, `pointercancel`).
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Innermost targeted element.
    pub target: ElementId,
    /// Identity of the pointer, stable for the duration of a contact.
    pub pointer_id: i32,
    /// Reported pointer type.
    pub pointer_type: PointerType,
    /// Button that changed state (0 is the primary button).
    pub button: i16,
    /// Bitmask of currently pressed buttons.
    pub buttons: u16,
    /// Client coordinates.
    pub position: Point,
    /// Contact width in CSS pixels.
    pub width: f64,
    /// Contact height in CSS pixels.
    pub height: f64,
    /// Normalized pressure.
    pub pressure: f32,
    /// UI event detail (click count).
    pub detail: u32,
    /// Modifier keys.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// A primary-button pointer event with a one pixel contact at `position`.
    pub fn new(
        target: ElementId,
        pointer_id: i32,
        pointer_type: PointerType,
        position: Point,
    ) -> Self {
        Self {
            target,
            pointer_id,
            pointer_type,
            button: 0,
            buttons: 1,
            position,
            width: 1.0,
            height: 1.0,
            pressure: 0.5,
            detail: 1,
            modifiers: Modifiers::empty(),
        }
    }

    /// Set the changed button.
    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    /// Set the contact size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the modifier keys.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether assistive technology synthesized this event.
    ///
    /// Screen readers on several platforms emit pointer events with a zero
    /// sized contact (Android excepted, where real touches can report zero),
    /// or a 1×1 mouse contact with no pressure and no detail.
    pub fn is_virtual(&self, platform: &Platform) -> bool {
        (!platform.android && self.width == 0.0 && self.height == 0.0)
            || (self.width == 1.0
                && self.height == 1.0
                && self.pressure == 0.0
                && self.detail == 0
                && self.pointer_type == PointerType::Mouse)
    }
}

/// A mouse event (`mousedown`, `mouseenter`, `mouseleave`, `mouseup`, `click`).
#[derive(Clone, Debug, PartialEq)]
pub struct MouseEvent {
    /// Innermost targeted element.
    pub target: ElementId,
    /// Button that changed state (0 is the primary button).
    pub button: i16,
    /// Bitmask of currently pressed buttons.
    pub buttons: u16,
    /// Client coordinates.
    pub position: Point,
    /// UI event detail (click count; 0 for synthesized clicks).
    pub detail: u32,
    /// Pointer type when the platform delivers `click` as a `PointerEvent`.
    pub pointer_type: Option<PointerType>,
    /// Gecko's `mozInputSource` (0 means unknown source).
    pub moz_input_source: Option<u16>,
    /// Whether the user agent generated the event.
    pub is_trusted: bool,
    /// Modifier keys.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// A trusted primary-button mouse event at `position` with `detail = 1`.
    pub fn new(target: ElementId, position: Point) -> Self {
        Self {
            target,
            button: 0,
            buttons: 1,
            position,
            detail: 1,
            pointer_type: None,
            moz_input_source: None,
            is_trusted: true,
            modifiers: Modifiers::empty(),
        }
    }

    /// The click produced by `element.click()` or a screen reader.
    pub fn synthetic_click(target: ElementId) -> Self {
        Self {
            detail: 0,
            buttons: 0,
            ..Self::new(target, Point::ZERO)
        }
    }

    /// Set the changed button.
    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    /// Set the modifier keys.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this click came from assistive technology or `click()`
    /// rather than a physical pointer.
    pub fn is_virtual_click(&self, platform: &Platform) -> bool {
        // JAWS/NVDA with Firefox.
        if self.moz_input_source == Some(0) && self.is_trusted {
            return true;
        }
        // Android TalkBack's detail value varies depending on the event
        // listener options; it reports a primary button instead.
        if platform.android && self.pointer_type.is_some() {
            return self.buttons == 1;
        }
        self.detail == 0 && self.pointer_type.is_none()
    }
}

/// A single touch contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    /// Identity of the touch, stable for the duration of the contact.
    pub identifier: i64,
    /// Client coordinates.
    pub position: Point,
    /// Horizontal contact radius.
    pub radius_x: f64,
    /// Vertical contact radius.
    pub radius_y: f64,
}

impl Touch {
    /// A touch with no contact radius.
    pub fn new(identifier: i64, position: Point) -> Self {
        Self {
            identifier,
            position,
            radius_x: 0.0,
            radius_y: 0.0,
        }
    }
}

/// Touch list storage; two inline contacts cover the common cases.
pub type TouchList = SmallVec<[Touch; 2]>;

/// A touch event (`touchstart`, `touchmove`, `touchend`, `touchcancel`).
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Element the touches started on.
    pub target: ElementId,
    /// Touches still in contact that started on `target`.
    pub target_touches: TouchList,
    /// Touches that changed in this event.
    pub changed_touches: TouchList,
    /// Modifier keys.
    pub modifiers: Modifiers,
}

impl TouchEvent {
    /// A touch event where `touch` is both a target touch and a changed touch.
    pub fn single(target: ElementId, touch: Touch) -> Self {
        let mut touches = TouchList::new();
        touches.push(touch);
        Self {
            target,
            target_touches: touches.clone(),
            changed_touches: touches,
            modifiers: Modifiers::empty(),
        }
    }

    /// A touch event where `touch` changed but is no longer in contact.
    pub fn lifted(target: ElementId, touch: Touch) -> Self {
        let mut changed = TouchList::new();
        changed.push(touch);
        Self {
            target,
            target_touches: TouchList::new(),
            changed_touches: changed,
            modifiers: Modifiers::empty(),
        }
    }

    /// The first touch that started on the target, if any.
    pub fn first_target_touch(&self) -> Option<&Touch> {
        self.target_touches.first()
    }

    /// The changed touch with the given identifier.
    pub fn changed_touch(&self, identifier: i64) -> Option<&Touch> {
        self.changed_touches
            .iter()
            .find(|t| t.identifier == identifier)
    }
}

/// A keyboard event (`keydown`, `keyup`).
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// Focused element receiving the event.
    pub target: ElementId,
    /// Logical key value (`"Enter"`, `" "`, `"a"`, `"Meta"`, ...).
    pub key: String,
    /// Physical key code (`"Enter"`, `"Space"`, ...).
    pub code: String,
    /// Whether this is an OS auto-repeat.
    pub repeat: bool,
    /// Modifier keys.
    pub modifiers: Modifiers,
    /// Set once a press engine opened a link for this event, so nested
    /// engines handling the same native event do not open it again.
    pub link_opened: Cell<bool>,
}

impl KeyboardEvent {
    /// A non-repeating key event.
    pub fn new(target: ElementId, key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            target,
            key: key.into(),
            code: code.into(),
            repeat: false,
            modifiers: Modifiers::empty(),
            link_opened: Cell::new(false),
        }
    }

    /// Set the modifier keys.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the event as an OS auto-repeat.
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// `true` for Enter.
    pub fn is_enter(&self) -> bool {
        self.key == "Enter"
    }

    /// `true` for any spelling of the Space key.
    pub fn is_space(&self) -> bool {
        self.key == " " || self.key == "Spacebar" || self.code == "Space"
    }
}

/// A native event as forwarded by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeEvent {
    /// `pointerdown`
    PointerDown(PointerEvent),
    /// `pointermove`
    PointerMove(PointerEvent),
    /// `pointerup`
    PointerUp(PointerEvent),
    /// `pointercancel`
    PointerCancel(PointerEvent),
    /// `mousedown`
    MouseDown(MouseEvent),
    /// `mouseenter`
    MouseEnter(MouseEvent),
    /// `mouseleave`
    MouseLeave(MouseEvent),
    /// `mouseup`
    MouseUp(MouseEvent),
    /// `click`
    Click(MouseEvent),
    /// `touchstart`
    TouchStart(TouchEvent),
    /// `touchmove`
    TouchMove(TouchEvent),
    /// `touchend`
    TouchEnd(TouchEvent),
    /// `touchcancel`
    TouchCancel(TouchEvent),
    /// `keydown`
    KeyDown(KeyboardEvent),
    /// `keyup`
    KeyUp(KeyboardEvent),
    /// `dragstart` on the given element.
    DragStart(ElementId),
    /// `scroll` of the given scroll container.
    Scroll(ElementId),
}

impl NativeEvent {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown(_) => EventKind::PointerDown,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::PointerUp(_) => EventKind::PointerUp,
            Self::PointerCancel(_) => EventKind::PointerCancel,
            Self::MouseDown(_) => EventKind::MouseDown,
            Self::MouseEnter(_) => EventKind::MouseEnter,
            Self::MouseLeave(_) => EventKind::MouseLeave,
            Self::MouseUp(_) => EventKind::MouseUp,
            Self::Click(_) => EventKind::Click,
            Self::TouchStart(_) => EventKind::TouchStart,
            Self::TouchMove(_) => EventKind::TouchMove,
            Self::TouchEnd(_) => EventKind::TouchEnd,
            Self::TouchCancel(_) => EventKind::TouchCancel,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::KeyUp(_) => EventKind::KeyUp,
            Self::DragStart(_) => EventKind::DragStart,
            Self::Scroll(_) => EventKind::Scroll,
        }
    }

    /// The innermost targeted element.
    pub fn target(&self) -> ElementId {
        match self {
            Self::PointerDown(e)
            | Self::PointerMove(e)
            | Self::PointerUp(e)
            | Self::PointerCancel(e) => e.target,
            Self::MouseDown(e)
            | Self::MouseEnter(e)
            | Self::MouseLeave(e)
            | Self::MouseUp(e)
            | Self::Click(e) => e.target,
            Self::TouchStart(e) | Self::TouchMove(e) | Self::TouchEnd(e) | Self::TouchCancel(e) => {
                e.target
            }
            Self::KeyDown(e) | Self::KeyUp(e) => e.target,
            Self::DragStart(target) | Self::Scroll(target) => *target,
        }
    }

    /// Modifier keys held when the event fired; empty for drag and scroll.
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown(e)
            | Self::PointerMove(e)
            | Self::PointerUp(e)
            | Self::PointerCancel(e) => e.modifiers,
            Self::MouseDown(e)
            | Self::MouseEnter(e)
            | Self::MouseLeave(e)
            | Self::MouseUp(e)
            | Self::Click(e) => e.modifiers,
            Self::TouchStart(e) | Self::TouchMove(e) | Self::TouchEnd(e) | Self::TouchCancel(e) => {
                e.modifiers
            }
            Self::KeyDown(e) | Self::KeyUp(e) => e.modifiers,
            Self::DragStart(_) | Self::Scroll(_) => Modifiers::empty(),
        }
    }
}

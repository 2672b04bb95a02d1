// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_press --heading-base-level=0

//! Understory Press: one press lifecycle across every input modality.
//!
//! Pointer, mouse, touch, keyboard and assistive-technology input all "press"
//! an element, but each arrives as a different stream of native events with
//! its own quirks: emulated mouse events after touches, keyups swallowed by
//! the Meta key on macOS, zero-sized pointers from screen readers, clicks that
//! trail every physical press. This crate normalizes them into four
//! modality-independent events:
//!
//! - `pressstart`: the element became pressed.
//! - `pressend`: the element is no longer pressed (released, moved off, or cancelled).
//! - `pressup`: a release happened over the element.
//! - `press`: a press completed over the element.
//!
//! ## Model
//!
//! The engine never touches a document. The embedding layer implements the
//! [`Host`] traits (containment, geometry, focus, `user-select`, event sink),
//! forwards native events to [`PressEngine::dispatch`], and applies the
//! returned [`EventEffects`] (`preventDefault`/`stopPropagation`) to them.
//!
//! - [`native`]: typed native events.
//! - [`host`]: the host traits and element classification.
//! - [`engine`]: the state machine and its event routing.
//! - [`scoped`]: resources held during a press (text-selection lock, focus
//!   without scrolling).
//! - [`listeners`]: the document/window listener registry.
//! - [`hit`]: contact-area hit testing.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect, Vec2};
//! use understory_press::host::{
//!     ElementInfo, ElementTree, EventSink, FocusHost, FocusOptions, SelectionHost,
//!     SelectionTarget,
//! };
//! use understory_press::{
//!     ElementId, Interactions, Modifiers, NativeEvent, Platform, PointerEvent, PointerType,
//!     PressConfig, PressEvent, Propagation,
//! };
//!
//! #[derive(Default)]
//! struct Page {
//!     log: RefCell<Vec<String>>,
//! }
//!
//! impl ElementTree for Page {
//!     fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
//!         ancestor == node
//!     }
//!     fn element_info(&self, _element: ElementId) -> ElementInfo {
//!         ElementInfo::default()
//!     }
//!     fn bounding_rect(&self, _element: ElementId) -> Rect {
//!         Rect::new(0.0, 0.0, 100.0, 40.0)
//!     }
//! }
//! impl FocusHost for Page {
//!     fn focus(&self, _element: ElementId, _options: FocusOptions) {}
//!     fn scrollable_ancestors(&self, _element: ElementId) -> Vec<ElementId> {
//!         Vec::new()
//!     }
//!     fn scroll_position(&self, _element: ElementId) -> Vec2 {
//!         Vec2::ZERO
//!     }
//!     fn set_scroll_position(&self, _element: ElementId, _position: Vec2) {}
//! }
//! impl SelectionHost for Page {
//!     fn user_select(&self, _target: SelectionTarget) -> String {
//!         String::new()
//!     }
//!     fn set_user_select(&self, _target: SelectionTarget, _value: &str) {}
//! }
//! impl EventSink for Page {
//!     fn dispatch_press_event(&self, event: &PressEvent, _propagation: &mut Propagation) {
//!         self.log.borrow_mut().push(event.kind.to_string());
//!     }
//!     fn dispatch_synthetic(&self, _event: &NativeEvent) {}
//!     fn open_link(&self, _anchor: ElementId, _modifiers: Modifiers) {}
//! }
//!
//! let page = Rc::new(Page::default());
//! let platform = Platform { pointer_events: true, ..Platform::default() };
//! let interactions = Interactions::with_platform(page.clone(), platform);
//!
//! let button = ElementId(1);
//! let mut press = interactions.press(PressConfig::default());
//! press.attach(button).unwrap();
//!
//! let down = PointerEvent::new(button, 1, PointerType::Mouse, Point::new(10.0, 10.0));
//! press.dispatch(&NativeEvent::PointerDown(down.clone()));
//! assert!(press.is_pressed());
//! press.dispatch(&NativeEvent::PointerUp(down));
//! assert!(!press.is_pressed());
//!
//! assert_eq!(*page.log.borrow(), ["pressstart", "pressup", "pressend", "press"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo, `tracing` and `thiserror` against the standard library.
//! - `libm`: use Kurbo's `libm` backend in `no_std` builds.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod adapters;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod hit;
pub mod host;
pub mod listeners;
pub mod native;
pub mod platform;
pub mod scoped;

pub use adapters::keyboard::{is_valid_keyboard_event, should_prevent_default_keyboard};
pub use config::{PressCallback, PressChangeCallback, PressConfig};
pub use engine::{InputMode, Interactions, MAX_NESTED_DISPATCH, PressEngine, PressState};
pub use error::{BindError, ProbeError};
pub use event::{PressContext, PressEvent, PressEventType, Propagation};
pub use host::{ElementId, ElementInfo, ElementKind, Host, Role};
pub use native::{
    EventEffects, EventKind, KeyboardEvent, Modifiers, MouseEvent, NativeEvent, PointerEvent,
    PointerType, Touch, TouchEvent,
};
pub use platform::{CapabilityProbe, Platform};

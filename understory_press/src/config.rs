// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press engine configuration.
//!
//! ```
//! use understory_press::PressConfig;
//!
//! let config = PressConfig::default()
//!     .with_should_cancel_on_pointer_exit(true)
//!     .with_on_press(|event, _cx| {
//!         assert_eq!(event.kind.as_str(), "press");
//!     });
//! assert!(config.should_cancel_on_pointer_exit);
//! assert!(config.on_press.is_some());
//! ```

use alloc::boxed::Box;
use core::fmt;

use crate::event::{PressContext, PressEvent, PressEventType};

/// Callback invoked for a press lifecycle event.
pub type PressCallback = Box<dyn FnMut(&PressEvent, &mut PressContext<'_>)>;

/// Callback invoked when the pressed state flips.
pub type PressChangeCallback = Box<dyn FnMut(bool)>;

/// Configuration for a [`PressEngine`](crate::PressEngine).
///
/// Flags may be changed while the engine runs through
/// [`PressEngine::update_config`](crate::PressEngine::update_config).
#[derive(Default)]
pub struct PressConfig {
    /// Ignore all input; no press events fire.
    pub is_disabled: bool,
    /// Force the pressed observable on (for example while a triggered
    /// overlay is open).
    pub is_pressed: bool,
    /// Do not move focus to the element on press.
    pub prevent_focus_on_press: bool,
    /// Cancel the whole press when the pointer leaves the element, instead
    /// of ending it and restarting on re-entry.
    pub should_cancel_on_pointer_exit: bool,
    /// Keep text selection enabled during pointer presses.
    pub allow_text_selection_on_press: bool,
    /// Called when a press completes over the element.
    pub on_press: Option<PressCallback>,
    /// Called when a press starts.
    pub on_press_start: Option<PressCallback>,
    /// Called when a press ends, completed or not.
    pub on_press_end: Option<PressCallback>,
    /// Called when a release happens over the element.
    pub on_press_up: Option<PressCallback>,
    /// Called with the new pressed state.
    pub on_press_change: Option<PressChangeCallback>,
}

impl fmt::Debug for PressConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressConfig")
            .field("is_disabled", &self.is_disabled)
            .field("is_pressed", &self.is_pressed)
            .field("prevent_focus_on_press", &self.prevent_focus_on_press)
            .field(
                "should_cancel_on_pointer_exit",
                &self.should_cancel_on_pointer_exit,
            )
            .field(
                "allow_text_selection_on_press",
                &self.allow_text_selection_on_press,
            )
            .field("on_press", &self.on_press.is_some())
            .field("on_press_start", &self.on_press_start.is_some())
            .field("on_press_end", &self.on_press_end.is_some())
            .field("on_press_up", &self.on_press_up.is_some())
            .field("on_press_change", &self.on_press_change.is_some())
            .finish()
    }
}

impl PressConfig {
    /// Set [`PressConfig::is_disabled`].
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    /// Set [`PressConfig::is_pressed`].
    pub fn with_pressed(mut self, pressed: bool) -> Self {
        self.is_pressed = pressed;
        self
    }

    /// Set [`PressConfig::prevent_focus_on_press`].
    pub fn with_prevent_focus_on_press(mut self, prevent: bool) -> Self {
        self.prevent_focus_on_press = prevent;
        self
    }

    /// Set [`PressConfig::should_cancel_on_pointer_exit`].
    pub fn with_should_cancel_on_pointer_exit(mut self, cancel: bool) -> Self {
        self.should_cancel_on_pointer_exit = cancel;
        self
    }

    /// Set [`PressConfig::allow_text_selection_on_press`].
    pub fn with_allow_text_selection_on_press(mut self, allow: bool) -> Self {
        self.allow_text_selection_on_press = allow;
        self
    }

    /// Set [`PressConfig::on_press`].
    pub fn with_on_press(
        mut self,
        f: impl FnMut(&PressEvent, &mut PressContext<'_>) + 'static,
    ) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    /// Set [`PressConfig::on_press_start`].
    pub fn with_on_press_start(
        mut self,
        f: impl FnMut(&PressEvent, &mut PressContext<'_>) + 'static,
    ) -> Self {
        self.on_press_start = Some(Box::new(f));
        self
    }

    /// Set [`PressConfig::on_press_end`].
    pub fn with_on_press_end(
        mut self,
        f: impl FnMut(&PressEvent, &mut PressContext<'_>) + 'static,
    ) -> Self {
        self.on_press_end = Some(Box::new(f));
        self
    }

    /// Set [`PressConfig::on_press_up`].
    pub fn with_on_press_up(
        mut self,
        f: impl FnMut(&PressEvent, &mut PressContext<'_>) + 'static,
    ) -> Self {
        self.on_press_up = Some(Box::new(f));
        self
    }

    /// Set [`PressConfig::on_press_change`].
    pub fn with_on_press_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_press_change = Some(Box::new(f));
        self
    }

    /// The callback slot for a lifecycle event.
    pub(crate) fn callback_mut(&mut self, kind: PressEventType) -> Option<&mut PressCallback> {
        match kind {
            PressEventType::PressStart => self.on_press_start.as_mut(),
            PressEventType::PressEnd => self.on_press_end.as_mut(),
            PressEventType::PressUp => self.on_press_up.as_mut(),
            PressEventType::Press => self.on_press.as_mut(),
        }
    }
}

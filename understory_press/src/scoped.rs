// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side effects of a press that must be undone on every exit path.
//!
//! - [`selection`]: reference-counted text-selection lock with an RAII guard.
//! - [`focus`]: focusing the pressed element without scrolling its ancestors.
//!
//! The global listener registry lives in [`crate::listeners`].

pub mod focus;
pub mod selection;

pub use focus::focus_without_scrolling;
pub use selection::{SelectionLock, TextSelection};

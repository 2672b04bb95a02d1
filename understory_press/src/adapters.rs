// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input adapters.
//!
//! Each adapter translates one family of native events into calls on the
//! engine's trigger primitives. Which pointing adapter runs depends on the
//! platform: [`pointer`] when unified pointer events exist, [`fallback`]
//! (mouse plus touch) otherwise. [`keyboard`] and [`click`] always run.

pub(crate) mod click;
pub(crate) mod fallback;
pub(crate) mod keyboard;
pub(crate) mod pointer;

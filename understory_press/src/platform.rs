// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform capabilities, probed once per [`Interactions`](crate::Interactions) context.

use crate::error::ProbeError;

/// Source of platform and browser capability information.
pub trait CapabilityProbe {
    /// Whether the platform delivers unified pointer events.
    fn supports_pointer_events(&self) -> bool;

    /// Whether the platform is macOS.
    fn is_mac(&self) -> bool;

    /// Whether the platform is iOS or iPadOS.
    fn is_ios(&self) -> bool;

    /// Whether the platform is Android.
    fn is_android(&self) -> bool;

    /// Whether `focus()` honors the `preventScroll` option.
    ///
    /// Probing may fail on hosts that reject unknown focus options.
    fn probe_prevent_scroll(&self) -> Result<bool, ProbeError>;
}

/// Snapshot of platform capabilities.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Platform {
    /// Unified pointer events are available.
    pub pointer_events: bool,
    /// macOS.
    pub mac: bool,
    /// iOS or iPadOS.
    pub ios: bool,
    /// Android.
    pub android: bool,
    /// `focus({ preventScroll: true })` is supported.
    pub prevent_scroll: bool,
}

impl Platform {
    /// Probe all capabilities.
    ///
    /// A failing `preventScroll` probe is treated as unsupported.
    pub fn detect(probe: &(impl CapabilityProbe + ?Sized)) -> Self {
        let prevent_scroll = match probe.probe_prevent_scroll() {
            Ok(supported) => supported,
            Err(err) => {
                tracing::debug!(%err, "preventScroll probe failed; restoring offsets manually");
                false
            }
        };
        Self {
            pointer_events: probe.supports_pointer_events(),
            mac: probe.is_mac(),
            ios: probe.is_ios(),
            android: probe.is_android(),
            prevent_scroll,
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Event noise never surfaces as an error; these cover binding misuse and
//! capability probing only.

use alloc::string::String;

use crate::host::ElementId;

/// Binding a press engine to an element failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The engine is already bound to a different element.
    #[error("press engine is bound to {current:?}; detach before attaching to {requested:?}")]
    AlreadyBound {
        /// Element the engine is bound to.
        current: ElementId,
        /// Element the caller tried to bind.
        requested: ElementId,
    },
}

/// A capability probe failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The host rejected the probe.
    #[error("probing `{capability}` failed: {reason}")]
    Rejected {
        /// Capability being probed.
        capability: &'static str,
        /// Host-provided reason.
        reason: String,
    },
}

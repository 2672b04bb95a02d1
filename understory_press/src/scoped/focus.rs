// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus an element without scrolling its ancestors.

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::host::{ElementId, FocusHost, FocusOptions};
use crate::platform::Platform;

/// Focus `element` without letting any scroll container move.
///
/// Uses the platform's `prevent_scroll` focus option when available.
/// Otherwise the offsets of every scrollable ancestor are captured before
/// focusing and written back afterwards where they changed.
pub fn focus_without_scrolling<H: FocusHost + ?Sized>(
    host: &H,
    element: ElementId,
    platform: &Platform,
) {
    if platform.prevent_scroll {
        host.focus(
            element,
            FocusOptions {
                prevent_scroll: true,
            },
        );
        return;
    }

    let saved: SmallVec<[(ElementId, Vec2); 8]> = host
        .scrollable_ancestors(element)
        .into_iter()
        .map(|ancestor| (ancestor, host.scroll_position(ancestor)))
        .collect();
    host.focus(element, FocusOptions::default());
    for (ancestor, position) in saved {
        if host.scroll_position(ancestor) != position {
            host.set_scroll_position(ancestor, position);
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact-area hit testing.
//!
//! Touch and pen contacts are not points: a finger covers an area the
//! platform reports either as a width/height (pointer events) or as radii
//! (touch events). A contact is "over" an element when the contact's
//! rectangle overlaps the element's bounding rectangle at all.
//!
//! This is the only hit test used for touch move/end, since touch events
//! carry no enter/leave semantics, and for pointer moves on browsers whose
//! `pointerenter`/`pointerleave` are unreliable.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_press::hit::{ContactPoint, rects_overlap};
//!
//! let button = Rect::new(0.0, 0.0, 100.0, 40.0);
//! // A finger just right of the button, but wide enough to touch it.
//! let finger = ContactPoint::new(Point::new(105.0, 20.0)).with_size(12.0, 12.0);
//! assert!(rects_overlap(finger.client_rect(), button));
//! ```

use kurbo::{Point, Rect};

use crate::host::{ElementId, ElementTree};
use crate::native::{MouseEvent, PointerEvent, Touch};

/// A contact position with an optional contact area.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContactPoint {
    /// Client coordinates of the contact centre.
    pub position: Point,
    /// Contact width.
    pub width: f64,
    /// Contact height.
    pub height: f64,
    /// Horizontal radius, used when the half width is zero.
    pub radius_x: f64,
    /// Vertical radius, used when the half height is zero.
    pub radius_y: f64,
}

impl ContactPoint {
    /// A contact with no area.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Set the contact width and height.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the contact radii.
    pub fn with_radius(mut self, radius_x: f64, radius_y: f64) -> Self {
        self.radius_x = radius_x;
        self.radius_y = radius_y;
        self
    }

    /// The contact area as a rectangle centred on the position.
    pub fn client_rect(&self) -> Rect {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let dx = if half_w != 0.0 { half_w } else { self.radius_x };
        let dy = if half_h != 0.0 { half_h } else { self.radius_y };
        Rect::new(
            self.position.x - dx,
            self.position.y - dy,
            self.position.x + dx,
            self.position.y + dy,
        )
    }
}

impl From<&PointerEvent> for ContactPoint {
    fn from(ev: &PointerEvent) -> Self {
        Self::new(ev.position).with_size(ev.width, ev.height)
    }
}

impl From<&MouseEvent> for ContactPoint {
    fn from(ev: &MouseEvent) -> Self {
        Self::new(ev.position)
    }
}

impl From<&Touch> for ContactPoint {
    fn from(touch: &Touch) -> Self {
        Self::new(touch.position).with_radius(touch.radius_x, touch.radius_y)
    }
}

/// Axis-aligned overlap; rectangles that share an edge overlap.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    if a.x0 > b.x1 || b.x0 > a.x1 {
        return false;
    }
    if a.y0 > b.y1 || b.y0 > a.y1 {
        return false;
    }
    true
}

/// Whether `contact` overlaps the current bounding rectangle of `target`.
pub fn is_over_target<T: ElementTree + ?Sized>(
    tree: &T,
    contact: &ContactPoint,
    target: ElementId,
) -> bool {
    rects_overlap(contact.client_rect(), tree.bounding_rect(target))
}

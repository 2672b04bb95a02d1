// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborators: the DOM-like surface the press engine reads and drives.
//!
//! The engine never touches a real document. Instead the embedding layer (a
//! web-sys binding, a native toolkit, or a test double) implements the small
//! traits in this module:
//!
//! - [`ElementTree`]: containment, element metadata, bounding rectangles.
//! - [`FocusHost`]: focusing and scroll offsets of scroll containers.
//! - [`SelectionHost`]: reading and writing the `user-select` style.
//! - [`EventSink`]: receiving press events, synthesized native events and
//!   link activations.
//!
//! [`Host`] is implemented for every type that implements all four.
//!
//! All methods take `&self`; hosts are shared through `Rc` and use interior
//! mutability the same way a document is shared in a browser.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Vec2};

use crate::event::{PressEvent, Propagation};
use crate::native::{Modifiers, NativeEvent};

/// Host-assigned identifier for an element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Capability tag for an element, computed once per event.
///
/// This closed set is all the engine needs to decide keyboard validity and
/// default prevention.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Accepts free text: text-like `<input>`, `<textarea>`, or content-editable.
    TextInput,
    /// A checkbox or radio `<input>`.
    Checkable,
    /// A button-like control.
    ///
    /// `native_activation` is `true` when the platform already performs an
    /// action on Enter/Space (submit and reset buttons, button-like and other
    /// non-text `<input>` types), so the engine must not prevent the default.
    Button {
        /// Whether the platform performs a default action on activation keys.
        native_activation: bool,
    },
    /// An `<a>` element with an `href`.
    Anchor,
    /// Anything else.
    #[default]
    Other,
}

/// ARIA role override relevant to press handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// `role="button"`
    Button,
    /// `role="link"`
    Link,
    /// Any other explicit role.
    Other,
}

/// Classified element metadata.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ElementInfo {
    /// Capability tag.
    pub kind: ElementKind,
    /// Explicit role, if any.
    pub role: Option<Role>,
    /// Whether the element has the `draggable` attribute.
    pub draggable: bool,
}

/// Raw element metadata, as read from markup.
#[derive(Copy, Clone, Debug, Default)]
pub struct ElementMeta<'a> {
    /// Tag name (case-insensitive).
    pub tag: &'a str,
    /// The `type` attribute, if present.
    pub input_type: Option<&'a str>,
    /// The `role` attribute, if present.
    pub role: Option<&'a str>,
    /// Whether an `href` attribute is present.
    pub has_href: bool,
    /// Whether the element is content-editable.
    pub content_editable: bool,
    /// Whether the element has the `draggable` attribute.
    pub draggable: bool,
}

const NON_TEXT_INPUT_TYPES: &[&str] = &[
    "checkbox", "radio", "range", "color", "file", "image", "button", "submit", "reset",
];

impl ElementInfo {
    /// Classify raw metadata into an [`ElementInfo`].
    pub fn classify(meta: &ElementMeta<'_>) -> Self {
        let tag = meta.tag;
        let kind = if meta.content_editable || tag.eq_ignore_ascii_case("textarea") {
            ElementKind::TextInput
        } else if tag.eq_ignore_ascii_case("input") {
            // A missing or unknown type is a text input.
            let ty = meta.input_type.unwrap_or("text");
            if ty.eq_ignore_ascii_case("checkbox") || ty.eq_ignore_ascii_case("radio") {
                ElementKind::Checkable
            } else if NON_TEXT_INPUT_TYPES
                .iter()
                .any(|t| t.eq_ignore_ascii_case(ty))
            {
                ElementKind::Button {
                    native_activation: true,
                }
            } else {
                ElementKind::TextInput
            }
        } else if tag.eq_ignore_ascii_case("button") {
            // `<button>` defaults to `type="submit"`.
            let ty = meta.input_type.unwrap_or("submit");
            ElementKind::Button {
                native_activation: ty.eq_ignore_ascii_case("submit")
                    || ty.eq_ignore_ascii_case("reset"),
            }
        } else if tag.eq_ignore_ascii_case("a") && meta.has_href {
            ElementKind::Anchor
        } else {
            ElementKind::Other
        };

        let role = meta.role.map(|r| match r {
            "button" => Role::Button,
            "link" => Role::Link,
            _ => Role::Other,
        });

        Self {
            kind,
            role,
            draggable: meta.draggable,
        }
    }

    /// An anchor with an `href`, regardless of role.
    pub fn is_link(&self) -> bool {
        self.kind == ElementKind::Anchor
    }

    /// Whether a pointer press should prevent the default action.
    ///
    /// Default prevention stops mobile browsers from moving focus on their
    /// own, but it would also block native drag and drop.
    pub fn prevents_default_on_pointer_down(&self) -> bool {
        !self.draggable
    }
}

/// Options for [`FocusHost::focus`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusOptions {
    /// Ask the platform not to scroll the element into view.
    pub prevent_scroll: bool,
}

/// Where a `user-select` style is read or written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionTarget {
    /// The document root (`-webkit-user-select` on iOS).
    Document,
    /// A single element.
    Element(ElementId),
}

/// Element structure and geometry.
pub trait ElementTree {
    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// Classified metadata for `element`.
    fn element_info(&self, element: ElementId) -> ElementInfo;

    /// The element's border box in client coordinates.
    fn bounding_rect(&self, element: ElementId) -> Rect;
}

/// Focus and scroll containers.
pub trait FocusHost {
    /// Move focus to `element`.
    fn focus(&self, element: ElementId, options: FocusOptions);

    /// Scrollable ancestors of `element`, innermost first, ending with the
    /// document's scrolling element.
    fn scrollable_ancestors(&self, element: ElementId) -> Vec<ElementId>;

    /// Current scroll offset of a scroll container.
    fn scroll_position(&self, element: ElementId) -> Vec2;

    /// Set the scroll offset of a scroll container.
    fn set_scroll_position(&self, element: ElementId, position: Vec2);
}

/// The `user-select` style.
pub trait SelectionHost {
    /// Current `user-select` value; empty when unset.
    fn user_select(&self, target: SelectionTarget) -> String;

    /// Replace the `user-select` value.
    fn set_user_select(&self, target: SelectionTarget, value: &str);
}

/// Outputs of the press engine.
pub trait EventSink {
    /// Dispatch a press event on its target element.
    ///
    /// Listeners may call [`Propagation::continue_propagation`] to keep the
    /// underlying native event propagating.
    fn dispatch_press_event(&self, event: &PressEvent, propagation: &mut Propagation);

    /// A native event the engine synthesized and dispatched to its target
    /// (for example a recovered `keyup`); forward it to other listeners.
    fn dispatch_synthetic(&self, event: &NativeEvent);

    /// Activate the link on `anchor`, honoring modifier keys.
    fn open_link(&self, anchor: ElementId, modifiers: Modifiers);
}

/// Everything the press engine needs from its host.
pub trait Host: ElementTree + FocusHost + SelectionHost + EventSink {}

impl<T> Host for T where T: ElementTree + FocusHost + SelectionHost + EventSink + ?Sized {}

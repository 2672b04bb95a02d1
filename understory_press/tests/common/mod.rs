// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fake document for press integration tests.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; each test binary uses a different subset."
)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use understory_press::host::{
    ElementMeta, ElementTree, EventSink, FocusHost, FocusOptions, SelectionHost, SelectionTarget,
};
use understory_press::{
    CapabilityProbe, ElementId, ElementInfo, Interactions, KeyboardEvent, Modifiers, MouseEvent,
    NativeEvent, Platform, PointerEvent, PointerType, PressConfig, PressEngine, PressEvent,
    PressEventType, ProbeError, Propagation, Touch, TouchEvent,
};

/// Scrollable page root.
pub(crate) const ROOT: ElementId = ElementId(0);
/// `<div role="button">` at (0, 0)–(100, 40).
pub(crate) const BUTTON: ElementId = ElementId(1);
/// A `<span>` inside [`BUTTON`].
pub(crate) const LABEL: ElementId = ElementId(2);
/// Unrelated element away from the others.
pub(crate) const OUTSIDE: ElementId = ElementId(3);
/// `<a href>`.
pub(crate) const LINK: ElementId = ElementId(4);
/// `<a href role="button">`.
pub(crate) const LINK_BUTTON: ElementId = ElementId(5);
/// `<div draggable>`.
pub(crate) const DRAGGABLE: ElementId = ElementId(6);
/// `<input type="text">`.
pub(crate) const TEXT_INPUT: ElementId = ElementId(7);
/// `<input type="checkbox">`.
pub(crate) const CHECKBOX: ElementId = ElementId(8);

/// Inside [`BUTTON`] and [`LABEL`].
pub(crate) const INSIDE: Point = Point::new(20.0, 20.0);
/// Right of [`BUTTON`], not over any element but the root.
pub(crate) const AWAY: Point = Point::new(150.0, 20.0);

struct Node {
    parent: Option<ElementId>,
    rect: Rect,
    info: ElementInfo,
}

/// A tiny document recording everything the engine does to it.
pub(crate) struct FakeDom {
    nodes: HashMap<ElementId, Node>,
    pub(crate) press_events: RefCell<Vec<PressEvent>>,
    pub(crate) synthetic: RefCell<Vec<NativeEvent>>,
    pub(crate) links: RefCell<Vec<(ElementId, Modifiers)>>,
    pub(crate) focused: RefCell<Vec<(ElementId, FocusOptions)>>,
    pub(crate) user_select: RefCell<HashMap<SelectionTarget, String>>,
    pub(crate) scroll: RefCell<HashMap<ElementId, Vec2>>,
    /// Listeners on the press events opt out of stopping propagation.
    pub(crate) continue_propagation: Cell<bool>,
}

impl FakeDom {
    pub(crate) fn new() -> Rc<Self> {
        let mut nodes = HashMap::new();
        let mut add = |id, parent, rect, meta: ElementMeta<'static>| {
            nodes.insert(
                id,
                Node {
                    parent,
                    rect,
                    info: ElementInfo::classify(&meta),
                },
            );
        };
        let div = ElementMeta {
            tag: "div",
            ..ElementMeta::default()
        };
        add(ROOT, None, Rect::new(0.0, 0.0, 1000.0, 1000.0), div);
        add(
            BUTTON,
            Some(ROOT),
            Rect::new(0.0, 0.0, 100.0, 40.0),
            ElementMeta {
                role: Some("button"),
                ..div
            },
        );
        add(
            LABEL,
            Some(BUTTON),
            Rect::new(10.0, 10.0, 60.0, 30.0),
            ElementMeta {
                tag: "span",
                ..div
            },
        );
        add(
            OUTSIDE,
            Some(ROOT),
            Rect::new(200.0, 200.0, 300.0, 300.0),
            div,
        );
        add(
            LINK,
            Some(ROOT),
            Rect::new(0.0, 100.0, 100.0, 140.0),
            ElementMeta {
                tag: "a",
                has_href: true,
                ..div
            },
        );
        add(
            LINK_BUTTON,
            Some(ROOT),
            Rect::new(0.0, 150.0, 100.0, 190.0),
            ElementMeta {
                tag: "a",
                has_href: true,
                role: Some("button"),
                ..div
            },
        );
        add(
            DRAGGABLE,
            Some(ROOT),
            Rect::new(0.0, 200.0, 100.0, 240.0),
            ElementMeta {
                draggable: true,
                ..div
            },
        );
        add(
            TEXT_INPUT,
            Some(ROOT),
            Rect::new(0.0, 250.0, 100.0, 290.0),
            ElementMeta {
                tag: "input",
                input_type: Some("text"),
                ..div
            },
        );
        add(
            CHECKBOX,
            Some(ROOT),
            Rect::new(0.0, 300.0, 20.0, 320.0),
            ElementMeta {
                tag: "input",
                input_type: Some("checkbox"),
                ..div
            },
        );

        let mut user_select = HashMap::new();
        user_select.insert(SelectionTarget::Document, "auto".to_string());
        user_select.insert(SelectionTarget::Element(BUTTON), "text".to_string());
        let mut scroll = HashMap::new();
        scroll.insert(ROOT, Vec2::new(0.0, 120.0));

        Rc::new(Self {
            nodes,
            press_events: RefCell::default(),
            synthetic: RefCell::default(),
            links: RefCell::default(),
            focused: RefCell::default(),
            user_select: RefCell::new(user_select),
            scroll: RefCell::new(scroll),
            continue_propagation: Cell::new(false),
        })
    }

    /// Press event types in order.
    pub(crate) fn kinds(&self) -> Vec<PressEventType> {
        self.press_events.borrow().iter().map(|e| e.kind).collect()
    }

    /// Press event types with their pointer types, in order.
    pub(crate) fn log(&self) -> Vec<(PressEventType, PointerType)> {
        self.press_events
            .borrow()
            .iter()
            .map(|e| (e.kind, e.pointer_type))
            .collect()
    }

    pub(crate) fn clear(&self) {
        self.press_events.borrow_mut().clear();
        self.synthetic.borrow_mut().clear();
        self.focused.borrow_mut().clear();
    }

    pub(crate) fn selection_of(&self, target: SelectionTarget) -> String {
        self.user_select(target)
    }
}

impl ElementTree for FakeDom {
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn element_info(&self, element: ElementId) -> ElementInfo {
        self.nodes
            .get(&element)
            .map(|n| n.info)
            .unwrap_or_default()
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.nodes.get(&element).map_or(Rect::ZERO, |n| n.rect)
    }
}

impl FocusHost for FakeDom {
    fn focus(&self, element: ElementId, options: FocusOptions) {
        self.focused.borrow_mut().push((element, options));
        if !options.prevent_scroll {
            // Focusing scrolls every container to reveal the element.
            for offset in self.scroll.borrow_mut().values_mut() {
                *offset = Vec2::ZERO;
            }
        }
    }

    fn scrollable_ancestors(&self, element: ElementId) -> Vec<ElementId> {
        let scroll = self.scroll.borrow();
        let mut out = Vec::new();
        let mut current = self.nodes.get(&element).and_then(|n| n.parent);
        while let Some(id) = current {
            if scroll.contains_key(&id) {
                out.push(id);
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        out
    }

    fn scroll_position(&self, element: ElementId) -> Vec2 {
        self.scroll
            .borrow()
            .get(&element)
            .copied()
            .unwrap_or(Vec2::ZERO)
    }

    fn set_scroll_position(&self, element: ElementId, position: Vec2) {
        self.scroll.borrow_mut().insert(element, position);
    }
}

impl SelectionHost for FakeDom {
    fn user_select(&self, target: SelectionTarget) -> String {
        self.user_select
            .borrow()
            .get(&target)
            .cloned()
            .unwrap_or_default()
    }

    fn set_user_select(&self, target: SelectionTarget, value: &str) {
        self.user_select
            .borrow_mut()
            .insert(target, value.to_string());
    }
}

impl EventSink for FakeDom {
    fn dispatch_press_event(&self, event: &PressEvent, propagation: &mut Propagation) {
        self.press_events.borrow_mut().push(*event);
        if self.continue_propagation.get() {
            propagation.continue_propagation();
        }
    }

    fn dispatch_synthetic(&self, event: &NativeEvent) {
        self.synthetic.borrow_mut().push(event.clone());
    }

    fn open_link(&self, anchor: ElementId, modifiers: Modifiers) {
        self.links.borrow_mut().push((anchor, modifiers));
    }
}

/// A capability probe with fixed answers.
#[derive(Default)]
pub(crate) struct FakeProbe {
    pub(crate) pointer_events: bool,
    pub(crate) mac: bool,
    pub(crate) ios: bool,
    pub(crate) android: bool,
    pub(crate) prevent_scroll: Option<bool>,
}

impl CapabilityProbe for FakeProbe {
    fn supports_pointer_events(&self) -> bool {
        self.pointer_events
    }
    fn is_mac(&self) -> bool {
        self.mac
    }
    fn is_ios(&self) -> bool {
        self.ios
    }
    fn is_android(&self) -> bool {
        self.android
    }
    fn probe_prevent_scroll(&self) -> Result<bool, ProbeError> {
        self.prevent_scroll.ok_or_else(|| ProbeError::Rejected {
            capability: "preventScroll",
            reason: "focus options getter threw".to_string(),
        })
    }
}

pub(crate) fn pointer_platform() -> Platform {
    Platform {
        pointer_events: true,
        prevent_scroll: true,
        ..Platform::default()
    }
}

pub(crate) fn touch_platform() -> Platform {
    Platform {
        prevent_scroll: true,
        ..Platform::default()
    }
}

pub(crate) fn mac_platform() -> Platform {
    Platform {
        mac: true,
        ..pointer_platform()
    }
}

/// An engine bound to `element`.
pub(crate) fn bound(
    dom: &Rc<FakeDom>,
    platform: Platform,
    element: ElementId,
    config: PressConfig,
) -> PressEngine<FakeDom> {
    let interactions = Interactions::with_platform(dom.clone(), platform);
    let mut engine = interactions.press(config);
    engine.attach(element).unwrap();
    engine
}

/// An engine bound to [`BUTTON`].
pub(crate) fn button(
    dom: &Rc<FakeDom>,
    platform: Platform,
    config: PressConfig,
) -> PressEngine<FakeDom> {
    bound(dom, platform, BUTTON, config)
}

pub(crate) fn pointer(target: ElementId, id: i32, at: Point) -> PointerEvent {
    PointerEvent::new(target, id, PointerType::Mouse, at)
}

pub(crate) fn pointer_down(target: ElementId, at: Point) -> NativeEvent {
    NativeEvent::PointerDown(pointer(target, 1, at))
}

pub(crate) fn pointer_move(target: ElementId, at: Point) -> NativeEvent {
    NativeEvent::PointerMove(pointer(target, 1, at))
}

pub(crate) fn pointer_up(target: ElementId, at: Point) -> NativeEvent {
    NativeEvent::PointerUp(pointer(target, 1, at))
}

pub(crate) fn mouse(target: ElementId, at: Point) -> MouseEvent {
    MouseEvent::new(target, at)
}

pub(crate) fn click(target: ElementId) -> NativeEvent {
    NativeEvent::Click(mouse(target, INSIDE))
}

pub(crate) fn touch_start(target: ElementId, id: i64, at: Point) -> NativeEvent {
    NativeEvent::TouchStart(TouchEvent::single(target, Touch::new(id, at)))
}

pub(crate) fn touch_move(target: ElementId, id: i64, at: Point) -> NativeEvent {
    NativeEvent::TouchMove(TouchEvent::single(target, Touch::new(id, at)))
}

pub(crate) fn touch_end(target: ElementId, id: i64, at: Point) -> NativeEvent {
    NativeEvent::TouchEnd(TouchEvent::lifted(target, Touch::new(id, at)))
}

pub(crate) fn key_down(target: ElementId, key: &str, code: &str) -> NativeEvent {
    NativeEvent::KeyDown(KeyboardEvent::new(target, key, code))
}

pub(crate) fn key_up(target: ElementId, key: &str, code: &str) -> NativeEvent {
    NativeEvent::KeyUp(KeyboardEvent::new(target, key, code))
}

/// A keydown with Meta held.
pub(crate) fn meta_key_down(target: ElementId, key: &str, code: &str) -> NativeEvent {
    let event = KeyboardEvent::new(target, key, code);
    NativeEvent::KeyDown(event.with_modifiers(Modifiers::META))
}

/// A keyup with Meta held.
pub(crate) fn meta_key_up(target: ElementId, key: &str, code: &str) -> NativeEvent {
    let event = KeyboardEvent::new(target, key, code);
    NativeEvent::KeyUp(event.with_modifiers(Modifiers::META))
}

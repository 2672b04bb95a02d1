// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press lifecycles on platforms with separate mouse and touch events.

mod common;

use common::*;
use understory_press::host::SelectionTarget;
use understory_press::{
    EventEffects, EventKind, InputMode, NativeEvent, PointerType, PressConfig,
    PressEventType::{Press, PressEnd, PressStart, PressUp},
    Touch, TouchEvent,
};

#[test]
fn fallback_mode_listens_to_mouse_and_touch() {
    let dom = FakeDom::new();
    let engine = button(&dom, touch_platform(), PressConfig::default());
    assert_eq!(engine.mode(), InputMode::MouseTouch);
    assert!(engine.listened_events().contains(&EventKind::TouchStart));
    assert!(engine.listened_events().contains(&EventKind::MouseEnter));
    assert!(!engine.listened_events().contains(&EventKind::PointerDown));
}

#[test]
fn mouse_press_with_leave_and_enter() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    let effects = engine.dispatch(&NativeEvent::MouseDown(mouse(LABEL, INSIDE)));
    assert_eq!(
        effects,
        EventEffects::PREVENT_DEFAULT | EventEffects::STOP_PROPAGATION
    );
    assert_eq!(dom.selection_of(SelectionTarget::Element(BUTTON)), "none");
    engine.dispatch(&NativeEvent::MouseLeave(mouse(BUTTON, AWAY)));
    engine.dispatch(&NativeEvent::MouseEnter(mouse(BUTTON, INSIDE)));
    engine.dispatch(&NativeEvent::MouseUp(mouse(LABEL, INSIDE)));

    assert_eq!(
        dom.kinds(),
        [PressStart, PressEnd, PressStart, PressUp, PressEnd, Press]
    );
    assert!(dom.log().iter().all(|(_, ty)| *ty == PointerType::Mouse));
    assert_eq!(dom.selection_of(SelectionTarget::Element(BUTTON)), "text");
    assert!(engine.global_listeners().is_empty());
}

#[test]
fn mouse_release_outside_ends_without_press() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    engine.dispatch(&NativeEvent::MouseDown(mouse(LABEL, INSIDE)));
    engine.dispatch(&NativeEvent::MouseUp(mouse(ROOT, AWAY)));

    assert_eq!(dom.kinds(), [PressStart, PressEnd]);
    assert!(!engine.state().is_pressed);
}

#[test]
fn virtual_mouse_down_presses_as_virtual() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    let mut down = mouse(LABEL, INSIDE);
    down.detail = 0;
    engine.dispatch(&NativeEvent::MouseDown(down));
    engine.dispatch(&NativeEvent::MouseUp(mouse(LABEL, INSIDE)));
    // The trailing click belongs to the press that just ended.
    engine.dispatch(&click(LABEL));

    assert_eq!(
        dom.log(),
        [
            (PressStart, PointerType::Virtual),
            (PressUp, PointerType::Virtual),
            (PressEnd, PointerType::Virtual),
            (Press, PointerType::Virtual),
        ]
    );
}

#[test]
fn touch_press_swallows_emulated_mouse_events() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    let effects = engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    assert_eq!(effects, EventEffects::STOP_PROPAGATION);
    assert!(engine.state().ignore_emulated_mouse_events);
    engine.dispatch(&touch_end(LABEL, 7, INSIDE));
    assert_eq!(dom.kinds(), [PressStart, PressUp, PressEnd, Press]);
    assert!(dom.log().iter().all(|(_, ty)| *ty == PointerType::Touch));

    // What the browser emulates afterwards is ignored.
    engine.dispatch(&NativeEvent::MouseDown(mouse(LABEL, INSIDE)));
    engine.dispatch(&NativeEvent::MouseUp(mouse(LABEL, INSIDE)));
    engine.dispatch(&click(LABEL));
    assert_eq!(dom.kinds().len(), 4);
    assert!(!engine.state().ignore_emulated_mouse_events);

    // A real mouse press afterwards works normally.
    dom.clear();
    engine.dispatch(&NativeEvent::MouseDown(mouse(LABEL, INSIDE)));
    engine.dispatch(&NativeEvent::MouseUp(mouse(LABEL, INSIDE)));
    assert_eq!(
        dom.log(),
        [
            (PressStart, PointerType::Mouse),
            (PressUp, PointerType::Mouse),
            (PressEnd, PointerType::Mouse),
            (Press, PointerType::Mouse),
        ]
    );
}

#[test]
fn mouse_press_after_touch_ended_off_target() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    engine.dispatch(&touch_move(LABEL, 7, AWAY));
    engine.dispatch(&touch_end(LABEL, 7, AWAY));
    // No mouse events are emulated for a touch lifted away from the element.
    assert!(!engine.state().ignore_emulated_mouse_events);

    engine.dispatch(&NativeEvent::MouseDown(mouse(LABEL, INSIDE)));
    engine.dispatch(&NativeEvent::MouseUp(mouse(LABEL, INSIDE)));
    assert_eq!(
        dom.log(),
        [
            (PressStart, PointerType::Touch),
            (PressEnd, PointerType::Touch),
            (PressStart, PointerType::Mouse),
            (PressUp, PointerType::Mouse),
            (PressEnd, PointerType::Mouse),
            (Press, PointerType::Mouse),
        ]
    );
}

#[test]
fn emulated_mouse_up_clears_the_guard_without_a_click() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    engine.dispatch(&touch_end(LABEL, 7, INSIDE));
    let effects = engine.dispatch(&NativeEvent::MouseDown(mouse(LABEL, INSIDE)));
    assert!(effects.contains(EventEffects::STOP_PROPAGATION));
    assert_eq!(engine.global_listeners().len(), 1);
    engine.dispatch(&NativeEvent::MouseUp(mouse(LABEL, INSIDE)));
    assert!(!engine.state().ignore_emulated_mouse_events);
    assert!(engine.global_listeners().is_empty());
    assert_eq!(dom.kinds(), [PressStart, PressUp, PressEnd, Press]);
}

#[test]
fn touch_callbacks_may_opt_into_propagation() {
    let dom = FakeDom::new();
    let config = PressConfig::default()
        .with_on_press_start(|_, cx| cx.continue_propagation());
    let mut engine = button(&dom, touch_platform(), config);

    let effects = engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    assert!(!effects.contains(EventEffects::STOP_PROPAGATION));
    assert!(engine.state().is_pressed);
    assert_eq!(dom.kinds(), [PressStart]);
}

#[test]
fn touch_host_listeners_may_opt_into_propagation() {
    let dom = FakeDom::new();
    dom.continue_propagation.set(true);
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    let effects = engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    assert_eq!(effects, EventEffects::empty());
    let effects = engine.dispatch(&touch_end(LABEL, 7, INSIDE));
    assert_eq!(effects, EventEffects::empty());
    assert_eq!(dom.kinds(), [PressStart, PressUp, PressEnd, Press]);
}

#[test]
fn touch_moving_off_and_back() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    engine.dispatch(&touch_move(LABEL, 7, AWAY));
    engine.dispatch(&touch_move(LABEL, 7, INSIDE));
    engine.dispatch(&touch_end(LABEL, 7, AWAY));

    assert_eq!(dom.kinds(), [PressStart, PressEnd, PressStart, PressEnd]);
    assert!(!engine.state().is_pressed);
}

#[test]
fn other_fingers_do_not_affect_the_press() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    // A second touch starting on the element is ignored.
    engine.dispatch(&touch_start(LABEL, 8, INSIDE));
    assert_eq!(engine.state().active_pointer_id, Some(7));
    // Another finger moving away or lifting does not end the press.
    engine.dispatch(&touch_move(LABEL, 8, AWAY));
    engine.dispatch(&touch_end(LABEL, 8, AWAY));
    assert!(engine.is_pressed());

    engine.dispatch(&touch_end(LABEL, 7, INSIDE));
    assert_eq!(dom.kinds(), [PressStart, PressUp, PressEnd, Press]);
}

#[test]
fn touch_without_target_touches_is_ignored() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    let event = TouchEvent::lifted(LABEL, Touch::new(7, INSIDE));
    let effects = engine.dispatch(&NativeEvent::TouchStart(event));
    assert_eq!(effects, EventEffects::STOP_PROPAGATION);
    assert!(dom.kinds().is_empty());
}

#[test]
fn touch_cancel_ends_and_clears_emulation_guard() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    let cancel = TouchEvent::lifted(LABEL, Touch::new(7, INSIDE));
    engine.dispatch(&NativeEvent::TouchCancel(cancel));

    assert_eq!(dom.kinds(), [PressStart, PressEnd]);
    assert!(!engine.state().ignore_emulated_mouse_events);
    assert!(!engine.holds_selection_lock());
}

#[test]
fn scrolling_the_container_cancels_a_touch() {
    let dom = FakeDom::new();
    let mut engine = button(&dom, touch_platform(), PressConfig::default());

    engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    // Scrolling something unrelated changes nothing.
    engine.dispatch(&NativeEvent::Scroll(OUTSIDE));
    assert!(engine.is_pressed());

    engine.dispatch(&NativeEvent::Scroll(ROOT));
    assert_eq!(dom.kinds(), [PressStart, PressEnd]);
    assert!(engine.global_listeners().is_empty());

    // The lifted finger after the cancel is ignored.
    engine.dispatch(&touch_end(LABEL, 7, INSIDE));
    assert_eq!(dom.kinds().len(), 2);

    // A real mouse press works immediately.
    engine.dispatch(&NativeEvent::MouseDown(mouse(LABEL, INSIDE)));
    assert_eq!(dom.log().last(), Some(&(PressStart, PointerType::Mouse)));
}

#[test]
fn touch_cancel_on_exit() {
    let dom = FakeDom::new();
    let config = PressConfig::default()
        .with_should_cancel_on_pointer_exit(true);
    let mut engine = button(&dom, touch_platform(), config);

    engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    engine.dispatch(&touch_move(LABEL, 7, AWAY));
    engine.dispatch(&touch_move(LABEL, 7, INSIDE));
    engine.dispatch(&touch_end(LABEL, 7, INSIDE));

    assert_eq!(dom.kinds(), [PressStart, PressEnd]);
}

#[test]
fn ios_locks_selection_on_the_document() {
    let dom = FakeDom::new();
    let platform = understory_press::Platform {
        ios: true,
        ..touch_platform()
    };
    let mut engine = button(&dom, platform, PressConfig::default());

    engine.dispatch(&touch_start(LABEL, 7, INSIDE));
    assert_eq!(dom.selection_of(SelectionTarget::Document), "none");
    assert_eq!(dom.selection_of(SelectionTarget::Element(BUTTON)), "text");
    engine.dispatch(&touch_end(LABEL, 7, INSIDE));
    assert_eq!(dom.selection_of(SelectionTarget::Document), "auto");
}

//! End-to-end gesture flows for the toggle switch.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use togglekit_core::{Event, MouseButton, Point, Rect, TouchId, Widget};
use togglekit_widgets::{GeometryMode, ToggleSwitch};

const TRACK: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 90.0,
    height: 28.0,
};

fn switch(states: &[&str]) -> ToggleSwitch {
    let mut toggle = ToggleSwitch::new(states.iter().copied())
        .unwrap()
        .handle_width(30.0);
    toggle.layout(TRACK);
    toggle
}

fn down(x: f32) -> Event {
    Event::MouseDown {
        position: Point::new(x, 14.0),
        button: MouseButton::Left,
    }
}

fn mv(x: f32) -> Event {
    Event::MouseMove {
        position: Point::new(x, 14.0),
    }
}

fn up(x: f32) -> Event {
    Event::MouseUp {
        position: Point::new(x, 14.0),
        button: MouseButton::Left,
    }
}

/// Settle any running transition.
fn settle(toggle: &mut ToggleSwitch) {
    while toggle.is_animating() {
        toggle.update(0.1);
    }
}

#[test]
fn three_state_drag_lands_on_middle() {
    // 90px track, 30px handle, 3 states: a +50px drag from the left stop
    // rounds to the middle state.
    let mut toggle = switch(&["off", "mid", "on"]);
    let names = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&names);
    toggle.on_toggle(move |change| {
        sink.lock().unwrap().push(change.state.clone());
    });

    toggle.event(&down(10.0));
    toggle.event(&mv(35.0));
    toggle.event(&mv(60.0));
    assert_eq!(toggle.committed_index(), 0);
    assert_eq!(toggle.candidate_index(), Some(1));

    toggle.event(&up(60.0));
    settle(&mut toggle);

    assert_eq!(toggle.current_state(), "mid");
    assert_eq!(toggle.handle_position(), 30.0);
    assert_eq!(*names.lock().unwrap(), vec!["mid".to_owned()]);
}

#[test]
fn two_state_tap_toggles_back_and_forth() {
    let mut toggle = switch(&["off", "on"]);

    toggle.event(&down(10.0));
    toggle.event(&up(11.0));
    settle(&mut toggle);
    assert_eq!(toggle.current_state(), "on");
    assert_eq!(toggle.handle_position(), 60.0);

    toggle.event(&down(65.0));
    toggle.event(&up(66.0));
    settle(&mut toggle);
    assert_eq!(toggle.current_state(), "off");
    assert_eq!(toggle.handle_position(), 0.0);
}

#[test]
fn overshoot_drags_pin_to_boundary_states() {
    let mut toggle = switch(&["low", "mid", "high"]);

    toggle.event(&down(10.0));
    toggle.event(&mv(400.0));
    assert_eq!(toggle.handle_position(), 60.0);
    toggle.event(&up(400.0));
    settle(&mut toggle);
    assert_eq!(toggle.current_state(), "high");

    toggle.event(&down(70.0));
    toggle.event(&mv(-400.0));
    assert_eq!(toggle.handle_position(), 0.0);
    toggle.event(&up(-400.0));
    settle(&mut toggle);
    assert_eq!(toggle.current_state(), "low");
}

#[test]
fn vertical_swipe_does_not_move_the_handle() {
    let mut toggle = switch(&["off", "mid", "on"]);

    toggle.event(&down(10.0));
    toggle.event(&Event::MouseMove {
        position: Point::new(25.0, 120.0),
    });
    assert_eq!(toggle.handle_position(), 0.0);
    assert_eq!(toggle.candidate_index(), None);

    // The horizontal travel still counts at release.
    toggle.event(&Event::MouseUp {
        position: Point::new(25.0, 120.0),
        button: MouseButton::Left,
    });
    settle(&mut toggle);
    assert_eq!(toggle.current_state(), "off");
}

#[test]
fn pinch_aborts_the_drag() {
    let mut toggle = switch(&["off", "mid", "on"]);

    toggle.event(&Event::TouchStart {
        id: TouchId(1),
        position: Point::new(10.0, 14.0),
    });
    toggle.event(&Event::TouchMove {
        id: TouchId(1),
        position: Point::new(55.0, 14.0),
    });
    assert_eq!(toggle.handle_position(), 45.0);

    toggle.event(&Event::TouchStart {
        id: TouchId(2),
        position: Point::new(80.0, 14.0),
    });
    assert!(!toggle.is_dragging());
    assert_eq!(toggle.handle_position(), 0.0);
    assert_eq!(toggle.committed_index(), 0);

    // The lifted first finger no longer commits anything.
    toggle.event(&Event::TouchEnd {
        id: TouchId(1),
        position: Point::new(55.0, 14.0),
    });
    assert_eq!(toggle.committed_index(), 0);
}

#[test]
fn touch_cancel_reverts_silently() {
    let mut toggle = switch(&["off", "on"]);
    let fired = Arc::new(AtomicU32::new(0));
    let f = Arc::clone(&fired);
    toggle.on_toggle(move |_| {
        f.fetch_add(1, Ordering::SeqCst);
    });

    toggle.event(&Event::TouchStart {
        id: TouchId(3),
        position: Point::new(10.0, 14.0),
    });
    toggle.event(&Event::TouchMove {
        id: TouchId(3),
        position: Point::new(60.0, 14.0),
    });
    toggle.event(&Event::TouchCancel { id: TouchId(3) });

    assert_eq!(toggle.current_state(), "off");
    assert_eq!(toggle.handle_position(), 0.0);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn label_click_on_disabled_state_is_vetoed() {
    let mut toggle = ToggleSwitch::new(["eco", "normal", "sport"])
        .unwrap()
        .handle_width(30.0)
        .state_disabled(2, true);
    toggle.layout(TRACK);

    toggle.event(&down(80.0));
    assert_eq!(toggle.current_state(), "eco");

    toggle.event(&down(45.0));
    settle(&mut toggle);
    assert_eq!(toggle.current_state(), "normal");
}

#[test]
fn rapid_label_clicks_notify_once_for_the_final_state() {
    let mut toggle = switch(&["off", "mid", "on"]);
    let names = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&names);
    toggle.on_toggle(move |change| {
        sink.lock().unwrap().push(change.state.clone());
    });

    // Both clicks land before any frame advances; only the second commit's
    // notification survives.
    toggle.event(&down(45.0));
    toggle.event(&down(80.0));
    settle(&mut toggle);

    assert_eq!(toggle.current_state(), "on");
    assert_eq!(*names.lock().unwrap(), vec!["on".to_owned()]);
}

#[test]
fn set_state_drives_the_same_pipeline_as_gestures() {
    let mut toggle = switch(&["a", "b", "c"]);
    let fired = Arc::new(AtomicU32::new(0));
    let f = Arc::clone(&fired);
    toggle.on_toggle(move |_| {
        f.fetch_add(1, Ordering::SeqCst);
    });

    assert!(toggle.set_state("c", true).unwrap());
    assert!(toggle.is_animating());
    settle(&mut toggle);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(toggle.handle_position(), 60.0);

    // Re-committing the current state is a no-op.
    assert!(!toggle.set_state("c", true).unwrap());
    settle(&mut toggle);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn destroyed_switch_ignores_everything() {
    let mut toggle = switch(&["off", "on"]);
    let fired = Arc::new(AtomicU32::new(0));
    let f = Arc::clone(&fired);
    toggle.on_toggle(move |_| {
        f.fetch_add(1, Ordering::SeqCst);
    });

    toggle.destroy();

    toggle.event(&down(10.0));
    toggle.event(&up(11.0));
    toggle.update(1.0);
    assert!(!toggle.set_state("on", false).unwrap());

    assert_eq!(toggle.current_state(), "off");
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn segmented_mode_uses_segment_stops() {
    let mut toggle = ToggleSwitch::new(["a", "b", "c"])
        .unwrap()
        .handle_width(30.0)
        .mode(GeometryMode::Segmented)
        .initial_state("b");
    toggle.layout(TRACK);
    assert_eq!(toggle.handle_position(), 30.0);

    toggle.set_state("c", false).unwrap();
    // Segment stop 60 coincides with max travel on this track.
    assert_eq!(toggle.handle_position(), 60.0);
}

#[test]
fn relayout_keeps_handle_on_committed_stop() {
    let mut toggle = switch(&["off", "mid", "on"]);
    toggle.set_state("mid", false).unwrap();
    assert_eq!(toggle.handle_position(), 30.0);

    // Resize: stops move, the handle follows its committed state.
    toggle.layout(Rect::new(0.0, 0.0, 180.0, 28.0));
    assert_eq!(toggle.handle_position(), 75.0); // 90 - 15
}

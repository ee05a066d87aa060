//! Drag-and-drop coordinator.

mod common;

use common::{DragProbe, log, take};
use vulpes_ui::{
    ControlId, CursorIcon, IVec2, MouseButton, Package, Rect, SkinColors, UiEvent,
    testing::{RenderCall, TestHarness},
};

struct Scene {
    h: TestHarness,
    log: common::Log,
    source: ControlId,
    target: ControlId,
    label: ControlId,
}

/// Source at (0, 0, 50, 50) carrying an "item" package, and a target at
/// (100, 0, 100, 100) accepting it with a non-accepting label in its corner.
fn scene() -> Scene {
    let log = log();
    let mut h = TestHarness::new(300, 300);
    let root = h.root();

    let source = h.add(root, DragProbe::new("source", &log));
    h.canvas.set_bounds(source, Rect::new(0, 0, 50, 50));
    h.canvas.set_drag_package(source, Package::new("item"));

    let target = h.add(root, DragProbe::new("target", &log));
    h.canvas.set_bounds(target, Rect::new(100, 0, 100, 100));
    h.canvas.accept_package(target, "item");

    let label = h.add(target, DragProbe::new("label", &log));
    h.canvas.set_bounds(label, Rect::new(0, 0, 30, 30));

    h.frame();
    Scene {
        h,
        log,
        source,
        target,
        label,
    }
}

/// Press on the source at (10, 10) and move far enough to start dragging.
fn start_drag(s: &mut Scene) {
    s.h.move_mouse(10, 10);
    s.h.press(MouseButton::Left);
    s.h.move_mouse(20, 10);
    assert!(s.h.canvas.is_dragging());
}

#[test]
fn test_threshold_is_five_manhattan_units() {
    let mut s = scene();
    s.h.move_mouse(10, 10);
    s.h.press(MouseButton::Left);
    assert_eq!(s.h.canvas.drag_and_drop().pending(), Some(s.source));

    s.h.move_mouse(12, 12);
    assert!(!s.h.canvas.is_dragging());

    s.h.move_mouse(13, 12);
    assert!(s.h.canvas.is_dragging());
    assert_eq!(s.h.canvas.drag_source(), Some(s.source));
    assert_eq!(s.h.canvas.mouse_focus(), None);

    let package = s.h.canvas.drag_and_drop().package().unwrap();
    assert_eq!(package.hold_offset, IVec2::new(10, 10));
    assert_eq!(package.draw_control, Some(s.source));
    assert!(
        s.h.canvas
            .drain_events()
            .contains(&UiEvent::DragStarted { source: s.source })
    );
    assert_eq!(take(&s.log), ["source:start"]);
}

#[test]
fn test_press_without_package_never_drags() {
    let mut s = scene();
    s.h.move_mouse(150, 50);
    s.h.press(MouseButton::Left);
    assert_eq!(s.h.canvas.drag_and_drop().pending(), None);
    s.h.move_mouse(250, 250);
    assert!(!s.h.canvas.is_dragging());
}

#[test]
fn test_veto_cancels_start() {
    let mut s = scene();
    s.h.canvas.widget_mut::<DragProbe>(s.source).unwrap().veto = true;
    s.h.move_mouse(10, 10);
    s.h.press(MouseButton::Left);
    s.h.move_mouse(30, 10);
    assert!(!s.h.canvas.is_dragging());
    assert_eq!(s.h.canvas.drag_source(), None);
}

#[test]
fn test_enter_and_leave_once_per_acceptor() {
    let mut s = scene();
    start_drag(&mut s);
    take(&s.log);
    s.h.canvas.drain_events();

    // Over the label: the walk climbs to the accepting target.
    assert_eq!(s.h.canvas.control_at(IVec2::new(110, 10)), Some(s.label));
    s.h.move_mouse(110, 10);
    assert_eq!(s.h.canvas.drag_and_drop().hovered(), Some(s.target));
    s.h.move_mouse(150, 50);
    s.h.move_mouse(111, 11);
    s.h.move_mouse(250, 250);
    assert_eq!(s.h.canvas.drag_and_drop().hovered(), None);

    assert_eq!(take(&s.log), ["target:dragenter", "target:dragleave"]);
    let drag_events: Vec<_> = s
        .h
        .canvas
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, UiEvent::DragEnter { .. } | UiEvent::DragLeave { .. }))
        .collect();
    assert_eq!(
        drag_events,
        [
            UiEvent::DragEnter { target: s.target },
            UiEvent::DragLeave { target: s.target },
        ]
    );
}

#[test]
fn test_source_is_never_its_own_acceptor() {
    let mut s = scene();
    s.h.canvas.accept_package(s.source, "item");
    let handle = s.h.add(s.source, DragProbe::new("handle", &s.log));
    s.h.canvas.set_bounds(handle, Rect::new(30, 30, 10, 10));
    s.h.frame();

    start_drag(&mut s);
    s.h.move_mouse(25, 10);
    assert_eq!(s.h.canvas.drag_and_drop().hovered(), None);
    s.h.move_mouse(35, 35);
    assert_eq!(s.h.canvas.control_at(IVec2::new(35, 35)), Some(handle));
    assert_eq!(s.h.canvas.drag_and_drop().hovered(), None);
}

#[test]
fn test_drop_reparents_source() {
    let mut s = scene();
    start_drag(&mut s);
    s.h.move_mouse(150, 50);
    take(&s.log);
    s.h.canvas.drain_events();

    assert!(s.h.release(MouseButton::Left));
    assert!(!s.h.canvas.is_dragging());
    assert_eq!(s.h.canvas.parent(s.source), Some(s.target));
    assert_eq!(
        take(&s.log),
        ["target:dragleave", "target:drop(item)", "source:end(true)"]
    );
    assert!(s.h.canvas.drain_events().contains(&UiEvent::Dropped {
        source: s.source,
        target: Some(s.target),
        success: true,
    }));
}

#[test]
fn test_drop_without_acceptor_fails() {
    let mut s = scene();
    let root = s.h.root();
    start_drag(&mut s);
    s.h.move_mouse(250, 250);
    s.h.canvas.drain_events();

    assert!(s.h.release(MouseButton::Left));
    assert_eq!(s.h.canvas.parent(s.source), Some(root));
    assert!(s.h.canvas.drain_events().contains(&UiEvent::Dropped {
        source: s.source,
        target: None,
        success: false,
    }));
}

#[test]
fn test_deleting_source_abandons_drag() {
    let mut s = scene();
    start_drag(&mut s);
    s.h.canvas.delayed_delete(s.source).unwrap();
    assert!(s.h.canvas.is_dragging());
    s.h.frame();
    assert!(!s.h.canvas.is_dragging());
    assert_eq!(s.h.canvas.drag_source(), None);
}

#[test]
fn test_deleting_target_clears_hover() {
    let mut s = scene();
    start_drag(&mut s);
    s.h.move_mouse(150, 50);
    s.h.canvas.delayed_delete(s.target).unwrap();
    s.h.frame();
    assert!(s.h.canvas.is_dragging());
    assert_eq!(s.h.canvas.drag_and_drop().hovered(), None);
}

#[test]
fn test_cursor_shows_rejection_without_acceptor() {
    let mut s = scene();
    start_drag(&mut s);
    assert_eq!(s.h.canvas.cursor(), CursorIcon::NotAllowed);
    s.h.move_mouse(150, 50);
    assert_eq!(s.h.canvas.cursor(), CursorIcon::Default);
}

#[test]
fn test_ghost_drawn_at_hold_offset() {
    let mut s = scene();
    s.h.canvas.widget_mut::<DragProbe>(s.source).unwrap().plain_ghost = true;
    start_drag(&mut s);
    s.h.move_mouse(100, 200);

    let ghost = SkinColors::default().drag_ghost;
    let calls = s.h.frame();
    let rects: Vec<_> = calls
        .iter()
        .filter_map(|call| match call {
            RenderCall::FilledRect { rect, color, .. } if *color == ghost => Some(*rect),
            _ => None,
        })
        .collect();
    assert_eq!(rects, [Rect::new(90, 190, 50, 50)]);
}

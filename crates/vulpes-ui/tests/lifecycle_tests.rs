//! Deferred deletion, stale handles and per-frame hooks.

mod common;

use std::any::Any;

use common::{Log, Probe, log, take};
use vulpes_ui::{
    ControlId, Ctx, IVec2, MouseButton, Panel, Rect, UiError, UiEvent, Widget,
    testing::TestHarness,
};

/// Deletes itself when clicked.
struct SelfDestruct;

impl Widget for SelfDestruct {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_mouse_clicked(&mut self, ctx: &mut Ctx<'_>, _button: MouseButton, _position: IVec2) {
        let id = ctx.id();
        ctx.delayed_delete(id).unwrap();
    }
}

/// Logs update, menu, touch and bounds hooks.
struct Hooks {
    name: &'static str,
    log: Log,
    menu: bool,
    stop_touch: bool,
}

impl Hooks {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            menu: false,
            stop_touch: false,
        }
    }

    fn record(&self, entry: &str) {
        self.log.borrow_mut().push(format!("{}:{entry}", self.name));
    }
}

impl Widget for Hooks {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn update(&mut self, _ctx: &mut Ctx<'_>) {
        self.record("update");
    }

    fn is_menu_component(&self) -> bool {
        self.menu
    }

    fn close_menus(&mut self, _ctx: &mut Ctx<'_>) {
        if self.menu {
            self.record("close");
        }
    }

    fn on_child_touched(&mut self, _ctx: &mut Ctx<'_>, _child: ControlId) -> bool {
        self.record("touched");
        !self.stop_touch
    }

    fn on_bounds_changed(&mut self, ctx: &mut Ctx<'_>, old: Rect) {
        let new = ctx.control().bounds();
        self.record(&format!("bounds {}x{} -> {}x{}", old.width, old.height, new.width, new.height));
    }
}

#[test]
fn test_delete_from_click_handler() {
    let mut h = TestHarness::new(200, 200);
    let doomed = h.add(h.root(), SelfDestruct);
    h.canvas.set_bounds(doomed, Rect::new(0, 0, 50, 50));
    h.frame();

    h.click_at(10, 10);
    assert!(h.canvas.contains(doomed));
    assert!(h.canvas.is_queued_for_deletion(doomed));
    assert!(h.canvas.children(h.root()).is_empty());
    assert_ne!(h.canvas.hovered(), Some(doomed));

    h.frame();
    assert!(!h.canvas.contains(doomed));
    assert_eq!(h.canvas.keyboard_focus(), Some(h.root()));
}

#[test]
fn test_destroyed_reported_once_per_control() {
    let mut h = TestHarness::new(200, 200);
    let parent = h.add(h.root(), Panel::default());
    let a = h.add(parent, Panel::default());
    let b = h.add(a, Panel::default());
    h.canvas.drain_events();

    h.canvas.delayed_delete(parent).unwrap();
    h.frame();
    h.frame();

    let destroyed: Vec<_> = h
        .canvas
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            UiEvent::Destroyed(id) => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(destroyed, [parent, a, b]);
}

#[test]
fn test_stale_ids_are_rejected() {
    let mut h = TestHarness::new(200, 200);
    let gone = h.add(h.root(), Panel::default());
    h.canvas.delayed_delete(gone).unwrap();
    h.frame();

    assert!(h.canvas.control(gone).is_none());
    assert!(!h.canvas.set_bounds(gone, Rect::new(0, 0, 5, 5)));
    assert_eq!(h.canvas.delayed_delete(gone), Err(UiError::StaleControl(gone)));
    assert_eq!(
        h.canvas.add_control(gone, Panel::default()).err(),
        Some(UiError::StaleControl(gone))
    );

    let fresh = h.add(h.root(), Panel::default());
    assert_ne!(fresh, gone);
    assert!(h.canvas.control(gone).is_none());
}

#[test]
fn test_destroy_clears_hover_capture_and_focus() {
    let mut h = TestHarness::new(200, 200);
    let id = h.add(h.root(), Panel::default());
    h.canvas.set_bounds(id, Rect::new(0, 0, 50, 50));
    h.canvas.set_keyboard_input(id, true);
    h.frame();

    h.move_mouse(10, 10);
    h.press(MouseButton::Left);
    assert_eq!(h.canvas.hovered(), Some(id));
    assert_eq!(h.canvas.mouse_focus(), Some(id));
    assert_eq!(h.canvas.keyboard_focus(), Some(id));

    h.canvas.delayed_delete(id).unwrap();
    h.frame();
    assert_eq!(h.canvas.hovered(), None);
    assert_eq!(h.canvas.mouse_focus(), None);
    assert_eq!(h.canvas.keyboard_focus(), None);
}

#[test]
fn test_hidden_focus_is_dropped_next_frame() {
    let mut h = TestHarness::new(200, 200);
    let id = h.add(h.root(), Panel::default());
    h.canvas.set_keyboard_input(id, true);
    h.canvas.focus(id);
    h.frame();
    assert_eq!(h.canvas.keyboard_focus(), Some(id));

    h.canvas.hide(id);
    h.frame();
    assert_eq!(h.canvas.keyboard_focus(), None);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "queued for deletion twice")]
fn test_double_delete_asserts() {
    let mut h = TestHarness::new(200, 200);
    let id = h.add(h.root(), Panel::default());
    h.canvas.delayed_delete(id).unwrap();
    let _ = h.canvas.delayed_delete(id);
}

#[test]
fn test_reparenting_queued_control_keeps_it() {
    let mut h = TestHarness::new(200, 200);
    let a = h.add(h.root(), Panel::default());
    let b = h.add(h.root(), Panel::default());
    h.canvas.delayed_delete(a).unwrap();
    h.canvas.set_parent(a, b).unwrap();
    h.frame();
    assert!(h.canvas.contains(a));
    assert_eq!(h.canvas.parent(a), Some(b));
}

#[test]
fn test_update_runs_preorder_and_skips_hidden() {
    let log = log();
    let mut h = TestHarness::new(200, 200);
    let a = h.add(h.root(), Hooks::new("a", &log));
    h.add(a, Hooks::new("a1", &log));
    let b = h.add(h.root(), Hooks::new("b", &log));
    h.add(b, Hooks::new("b1", &log));
    h.canvas.hide(b);

    h.canvas.update_canvas();
    assert_eq!(take(&log), ["a:update", "a1:update"]);
}

/// Queues another control for deletion from its update hook.
struct Reaper {
    victim: Option<ControlId>,
}

impl Widget for Reaper {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn update(&mut self, ctx: &mut Ctx<'_>) {
        if let Some(victim) = self.victim.take() {
            ctx.delayed_delete(victim).unwrap();
        }
    }
}

#[test]
fn test_update_skips_sibling_deleted_earlier_in_pass() {
    let log = log();
    let mut h = TestHarness::new(200, 200);
    let root = h.root();
    let reaper = h.add(root, Reaper { victim: None });
    let victim = h.add(root, Hooks::new("victim", &log));
    h.canvas.widget_mut::<Reaper>(reaper).unwrap().victim = Some(victim);

    h.canvas.update_canvas();
    assert!(h.canvas.is_queued_for_deletion(victim));
    assert!(take(&log).is_empty());
}

#[test]
fn test_press_outside_menu_closes_menus() {
    let log = log();
    let mut h = TestHarness::new(200, 200);
    let mut menu_widget = Hooks::new("menu", &log);
    menu_widget.menu = true;
    let menu = h.add(h.root(), menu_widget);
    h.canvas.set_bounds(menu, Rect::new(0, 0, 50, 50));
    let item = h.add(menu, Probe::new("item", &log));
    h.canvas.set_bounds(item, Rect::new(0, 0, 20, 20));
    let other = h.add(h.root(), Probe::new("other", &log));
    h.canvas.set_bounds(other, Rect::new(100, 100, 50, 50));
    h.frame();

    h.click_at(5, 5);
    assert!(!take(&log).contains(&"menu:close".to_owned()));

    h.click_at(110, 110);
    assert!(take(&log).contains(&"menu:close".to_owned()));
}

#[test]
fn test_touch_bubbles_until_stopped() {
    let log = log();
    let mut h = TestHarness::new(200, 200);
    let mut outer = Hooks::new("outer", &log);
    outer.stop_touch = true;
    let outer = h.add(h.root(), outer);
    let middle = h.add(outer, Hooks::new("middle", &log));
    let leaf = h.add(middle, Panel::default());
    h.canvas.update_canvas();
    take(&log);

    h.canvas.touch(leaf);
    assert_eq!(take(&log), ["middle:touched", "outer:touched"]);
}

#[test]
fn test_bounds_hook_sees_old_and_new() {
    let log = log();
    let mut h = TestHarness::new(200, 200);
    let id = h.add(h.root(), Hooks::new("box", &log));
    h.canvas.set_size(id, 30, 40);
    assert_eq!(take(&log), ["box:bounds 10x10 -> 30x40"]);
}

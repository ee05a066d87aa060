//! Shared widgets for integration tests.

#![allow(dead_code)]

use std::{any::Any, cell::RefCell, rc::Rc};

use vulpes_ui::{Ctx, IVec2, Key, MouseButton, Package, Widget};

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Drain `log` and return its entries.
pub fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

/// Records every input and focus hook as `"name:hook"`.
pub struct Probe {
    pub name: &'static str,
    pub log: Log,
    pub consume_wheel: bool,
    pub consume_keys: bool,
    pub consume_chars: bool,
}

impl Probe {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            consume_wheel: false,
            consume_keys: false,
            consume_chars: false,
        }
    }

    pub fn consuming(mut self) -> Self {
        self.consume_wheel = true;
        self.consume_keys = true;
        self.consume_chars = true;
        self
    }

    fn record(&self, entry: impl std::fmt::Display) {
        self.log.borrow_mut().push(format!("{}:{entry}", self.name));
    }
}

impl Widget for Probe {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_mouse_entered(&mut self, _ctx: &mut Ctx<'_>) {
        self.record("enter");
    }

    fn on_mouse_left(&mut self, _ctx: &mut Ctx<'_>) {
        self.record("leave");
    }

    fn on_mouse_down(&mut self, _ctx: &mut Ctx<'_>, _button: MouseButton, position: IVec2) {
        self.record(format_args!("down@{},{}", position.x, position.y));
    }

    fn on_mouse_up(&mut self, _ctx: &mut Ctx<'_>, _button: MouseButton, _position: IVec2) {
        self.record("up");
    }

    fn on_mouse_clicked(&mut self, _ctx: &mut Ctx<'_>, _button: MouseButton, _position: IVec2) {
        self.record("click");
    }

    fn on_mouse_double_clicked(&mut self, _ctx: &mut Ctx<'_>, _button: MouseButton, _position: IVec2) {
        self.record("double");
    }

    fn on_mouse_wheel(&mut self, _ctx: &mut Ctx<'_>, delta: i32) -> bool {
        self.record(format_args!("wheel{delta}"));
        self.consume_wheel
    }

    fn on_key(&mut self, _ctx: &mut Ctx<'_>, key: Key, pressed: bool) -> bool {
        self.record(format_args!("key{key:?}{}", if pressed { "+" } else { "-" }));
        self.consume_keys
    }

    fn on_char(&mut self, _ctx: &mut Ctx<'_>, c: char) -> bool {
        self.record(format_args!("char{c}"));
        self.consume_chars
    }

    fn on_accelerator(&mut self, _ctx: &mut Ctx<'_>, action: &str) -> bool {
        self.record(format_args!("accel{action}"));
        true
    }

    fn on_keyboard_focus(&mut self, _ctx: &mut Ctx<'_>) {
        self.record("focus");
    }

    fn on_lost_keyboard_focus(&mut self, _ctx: &mut Ctx<'_>) {
        self.record("blur");
    }
}

/// Records drag hooks as `"name:hook"` and drops by reparenting the source.
pub struct DragProbe {
    pub name: &'static str,
    pub log: Log,
    /// Refuse to start dragging.
    pub veto: bool,
    /// Clear the package's draw control so the skin ghost is drawn instead.
    pub plain_ghost: bool,
}

impl DragProbe {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            veto: false,
            plain_ghost: false,
        }
    }

    fn record(&self, entry: impl std::fmt::Display) {
        self.log.borrow_mut().push(format!("{}:{entry}", self.name));
    }
}

impl Widget for DragProbe {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn drag_should_start(&mut self, _ctx: &mut Ctx<'_>) -> bool {
        !self.veto
    }

    fn drag_start(&mut self, _ctx: &mut Ctx<'_>, package: &mut Package, _position: IVec2) {
        if self.plain_ghost {
            package.draw_control = None;
        }
        self.record("start");
    }

    fn drag_end(&mut self, _ctx: &mut Ctx<'_>, success: bool, _position: IVec2) {
        self.record(format_args!("end({success})"));
    }

    fn drag_hover_enter(&mut self, _ctx: &mut Ctx<'_>, _package: &Package, _position: IVec2) {
        self.record("dragenter");
    }

    fn drag_hover_leave(&mut self, _ctx: &mut Ctx<'_>, _package: &Package) {
        self.record("dragleave");
    }

    fn drag_handle_drop(&mut self, ctx: &mut Ctx<'_>, package: &Package, _position: IVec2) -> bool {
        self.record(format_args!("drop({})", package.name));
        let target = ctx.id();
        match ctx.drag_source() {
            Some(source) => ctx.set_parent(source, target).is_ok(),
            None => false,
        }
    }
}

//! Input routing: hover, mouse capture, clicks, keys, text and the wheel.

use std::time::Duration;

use indexmap::IndexMap;
use tracing::trace;
use vulpes_core::{alloc::RandomState, math::IVec2, profiling::profile_function};

use super::Canvas;
use crate::{
    control::{Control, ControlId},
    event::{InputEvent, Key, Modifiers, MouseButton, UiEvent},
};

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    next_repeat: Duration,
    /// Control the key was delivered to when pressed.
    target: Option<ControlId>,
}

/// Keys currently held, in press order.
#[derive(Debug, Default)]
pub(crate) struct KeyRepeat {
    held: IndexMap<Key, HeldKey, RandomState>,
}

impl KeyRepeat {
    pub(crate) fn is_pressed(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    fn press(&mut self, key: Key, next_repeat: Duration, target: Option<ControlId>) {
        self.held.insert(key, HeldKey { next_repeat, target });
    }

    fn release(&mut self, key: Key) {
        self.held.shift_remove(&key);
    }

    /// Release every key whose press went to `control`.
    pub(crate) fn control_deleted(&mut self, control: ControlId) {
        self.held.retain(|_, held| held.target != Some(control));
    }
}

impl Canvas {
    /// Feed one host input event. Returns whether the UI consumed it.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        profile_function!();
        match event {
            InputEvent::MouseMoved { position, delta } => self.input_mouse_moved(position, delta),
            InputEvent::MouseButton { button, pressed } => self.input_mouse_button(button, pressed),
            InputEvent::MouseWheel { delta } => self.input_mouse_wheel(delta),
            InputEvent::Key { key, pressed } => self.input_key(key, pressed),
            InputEvent::Char(c) => self.input_char(c),
        }
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.is_pressed(key)
    }

    fn accepts_mouse(&self) -> bool {
        self.tree
            .get(self.root())
            .is_some_and(|c| !c.is_hidden() && c.mouse_input_enabled())
    }

    fn accepts_keyboard(&self) -> bool {
        self.tree
            .get(self.root())
            .is_some_and(|c| !c.is_hidden() && c.keyboard_input_enabled())
    }

    fn unscale(&self, point: IVec2) -> IVec2 {
        if self.scale == 1.0 {
            return point;
        }
        (point.as_vec2() / self.scale).as_ivec2()
    }

    pub fn input_mouse_moved(&mut self, position: IVec2, delta: IVec2) -> bool {
        if !self.accepts_mouse() {
            return false;
        }
        let position = self.unscale(position);
        let delta = self.unscale(delta);
        self.mouse_position = position;

        if let Some(hovered) = self.hovered {
            let local = self.canvas_to_local(hovered, position);
            self.with_widget(hovered, |w, ctx| w.on_mouse_moved(ctx, local, delta));
        }
        self.drag_mouse_moved(position);
        self.update_hovered();
        true
    }

    /// Recompute the hover target. Mouse capture pins it to the captor.
    pub(crate) fn update_hovered(&mut self) {
        let target = match self.mouse_focus {
            Some(captor) if self.tree.contains(captor) => Some(captor),
            _ => self.control_at(self.mouse_position),
        };
        if target == self.hovered {
            return;
        }

        if let Some(old) = self.hovered.take() {
            trace!("mouse left {old}");
            self.with_widget(old, |w, ctx| w.on_mouse_left(ctx));
            self.emit(UiEvent::MouseLeave(old));
            self.disable_tooltip(old);
            self.redraw(old);
        }

        self.hovered = target;
        if let Some(new) = target {
            trace!("mouse entered {new}");
            self.with_widget(new, |w, ctx| w.on_mouse_entered(ctx));
            self.emit(UiEvent::MouseEnter(new));
            self.enable_tooltip(new);
            self.redraw(new);
        }
    }

    pub fn input_mouse_button(&mut self, button: MouseButton, pressed: bool) -> bool {
        if !self.accepts_mouse() {
            return false;
        }
        if pressed {
            self.mouse_pressed(button)
        } else {
            self.mouse_released(button)
        }
    }

    fn mouse_pressed(&mut self, button: MouseButton) -> bool {
        let hovered = self.hovered;
        if !hovered.is_some_and(|h| self.is_menu_component(h)) {
            self.close_menus();
        }
        let root = self.root();
        let Some(target) = hovered.filter(|&h| h != root && self.tree.is_visible(h)) else {
            return false;
        };

        self.find_keyboard_focused_control(target);
        let position = self.mouse_position;
        if button == MouseButton::Left && self.drag_mouse_button(Some(target), position, true) {
            return true;
        }

        self.mouse_focus = Some(target);
        let local = self.canvas_to_local(target, position);
        self.with_widget(target, |w, ctx| w.on_mouse_down(ctx, button, local));
        self.emit(UiEvent::MouseDown { control: target, button });
        self.touch(target);
        true
    }

    fn mouse_released(&mut self, button: MouseButton) -> bool {
        let position = self.mouse_position;
        if button == MouseButton::Left && self.drag_mouse_button(self.hovered, position, false) {
            self.mouse_focus = None;
            self.update_hovered();
            return true;
        }

        self.mouse_focus = None;
        let root = self.root();
        let Some(target) = self.hovered.filter(|&h| h != root && self.tree.is_visible(h)) else {
            self.update_hovered();
            return false;
        };

        let local = self.canvas_to_local(target, position);
        self.with_widget(target, |w, ctx| w.on_mouse_up(ctx, button, local));
        self.emit(UiEvent::MouseUp { control: target, button });

        let now = self.clock.now();
        let window = self.config.double_click_time;
        let double = self.tree.get_mut(target).is_some_and(|c| {
            let slot = &mut c.last_click[button.index()];
            let double = slot.is_some_and(|last| now.saturating_sub(last) <= window);
            *slot = Some(now);
            double
        });
        if double {
            self.with_widget(target, |w, ctx| w.on_mouse_double_clicked(ctx, button, local));
            self.emit(UiEvent::DoubleClick { control: target, button });
        } else {
            self.with_widget(target, |w, ctx| w.on_mouse_clicked(ctx, button, local));
            self.emit(UiEvent::Click { control: target, button });
        }

        self.update_hovered();
        true
    }

    /// Offer the wheel to the hover target, then up the container chain.
    pub fn input_mouse_wheel(&mut self, delta: i32) -> bool {
        if !self.accepts_mouse() {
            return false;
        }
        let mut current = self.hovered;
        while let Some(id) = current {
            if self.with_widget(id, |w, ctx| w.on_mouse_wheel(ctx, delta)).unwrap_or(false) {
                return true;
            }
            current = self.tree.get(id).and_then(Control::container);
        }
        false
    }

    pub fn input_key(&mut self, key: Key, pressed: bool) -> bool {
        if !self.accepts_keyboard() {
            return false;
        }
        self.modifiers.set(Modifiers::from_key(key), pressed);

        let target = self.keyboard_focus.or(self.hovered);
        if pressed {
            if self.keys.is_pressed(key) {
                return false;
            }
            let next_repeat = self.clock.now() + self.config.key_repeat_delay;
            self.keys.press(key, next_repeat, target);
        } else {
            self.keys.release(key);
        }
        self.deliver_key(target, key, pressed)
    }

    /// Offer a key to `target` and then its logical parents until one handles it.
    fn deliver_key(&mut self, target: Option<ControlId>, key: Key, pressed: bool) -> bool {
        let mut current = target;
        while let Some(id) = current {
            if self.with_widget(id, |w, ctx| w.on_key(ctx, key, pressed)).unwrap_or(false) {
                return true;
            }
            if key == Key::Tab {
                if pressed {
                    self.focus_next_tab();
                }
                return true;
            }
            current = self.tree.parent(id);
        }
        false
    }

    /// Re-deliver held keys whose repeat deadline has passed.
    pub(crate) fn process_key_repeat(&mut self) {
        let now = self.clock.now();
        let rate = self.config.key_repeat_rate;
        let owner = self.keyboard_focus.or(self.hovered);

        let held: Vec<(Key, HeldKey)> = self.keys.held.iter().map(|(k, h)| (*k, *h)).collect();
        for (key, state) in held {
            // Ownership moved away from the control that saw the press.
            if state.target != owner {
                self.keys.release(key);
                continue;
            }
            if now > state.next_repeat {
                if let Some(entry) = self.keys.held.get_mut(&key) {
                    entry.next_repeat = now + rate;
                }
                self.deliver_key(state.target, key, true);
            }
        }
    }

    pub fn input_char(&mut self, c: char) -> bool {
        if !self.accepts_keyboard() || c.is_control() {
            return false;
        }
        if self.handle_accelerator_char(c) {
            return true;
        }
        let Some(focus) = self.keyboard_focus else {
            return false;
        };
        if !self.tree.is_visible(focus) || self.modifiers.contains(Modifiers::CTRL) {
            return false;
        }
        self.with_widget(focus, |w, ctx| w.on_char(ctx, c)).unwrap_or(false)
    }

    fn handle_accelerator_char(&mut self, c: char) -> bool {
        let accelerator = format!("{}{}", self.modifiers.accelerator_prefix(), c.to_uppercase());
        if let Some(focus) = self.keyboard_focus
            && self.trigger_accelerator(focus, &accelerator)
        {
            return true;
        }
        if let Some(captor) = self.mouse_focus
            && self.trigger_accelerator(captor, &accelerator)
        {
            return true;
        }
        let root = self.root();
        self.handle_accelerator(root, &accelerator)
    }

    /// Fire `accelerator` on the first control in `id`'s subtree that binds it.
    pub fn handle_accelerator(&mut self, id: ControlId, accelerator: &str) -> bool {
        if self.trigger_accelerator(id, accelerator) {
            return true;
        }
        self.own_children(id)
            .into_iter()
            .any(|child| self.handle_accelerator(child, accelerator))
    }

    fn trigger_accelerator(&mut self, id: ControlId, accelerator: &str) -> bool {
        let Some(action) = self
            .tree
            .get(id)
            .and_then(|c| c.accelerators.get(accelerator))
            .cloned()
        else {
            return false;
        };
        self.emit(UiEvent::Accelerator { control: id, action: action.clone() });
        self.with_widget(id, |w, ctx| w.on_accelerator(ctx, &action))
            .unwrap_or(true)
    }

    fn enable_tooltip(&mut self, id: ControlId) {
        let owner = std::iter::once(id)
            .chain(self.tree.parent(id))
            .find(|&c| self.tree.get(c).is_some_and(|c| c.tooltip.is_some()));
        if let Some(owner) = owner {
            self.tooltip.enable(owner);
        }
    }

    fn disable_tooltip(&mut self, id: ControlId) {
        self.tooltip.disable(id);
        if let Some(parent) = self.tree.parent(id) {
            self.tooltip.disable(parent);
        }
    }
}

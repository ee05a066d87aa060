//! Geometry setters, flags and invalidation.

use std::{any::Any, rc::Rc};

use vulpes_core::{Margin, Padding, Rect, Size, math::IVec2};

use super::Canvas;
use crate::{
    control::{Control, ControlFlags, ControlId, Invalidation},
    dock::Dock,
    drag_drop::Package,
    error::{UiError, UiResult},
    event::CursorIcon,
    skin::SharedSkin,
};

impl Canvas {
    /// Set a control's bounds in its container's space.
    ///
    /// The size is clamped into the control's min/max. Returns `false` when
    /// nothing changed.
    pub fn set_bounds(&mut self, id: ControlId, bounds: Rect) -> bool {
        let Some(control) = self.tree.get_mut(id) else {
            return false;
        };
        let old = control.bounds;
        let bounds = Rect::from_origin_size(bounds.origin(), control.clamp_size(bounds.size()));
        if bounds == old {
            return false;
        }
        control.bounds = bounds;
        self.bounds_changed(id, old);
        true
    }

    pub fn set_position(&mut self, id: ControlId, x: i32, y: i32) -> bool {
        let Some(size) = self.tree.get(id).map(|c| c.bounds.size()) else {
            return false;
        };
        self.set_bounds(id, Rect::from_origin_size(IVec2::new(x, y), size))
    }

    pub fn set_size(&mut self, id: ControlId, width: i32, height: i32) -> bool {
        let Some(origin) = self.tree.get(id).map(|c| c.bounds.origin()) else {
            return false;
        };
        self.set_bounds(id, Rect::from_origin_size(origin, Size::new(width, height)))
    }

    pub fn set_min_size(&mut self, id: ControlId, min: Size) {
        if let Some(control) = self.tree.get_mut(id) {
            control.min_size = min;
        }
        self.reclamp(id);
    }

    pub fn set_max_size(&mut self, id: ControlId, max: Size) {
        if let Some(control) = self.tree.get_mut(id) {
            control.max_size = max;
        }
        self.reclamp(id);
    }

    fn reclamp(&mut self, id: ControlId) {
        let Some(control) = self.tree.get_mut(id) else {
            return;
        };
        let old = control.bounds;
        let size = control.clamp_size(old.size());
        if size != old.size() {
            control.bounds = Rect::from_origin_size(old.origin(), size);
            self.bounds_changed(id, old);
        }
    }

    fn bounds_changed(&mut self, id: ControlId, old: Rect) {
        let Some(control) = self.tree.get_mut(id) else {
            return;
        };
        control.update_render_bounds();
        if control.bounds.size() != old.size() {
            self.invalidate(id);
        }
        self.redraw(id);
        self.with_widget(id, |w, ctx| w.on_bounds_changed(ctx, old));
    }

    /// Move a control, keeping it inside its container's padded interior
    /// when `RESTRICT_TO_PARENT` is set.
    pub fn move_to(&mut self, id: ControlId, mut x: i32, mut y: i32) -> bool {
        let Some(control) = self.tree.get(id) else {
            return false;
        };
        if control.flags.contains(ControlFlags::RESTRICT_TO_PARENT)
            && let Some(container) = control.container.and_then(|c| self.tree.get(c))
        {
            let pad = container.padding;
            let size = control.bounds.size();
            let area = container.bounds.size();
            x = x.max(pad.left).min(area.width - pad.right - size.width);
            y = y.max(pad.top).min(area.height - pad.bottom - size.height);
        }
        self.set_position(id, x, y)
    }

    /// Align a control inside its container's padded interior, offset by
    /// `x_pad`/`y_pad` away from the chosen edge.
    pub fn set_relative_position(&mut self, id: ControlId, dock: Dock, x_pad: i32, y_pad: i32) -> UiResult<()> {
        if dock.is_fill() {
            return Err(UiError::InvalidDock(dock));
        }
        let control = self.tree.get(id).ok_or(UiError::StaleControl(id))?;
        let size = control.bounds.size();
        let (area, pad) = control
            .container
            .and_then(|c| self.tree.get(c))
            .map(|c| (c.bounds.size(), c.padding))
            .unwrap_or((Size::ZERO, Padding::ZERO));

        let mut x = control.bounds.x;
        let mut y = control.bounds.y;
        if dock.contains(Dock::LEFT) {
            x = pad.left + x_pad;
        } else if dock.contains(Dock::RIGHT) {
            x = area.width - size.width - pad.right - x_pad;
        } else if dock.contains(Dock::CENTER_H) {
            x = pad.left + x_pad + (area.width - size.width - pad.left - pad.right) / 2;
        }
        if dock.contains(Dock::TOP) {
            y = pad.top + y_pad;
        } else if dock.contains(Dock::BOTTOM) {
            y = area.height - size.height - pad.bottom - y_pad;
        } else if dock.contains(Dock::CENTER_V) {
            y = pad.top + y_pad + (area.height - size.height - pad.top - pad.bottom) / 2;
        }
        self.move_to(id, x, y);
        Ok(())
    }

    /// Grow or shrink to the extent of the visible children plus padding.
    pub fn size_to_children(&mut self, id: ControlId, width: bool, height: bool) -> bool {
        let Some(control) = self.tree.get(id) else {
            return false;
        };
        let mut size = self.children_size(id);
        size.width += control.padding.right;
        size.height += control.padding.bottom;
        let current = control.bounds.size();
        self.set_size(
            id,
            if width { size.width } else { current.width },
            if height { size.height } else { current.height },
        )
    }

    pub fn set_dock(&mut self, id: ControlId, dock: Dock) {
        self.update_layout_input(id, |c| {
            let changed = c.dock != dock;
            c.dock = dock;
            changed
        });
    }

    pub fn set_margin(&mut self, id: ControlId, margin: Margin) {
        self.update_layout_input(id, |c| {
            let changed = c.margin != margin;
            c.margin = margin;
            changed
        });
    }

    pub fn set_padding(&mut self, id: ControlId, padding: Padding) {
        self.update_layout_input(id, |c| {
            let changed = c.padding != padding;
            c.padding = padding;
            changed
        });
    }

    /// Apply a change that affects docking and invalidate the control and its parent.
    fn update_layout_input(&mut self, id: ControlId, f: impl FnOnce(&mut Control) -> bool) {
        let Some(control) = self.tree.get_mut(id) else {
            return;
        };
        if !f(control) {
            return;
        }
        let container = control.container;
        self.invalidate(id);
        if let Some(container) = container {
            self.invalidate(container);
        }
    }

    /// Request the layout hook and a cache rebuild for `id`.
    pub fn invalidate(&mut self, id: ControlId) {
        if let Some(control) = self.tree.get_mut(id) {
            control.invalidation = Invalidation::all();
        }
    }

    pub fn invalidate_parent(&mut self, id: ControlId) {
        if let Some(container) = self.tree.get(id).and_then(|c| c.container) {
            self.invalidate(container);
        }
    }

    /// Invalidate the physical children, and the inner control's children.
    pub fn invalidate_children(&mut self, id: ControlId, recursive: bool) {
        let inner = self.tree.get(id).and_then(|c| c.inner);
        for child in self.own_children(id) {
            self.invalidate(child);
            if recursive {
                self.invalidate_children(child, true);
            }
        }
        if let Some(inner) = inner {
            for child in self.own_children(inner) {
                self.invalidate(child);
                if recursive {
                    self.invalidate_children(child, true);
                }
            }
        }
    }

    /// Mark `id` and its ancestors as needing a repaint.
    pub fn redraw(&mut self, id: ControlId) {
        let root = self.root();
        let mut reached_root = false;
        let mut current = Some(id);
        while let Some(next) = current {
            let Some(control) = self.tree.get_mut(next) else {
                break;
            };
            control.invalidation.insert(Invalidation::CACHE);
            reached_root |= next == root;
            current = control.parent;
        }
        if reached_root {
            self.needs_redraw = true;
        }
    }

    fn set_flag(&mut self, id: ControlId, flag: ControlFlags, value: bool) -> bool {
        match self.tree.get_mut(id) {
            Some(control) if control.flags.contains(flag) != value => {
                control.flags.set(flag, value);
                true
            }
            _ => false,
        }
    }

    pub fn set_hidden(&mut self, id: ControlId, hidden: bool) {
        if self.set_flag(id, ControlFlags::HIDDEN, hidden) {
            self.invalidate(id);
            self.invalidate_parent(id);
            self.redraw(id);
        }
    }

    pub fn show(&mut self, id: ControlId) {
        self.set_hidden(id, false);
    }

    pub fn hide(&mut self, id: ControlId) {
        self.set_hidden(id, true);
    }

    pub fn set_disabled(&mut self, id: ControlId, disabled: bool) {
        if self.set_flag(id, ControlFlags::DISABLED, disabled) {
            self.redraw(id);
        }
    }

    pub fn set_mouse_input(&mut self, id: ControlId, enabled: bool) {
        self.set_flag(id, ControlFlags::MOUSE_INPUT, enabled);
    }

    pub fn set_keyboard_input(&mut self, id: ControlId, enabled: bool) {
        self.set_flag(id, ControlFlags::KEYBOARD_INPUT, enabled);
    }

    pub fn set_tabable(&mut self, id: ControlId, tabable: bool) {
        self.set_flag(id, ControlFlags::TABABLE, tabable);
    }

    pub fn set_draw_background(&mut self, id: ControlId, draw: bool) {
        if self.set_flag(id, ControlFlags::DRAW_BACKGROUND, draw) {
            self.redraw(id);
        }
    }

    pub fn set_restrict_to_parent(&mut self, id: ControlId, restrict: bool) {
        self.set_flag(id, ControlFlags::RESTRICT_TO_PARENT, restrict);
    }

    /// Outline bounds, margin and padding after the control renders.
    pub fn set_debug_outlines(&mut self, id: ControlId, enabled: bool) {
        if self.set_flag(id, ControlFlags::DEBUG_OUTLINES, enabled) {
            self.redraw(id);
        }
    }

    pub fn set_name(&mut self, id: ControlId, name: impl Into<String>) {
        if let Some(control) = self.tree.get_mut(id) {
            control.name = name.into();
        }
    }

    pub fn set_tooltip(&mut self, id: ControlId, text: Option<String>) {
        if let Some(control) = self.tree.get_mut(id) {
            control.tooltip = text;
        }
        if self.tooltip.current() == Some(id) && self.tree.get(id).is_some_and(|c| c.tooltip.is_none()) {
            self.tooltip.disable(id);
        }
    }

    pub fn set_cursor(&mut self, id: ControlId, cursor: CursorIcon) {
        if let Some(control) = self.tree.get_mut(id) {
            control.cursor = cursor;
        }
    }

    pub fn set_user_data(&mut self, id: ControlId, data: impl Any) {
        if let Some(control) = self.tree.get_mut(id) {
            control.user_data = Some(Box::new(data));
        }
    }

    /// Override the skin for `id`, and optionally for every descendant.
    pub fn set_skin(&mut self, id: ControlId, skin: SharedSkin, change_children: bool) {
        let Some(control) = self.tree.get_mut(id) else {
            return;
        };
        let same = control.skin.as_ref().is_some_and(|s| Rc::ptr_eq(s, &skin));
        if !same {
            control.skin = Some(Rc::clone(&skin));
            self.invalidate(id);
            self.redraw(id);
        }
        if change_children {
            for child in self.own_children(id) {
                self.set_skin(child, Rc::clone(&skin), true);
            }
        }
    }

    /// Bind a shortcut such as `"Ctrl+S"` to an action name.
    pub fn add_accelerator(&mut self, id: ControlId, accelerator: &str, action: impl Into<String>) {
        if let Some(control) = self.tree.get_mut(id) {
            control
                .accelerators
                .insert(accelerator.trim().to_uppercase(), action.into());
        }
    }

    pub fn set_drag_package(&mut self, id: ControlId, package: Package) {
        if let Some(control) = self.tree.get_mut(id) {
            control.drag_package = Some(package);
        }
    }

    pub fn clear_drag_package(&mut self, id: ControlId) {
        if let Some(control) = self.tree.get_mut(id) {
            control.drag_package = None;
        }
    }

    /// Accept dropped packages named `name`.
    pub fn accept_package(&mut self, id: ControlId, name: impl Into<String>) {
        if let Some(control) = self.tree.get_mut(id) {
            control.accepted_packages.insert(name.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{testing::TestHarness, widget::Panel};

    #[test]
    fn test_set_bounds_clamps_size() {
        let mut h = TestHarness::new(200, 200);
        let id = h.add(h.root(), Panel::default());
        h.canvas.set_max_size(id, Size::new(50, 50));
        assert!(h.canvas.set_bounds(id, Rect::new(1, 2, 100, 20)));
        assert_eq!(h.canvas.bounds(id), Some(Rect::new(1, 2, 50, 20)));
        assert!(!h.canvas.set_bounds(id, Rect::new(1, 2, 50, 20)));
    }

    #[test]
    fn test_size_change_invalidates_layout() {
        let mut h = TestHarness::new(200, 200);
        let id = h.add(h.root(), Panel::default());
        h.canvas.frame();
        assert!(!h.canvas.control(id).unwrap().needs_layout());

        h.canvas.set_position(id, 5, 5);
        assert!(!h.canvas.control(id).unwrap().needs_layout());
        h.canvas.set_size(id, 30, 30);
        assert!(h.canvas.control(id).unwrap().needs_layout());
    }

    #[test]
    fn test_relative_position_offsets_from_edge() {
        let mut h = TestHarness::new(200, 100);
        let root = h.root();
        h.canvas.set_padding(root, Padding::uniform(5));
        let id = h.add(root, Panel::default());
        h.canvas.set_size(id, 20, 10);

        h.canvas.set_relative_position(id, Dock::RIGHT | Dock::BOTTOM, 3, 4).unwrap();
        assert_eq!(h.canvas.bounds(id), Some(Rect::new(200 - 20 - 5 - 3, 100 - 10 - 5 - 4, 20, 10)));

        h.canvas.set_relative_position(id, Dock::CENTER, 0, 0).unwrap();
        assert_eq!(h.canvas.bounds(id), Some(Rect::new(5 + 85, 5 + 40, 20, 10)));

        assert_eq!(
            h.canvas.set_relative_position(id, Dock::FILL, 0, 0),
            Err(UiError::InvalidDock(Dock::FILL))
        );
    }

    #[test]
    fn test_restrict_to_parent() {
        let mut h = TestHarness::new(100, 100);
        let id = h.add(h.root(), Panel::default());
        h.canvas.set_size(id, 20, 20);
        h.canvas.set_restrict_to_parent(id, true);
        h.canvas.move_to(id, 95, -10);
        assert_eq!(h.canvas.bounds(id), Some(Rect::new(80, 0, 20, 20)));
    }

    #[test]
    fn test_size_to_children_adds_padding() {
        let mut h = TestHarness::new(300, 300);
        let parent = h.add(h.root(), Panel::default());
        h.canvas.set_padding(parent, Padding::new(0, 0, 4, 6));
        let child = h.add(parent, Panel::default());
        h.canvas.set_bounds(child, Rect::new(10, 10, 30, 40));
        h.canvas.size_to_children(parent, true, true);
        assert_eq!(h.canvas.bounds(parent).unwrap().size(), Size::new(44, 56));
    }

    #[test]
    fn test_redraw_marks_ancestors() {
        let mut h = TestHarness::new(100, 100);
        let parent = h.add(h.root(), Panel::default());
        let child = h.add(parent, Panel::default());
        h.canvas.frame();
        assert!(!h.canvas.needs_redraw());

        h.canvas.redraw(child);
        assert!(h.canvas.needs_redraw());
        assert!(h.canvas.control(parent).unwrap().is_cache_dirty());
    }

    #[test]
    fn test_accelerators_normalized() {
        let mut h = TestHarness::new(100, 100);
        let root = h.root();
        h.canvas.add_accelerator(root, " ctrl+s ", "save");
        let control = h.canvas.control(root).unwrap();
        assert_eq!(control.accelerators.get("CTRL+S").map(String::as_str), Some("save"));
    }
}

//! Widget behaviour attached to controls.
//!
//! Every control carries one boxed [`Widget`]. The canvas calls its hooks in
//! a fixed order during update, layout, render and input dispatch; all hooks
//! default to doing nothing, so a widget overrides only what it needs.

use std::any::Any;

use vulpes_core::{Rect, math::IVec2};

use crate::{
    context::{Ctx, RenderCtx},
    control::ControlId,
    drag_drop::Package,
    event::{Key, MouseButton},
    skin::Skin,
};

/// Thickness of the default keyboard focus outline inset.
pub const FOCUS_HIGHLIGHT_OFFSET: i32 = 3;

pub trait Widget: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Per-frame logic, before the delete flush and layout.
    fn update(&mut self, _ctx: &mut Ctx<'_>) {}

    /// Runs when the control's `LAYOUT` bit is set, before children are docked.
    fn layout(&mut self, _ctx: &mut Ctx<'_>, _skin: &dyn Skin) {}

    /// Runs after children have been placed.
    fn post_layout(&mut self, _ctx: &mut Ctx<'_>, _skin: &dyn Skin) {}

    fn on_bounds_changed(&mut self, _ctx: &mut Ctx<'_>, _old: Rect) {}
    fn on_child_added(&mut self, _ctx: &mut Ctx<'_>, _child: ControlId) {}
    fn on_child_removed(&mut self, _ctx: &mut Ctx<'_>, _child: ControlId) {}

    /// A descendant was touched. Returns whether to keep propagating upward.
    fn on_child_touched(&mut self, _ctx: &mut Ctx<'_>, _child: ControlId) -> bool {
        true
    }

    fn should_clip(&self) -> bool {
        true
    }

    /// Menus answer `true`; everything else inherits from its parent.
    fn is_menu_component(&self) -> bool {
        false
    }

    fn close_menus(&mut self, _ctx: &mut Ctx<'_>) {}

    fn render_under(&mut self, _ctx: &mut RenderCtx<'_>) {}
    fn render(&mut self, _ctx: &mut RenderCtx<'_>) {}
    fn render_over(&mut self, _ctx: &mut RenderCtx<'_>) {}

    /// Drawn only while the control holds keyboard focus and is tabable.
    fn render_focus(&mut self, ctx: &mut RenderCtx<'_>) {
        let rect = ctx.render_bounds();
        ctx.skin
            .draw_keyboard_highlight(ctx.renderer, rect, FOCUS_HIGHLIGHT_OFFSET);
    }

    fn on_mouse_moved(&mut self, _ctx: &mut Ctx<'_>, _position: IVec2, _delta: IVec2) {}
    fn on_mouse_entered(&mut self, _ctx: &mut Ctx<'_>) {}
    fn on_mouse_left(&mut self, _ctx: &mut Ctx<'_>) {}
    fn on_mouse_down(&mut self, _ctx: &mut Ctx<'_>, _button: MouseButton, _position: IVec2) {}
    fn on_mouse_up(&mut self, _ctx: &mut Ctx<'_>, _button: MouseButton, _position: IVec2) {}
    fn on_mouse_clicked(&mut self, _ctx: &mut Ctx<'_>, _button: MouseButton, _position: IVec2) {}
    fn on_mouse_double_clicked(&mut self, _ctx: &mut Ctx<'_>, _button: MouseButton, _position: IVec2) {}

    /// Returns whether the wheel was consumed; unconsumed deltas bubble to the container.
    fn on_mouse_wheel(&mut self, _ctx: &mut Ctx<'_>, _delta: i32) -> bool {
        false
    }

    /// Returns whether the key was consumed; unconsumed keys bubble to the container.
    fn on_key(&mut self, _ctx: &mut Ctx<'_>, _key: Key, _pressed: bool) -> bool {
        false
    }

    fn on_char(&mut self, _ctx: &mut Ctx<'_>, _c: char) -> bool {
        false
    }

    /// A registered accelerator fired with its action name.
    fn on_accelerator(&mut self, _ctx: &mut Ctx<'_>, _action: &str) -> bool {
        true
    }

    fn on_keyboard_focus(&mut self, _ctx: &mut Ctx<'_>) {}
    fn on_lost_keyboard_focus(&mut self, _ctx: &mut Ctx<'_>) {}

    /// Draggable without a package set on the control.
    fn draggable(&self) -> bool {
        false
    }

    /// Package to drag, asked once the press moved past the drag threshold.
    fn drag_package(&mut self, ctx: &mut Ctx<'_>, _position: IVec2) -> Option<Package> {
        ctx.control().drag_package().cloned()
    }

    /// Last chance to veto a drag about to start.
    fn drag_should_start(&mut self, _ctx: &mut Ctx<'_>) -> bool {
        true
    }

    /// The drag began. `package` already carries the hold offset.
    fn drag_start(&mut self, _ctx: &mut Ctx<'_>, _package: &mut Package, _position: IVec2) {}

    fn drag_end(&mut self, _ctx: &mut Ctx<'_>, _success: bool, _position: IVec2) {}

    /// Acceptance beyond the names registered with
    /// [`Canvas::accept_package`](crate::Canvas::accept_package).
    fn drag_can_accept(&self, _package: &Package) -> bool {
        false
    }

    fn drag_hover_enter(&mut self, _ctx: &mut Ctx<'_>, _package: &Package, _position: IVec2) {}
    fn drag_hover_leave(&mut self, _ctx: &mut Ctx<'_>, _package: &Package) {}
    fn drag_hover(&mut self, _ctx: &mut Ctx<'_>, _package: &Package, _position: IVec2) {}

    /// Default drop moves the drag source under this control.
    fn drag_handle_drop(&mut self, ctx: &mut Ctx<'_>, _package: &Package, _position: IVec2) -> bool {
        let target = ctx.id();
        match ctx.drag_source() {
            Some(source) => ctx.set_parent(source, target).is_ok(),
            None => false,
        }
    }
}

/// Plain container that draws the skin's panel when asked to.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub draw_panel: bool,
}

impl Panel {
    pub fn drawn() -> Self {
        Self { draw_panel: true }
    }
}

impl Widget for Panel {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) {
        if self.draw_panel {
            let rect = ctx.render_bounds();
            ctx.skin.draw_panel(ctx.renderer, rect);
        }
    }
}

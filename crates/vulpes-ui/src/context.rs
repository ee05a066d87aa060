//! Contexts handed to widget hooks.

use std::ops::{Deref, DerefMut};

use vulpes_core::{Rect, math::IVec2};

use crate::{
    canvas::Canvas,
    control::{Control, ControlId},
    renderer::Renderer,
    skin::Skin,
};

/// Mutable access to the canvas from inside a hook, plus the id of the
/// control the hook belongs to.
///
/// The hook's own widget is checked out of the tree while it runs, so
/// `ctx.control()` works but downcasting this control's widget through the
/// canvas returns `None`.
pub struct Ctx<'a> {
    canvas: &'a mut Canvas,
    id: ControlId,
}

impl<'a> Ctx<'a> {
    pub(crate) fn new(canvas: &'a mut Canvas, id: ControlId) -> Self {
        Self { canvas, id }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    /// The node data of the hook's control.
    ///
    /// # Panics
    /// Never for a control that is still in the tree; hooks only run on live controls.
    pub fn control(&self) -> &Control {
        match self.canvas.control(self.id) {
            Some(control) => control,
            None => panic!("hook running on destroyed control {}", self.id),
        }
    }

    pub fn render_bounds(&self) -> Rect {
        self.control().render_bounds()
    }

    /// Pointer position in this control's local space.
    pub fn local_mouse_position(&self) -> IVec2 {
        self.canvas.canvas_to_local(self.id, self.canvas.mouse_position())
    }
}

impl Deref for Ctx<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for Ctx<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

/// Read access to the canvas plus the active skin and renderer, for render hooks.
pub struct RenderCtx<'a> {
    pub canvas: &'a Canvas,
    pub skin: &'a dyn Skin,
    pub renderer: &'a mut dyn Renderer,
    id: ControlId,
}

impl<'a> RenderCtx<'a> {
    pub(crate) fn new(
        canvas: &'a Canvas,
        skin: &'a dyn Skin,
        renderer: &'a mut dyn Renderer,
        id: ControlId,
    ) -> Self {
        Self {
            canvas,
            skin,
            renderer,
            id,
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn control(&self) -> Option<&Control> {
        self.canvas.control(self.id)
    }

    pub fn render_bounds(&self) -> Rect {
        self.control().map(Control::render_bounds).unwrap_or_default()
    }

    pub fn is_hovered(&self) -> bool {
        self.canvas.hovered() == Some(self.id)
    }

    pub fn has_focus(&self) -> bool {
        self.canvas.keyboard_focus() == Some(self.id)
    }
}

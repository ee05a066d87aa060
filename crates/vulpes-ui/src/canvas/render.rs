//! Clipped recursive rendering.

use std::rc::Rc;

use vulpes_core::{
    Rect,
    math::IVec2,
    profiling::{self, profile_function},
};

use super::Canvas;
use crate::{
    context::RenderCtx,
    control::{ControlFlags, ControlId, Invalidation},
    metrics::MetricsTimer,
    renderer::Renderer,
    skin::{SharedSkin, Skin},
    tooltip,
    widget::Widget,
};

impl Canvas {
    /// Think, then draw the whole tree through the root skin's renderer.
    ///
    /// # Panics
    /// If the root skin's renderer is already borrowed.
    pub fn render_canvas(&mut self) {
        profile_function!();
        profiling::new_frame();
        self.think();

        let timer = MetricsTimer::start();
        let root = self.root();
        let skin = self.skin_of(root);
        let shared = skin.renderer();
        let mut guard = shared.borrow_mut();
        let renderer: &mut dyn Renderer = &mut *guard;

        let Some((bounds, render_bounds, draw_background)) = self.tree.get(root).map(|c| {
            (
                c.bounds(),
                c.render_bounds(),
                c.flags().contains(ControlFlags::DRAW_BACKGROUND),
            )
        }) else {
            return;
        };

        renderer.begin();
        renderer.set_clip_region(bounds);
        renderer.set_render_offset(IVec2::ZERO);
        renderer.set_scale(self.scale);
        if draw_background {
            match self.config.background {
                Some(color) => {
                    renderer.set_draw_color(color);
                    renderer.draw_filled_rect(render_bounds);
                }
                None => skin.draw_background(renderer, render_bounds),
            }
        }

        self.do_render(root, &skin, renderer);
        self.render_drag_ghost(&skin, renderer);
        if self.config.tooltips {
            self.render_tooltip(&*skin, renderer);
        }

        renderer.end_clip();
        renderer.end();
        self.needs_redraw = false;
        self.metrics.render_time = timer.stop();
    }

    /// Render `id` with its own skin, or `skin` when it has no override.
    pub(crate) fn do_render(&mut self, id: ControlId, skin: &SharedSkin, renderer: &mut dyn Renderer) {
        let Some(control) = self.tree.get(id) else {
            return;
        };
        let skin = control.skin.clone().unwrap_or_else(|| Rc::clone(skin));
        let bounds = control.bounds();
        self.render_recursive(id, &skin, renderer, bounds);

        if let Some(control) = self.tree.get(id)
            && control.flags().contains(ControlFlags::DEBUG_OUTLINES)
        {
            skin.draw_debug_outline(renderer, control);
        }
    }

    fn render_recursive(&mut self, id: ControlId, skin: &SharedSkin, renderer: &mut dyn Renderer, bounds: Rect) {
        let old_offset = renderer.render_offset();
        renderer.add_render_offset(bounds);
        self.render_hook(id, &**skin, renderer, |w, ctx| w.render_under(ctx));

        let old_clip = renderer.clip_region();
        let should_clip = self
            .tree
            .get(id)
            .and_then(|c| c.widget.as_ref())
            .is_none_or(|w| w.should_clip());
        if should_clip {
            renderer.add_clip_region(bounds);
            if !renderer.clip_region_visible() {
                renderer.set_render_offset(old_offset);
                renderer.set_clip_region(old_clip);
                self.metrics.controls_culled += 1;
                return;
            }
            renderer.start_clip();
        }

        self.render_hook(id, &**skin, renderer, |w, ctx| w.render(ctx));
        self.metrics.controls_rendered += 1;
        if let Some(control) = self.tree.get_mut(id) {
            control.invalidation.remove(Invalidation::CACHE);
        }

        for child in self.own_children(id) {
            if self.tree.get(child).is_some_and(|c| !c.is_hidden()) {
                self.do_render(child, skin, renderer);
            }
        }

        renderer.set_clip_region(old_clip);
        renderer.start_clip();

        self.render_hook(id, &**skin, renderer, |w, ctx| w.render_over(ctx));
        let focused = self.keyboard_focus == Some(id) && self.tree.get(id).is_some_and(|c| c.is_tabable());
        if focused {
            self.render_hook(id, &**skin, renderer, |w, ctx| w.render_focus(ctx));
        }

        renderer.set_render_offset(old_offset);
    }

    fn render_hook(
        &mut self,
        id: ControlId,
        skin: &dyn Skin,
        renderer: &mut dyn Renderer,
        f: impl FnOnce(&mut dyn Widget, &mut RenderCtx<'_>),
    ) {
        let Some(mut widget) = self.tree.take_widget(id) else {
            return;
        };
        f(widget.as_mut(), &mut RenderCtx::new(self, skin, renderer, id));
        self.tree.restore_widget(id, widget);
    }

    /// Draw the dragged package under the cursor, offset by where it was grabbed.
    fn render_drag_ghost(&mut self, skin: &SharedSkin, renderer: &mut dyn Renderer) {
        let Some(package) = self.drag.package() else {
            return;
        };
        let hold_offset = package.hold_offset;
        let draw_control = package.draw_control;
        let at = self.mouse_position - hold_offset;

        let old_offset = renderer.render_offset();
        match draw_control.and_then(|id| self.tree.get(id).map(|c| (id, c.bounds()))) {
            Some((id, bounds)) => {
                renderer.set_render_offset(at - bounds.origin());
                self.do_render(id, skin, renderer);
            }
            None => {
                let size = self
                    .drag
                    .source()
                    .and_then(|s| self.tree.get(s))
                    .map_or_else(Default::default, |c| c.bounds().size());
                renderer.set_render_offset(IVec2::ZERO);
                skin.draw_drag_ghost(renderer, Rect::from_origin_size(at, size));
            }
        }
        renderer.set_render_offset(old_offset);
    }

    fn render_tooltip(&self, skin: &dyn Skin, renderer: &mut dyn Renderer) {
        let Some(text) = self
            .tooltip
            .current()
            .and_then(|id| self.tree.get(id))
            .and_then(|c| c.tooltip())
        else {
            return;
        };
        let Some(area) = self.tree.get(self.root()).map(|c| c.bounds()) else {
            return;
        };
        let padding = self.config.tooltip_padding;
        let mut size = renderer.measure_text(text);
        size.width += padding * 2;
        size.height += padding * 2;
        let rect = tooltip::placement(self.mouse_position, size, area);

        let old_offset = renderer.render_offset();
        renderer.set_render_offset(IVec2::ZERO);
        renderer.set_clip_region(area);
        renderer.start_clip();
        skin.draw_tooltip(renderer, rect, text, padding);
        renderer.set_render_offset(old_offset);
    }
}

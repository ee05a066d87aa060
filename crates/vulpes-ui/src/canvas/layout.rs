//! Docking layout.
//!
//! One recursive pass from the root per frame. Each control first runs its
//! own layout hook if invalidated, then carves its padded interior: edge
//! docked children take strips in child order, the remainder becomes the
//! inner bounds, and fill children share that remainder.

use std::rc::Rc;

use vulpes_core::Rect;

use super::Canvas;
use crate::{
    control::{ControlId, Invalidation},
    dock::Edge,
    skin::SharedSkin,
};

impl Canvas {
    pub(crate) fn recurse_layout(&mut self, id: ControlId, parent_skin: &SharedSkin) {
        let Some(control) = self.tree.get(id) else {
            return;
        };
        if control.is_hidden() {
            return;
        }
        let skin = control.skin.clone().unwrap_or_else(|| Rc::clone(parent_skin));
        self.metrics.controls_laid_out += 1;

        if control.needs_layout() {
            self.with_widget(id, |w, ctx| w.layout(ctx, &*skin));
            if let Some(control) = self.tree.get_mut(id) {
                control.invalidation.remove(Invalidation::LAYOUT);
            }
            self.metrics.layout_hooks_run += 1;
        }

        let Some(control) = self.tree.get(id) else {
            return;
        };
        let mut area = control.render_bounds.shrink(control.padding);
        let mut fills = Vec::new();

        for child in self.own_children(id) {
            let Some(c) = self.tree.get(child) else {
                continue;
            };
            if c.container != Some(id) || c.is_hidden() {
                continue;
            }
            if c.dock.is_fill() {
                fills.push(child);
                continue;
            }

            let m = c.margin;
            let size = c.bounds.size();
            match c.dock.edge() {
                Some(Edge::Top) => {
                    self.set_bounds(
                        child,
                        Rect::new(area.x + m.left, area.y + m.top, area.width - m.horizontal(), size.height),
                    );
                    let used = m.vertical() + self.child_height(child);
                    area.y += used;
                    area.height -= used;
                }
                Some(Edge::Left) => {
                    self.set_bounds(
                        child,
                        Rect::new(area.x + m.left, area.y + m.top, size.width, area.height - m.vertical()),
                    );
                    let used = m.horizontal() + self.child_width(child);
                    area.x += used;
                    area.width -= used;
                }
                Some(Edge::Right) => {
                    self.set_bounds(
                        child,
                        Rect::new(
                            area.right() - size.width - m.right,
                            area.y + m.top,
                            size.width,
                            area.height - m.vertical(),
                        ),
                    );
                    area.width -= m.horizontal() + self.child_width(child);
                }
                Some(Edge::Bottom) => {
                    self.set_bounds(
                        child,
                        Rect::new(
                            area.x + m.left,
                            area.bottom() - size.height - m.bottom,
                            area.width - m.horizontal(),
                            size.height,
                        ),
                    );
                    area.height -= m.vertical() + self.child_height(child);
                }
                None => {}
            }
            self.recurse_layout(child, &skin);
        }

        if let Some(control) = self.tree.get_mut(id) {
            control.inner_bounds = area;
        }

        for child in fills {
            let Some(margin) = self.tree.get(child).map(|c| c.margin) else {
                continue;
            };
            self.set_bounds(child, area.shrink_margin(margin));
            self.recurse_layout(child, &skin);
        }

        self.with_widget(id, |w, ctx| w.post_layout(ctx, &*skin));

        if let Some(control) = self.tree.get(id) {
            let tabable = control.is_tabable();
            self.tabs.visit(id, tabable, self.keyboard_focus == Some(id));
        }
    }

    fn child_width(&self, id: ControlId) -> i32 {
        self.tree.get(id).map_or(0, |c| c.bounds.width)
    }

    fn child_height(&self, id: ControlId) -> i32 {
        self.tree.get(id).map_or(0, |c| c.bounds.height)
    }
}

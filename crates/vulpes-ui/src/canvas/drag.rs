//! Drag-and-drop routing on top of [`DragAndDrop`].
//!
//! A left press on a draggable control arms a drag. Once the pointer has
//! travelled past the threshold the source hands out a package and the
//! pointer starts looking for an acceptor: the control under the pointer or
//! its nearest ancestor that accepts the package, never the source itself.

use tracing::debug;
use vulpes_core::math::IVec2;

use super::Canvas;
use crate::{
    control::ControlId,
    drag_drop::{DragAndDrop, Package},
    event::UiEvent,
};

impl Canvas {
    pub fn drag_and_drop(&self) -> &DragAndDrop {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_source(&self) -> Option<ControlId> {
        self.drag.source()
    }

    /// Whether a press on `id` may start a drag.
    pub fn is_draggable(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|c| {
            c.drag_package.as_ref().is_some_and(|p| p.draggable)
                || c.widget.as_ref().is_some_and(|w| w.draggable())
        })
    }

    /// Whether `id` would accept `package` as a drop target.
    pub fn can_accept(&self, id: ControlId, package: &Package) -> bool {
        self.tree.get(id).is_some_and(|c| {
            c.accepts_package(&package.name)
                || c.widget.as_ref().is_some_and(|w| w.drag_can_accept(package))
        })
    }

    /// Left button routing. Returns `true` only when a release dropped a package.
    pub(crate) fn drag_mouse_button(&mut self, hovered: Option<ControlId>, position: IVec2, pressed: bool) -> bool {
        if !pressed {
            self.drag.last_pressed = None;
            if self.drag.is_dragging() {
                self.drop_package(position);
                return true;
            }
            return false;
        }
        if let Some(hovered) = hovered
            && self.is_draggable(hovered)
        {
            self.drag.press(hovered, position);
        }
        false
    }

    pub(crate) fn drag_mouse_moved(&mut self, position: IVec2) {
        if !self.drag.is_dragging() && !self.start_drag(position) {
            return;
        }
        let hit = self.control_at(position);
        self.update_drop_target(hit, position);

        let (Some(target), Some(package)) = (self.drag.hovered, self.drag.package.clone()) else {
            return;
        };
        self.with_widget(target, |w, ctx| w.drag_hover(ctx, &package, position));
        self.redraw(target);
    }

    fn start_drag(&mut self, position: IVec2) -> bool {
        let Some(source) = self.drag.last_pressed else {
            return false;
        };
        if !self.drag.past_threshold(position, self.config.drag_threshold) {
            return false;
        }
        let pressed_at = self.drag.last_pressed_pos;
        let package = self
            .with_widget(source, |w, ctx| w.drag_package(ctx, pressed_at))
            .flatten();
        let Some(mut package) = package else {
            self.drag.last_pressed = None;
            self.drag.hovered = None;
            return false;
        };

        self.drag.source = Some(source);
        self.drag.last_pressed = None;
        self.mouse_focus = None;
        package.draw_control = None;

        let proceed = self
            .with_widget(source, |w, ctx| w.drag_should_start(ctx))
            .unwrap_or(false);
        if !proceed {
            self.drag.source = None;
            return false;
        }

        package.hold_offset = self.canvas_to_local(source, pressed_at);
        package.draw_control = Some(source);
        self.with_widget(source, |w, ctx| w.drag_start(ctx, &mut package, pressed_at));
        debug!("drag of {:?} started from {source}", package.name);
        self.drag.package = Some(package);
        self.emit(UiEvent::DragStarted { source });
        true
    }

    fn find_acceptor(&self, hit: Option<ControlId>, package: &Package) -> Option<ControlId> {
        let source = self.drag.source;
        let hit = hit.filter(|&h| Some(h) != source)?;
        std::iter::once(hit)
            .chain(self.tree.ancestors(hit))
            .filter(|&c| Some(c) != source)
            .find(|&c| self.can_accept(c, package))
    }

    fn update_drop_target(&mut self, hit: Option<ControlId>, position: IVec2) {
        let Some(package) = self.drag.package.clone() else {
            return;
        };
        let candidate = self.find_acceptor(hit, &package);
        if candidate == self.drag.hovered {
            return;
        }
        self.drag.new_hovered = candidate;

        if let Some(old) = self.drag.hovered.take() {
            self.with_widget(old, |w, ctx| w.drag_hover_leave(ctx, &package));
            self.emit(UiEvent::DragLeave { target: old });
        }

        // The leave hook may have destroyed the candidate.
        let Some(new) = self.drag.new_hovered.take() else {
            return;
        };
        self.drag.hovered = Some(new);
        self.with_widget(new, |w, ctx| w.drag_hover_enter(ctx, &package, position));
        self.emit(UiEvent::DragEnter { target: new });
    }

    fn drop_package(&mut self, position: IVec2) {
        let Some(package) = self.drag.package.clone() else {
            return;
        };
        let source = self.drag.source;
        let target = self.drag.hovered;

        let mut success = false;
        if let Some(target) = target {
            self.with_widget(target, |w, ctx| w.drag_hover_leave(ctx, &package));
            self.emit(UiEvent::DragLeave { target });
            success = self
                .with_widget(target, |w, ctx| w.drag_handle_drop(ctx, &package, position))
                .unwrap_or(false);
        }
        self.drag.hovered = None;

        if let Some(source) = source {
            self.with_widget(source, |w, ctx| w.drag_end(ctx, success, position));
            self.emit(UiEvent::Dropped { source, target, success });
            self.redraw(source);
        }
        debug!("drop of {:?} finished, success: {success}", package.name);
        self.drag.clear();
    }

    /// Abandon an active drag without dropping.
    pub fn cancel_drag(&mut self) {
        let Some(package) = self.drag.package.clone() else {
            self.drag.clear();
            return;
        };
        if let Some(target) = self.drag.hovered {
            self.with_widget(target, |w, ctx| w.drag_hover_leave(ctx, &package));
            self.emit(UiEvent::DragLeave { target });
        }
        if let Some(source) = self.drag.source {
            let position = self.mouse_position;
            self.with_widget(source, |w, ctx| w.drag_end(ctx, false, position));
            self.emit(UiEvent::Dropped { source, target: None, success: false });
        }
        self.drag.clear();
    }
}

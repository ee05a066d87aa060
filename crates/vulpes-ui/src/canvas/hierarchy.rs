//! Tree mutation: adding, reparenting, removing and deferred deletion.

use tracing::{debug, warn};
use vulpes_core::profiling::profile_function;

use super::Canvas;
use crate::{
    control::{Control, ControlId},
    error::{UiError, UiResult},
    event::UiEvent,
    widget::Widget,
};

impl Canvas {
    /// Create a control under `parent`, redirected into its inner control if it has one.
    pub fn add_control(&mut self, parent: ControlId, widget: impl Widget) -> UiResult<ControlId> {
        self.add_boxed(parent, Box::new(widget))
    }

    pub fn add_boxed(&mut self, parent: ControlId, widget: Box<dyn Widget>) -> UiResult<ControlId> {
        self.ensure(parent)?;
        let id = self.tree.insert(Control::new(widget));
        self.attach_child(parent, id);
        Ok(id)
    }

    /// Create the inner control of `id`. Children added to `id` afterwards
    /// land in the inner control; [`children`](Canvas::children) follows the redirect.
    pub fn add_inner_control(&mut self, id: ControlId, widget: impl Widget) -> UiResult<ControlId> {
        self.ensure(id)?;
        let container = self.tree.child_container(id);
        let inner = self.tree.insert(Control::new(Box::new(widget)));
        self.tree.attach(inner, container, id);
        if let Some(control) = self.tree.get_mut(container) {
            control.inner = Some(inner);
        }
        self.with_widget(container, |w, ctx| w.on_child_added(ctx, inner));
        self.invalidate(container);
        Ok(inner)
    }

    /// Move `id` under `parent`.
    pub fn set_parent(&mut self, id: ControlId, parent: ControlId) -> UiResult<()> {
        self.ensure(id)?;
        self.ensure(parent)?;
        if id == self.root() {
            return Err(UiError::RootControl);
        }
        if self.tree.is_descendant_of(self.tree.child_container(parent), id) {
            return Err(UiError::CycleDetected { parent, child: id });
        }
        if self.tree.parent(id) == Some(parent) {
            return Ok(());
        }
        if self.delete_queue.shift_remove(&id) {
            debug!("control {id} reparented while queued for deletion, keeping it");
        }
        self.detach_child(id);
        self.attach_child(parent, id);
        Ok(())
    }

    /// Attach an existing control under `parent`; same as [`set_parent`](Canvas::set_parent).
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) -> UiResult<()> {
        self.set_parent(child, parent)
    }

    /// Whether `child`'s logical parent is `parent`.
    pub fn is_child_of(&self, child: ControlId, parent: ControlId) -> bool {
        self.tree.parent(child) == Some(parent)
    }

    /// Detach `child` from `parent`, queueing it for deletion if `dispose`.
    ///
    /// Removing `parent`'s inner control always queues it. Without `dispose`
    /// the control stays alive but unattached: the caller owns the id and must
    /// either reattach it with [`set_parent`](Canvas::set_parent) or hand it to
    /// [`delayed_delete`](Canvas::delayed_delete), otherwise it is never freed.
    pub fn remove_child(&mut self, parent: ControlId, child: ControlId, dispose: bool) -> UiResult<()> {
        self.ensure(parent)?;
        self.ensure(child)?;
        if self.tree.get(parent).and_then(Control::inner) == Some(child) {
            return self.delayed_delete(child);
        }
        let owned = self.tree.parent(child) == Some(parent)
            || self.tree.get(child).and_then(Control::container) == Some(parent);
        if !owned {
            return Err(UiError::NotAChild { parent, child });
        }
        if dispose {
            self.delayed_delete(child)
        } else {
            self.detach_child(child);
            Ok(())
        }
    }

    /// Queue every physical child of `id` for deletion.
    pub fn delete_all_children(&mut self, id: ControlId) -> UiResult<()> {
        self.ensure(id)?;
        for child in self.own_children(id) {
            self.delayed_delete(child)?;
        }
        Ok(())
    }

    /// Detach `id` now and destroy it at the start of the next frame.
    pub fn delayed_delete(&mut self, id: ControlId) -> UiResult<()> {
        if id == self.root() {
            return Err(UiError::RootControl);
        }
        self.ensure(id)?;
        if !self.delete_queue.insert(id) {
            debug_assert!(false, "control {id} queued for deletion twice");
            warn!("control {id} queued for deletion twice");
            return Ok(());
        }
        self.detach_child(id);
        debug!("queued control {id} for deletion");
        Ok(())
    }

    pub fn is_queued_for_deletion(&self, id: ControlId) -> bool {
        self.delete_queue.contains(&id)
    }

    /// Move `id` to the end of its container's child list so it draws on top.
    pub fn bring_to_front(&mut self, id: ControlId) {
        if self.tree.reorder(id, usize::MAX) {
            self.invalidate_parent(id);
            self.redraw(id);
        }
    }

    pub fn send_to_back(&mut self, id: ControlId) {
        if self.tree.reorder(id, 0) {
            self.invalidate_parent(id);
            self.redraw(id);
        }
    }

    /// Reorder `id` so it sits directly behind or in front of its sibling `other`.
    pub fn bring_next_to(&mut self, id: ControlId, other: ControlId, behind: bool) -> bool {
        let moved = self.tree.place_next_to(id, other, behind);
        if moved {
            self.invalidate_parent(id);
            self.redraw(id);
        }
        moved
    }

    /// Walk `on_child_touched` up the parent chain until a hook stops it.
    pub fn touch(&mut self, id: ControlId) {
        let mut child = id;
        while let Some(parent) = self.tree.parent(child) {
            let propagate = self
                .with_widget(parent, |w, ctx| w.on_child_touched(ctx, child))
                .unwrap_or(true);
            if !propagate {
                break;
            }
            child = parent;
        }
    }

    /// Whether `id` or any ancestor is part of a menu.
    pub fn is_menu_component(&self, id: ControlId) -> bool {
        std::iter::once(id)
            .chain(self.tree.ancestors(id))
            .filter_map(|c| self.tree.get(c))
            .any(|c| c.widget.as_ref().is_some_and(|w| w.is_menu_component()))
    }

    /// Ask every control to close any open menu.
    pub fn close_menus(&mut self) {
        profile_function!();
        for id in self.tree.subtree(self.root()) {
            self.with_widget(id, |w, ctx| w.close_menus(ctx));
        }
    }

    pub(crate) fn attach_child(&mut self, parent: ControlId, child: ControlId) {
        let container = self.tree.child_container(parent);
        self.tree.attach(child, container, parent);
        self.with_widget(container, |w, ctx| w.on_child_added(ctx, child));
        self.invalidate(container);
        self.redraw(child);
    }

    pub(crate) fn detach_child(&mut self, child: ControlId) {
        if let Some(container) = self.tree.detach(child) {
            self.with_widget(container, |w, ctx| w.on_child_removed(ctx, child));
            self.invalidate(container);
            self.redraw(container);
        }
    }

    /// Destroy everything in the delete queue.
    pub(crate) fn flush_deletes(&mut self) {
        if self.delete_queue.is_empty() {
            return;
        }
        profile_function!();
        let queue = std::mem::take(&mut self.delete_queue);
        for id in queue {
            self.destroy(id);
        }
    }

    fn destroy(&mut self, id: ControlId) {
        if !self.tree.contains(id) {
            debug_assert!(false, "control {id} destroyed twice");
            warn!("control {id} destroyed twice");
            return;
        }
        for node in self.tree.subtree(id) {
            self.forget(node);
            self.tree.remove(node);
            self.emit(UiEvent::Destroyed(node));
            self.metrics.controls_destroyed += 1;
        }
        debug!("destroyed control {id}");
    }

    /// Drop every canvas-level reference to a control about to be destroyed.
    fn forget(&mut self, id: ControlId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.keyboard_focus == Some(id) {
            self.keyboard_focus = None;
        }
        if self.mouse_focus == Some(id) {
            self.mouse_focus = None;
        }
        self.drag.control_deleted(id);
        self.tooltip.control_deleted(id);
        self.keys.control_deleted(id);
    }
}

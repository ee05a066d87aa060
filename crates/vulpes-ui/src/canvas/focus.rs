//! Keyboard focus and tab order.

use tracing::debug;

use super::Canvas;
use crate::{control::ControlId, event::UiEvent};

/// Tab order collected during layout.
///
/// Layout visits controls post-order. The first tabable control seen is
/// `first`; `next` is the first tabable control after the focused one,
/// wrapping to `first` at the end of the pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TabOrder {
    pub first: Option<ControlId>,
    pub next: Option<ControlId>,
}

impl TabOrder {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn visit(&mut self, id: ControlId, tabable: bool, focused: bool) {
        if tabable {
            self.first.get_or_insert(id);
            self.next.get_or_insert(id);
        }
        if focused {
            self.next = None;
        }
    }

    pub(crate) fn wrap(&mut self) {
        if self.next.is_none() {
            self.next = self.first;
        }
    }
}

impl Canvas {
    pub fn tab_order(&self) -> TabOrder {
        self.tabs
    }

    pub fn has_focus(&self, id: ControlId) -> bool {
        self.keyboard_focus == Some(id)
    }

    /// Give `id` keyboard focus. Returns whether focus moved.
    pub fn focus(&mut self, id: ControlId) -> bool {
        if !self.tree.contains(id) || self.keyboard_focus == Some(id) {
            return false;
        }
        if let Some(old) = self.keyboard_focus.take() {
            self.with_widget(old, |w, ctx| w.on_lost_keyboard_focus(ctx));
            self.emit(UiEvent::FocusLost(old));
            self.redraw(old);
        }
        self.keyboard_focus = Some(id);
        self.with_widget(id, |w, ctx| w.on_keyboard_focus(ctx));
        self.emit(UiEvent::FocusGained(id));
        self.redraw(id);
        debug!("keyboard focus moved to {id}");
        true
    }

    /// Drop keyboard focus if `id` holds it.
    pub fn blur(&mut self, id: ControlId) {
        if self.keyboard_focus != Some(id) {
            return;
        }
        self.keyboard_focus = None;
        self.with_widget(id, |w, ctx| w.on_lost_keyboard_focus(ctx));
        self.emit(UiEvent::FocusLost(id));
        self.redraw(id);
    }

    /// Focus the next control in tab order. Returns whether focus moved.
    pub fn focus_next_tab(&mut self) -> bool {
        match self.tabs.next {
            Some(next) => self.focus(next),
            None => false,
        }
    }

    /// Focus the nearest keyboard-enabled control at or above `start`,
    /// unless one of its direct children already has focus.
    pub(crate) fn find_keyboard_focused_control(&mut self, start: ControlId) {
        let target = std::iter::once(start)
            .chain(self.tree.ancestors(start))
            .find(|&c| self.tree.get(c).is_some_and(|c| c.keyboard_input_enabled()));
        let Some(target) = target else {
            return;
        };
        let child_focused = self
            .keyboard_focus
            .is_some_and(|f| self.tree.children(target).contains(&f));
        if !child_focused {
            self.focus(target);
        }
    }
}

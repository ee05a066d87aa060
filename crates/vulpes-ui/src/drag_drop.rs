//! Drag-and-drop coordination state.
//!
//! The canvas owns one [`DragAndDrop`] and drives it from mouse routing (see
//! `canvas/drag.rs`). This module holds the state machine data and the
//! decisions that need no tree access.

use std::{any::Any, fmt, rc::Rc};

use vulpes_core::math::IVec2;

use crate::control::ControlId;

/// Payload describing an in-progress drag.
#[derive(Clone, Default)]
pub struct Package {
    pub name: String,
    pub draggable: bool,
    pub user_data: Option<Rc<dyn Any>>,
    /// Pointer position relative to the source at drag start.
    pub hold_offset: IVec2,
    /// Control drawn under the cursor while dragging.
    pub draw_control: Option<ControlId>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            draggable: true,
            ..Default::default()
        }
    }

    pub fn with_user_data(mut self, data: impl Any) -> Self {
        self.user_data = Some(Rc::new(data));
        self
    }

    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref().and_then(|d| d.downcast_ref())
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("name", &self.name)
            .field("draggable", &self.draggable)
            .field("hold_offset", &self.hold_offset)
            .field("draw_control", &self.draw_control)
            .finish_non_exhaustive()
    }
}

/// Coordinator state. `package.is_some()` exactly while a drag is active.
#[derive(Debug, Default)]
pub struct DragAndDrop {
    pub(crate) package: Option<Package>,
    pub(crate) source: Option<ControlId>,
    pub(crate) hovered: Option<ControlId>,
    pub(crate) new_hovered: Option<ControlId>,
    pub(crate) last_pressed: Option<ControlId>,
    pub(crate) last_pressed_pos: IVec2,
}

impl DragAndDrop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.package.is_some()
    }

    pub fn package(&self) -> Option<&Package> {
        self.package.as_ref()
    }

    pub fn source(&self) -> Option<ControlId> {
        self.source
    }

    /// Current drop-target candidate.
    pub fn hovered(&self) -> Option<ControlId> {
        self.hovered
    }

    /// Control waiting for the press to travel past the threshold.
    pub fn pending(&self) -> Option<ControlId> {
        self.last_pressed
    }

    pub(crate) fn press(&mut self, control: ControlId, position: IVec2) {
        self.last_pressed = Some(control);
        self.last_pressed_pos = position;
    }

    /// Whether `position` is far enough from the press to begin dragging.
    pub(crate) fn past_threshold(&self, position: IVec2, threshold: i32) -> bool {
        let travelled = (position - self.last_pressed_pos).abs();
        travelled.x + travelled.y >= threshold
    }

    /// Forget a destroyed control. Clearing the source also abandons the drag.
    pub(crate) fn control_deleted(&mut self, control: ControlId) {
        if self.source == Some(control) {
            self.source = None;
            self.package = None;
            self.hovered = None;
            self.last_pressed = None;
        }
        if self.last_pressed == Some(control) {
            self.last_pressed = None;
        }
        if self.hovered == Some(control) {
            self.hovered = None;
        }
        if self.new_hovered == Some(control) {
            self.new_hovered = None;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.package = None;
        self.source = None;
        self.hovered = None;
        self.new_hovered = None;
        self.last_pressed = None;
    }
}

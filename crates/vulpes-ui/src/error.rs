//! Error types for control tree operations.

use thiserror::Error;

use crate::{control::ControlId, dock::Dock};

/// Errors produced by structural operations on the control tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// The id refers to a control that was destroyed.
    #[error("control {0} no longer exists")]
    StaleControl(ControlId),

    /// No skin was found on the control or any of its ancestors.
    #[error("control {0} has no skin and none of its ancestors provide one")]
    MissingSkin(ControlId),

    /// The dock value is not valid for this operation.
    #[error("dock {0:?} is not valid here")]
    InvalidDock(Dock),

    #[error("control {child} is not a child of {parent}")]
    NotAChild { parent: ControlId, child: ControlId },

    /// Reparenting would make a control its own ancestor.
    #[error("cannot attach {child} under its own descendant {parent}")]
    CycleDetected { parent: ControlId, child: ControlId },

    /// The canvas root cannot be reparented or deleted.
    #[error("operation is not allowed on the canvas root")]
    RootControl,
}

/// Result type for control tree operations.
pub type UiResult<T> = Result<T, UiError>;

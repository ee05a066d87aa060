//! Math types re-exported from `glam`.
//!
//! The UI works in integer pixel space, so [`IVec2`] is the point type used by
//! geometry and input. Float vectors are re-exported for scale factors and
//! renderer backends.

pub use glam::{IVec2, Vec2, Vec4, ivec2, vec2};

//! Vulpes Core
//!
//! Value types and runtime services shared by the Vulpes UI crates: integer
//! geometry, colors, the generational arena that backs the control tree, and
//! the logging/profiling setup used by host applications.

pub mod alloc;
pub mod color;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
pub mod time;

pub use color::Color;
pub use geometry::{Margin, Padding, Rect, Size};

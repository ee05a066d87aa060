//! Vulpes UI - retained-mode control tree with docking layout
//!
//! This crate provides a backend-agnostic GUI core:
//! - A generational arena of controls with inner-control redirection
//! - Dock/margin/padding layout, re-run only where invalidated
//! - Clipped recursive rendering through a [`Renderer`] trait
//! - Hover, mouse capture, keyboard focus and tab order
//! - Drag and drop with a pointer threshold and acceptor search
//! - Deferred deletion drained once per frame
//!
//! ## Quick Start
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use vulpes_ui::{BasicSkin, Canvas, Dock, Panel, testing::RecordingRenderer};
//!
//! let renderer = Rc::new(RefCell::new(RecordingRenderer::default()));
//! let mut canvas = Canvas::new(BasicSkin::new(renderer.clone()).shared());
//! canvas.resize(800, 600);
//!
//! let sidebar = canvas.add_control(canvas.root(), Panel::drawn()).unwrap();
//! canvas.set_dock(sidebar, Dock::LEFT);
//! canvas.set_size(sidebar, 200, 600);
//!
//! // Once per host frame:
//! canvas.frame();
//! assert_eq!(canvas.bounds(sidebar).unwrap().height, 600);
//! ```

pub mod canvas;
pub mod config;
pub mod context;
pub mod control;
pub mod dock;
pub mod drag_drop;
pub mod error;
pub mod event;
pub mod metrics;
pub mod renderer;
pub mod skin;
pub mod testing;
pub mod tooltip;
pub mod tree;
pub mod widget;

pub use canvas::{Canvas, TabOrder};
pub use config::CanvasConfig;
pub use context::{Ctx, RenderCtx};
pub use control::{Control, ControlFlags, ControlId};
pub use dock::{Dock, Edge};
pub use drag_drop::{DragAndDrop, Package};
pub use error::{UiError, UiResult};
pub use event::{CursorIcon, InputEvent, Key, Modifiers, MouseButton, UiEvent};
pub use metrics::FrameMetrics;
pub use renderer::{RenderState, Renderer, TextureId};
pub use skin::{BasicSkin, SharedRenderer, SharedSkin, Skin, SkinColors};
pub use tree::ControlTree;
pub use widget::{Panel, Widget};

// Re-export common types from vulpes-core
pub use vulpes_core::{Color, Margin, Padding, Rect, Size, math::IVec2};

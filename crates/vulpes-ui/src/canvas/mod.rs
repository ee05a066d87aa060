//! The canvas: root of a control tree and the entry point the host drives
//! once per frame.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use vulpes_ui::{Canvas, Dock, Panel, testing::RecordingRenderer, BasicSkin};
//!
//! let renderer = Rc::new(RefCell::new(RecordingRenderer::default()));
//! let mut canvas = Canvas::new(BasicSkin::new(renderer.clone()).shared());
//! canvas.resize(800, 600);
//!
//! let toolbar = canvas.add_control(canvas.root(), Panel::drawn()).unwrap();
//! canvas.set_dock(toolbar, Dock::TOP);
//! canvas.set_size(toolbar, 800, 40);
//!
//! canvas.frame();
//! assert_eq!(canvas.bounds(toolbar).unwrap().height, 40);
//! ```

mod bounds;
mod drag;
mod focus;
mod hierarchy;
mod input;
mod layout;
mod render;

use indexmap::IndexSet;
use vulpes_core::{
    Rect, Size,
    alloc::RandomState,
    math::IVec2,
    profiling::profile_function,
    time::{Clock, SystemClock},
};

pub use focus::TabOrder;
pub(crate) use input::KeyRepeat;

use crate::{
    config::CanvasConfig,
    context::Ctx,
    control::{Control, ControlFlags, ControlId},
    drag_drop::DragAndDrop,
    error::{UiError, UiResult},
    event::{CursorIcon, Modifiers, UiEvent},
    metrics::{FrameMetrics, MetricsTimer},
    skin::SharedSkin,
    tooltip::Tooltip,
    tree::ControlTree,
    widget::{Panel, Widget},
};

/// Root of a control tree.
///
/// Owns every control plus the hover, mouse capture and keyboard focus
/// state, the deferred delete queue, key repeat, and the drag-and-drop
/// coordinator. Single-threaded: all input and frame calls come from the
/// host's thread.
pub struct Canvas {
    pub(crate) tree: ControlTree,
    pub(crate) config: CanvasConfig,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) hovered: Option<ControlId>,
    pub(crate) mouse_focus: Option<ControlId>,
    pub(crate) keyboard_focus: Option<ControlId>,
    pub(crate) tabs: TabOrder,
    pub(crate) delete_queue: IndexSet<ControlId, RandomState>,
    pub(crate) keys: KeyRepeat,
    pub(crate) modifiers: Modifiers,
    pub(crate) drag: DragAndDrop,
    pub(crate) tooltip: Tooltip,
    pub(crate) mouse_position: IVec2,
    pub(crate) scale: f32,
    pub(crate) needs_redraw: bool,
    pub(crate) events: Vec<UiEvent>,
    pub(crate) metrics: FrameMetrics,
}

impl Canvas {
    /// Create a canvas whose root draws with `skin`.
    pub fn new(skin: SharedSkin) -> Self {
        let mut root = Control::new(Box::new(Panel::default()));
        root.name = String::from("canvas");
        root.skin = Some(skin);
        root.flags = ControlFlags::MOUSE_INPUT | ControlFlags::KEYBOARD_INPUT;
        root.max_size = Size::new(i32::MAX, i32::MAX);

        Self {
            tree: ControlTree::new(root),
            config: CanvasConfig::default(),
            clock: Box::new(SystemClock::new()),
            hovered: None,
            mouse_focus: None,
            keyboard_focus: None,
            tabs: TabOrder::default(),
            delete_queue: IndexSet::default(),
            keys: KeyRepeat::default(),
            modifiers: Modifiers::empty(),
            drag: DragAndDrop::new(),
            tooltip: Tooltip::default(),
            mouse_position: IVec2::ZERO,
            scale: 1.0,
            needs_redraw: true,
            events: Vec::new(),
            metrics: FrameMetrics::new(),
        }
    }

    pub fn with_config(mut self, config: CanvasConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the time source used for key repeat and double clicks.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn root(&self) -> ControlId {
        self.tree.root()
    }

    pub fn tree(&self) -> &ControlTree {
        &self.tree
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.tree.get(id)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.tree.contains(id)
    }

    pub fn bounds(&self, id: ControlId) -> Option<Rect> {
        self.tree.get(id).map(Control::bounds)
    }

    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.tree.children(id)
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.tree.parent(id)
    }

    /// Borrow a control's widget as its concrete type.
    pub fn widget<W: Widget>(&self, id: ControlId) -> Option<&W> {
        self.tree.get(id).and_then(|c| c.widget::<W>())
    }

    pub fn widget_mut<W: Widget>(&mut self, id: ControlId) -> Option<&mut W> {
        self.tree.get_mut(id).and_then(|c| c.widget_mut::<W>())
    }

    pub fn hovered(&self) -> Option<ControlId> {
        self.hovered
    }

    /// Control holding mouse capture.
    pub fn mouse_focus(&self) -> Option<ControlId> {
        self.mouse_focus
    }

    pub fn keyboard_focus(&self) -> Option<ControlId> {
        self.keyboard_focus
    }

    /// Pointer position in canvas space.
    pub fn mouse_position(&self) -> IVec2 {
        self.mouse_position
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the render scale. Input coordinates are divided by it.
    pub fn set_scale(&mut self, scale: f32) {
        if self.scale == scale || scale <= 0.0 {
            return;
        }
        self.scale = scale;
        let root = self.root();
        self.invalidate_children(root, true);
        self.redraw(root);
    }

    /// Whether something was redrawn since the last rendered frame.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    /// Cursor the host should show.
    pub fn cursor(&self) -> CursorIcon {
        if self.drag.is_dragging() && self.drag.hovered().is_none() {
            return CursorIcon::NotAllowed;
        }
        self.hovered
            .and_then(|h| self.tree.get(h))
            .map(Control::cursor)
            .unwrap_or_default()
    }

    /// Take every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_visible(&self, id: ControlId) -> bool {
        self.tree.is_visible(id)
    }

    pub fn local_to_canvas(&self, id: ControlId, point: IVec2) -> IVec2 {
        self.tree.local_to_canvas(id, point)
    }

    pub fn canvas_to_local(&self, id: ControlId, point: IVec2) -> IVec2 {
        self.tree.canvas_to_local(id, point)
    }

    /// Deepest mouse-enabled control under a canvas-space point.
    pub fn control_at(&self, point: IVec2) -> Option<ControlId> {
        let root = self.root();
        let origin = self.tree.get(root)?.bounds().origin();
        self.tree.control_at(root, point - origin)
    }

    /// Extent of the visible children of `id`, measured from its origin.
    pub fn children_size(&self, id: ControlId) -> Size {
        self.tree.children_size(self.tree.child_container(id))
    }

    pub fn find_child_by_name(&self, id: ControlId, name: &str, recursive: bool) -> Option<ControlId> {
        self.tree.find_child_by_name(id, name, recursive)
    }

    /// Skin for `id`: its own override or the nearest ancestor's.
    pub fn try_skin_of(&self, id: ControlId) -> UiResult<SharedSkin> {
        if !self.tree.contains(id) {
            return Err(UiError::StaleControl(id));
        }
        std::iter::once(id)
            .chain(self.tree.ancestors(id))
            .find_map(|c| self.tree.get(c).and_then(|c| c.skin.clone()))
            .ok_or(UiError::MissingSkin(id))
    }

    /// # Panics
    /// If neither `id` nor any ancestor has a skin. That is a setup error
    /// the tree cannot recover from.
    pub fn skin_of(&self, id: ControlId) -> SharedSkin {
        match self.try_skin_of(id) {
            Ok(skin) => skin,
            Err(err) => panic!("{err}"),
        }
    }

    /// Resize the root to the host surface.
    pub fn resize(&mut self, width: i32, height: i32) {
        let root = self.root();
        self.set_size(root, width, height);
    }

    /// Run one full frame: update, then render.
    pub fn frame(&mut self) {
        self.update_canvas();
        self.render_canvas();
    }

    /// Recursive `update` pass. Hidden subtrees are skipped.
    pub fn update_canvas(&mut self) {
        profile_function!();
        self.metrics.begin_frame();
        let timer = MetricsTimer::start();
        self.update_recursive(self.root());
        self.metrics.update_time = timer.stop();
    }

    fn update_recursive(&mut self, id: ControlId) {
        if self.tree.get(id).is_none_or(Control::is_hidden) {
            return;
        }
        self.with_widget(id, |w, ctx| w.update(ctx));
        for child in self.own_children(id) {
            // Skip siblings detached by an earlier hook in this pass.
            if self.tree.get(child).is_some_and(|c| c.container == Some(id)) {
                self.update_recursive(child);
            }
        }
    }

    /// Bookkeeping that must happen before drawing: delete flush, layout,
    /// tab wrap, stale focus removal and key repeat.
    pub(crate) fn think(&mut self) {
        profile_function!();
        self.tabs.reset();
        self.flush_deletes();

        let timer = MetricsTimer::start();
        let root = self.root();
        let skin = self.skin_of(root);
        self.recurse_layout(root, &skin);
        self.metrics.layout_time = timer.stop();

        self.tabs.wrap();

        if self.mouse_focus.is_some_and(|c| !self.tree.is_visible(c)) {
            self.mouse_focus = None;
        }
        if let Some(focus) = self.keyboard_focus {
            let usable = self.tree.is_visible(focus)
                && self.tree.get(focus).is_some_and(Control::keyboard_input_enabled);
            if !usable {
                self.keyboard_focus = None;
            }
        }

        self.process_key_repeat();
        self.metrics.total_controls = self.tree.len();
    }

    /// Run `f` with the widget of `id` checked out of the tree.
    ///
    /// Returns `None` without calling `f` when the control is gone or its
    /// widget is already checked out (a hook re-entering itself).
    pub(crate) fn with_widget<R>(
        &mut self,
        id: ControlId,
        f: impl FnOnce(&mut dyn Widget, &mut Ctx<'_>) -> R,
    ) -> Option<R> {
        let mut widget = self.tree.take_widget(id)?;
        let result = f(widget.as_mut(), &mut Ctx::new(self, id));
        self.tree.restore_widget(id, widget);
        Some(result)
    }

    /// Snapshot of the physical child list, safe to iterate while hooks mutate the tree.
    pub(crate) fn own_children(&self, id: ControlId) -> Vec<ControlId> {
        self.tree
            .get(id)
            .map(|c| c.children.clone())
            .unwrap_or_default()
    }

    pub(crate) fn ensure(&self, id: ControlId) -> UiResult<()> {
        if self.tree.contains(id) {
            Ok(())
        } else {
            Err(UiError::StaleControl(id))
        }
    }

    pub(crate) fn emit(&mut self, event: UiEvent) {
        self.events.push(event);
    }
}

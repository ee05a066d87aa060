//! Per-control node data stored in the [`ControlTree`](crate::tree::ControlTree).

use std::{any::Any, fmt, time::Duration};

use bitflags::bitflags;
use vulpes_core::{
    Margin, Padding, Rect, Size,
    alloc::{HashMap, HashSet, sparse_set::IndexSlot},
};

use crate::{
    dock::Dock,
    drag_drop::Package,
    event::{CursorIcon, MAX_MOUSE_BUTTONS},
    skin::SharedSkin,
    widget::Widget,
};

/// Smallest size a control can be given unless overridden.
pub const DEFAULT_MIN_SIZE: Size = Size::new(1, 1);
/// Largest size a control can be given unless overridden.
pub const DEFAULT_MAX_SIZE: Size = Size::new(4096, 4096);
/// Bounds a control starts with before layout touches it.
pub const DEFAULT_BOUNDS: Rect = Rect::new(0, 0, 10, 10);

/// Generational handle to a control. Ids of destroyed controls never alias
/// a newer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(pub(crate) IndexSlot);

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.0.index(), self.0.generation())
    }
}

bitflags! {
    /// Behaviour switches on a control.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ControlFlags: u16 {
        const HIDDEN             = 1 << 0;
        const DISABLED           = 1 << 1;
        const MOUSE_INPUT        = 1 << 2;
        const KEYBOARD_INPUT     = 1 << 3;
        const TABABLE            = 1 << 4;
        /// The canvas paints a background before the tree.
        const DRAW_BACKGROUND    = 1 << 5;
        /// `move_to` keeps the control inside its parent.
        const RESTRICT_TO_PARENT = 1 << 6;
        const DEBUG_OUTLINES     = 1 << 7;
    }
}

impl Default for ControlFlags {
    fn default() -> Self {
        ControlFlags::MOUSE_INPUT
    }
}

bitflags! {
    /// Invalidation bits. Set bits request work; they do not by themselves
    /// guarantee the cached state is wrong.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Invalidation: u8 {
        /// The layout hook must run on the next layout pass.
        const LAYOUT = 1 << 0;
        /// Cached rendering of this control is stale.
        const CACHE  = 1 << 1;
    }
}

/// A node in the control tree.
///
/// Fields are read through accessors; mutation goes through
/// [`Canvas`](crate::Canvas) so hooks, clamping and invalidation stay consistent.
pub struct Control {
    pub(crate) name: String,
    pub(crate) bounds: Rect,
    pub(crate) render_bounds: Rect,
    pub(crate) inner_bounds: Rect,
    pub(crate) min_size: Size,
    pub(crate) max_size: Size,
    pub(crate) dock: Dock,
    pub(crate) margin: Margin,
    pub(crate) padding: Padding,
    pub(crate) flags: ControlFlags,
    pub(crate) invalidation: Invalidation,
    /// Parent as seen by callers.
    pub(crate) parent: Option<ControlId>,
    /// Control whose child list holds this one. Differs from `parent` when
    /// the parent redirects children into an inner control.
    pub(crate) container: Option<ControlId>,
    pub(crate) children: Vec<ControlId>,
    pub(crate) inner: Option<ControlId>,
    pub(crate) skin: Option<SharedSkin>,
    pub(crate) tooltip: Option<String>,
    pub(crate) cursor: CursorIcon,
    pub(crate) accelerators: HashMap<String, String>,
    pub(crate) drag_package: Option<Package>,
    pub(crate) accepted_packages: HashSet<String>,
    pub(crate) last_click: [Option<Duration>; MAX_MOUSE_BUTTONS],
    pub(crate) user_data: Option<Box<dyn Any>>,
    /// `None` only while one of the widget's own hooks is running.
    pub(crate) widget: Option<Box<dyn Widget>>,
}

impl Control {
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        Self {
            name: String::new(),
            bounds: DEFAULT_BOUNDS,
            render_bounds: Rect::from_origin_size(Default::default(), DEFAULT_BOUNDS.size()),
            inner_bounds: Rect::from_origin_size(Default::default(), DEFAULT_BOUNDS.size()),
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            dock: Dock::NONE,
            margin: Margin::ZERO,
            padding: Padding::ZERO,
            flags: ControlFlags::default(),
            invalidation: Invalidation::all(),
            parent: None,
            container: None,
            children: Vec::new(),
            inner: None,
            skin: None,
            tooltip: None,
            cursor: CursorIcon::Default,
            accelerators: HashMap::new(),
            drag_package: None,
            accepted_packages: HashSet::new(),
            last_click: [None; MAX_MOUSE_BUTTONS],
            user_data: None,
            widget: Some(widget),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounds in the coordinate space of the containing control.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Zero-origin copy of the bounds' size, the space render hooks draw in.
    pub fn render_bounds(&self) -> Rect {
        self.render_bounds
    }

    /// Interior left over after docking children were placed.
    pub fn inner_bounds(&self) -> Rect {
        self.inner_bounds
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn max_size(&self) -> Size {
        self.max_size
    }

    pub fn dock(&self) -> Dock {
        self.dock
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ControlFlags::HIDDEN)
    }

    pub fn is_disabled(&self) -> bool {
        self.flags.contains(ControlFlags::DISABLED)
    }

    pub fn mouse_input_enabled(&self) -> bool {
        self.flags.contains(ControlFlags::MOUSE_INPUT)
    }

    pub fn keyboard_input_enabled(&self) -> bool {
        self.flags.contains(ControlFlags::KEYBOARD_INPUT)
    }

    pub fn is_tabable(&self) -> bool {
        self.flags.contains(ControlFlags::TABABLE)
    }

    pub fn needs_layout(&self) -> bool {
        self.invalidation.contains(Invalidation::LAYOUT)
    }

    pub fn is_cache_dirty(&self) -> bool {
        self.invalidation.contains(Invalidation::CACHE)
    }

    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    /// The control whose child list physically owns this one.
    pub fn container(&self) -> Option<ControlId> {
        self.container
    }

    /// Children in paint order, including the inner control if any.
    pub fn own_children(&self) -> &[ControlId] {
        &self.children
    }

    pub fn inner(&self) -> Option<ControlId> {
        self.inner
    }

    /// The skin override set on this control, if any.
    pub fn skin_override(&self) -> Option<&SharedSkin> {
        self.skin.as_ref()
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn drag_package(&self) -> Option<&Package> {
        self.drag_package.as_ref()
    }

    pub fn accepts_package(&self, name: &str) -> bool {
        self.accepted_packages.contains(name)
    }

    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_ref().and_then(|data| data.downcast_ref())
    }

    pub fn user_data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.user_data.as_mut().and_then(|data| data.downcast_mut())
    }

    /// Borrow the widget as its concrete type. `None` while the widget's own
    /// hook is executing.
    pub fn widget<W: Widget>(&self) -> Option<&W> {
        self.widget.as_ref().and_then(|w| w.as_any().downcast_ref())
    }

    pub fn widget_mut<W: Widget>(&mut self) -> Option<&mut W> {
        self.widget.as_mut().and_then(|w| w.as_any_mut().downcast_mut())
    }

    /// Clamp `size` into this control's `[min_size, max_size]`.
    pub(crate) fn clamp_size(&self, size: Size) -> Size {
        size.clamp(self.min_size, self.max_size)
    }

    pub(crate) fn update_render_bounds(&mut self) {
        self.render_bounds = Rect::new(0, 0, self.bounds.width, self.bounds.height);
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .field("dock", &self.dock)
            .field("flags", &self.flags)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

//! Arena-backed control tree.
//!
//! [`ControlTree`] owns every live [`Control`] and answers structural
//! queries. It knows nothing about hooks; the [`Canvas`](crate::Canvas)
//! layers widget callbacks, invalidation and focus bookkeeping on top.

use vulpes_core::{
    Size,
    alloc::sparse_set::SparseSet,
    math::IVec2,
    profiling::profile_function,
};

use crate::{
    control::{Control, ControlId},
    widget::Widget,
};

pub struct ControlTree {
    controls: SparseSet<Control>,
    root: ControlId,
}

impl ControlTree {
    pub(crate) fn new(root: Control) -> Self {
        let mut controls = SparseSet::new();
        let root = ControlId(controls.push(root));
        Self { controls, root }
    }

    pub fn root(&self) -> ControlId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains(id.0)
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.try_get(id.0)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.try_get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls.indexed().map(|(slot, control)| (ControlId(slot), control))
    }

    pub(crate) fn insert(&mut self, control: Control) -> ControlId {
        ControlId(self.controls.push(control))
    }

    pub(crate) fn remove(&mut self, id: ControlId) -> Option<Control> {
        self.controls.try_remove(id.0)
    }

    /// The control that receives children added to `id`: the innermost
    /// inner control, or `id` itself.
    pub fn child_container(&self, mut id: ControlId) -> ControlId {
        while let Some(inner) = self.get(id).and_then(|c| c.inner) {
            id = inner;
        }
        id
    }

    /// Logical children of `id`, redirected through its inner control.
    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.get(self.child_container(id))
            .map(|c| c.children.as_slice())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.get(id).and_then(|c| c.parent)
    }

    /// Logical ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: ControlId) -> impl Iterator<Item = ControlId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Physical ancestors of `id` (containers), nearest first.
    pub fn containers(&self, id: ControlId) -> impl Iterator<Item = ControlId> + '_ {
        std::iter::successors(self.get(id).and_then(|c| c.container), move |&p| {
            self.get(p).and_then(|c| c.container)
        })
    }

    /// Whether `id` is attached under the root.
    pub fn is_attached(&self, id: ControlId) -> bool {
        id == self.root || self.containers(id).any(|c| c == self.root)
    }

    /// Shown itself, every container shown, and attached to the root.
    pub fn is_visible(&self, id: ControlId) -> bool {
        let Some(control) = self.get(id) else {
            return false;
        };
        if control.is_hidden() || !self.is_attached(id) {
            return false;
        }
        self.containers(id)
            .all(|c| self.get(c).is_some_and(|c| !c.is_hidden()))
    }

    /// Whether `ancestor` is `id` or one of its containers.
    pub fn is_descendant_of(&self, id: ControlId, ancestor: ControlId) -> bool {
        id == ancestor || self.containers(id).any(|c| c == ancestor)
    }

    /// Direct child lookup with an optional depth-first search below it.
    pub fn find_child_by_name(&self, id: ControlId, name: &str, recursive: bool) -> Option<ControlId> {
        let children = self.get(id)?.children.as_slice();
        if let Some(found) = children
            .iter()
            .copied()
            .find(|&c| self.get(c).is_some_and(|c| c.name == name))
        {
            return Some(found);
        }
        if !recursive {
            return None;
        }
        children
            .iter()
            .find_map(|&c| self.find_child_by_name(c, name, true))
    }

    /// Deepest control under `point`, given in `id`'s local coordinates.
    ///
    /// Children are tested front to back. A control with mouse input
    /// disabled is never returned itself, though its children still can be.
    pub fn control_at(&self, id: ControlId, point: IVec2) -> Option<ControlId> {
        let control = self.get(id)?;
        if control.is_hidden() || !control.render_bounds.contains(point) {
            return None;
        }
        for &child in control.children.iter().rev() {
            let Some(origin) = self.get(child).map(|c| c.bounds.origin()) else {
                continue;
            };
            if let Some(found) = self.control_at(child, point - origin) {
                return Some(found);
            }
        }
        control.mouse_input_enabled().then_some(id)
    }

    /// Convert a point local to `id` into canvas coordinates.
    pub fn local_to_canvas(&self, id: ControlId, point: IVec2) -> IVec2 {
        std::iter::once(id)
            .chain(self.containers(id))
            .filter_map(|c| self.get(c))
            .fold(point, |p, c| p + c.bounds.origin())
    }

    /// Convert a canvas point into coordinates local to `id`.
    pub fn canvas_to_local(&self, id: ControlId, point: IVec2) -> IVec2 {
        point - self.local_to_canvas(id, IVec2::ZERO)
    }

    /// Furthest right and bottom edges over visible children, in `id`'s space.
    pub fn children_size(&self, id: ControlId) -> Size {
        let Some(control) = self.get(id) else {
            return Size::ZERO;
        };
        control
            .children
            .iter()
            .filter_map(|&c| self.get(c))
            .filter(|c| !c.is_hidden())
            .fold(Size::ZERO, |size, c| {
                size.max(Size::new(c.bounds.right(), c.bounds.bottom()))
            })
    }

    /// `id` and everything below it, parents before children.
    pub fn subtree(&self, id: ControlId) -> Vec<ControlId> {
        profile_function!();
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(control) = self.get(next) else {
                continue;
            };
            out.push(next);
            stack.extend(control.children.iter().rev().copied());
        }
        out
    }

    /// Append `child` to `container`'s child list.
    pub(crate) fn attach(&mut self, child: ControlId, container: ControlId, parent: ControlId) {
        if let Some(c) = self.get_mut(container) {
            c.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.container = Some(container);
            c.parent = Some(parent);
        }
    }

    /// Unlink `child` from its container. Returns the former container.
    ///
    /// If `child` was its container's inner control, the inner slot is
    /// cleared as well.
    pub(crate) fn detach(&mut self, child: ControlId) -> Option<ControlId> {
        let container = self.get_mut(child).and_then(|c| {
            c.parent = None;
            c.container.take()
        })?;
        if let Some(c) = self.get_mut(container) {
            c.children.retain(|&x| x != child);
            if c.inner == Some(child) {
                c.inner = None;
            }
        }
        Some(container)
    }

    /// Move `id` within its container's child list to `index` (clamped).
    pub(crate) fn reorder(&mut self, id: ControlId, index: usize) -> bool {
        let Some(container) = self.get(id).and_then(|c| c.container) else {
            return false;
        };
        let Some(c) = self.get_mut(container) else {
            return false;
        };
        let Some(current) = c.children.iter().position(|&x| x == id) else {
            return false;
        };
        let index = index.min(c.children.len() - 1);
        if current == index {
            return false;
        }
        c.children.remove(current);
        c.children.insert(index, id);
        true
    }

    /// Move `id` directly behind (before) or in front of (after) its sibling `other`.
    pub(crate) fn place_next_to(&mut self, id: ControlId, other: ControlId, behind: bool) -> bool {
        let container = self.get(id).and_then(|c| c.container);
        if id == other || container.is_none() || container != self.get(other).and_then(|c| c.container) {
            return false;
        }
        let Some(c) = container.and_then(|container| self.get_mut(container)) else {
            return false;
        };
        let Some(current) = c.children.iter().position(|&x| x == id) else {
            return false;
        };
        c.children.remove(current);
        let Some(anchor) = c.children.iter().position(|&x| x == other) else {
            c.children.insert(current, id);
            return false;
        };
        let index = if behind { anchor } else { anchor + 1 };
        c.children.insert(index, id);
        index != current
    }

    pub(crate) fn take_widget(&mut self, id: ControlId) -> Option<Box<dyn Widget>> {
        self.get_mut(id).and_then(|c| c.widget.take())
    }

    /// Put a widget back after its hook ran. Dropped if the control was
    /// destroyed meanwhile.
    pub(crate) fn restore_widget(&mut self, id: ControlId, widget: Box<dyn Widget>) {
        if let Some(c) = self.get_mut(id) {
            c.widget = Some(widget);
        }
    }
}

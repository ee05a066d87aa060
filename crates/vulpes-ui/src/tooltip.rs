//! Hover tooltips.
//!
//! A control shows its tooltip text while hovered, or its parent's when it
//! has none of its own. The canvas draws the active tooltip last each frame,
//! above the cursor and kept inside the root bounds.

use vulpes_core::{Rect, Size, math::IVec2};

use crate::control::ControlId;

/// Vertical gap between the cursor and the bottom of the tooltip.
pub const TOOLTIP_CURSOR_GAP: i32 = 10;

/// Which control's tooltip is showing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tooltip {
    control: Option<ControlId>,
}

impl Tooltip {
    pub fn current(&self) -> Option<ControlId> {
        self.control
    }

    pub(crate) fn enable(&mut self, control: ControlId) {
        self.control = Some(control);
    }

    pub(crate) fn disable(&mut self, control: ControlId) {
        if self.control == Some(control) {
            self.control = None;
        }
    }

    pub(crate) fn control_deleted(&mut self, control: ControlId) {
        self.disable(control);
    }
}

/// Place a tooltip of `size` centered above `mouse`, clamped into `area`.
pub fn placement(mouse: IVec2, size: Size, area: Rect) -> Rect {
    let mut rect = Rect::new(
        mouse.x - size.width / 2,
        mouse.y - size.height - TOOLTIP_CURSOR_GAP,
        size.width,
        size.height,
    );
    rect.x = rect.x.min(area.right() - rect.width).max(area.x);
    rect.y = rect.y.min(area.bottom() - rect.height).max(area.y);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect::new(0, 0, 800, 600);

    #[test]
    fn test_placement_centered_above_cursor() {
        let rect = placement(IVec2::new(400, 300), Size::new(100, 20), AREA);
        assert_eq!(rect, Rect::new(350, 270, 100, 20));
    }

    #[test]
    fn test_placement_clamped_to_area() {
        let rect = placement(IVec2::new(5, 5), Size::new(100, 20), AREA);
        assert_eq!(rect, Rect::new(0, 0, 100, 20));

        let rect = placement(IVec2::new(795, 300), Size::new(100, 20), AREA);
        assert_eq!(rect.right(), 800);
    }

    #[test]
    fn test_disable_only_clears_matching_control() {
        use vulpes_core::alloc::sparse_set::IndexSlot;

        let a = ControlId(IndexSlot::new(0, 1));
        let b = ControlId(IndexSlot::new(0, 2));
        let mut tooltip = Tooltip::default();
        tooltip.enable(a);
        tooltip.disable(b);
        assert_eq!(tooltip.current(), Some(a));
        tooltip.control_deleted(a);
        assert_eq!(tooltip.current(), None);
    }
}

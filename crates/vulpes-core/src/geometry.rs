//! Integer pixel geometry used by the control tree.

use crate::math::IVec2;

/// Axis-aligned rectangle in integer pixels. Width and height may go
/// negative transiently during layout; [`Rect::is_empty`] treats that as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn from_origin_size(origin: IVec2, size: Size) -> Self {
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.x && point.y >= self.y && point.x < self.right() && point.y < self.bottom()
    }

    /// Overlap of two rectangles. Disjoint inputs give a zero-sized rect,
    /// never an inverted one.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }

    /// Smallest rectangle covering both. Empty inputs are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    pub fn translate(&self, offset: IVec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Interior rectangle after removing `padding` from each edge.
    pub fn shrink(&self, padding: Padding) -> Rect {
        Rect::new(
            self.x + padding.left,
            self.y + padding.top,
            self.width - padding.horizontal(),
            self.height - padding.vertical(),
        )
    }

    /// Rectangle left for a control once its `margin` is taken out.
    pub fn shrink_margin(&self, margin: Margin) -> Rect {
        Rect::new(
            self.x + margin.left,
            self.y + margin.top,
            self.width - margin.horizontal(),
            self.height - margin.vertical(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    pub const fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }

    /// Clamp each axis into `[min, max]`. `min` wins if the bounds cross.
    pub fn clamp(self, min: Size, max: Size) -> Size {
        Size::new(
            self.width.min(max.width).max(min.width),
            self.height.min(max.height).max(min.height),
        )
    }

    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

macro_rules! edge_spacing {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name {
            pub left: i32,
            pub top: i32,
            pub right: i32,
            pub bottom: i32,
        }

        impl $name {
            pub const ZERO: $name = $name::new(0, 0, 0, 0);

            /// Arguments in `left, top, right, bottom` order.
            pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
                $name { left, top, right, bottom }
            }

            pub const fn uniform(value: i32) -> Self {
                $name::new(value, value, value, value)
            }

            pub const fn horizontal(&self) -> i32 {
                self.left + self.right
            }

            pub const fn vertical(&self) -> i32 {
                self.top + self.bottom
            }
        }
    };
}

edge_spacing!(
    /// Inner spacing between a control's edge and the area its children dock into.
    Padding
);
edge_spacing!(
    /// Outer spacing a docked control keeps from its siblings and the parent interior.
    Margin
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 5, 5);
        let clip = a.intersect(&b);
        assert!(clip.is_empty());
        assert!(clip.width >= 0 && clip.height >= 0);
    }

    #[test]
    fn test_intersect_disjoint_on_one_axis() {
        let clip = Rect::new(0, 0, 10, 10).intersect(&Rect::new(20, 0, 5, 5));
        assert_eq!(clip, Rect::new(20, 0, 0, 5));
        assert!(clip.is_empty());
    }

    #[test]
    fn test_intersect_nested() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(90, -10, 30, 30);
        assert_eq!(outer.intersect(&inner), Rect::new(90, 0, 10, 20));
    }

    #[test]
    fn test_shrink_padding() {
        let rect = Rect::new(0, 0, 100, 50).shrink(Padding::new(1, 2, 3, 4));
        assert_eq!(rect, Rect::new(1, 2, 96, 44));
    }

    #[test]
    fn test_size_clamp() {
        let clamped = Size::new(0, 9000).clamp(Size::new(1, 1), Size::new(4096, 4096));
        assert_eq!(clamped, Size::new(1, 4096));
    }

    #[test]
    fn test_contains_half_open() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(IVec2::new(10, 10)));
        assert!(!rect.contains(IVec2::new(15, 12)));
    }
}

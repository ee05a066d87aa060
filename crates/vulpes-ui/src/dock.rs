//! Docking and alignment flags.

use bitflags::bitflags;

bitflags! {
    /// Which edge of the parent's remaining interior a control consumes
    /// during layout, or how it is aligned by
    /// [`Canvas::set_relative_position`](crate::Canvas::set_relative_position).
    ///
    /// Layout honours the first of `TOP`, `LEFT`, `RIGHT`, `BOTTOM` that is
    /// set; `FILL` takes precedence over all of them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Dock: u8 {
        const NONE     = 0;
        const LEFT     = 1 << 1;
        const RIGHT    = 1 << 2;
        const TOP      = 1 << 3;
        const BOTTOM   = 1 << 4;
        const CENTER_V = 1 << 5;
        const CENTER_H = 1 << 6;
        const FILL     = 1 << 7;
    }
}

impl Dock {
    pub const CENTER: Self = Self::CENTER_V.union(Self::CENTER_H);

    pub fn is_fill(self) -> bool {
        self.contains(Self::FILL)
    }

    /// The edge layout uses for this value, if any.
    pub fn edge(self) -> Option<Edge> {
        if self.is_fill() {
            return None;
        }
        [
            (Self::TOP, Edge::Top),
            (Self::LEFT, Edge::Left),
            (Self::RIGHT, Edge::Right),
            (Self::BOTTOM, Edge::Bottom),
        ]
        .into_iter()
        .find_map(|(flag, edge)| self.contains(flag).then_some(edge))
    }
}

/// Side of the parent interior an edge-docked control is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Left,
    Right,
    Bottom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_wins_over_edges() {
        assert_eq!((Dock::FILL | Dock::TOP).edge(), None);
        assert!((Dock::FILL | Dock::TOP).is_fill());
    }

    #[test]
    fn test_edge_priority() {
        assert_eq!((Dock::LEFT | Dock::TOP).edge(), Some(Edge::Top));
        assert_eq!(Dock::BOTTOM.edge(), Some(Edge::Bottom));
        assert_eq!(Dock::CENTER.edge(), None);
    }
}

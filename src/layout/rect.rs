//! Rect: A signed rectangle primitive with grid clipping.

use super::Coord;

/// A rectangle defined by position and size.
///
/// Unlike cell indices, rectangles may extend past any edge of the grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: i32,
    /// Y coordinate (row) of the top-left corner.
    pub y: i32,
    /// Width in columns.
    pub width: i32,
    /// Height in rows.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a position and a size.
    #[inline]
    pub const fn from_coords(pos: Coord, size: Coord) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Create a rectangle covering a whole grid.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Check if the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Intersection of two rectangles, or `None` if they do not overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let overlap = Self::new(x, y, right - x, bottom - y);
        (!overlap.is_empty()).then_some(overlap)
    }

    /// Clip against a `width` x `height` grid anchored at the origin.
    #[inline]
    pub fn clip(&self, width: u16, height: u16) -> Option<Self> {
        self.intersection(&Self::from_size(width, height))
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

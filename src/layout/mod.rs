//! Layout module: Positions, sizes and clipping rectangles.
//!
//! All geometry is signed so producers can compute positions that fall
//! off-screen (for example during a resize); clipping against the grid
//! happens in [`Rect::clip`].

mod coord;
mod rect;

pub use coord::Coord;
pub use rect::Rect;

/// Horizontal anchoring of a text run relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Text starts at `x`.
    #[default]
    Left,
    /// Text is centered on `x`, rounding toward the left.
    Center,
    /// Text ends just before `x`.
    Right,
}

impl Alignment {
    /// Resolve the starting column of a run of `len` cells anchored at `x`.
    #[inline]
    pub const fn start(self, x: i32, len: i32) -> i32 {
        match self {
            Self::Left => x,
            Self::Center => x - len / 2,
            Self::Right => x - len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_start() {
        assert_eq!(Alignment::Left.start(5, 2), 5);
        assert_eq!(Alignment::Center.start(5, 2), 4);
        assert_eq!(Alignment::Center.start(5, 3), 4);
        assert_eq!(Alignment::Right.start(5, 2), 3);
    }
}

//! Coord: An integer (x, y) pair used for both positions and sizes.

use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Signed cell coordinate or size.
///
/// Arithmetic never clamps; negative and oversized values are legal and are
/// only resolved against the grid when drawing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    /// Column (or width).
    pub x: i32,
    /// Row (or height).
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin (0, 0).
    pub const ZERO: Self = Self::new(0, 0);

    /// Unit size (1, 1).
    pub const ONE: Self = Self::new(1, 1);
}

impl std::fmt::Debug for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Coord {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coord {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Coord {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Coord {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Coord {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<i32> for Coord {
    type Output = Self;

    /// Integer division, truncating toward zero.
    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_arithmetic() {
        let a = Coord::new(3, -2);
        let b = Coord::new(1, 5);
        assert_eq!(a + b, Coord::new(4, 3));
        assert_eq!(a - b, Coord::new(2, -7));
        assert_eq!(a * 3, Coord::new(9, -6));
        assert_eq!(Coord::new(7, -7) / 2, Coord::new(3, -3));
    }

    #[test]
    fn test_coord_no_clamping() {
        let mut c = Coord::ZERO;
        c -= Coord::new(10, 10);
        assert_eq!(c, Coord::new(-10, -10));
        c += Coord::ONE;
        assert_eq!(c, Coord::new(-9, -9));
    }
}

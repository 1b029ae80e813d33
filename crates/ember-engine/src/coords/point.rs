use core::ops::{Add, Neg, Sub};

use super::Coord;

/// 2D point in display pixels.
///
/// Arithmetic saturates at the `Coord` range instead of wrapping, so objects
/// pushed far off-screen stay far off-screen.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

impl From<(Coord, Coord)> for Point {
    #[inline]
    fn from((x, y): (Coord, Coord)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for embedded_graphics::prelude::Point {
    #[inline]
    fn from(p: Point) -> Self {
        embedded_graphics::prelude::Point::new(p.x as i32, p.y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_sub() {
        let p = Point::new(3, 4) + Point::new(1, -6);
        assert_eq!(p, Point::new(4, -2));
        assert_eq!(p - Point::new(4, -2), Point::zero());
    }

    #[test]
    fn arithmetic_saturates() {
        let p = Point::new(Coord::MAX, Coord::MIN) + Point::new(10, -10);
        assert_eq!(p, Point::new(Coord::MAX, Coord::MIN));
        assert_eq!(-Point::new(Coord::MIN, 1), Point::new(Coord::MAX, -1));
    }
}

use embedded_graphics::primitives::Rectangle;

use super::{Coord, Point, Size};

/// Axis-aligned rectangle with inclusive corners (`p1` top-left, `p2`
/// bottom-right).
///
/// Invariant: `p2.x >= p1.x && p2.y >= p1.y`. Every constructor upholds it, so
/// the smallest rect is a single pixel and `width()`/`height()` are never
/// below 1.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    p1: Point,
    p2: Point,
}

impl Rect {
    /// Builds a rect from two corners in any order.
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            p1: Point::new(a.x.min(b.x), a.y.min(b.y)),
            p2: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Builds a rect at `pos` with `size`, clamping the size to at least 1x1.
    ///
    /// The size always wins: near `Coord::MAX` the position is pulled back so
    /// the bottom-right corner still fits.
    #[inline]
    pub fn from_pos_size(pos: Point, size: Size) -> Self {
        let size = size.clamped();
        let p1 = Point::new(
            pos.x.min(Coord::MAX - (size.w - 1)),
            pos.y.min(Coord::MAX - (size.h - 1)),
        );
        Self {
            p1,
            p2: Point::new(p1.x + (size.w - 1), p1.y + (size.h - 1)),
        }
    }

    /// Single-pixel rect.
    #[inline]
    pub const fn point(p: Point) -> Self {
        Self { p1: p, p2: p }
    }

    #[inline]
    pub const fn p1(&self) -> Point {
        self.p1
    }

    #[inline]
    pub const fn p2(&self) -> Point {
        self.p2
    }

    #[inline]
    pub fn width(&self) -> Coord {
        self.p2.x.saturating_sub(self.p1.x).saturating_add(1)
    }

    #[inline]
    pub fn height(&self) -> Coord {
        self.p2.y.saturating_sub(self.p1.y).saturating_add(1)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Same size, top-left corner moved to `pos`.
    #[inline]
    pub fn with_pos(self, pos: Point) -> Self {
        Self::from_pos_size(pos, self.size())
    }

    /// Same top-left corner, new size (clamped to 1x1).
    #[inline]
    pub fn with_size(self, size: Size) -> Self {
        Self::from_pos_size(self.p1, size)
    }

    /// Translates the rect, keeping its size at the coordinate limits.
    #[inline]
    pub fn offset(self, delta: Point) -> Self {
        Self::from_pos_size(self.p1 + delta, self.size())
    }

    /// Shrinks the rect by `by` on every side. Collapses to the center pixel
    /// when the rect is too small to shrink that far.
    pub fn inset(self, by: Coord) -> Self {
        let p1 = self.p1 + Point::new(by, by);
        let p2 = self.p2 - Point::new(by, by);
        if p1.x > p2.x || p1.y > p2.y {
            Self::point(self.center())
        } else {
            Self { p1, p2 }
        }
    }

    /// Inclusive containment.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.p1.x && p.x <= self.p2.x && p.y >= self.p1.y && p.y <= self.p2.y
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.p1.x <= other.p2.x
            && other.p1.x <= self.p2.x
            && self.p1.y <= other.p2.y
            && other.p1.y <= self.p2.y
    }

    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Rect {
            p1: Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
            p2: Point::new(self.p2.x.min(other.p2.x), self.p2.y.min(other.p2.y)),
        })
    }

    /// Smallest rect covering both.
    #[inline]
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            p1: Point::new(self.p1.x.min(other.p1.x), self.p1.y.min(other.p1.y)),
            p2: Point::new(self.p2.x.max(other.p2.x), self.p2.y.max(other.p2.y)),
        }
    }

    // ── anchors ───────────────────────────────────────────────────────────

    #[inline]
    pub fn top(&self) -> Point {
        Point::new(mid(self.p1.x, self.p2.x), self.p1.y)
    }

    #[inline]
    pub fn bottom(&self) -> Point {
        Point::new(mid(self.p1.x, self.p2.x), self.p2.y)
    }

    #[inline]
    pub fn left(&self) -> Point {
        Point::new(self.p1.x, mid(self.p1.y, self.p2.y))
    }

    #[inline]
    pub fn right(&self) -> Point {
        Point::new(self.p2.x, mid(self.p1.y, self.p2.y))
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(mid(self.p1.x, self.p2.x), mid(self.p1.y, self.p2.y))
    }
}

/// Floor midpoint, computed wide so extreme corners do not overflow.
#[inline]
fn mid(a: Coord, b: Coord) -> Coord {
    ((a as i32 + b as i32) >> 1) as Coord
}

impl From<Rect> for Rectangle {
    #[inline]
    fn from(r: Rect) -> Self {
        Rectangle::new(r.p1.into(), r.size().into())
    }
}

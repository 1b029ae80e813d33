use super::Coord;

/// Width and height of an object in pixels.
///
/// A `Size` may hold any value; geometry consumers clamp it through
/// [`Size::clamped`] so that every rectangle is at least 1x1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: Coord,
    pub h: Coord,
}

impl Size {
    /// The smallest size an object can have.
    pub const MIN: Size = Size { w: 1, h: 1 };

    #[inline]
    pub const fn new(w: Coord, h: Coord) -> Self {
        Self { w, h }
    }

    /// Returns the size with each component raised to at least 1.
    #[inline]
    pub const fn clamped(self) -> Self {
        Self {
            w: if self.w < 1 { 1 } else { self.w },
            h: if self.h < 1 { 1 } else { self.h },
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<(Coord, Coord)> for Size {
    #[inline]
    fn from((w, h): (Coord, Coord)) -> Self {
        Size::new(w, h)
    }
}

impl From<Size> for embedded_graphics::prelude::Size {
    #[inline]
    fn from(s: Size) -> Self {
        let s = s.clamped();
        embedded_graphics::prelude::Size::new(s.w as u32, s.h as u32)
    }
}

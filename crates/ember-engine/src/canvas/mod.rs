//! Off-screen buffer for one tile.
//!
//! The redraw pass renders every object overlapping a dirty tile into a
//! [`TileCanvas`] positioned over that tile's world area, then hands the
//! canvas to the [`DisplayPort`](crate::display::DisplayPort). Drawing is
//! clipped to the canvas, so sprites never need to know tile boundaries.
//!
//! Pixels are stored the way SSD1306-class controllers expect them: `PAGES`
//! horizontal bands of 8 rows, one byte per column, least significant bit at
//! the top. A port can usually stream `pages()` straight to the panel.

use core::convert::Infallible;

use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{Dimensions, DrawTarget};
use embedded_graphics::primitives::Rectangle;

use crate::coords::{Coord, Point, Rect, Size};

#[derive(Debug, Clone)]
pub struct TileCanvas<const W: usize, const PAGES: usize> {
    origin: Point,
    pages: [[u8; W]; PAGES],
}

impl<const W: usize, const PAGES: usize> Default for TileCanvas<W, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const PAGES: usize> TileCanvas<W, PAGES> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = PAGES * 8;

    pub const fn new() -> Self {
        Self { origin: Point { x: 0, y: 0 }, pages: [[0; W]; PAGES] }
    }

    /// World position of the canvas' top-left pixel.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Moves the canvas over another world area. Pixel data is kept.
    #[inline]
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Size of the canvas in pixels.
    pub fn size(&self) -> Size {
        Size::new(
            W.min(Coord::MAX as usize) as Coord,
            Self::HEIGHT.min(Coord::MAX as usize) as Coord,
        )
    }

    /// World area covered by the canvas.
    pub fn area(&self) -> Rect {
        Rect::from_pos_size(self.origin, self.size())
    }

    /// Pixel at canvas-local (`x`, `y`); out of range reads as off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pages
            .get(y / 8)
            .and_then(|page| page.get(x))
            .is_some_and(|col| col & (1 << (y % 8)) != 0)
    }

    /// Raw page data, top page first.
    #[inline]
    pub fn pages(&self) -> &[[u8; W]; PAGES] {
        &self.pages
    }

    /// Sets every pixel to `color` without moving the canvas.
    pub fn fill(&mut self, color: BinaryColor) {
        let byte = if color.is_on() { 0xFF } else { 0x00 };
        self.pages = [[byte; W]; PAGES];
    }

    #[inline]
    fn put(&mut self, x: usize, y: usize, on: bool) {
        let mask = 1u8 << (y % 8);
        let col = &mut self.pages[y / 8][x];
        if on {
            *col |= mask;
        } else {
            *col &= !mask;
        }
    }
}

impl<const W: usize, const PAGES: usize> Dimensions for TileCanvas<W, PAGES> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.origin.into(), self.size().into())
    }
}

impl<const W: usize, const PAGES: usize> DrawTarget for TileCanvas<W, PAGES> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let ox = i32::from(self.origin.x);
        let oy = i32::from(self.origin.y);
        for Pixel(p, color) in pixels {
            let (x, y) = (p.x - ox, p.y - oy);
            if x < 0 || y < 0 {
                continue;
            }
            let (x, y) = (x as usize, y as usize);
            if x < W && y < Self::HEIGHT {
                self.put(x, y, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

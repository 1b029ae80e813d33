use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;

use crate::coords::{Coord, Rect};

/// 1 bit per pixel image, rows packed MSB first and padded to whole bytes.
///
/// This is the layout `embedded_graphics::image::ImageRaw<BinaryColor>` uses,
/// so existing assets can be reused as-is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bitmap {
    data: &'static [u8],
    width: Coord,
}

impl Bitmap {
    pub const fn new(data: &'static [u8], width: Coord) -> Self {
        Self { data, width }
    }

    #[inline]
    pub fn width(&self) -> Coord {
        self.width.max(1)
    }

    /// Rows present in the data.
    pub fn height(&self) -> Coord {
        let stride = self.stride();
        (self.data.len() / stride).min(Coord::MAX as usize) as Coord
    }

    /// Bit at (`x`, `y`); pixels beyond the data read as unset.
    pub fn bit(&self, x: Coord, y: Coord) -> bool {
        if x < 0 || y < 0 || x >= self.width() {
            return false;
        }
        let byte = y as usize * self.stride() + x as usize / 8;
        let mask = 0x80u8 >> (x as usize % 8);
        self.data.get(byte).is_some_and(|b| b & mask != 0)
    }

    /// Draws the image at the top-left of `rect`, clipped to `rect`.
    ///
    /// Set bits are drawn in `ink`, clear bits in `ink.invert()`, so the
    /// image fully covers its area.
    pub(crate) fn draw<D>(&self, rect: Rect, ink: BinaryColor, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let origin = rect.p1();
        let (w, h) = (rect.width(), rect.height());
        let pixels = (0..h).flat_map(move |y| {
            (0..w).map(move |x| {
                let color = if self.bit(x, y) { ink } else { ink.invert() };
                let p = origin + crate::coords::Point::new(x, y);
                Pixel(p.into(), color)
            })
        });
        target.draw_iter(pixels)
    }

    #[inline]
    fn stride(&self) -> usize {
        (self.width() as usize).div_ceil(8)
    }
}

use core::convert::Infallible;

use crate::canvas::TileCanvas;
use crate::coords::Rect;

use super::DisplayPort;

/// In-memory copy of a `W x (PAGES * 8)` panel.
///
/// Uses the same page layout as [`TileCanvas`]. Flushed areas falling
/// outside the panel are clipped.
#[derive(Debug, Clone)]
pub struct PanelBuffer<const W: usize, const PAGES: usize> {
    pages: [[u8; W]; PAGES],
    flushes: usize,
}

impl<const W: usize, const PAGES: usize> Default for PanelBuffer<W, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const PAGES: usize> PanelBuffer<W, PAGES> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = PAGES * 8;

    pub const fn new() -> Self {
        Self { pages: [[0; W]; PAGES], flushes: 0 }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pages
            .get(y / 8)
            .and_then(|page| page.get(x))
            .is_some_and(|col| col & (1 << (y % 8)) != 0)
    }

    #[inline]
    pub fn pages(&self) -> &[[u8; W]; PAGES] {
        &self.pages
    }

    /// Number of tiles flushed so far.
    #[inline]
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Iterates panel rows top to bottom, one `bool` per pixel.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = bool> + '_> + '_ {
        (0..Self::HEIGHT).map(move |y| (0..W).map(move |x| self.pixel(x, y)))
    }
}

impl<const W: usize, const PAGES: usize> DisplayPort for PanelBuffer<W, PAGES> {
    type Error = Infallible;

    fn flush<const CW: usize, const CP: usize>(
        &mut self,
        area: Rect,
        canvas: &TileCanvas<CW, CP>,
    ) -> Result<(), Self::Error> {
        self.flushes += 1;
        let (x0, y0) = (area.p1().x as i32, area.p1().y as i32);
        for dy in 0..area.height() as usize {
            for dx in 0..area.width() as usize {
                let (x, y) = (x0 + dx as i32, y0 + dy as i32);
                if x < 0 || y < 0 || x as usize >= W || y as usize >= Self::HEIGHT {
                    continue;
                }
                let (x, y) = (x as usize, y as usize);
                let mask = 1u8 << (y % 8);
                let col = &mut self.pages[y / 8][x];
                if canvas.pixel(dx, dy) {
                    *col |= mask;
                } else {
                    *col &= !mask;
                }
            }
        }
        Ok(())
    }
}

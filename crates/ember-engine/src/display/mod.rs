//! Panel output.
//!
//! This module is responsible for:
//! - the [`DisplayPort`] contract a panel driver implements to receive tiles
//! - [`PanelBuffer`], a full-panel memory port used by hosts and tests
//!
//! The engine renders one dirty tile at a time into a
//! [`TileCanvas`](crate::canvas::TileCanvas) and calls
//! [`DisplayPort::flush`] with the tile's screen area. Ports decide how to get
//! the pixels onto glass: an SPI driver would set the controller's column and
//! page window to `area` and stream the canvas pages.

mod buffer;

pub use buffer::PanelBuffer;

use crate::canvas::TileCanvas;
use crate::coords::Rect;

pub trait DisplayPort {
    type Error;

    /// Copies the top-left `area.size()` pixels of `canvas` to `area` of the
    /// panel (screen coordinates).
    ///
    /// `area` always lies within the tiler grid and never exceeds the canvas.
    fn flush<const W: usize, const PAGES: usize>(
        &mut self,
        area: Rect,
        canvas: &TileCanvas<W, PAGES>,
    ) -> Result<(), Self::Error>;
}

impl<P: DisplayPort> DisplayPort for &mut P {
    type Error = P::Error;

    #[inline]
    fn flush<const W: usize, const PAGES: usize>(
        &mut self,
        area: Rect,
        canvas: &TileCanvas<W, PAGES>,
    ) -> Result<(), Self::Error> {
        (**self).flush(area, canvas)
    }
}

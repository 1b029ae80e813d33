//! Dirty-region bookkeeping.
//!
//! Responsibilities:
//! - define the write-only [`RefreshSink`] contract the scene reports changes to
//! - provide [`Tiler`], a fixed tile grid that implements it and tells the
//!   redraw pass which panel areas need repainting

mod grid;
mod sink;

pub use grid::{Tile, Tiler};
pub use sink::{RefreshSink, SinkId};

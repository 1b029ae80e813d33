//! Ember engine crate.
//!
//! A tiled sprite engine for small monochrome panels. Objects live in a
//! fixed-capacity [`Scene`](scene::Scene), grouped into nestable lists; every
//! geometry change is reported to a [`Tiler`](tiler::Tiler), and the
//! [`Engine`](engine::Engine) redraws only the tiles that changed.
//!
//! Without the default `std` feature the crate is `no_std` and allocation
//! free; `std` adds logger setup and a host frame clock.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

pub mod canvas;
pub mod coords;
pub mod display;
pub mod engine;
pub mod scene;
pub mod shapes;
pub mod tiler;

#[cfg(feature = "std")]
pub mod logging;
#[cfg(feature = "std")]
pub mod time;

/// Common imports for applications and sprite implementations.
pub mod prelude {
    pub use embedded_graphics::pixelcolor::BinaryColor;
    pub use embedded_graphics::prelude::{DrawTarget, Primitive};
    pub use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    pub use embedded_graphics::Drawable;

    pub use crate::canvas::TileCanvas;
    pub use crate::coords::{Coord, Point, Rect, Size};
    pub use crate::display::{DisplayPort, PanelBuffer};
    pub use crate::engine::{AppControl, Engine, EngineConfig};
    pub use crate::scene::{MenuLayout, ObjectId, Scene, SceneError, Sprite};
    pub use crate::shapes::{Bitmap, Shape, Style};
    pub use crate::tiler::{RefreshSink, SinkId, Tiler};
}

//! Coordinate and geometry types shared by the scene, the tiler and canvases.
//!
//! Canonical space:
//! - Display pixels, integer coordinates
//! - Origin top-left
//! - +X right, +Y down
//!
//! Rectangles use inclusive corners: a rect from (0,0) to (9,9) covers 10x10
//! pixels. "World" coordinates are what objects live in; the tiler subtracts
//! its offset to get screen coordinates.

mod point;
mod rect;
mod size;

pub use point::Point;
pub use rect::Rect;
pub use size::Size;

/// Scalar coordinate type. 16 bits covers any panel this engine targets.
pub type Coord = i16;

use crate::coords::{Point, Size};

/// Engine construction parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tile size in pixels. Clamped to the tile canvas dimensions.
    pub tile_size: Size,
    /// Initial camera position: the world point shown at the panel's (0,0).
    pub offset: Point,
    /// Mark every tile dirty on construction so the first `display` paints
    /// the whole panel.
    pub full_refresh_on_start: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_size: Size::new(8, 8),
            offset: Point::zero(),
            full_refresh_on_start: true,
        }
    }
}

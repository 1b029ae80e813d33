use crate::coords::{Coord, Point, Rect, Size};

use super::RefreshSink;

/// One dirty tile, as reported by [`Tiler::dirty_tiles`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile {
    pub col: usize,
    pub row: usize,
    /// Area covered on the panel.
    pub screen: Rect,
    /// Same area in world coordinates (screen + tiler offset).
    pub world: Rect,
}

/// Fixed grid of `COLS x ROWS` tiles with one dirty flag each.
///
/// The grid covers the panel starting at screen (0,0). World rectangles are
/// translated by the tiler offset (the camera position) before they are
/// mapped to tiles; anything falling outside the panel is dropped.
///
/// Storage is a flag matrix sized at compile time, so a tiler lives happily
/// in a `static` on targets without an allocator.
#[derive(Debug, Clone)]
pub struct Tiler<const COLS: usize, const ROWS: usize> {
    tile: Size,
    offset: Point,
    dirty: [[bool; COLS]; ROWS],
}

impl<const COLS: usize, const ROWS: usize> Tiler<COLS, ROWS> {
    /// Creates a clean tiler. `tile` is clamped to at least 1x1.
    pub fn new(tile: Size) -> Self {
        Self {
            tile: tile.clamped(),
            offset: Point::zero(),
            dirty: [[false; COLS]; ROWS],
        }
    }

    #[inline]
    pub fn tile_size(&self) -> Size {
        self.tile
    }

    #[inline]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Moves the camera. The whole panel is marked dirty when the offset
    /// actually changes, because every pixel now shows a different part of
    /// the world.
    pub fn set_offset(&mut self, offset: Point) {
        if self.offset != offset {
            log::trace!("tiler offset {:?} -> {:?}", self.offset, offset);
            self.offset = offset;
            self.refresh_all();
        }
    }

    /// Area of the panel covered by the grid, or `None` for an empty grid.
    pub fn screen_rect(&self) -> Option<Rect> {
        if COLS == 0 || ROWS == 0 {
            return None;
        }
        let w = (COLS as i32 * self.tile.w as i32).min(Coord::MAX as i32 + 1);
        let h = (ROWS as i32 * self.tile.h as i32).min(Coord::MAX as i32 + 1);
        Some(Rect::new(
            Point::zero(),
            Point::new((w - 1) as Coord, (h - 1) as Coord),
        ))
    }

    /// Screen area of the tile at (`col`, `row`).
    pub fn tile_rect(&self, col: usize, row: usize) -> Rect {
        let x = (col as i32 * self.tile.w as i32).min(Coord::MAX as i32) as Coord;
        let y = (row as i32 * self.tile.h as i32).min(Coord::MAX as i32) as Coord;
        Rect::from_pos_size(Point::new(x, y), self.tile)
    }

    /// Marks every tile overlapped by `rect` (screen coordinates).
    pub fn refresh_screen(&mut self, rect: Rect) {
        let Some(visible) = self.screen_rect().and_then(|s| s.intersect(&rect)) else {
            return;
        };
        let (c0, r0) = self.cell_of(visible.p1());
        let (c1, r1) = self.cell_of(visible.p2());
        for row in &mut self.dirty[r0..=r1] {
            for flag in &mut row[c0..=c1] {
                *flag = true;
            }
        }
    }

    /// Marks every tile overlapped by `rect` (world coordinates).
    #[inline]
    pub fn refresh_world(&mut self, rect: Rect) {
        self.refresh_screen(rect.offset(-self.offset));
    }

    pub fn refresh_all(&mut self) {
        self.dirty = [[true; COLS]; ROWS];
    }

    #[inline]
    pub fn is_dirty(&self, col: usize, row: usize) -> bool {
        self.dirty
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.iter().flatten().filter(|d| **d).count()
    }

    /// Iterates dirty tiles in row-major order.
    pub fn dirty_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.dirty.iter().enumerate().flat_map(move |(row, flags)| {
            flags
                .iter()
                .enumerate()
                .filter(|(_, d)| **d)
                .map(move |(col, _)| {
                    let screen = self.tile_rect(col, row);
                    Tile {
                        col,
                        row,
                        screen,
                        world: screen.offset(self.offset),
                    }
                })
        })
    }

    /// Marks every tile clean. Called once a redraw pass has flushed.
    pub fn clear(&mut self) {
        self.dirty = [[false; COLS]; ROWS];
    }

    /// Tile holding a point already clipped to the grid.
    #[inline]
    fn cell_of(&self, p: Point) -> (usize, usize) {
        let col = (p.x as usize / self.tile.w as usize).min(COLS - 1);
        let row = (p.y as usize / self.tile.h as usize).min(ROWS - 1);
        (col, row)
    }
}

impl<const COLS: usize, const ROWS: usize> RefreshSink for Tiler<COLS, ROWS> {
    #[inline]
    fn mark_dirty(&mut self, rect: Rect) {
        log::trace!("mark dirty {:?}", rect);
        self.refresh_world(rect);
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;

    type Grid = Tiler<4, 2>;

    fn r(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Rect {
        Rect::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    fn grid() -> Grid {
        Grid::new(Size::new(16, 8))
    }

    // ── mapping ───────────────────────────────────────────────────────────

    #[test]
    fn new_tiler_is_clean() {
        let t = grid();
        assert_eq!(t.dirty_count(), 0);
        assert_eq!(t.screen_rect(), Some(r(0, 0, 63, 15)));
    }

    #[test]
    fn rect_inside_one_tile_marks_one_tile() {
        let mut t = grid();
        t.refresh_screen(r(17, 1, 20, 6));
        assert_eq!(t.dirty_count(), 1);
        assert!(t.is_dirty(1, 0));
    }

    #[test]
    fn rect_spanning_boundary_marks_neighbours() {
        let mut t = grid();
        // Column 15 is the last pixel of tile 0, column 16 the first of tile 1.
        t.refresh_screen(r(15, 7, 16, 8));
        assert_eq!(t.dirty_count(), 4);
        assert!(t.is_dirty(0, 0) && t.is_dirty(1, 0) && t.is_dirty(0, 1) && t.is_dirty(1, 1));
    }

    #[test]
    fn rect_partially_off_screen_is_clipped() {
        let mut t = grid();
        t.refresh_screen(r(-40, -40, 3, 3));
        assert_eq!(t.dirty_count(), 1);
        t.refresh_screen(r(60, 12, 500, 500));
        assert!(t.is_dirty(3, 1));
        assert_eq!(t.dirty_count(), 2);
    }

    #[test]
    fn rect_fully_off_screen_is_ignored() {
        let mut t = grid();
        t.refresh_screen(r(64, 0, 80, 4));
        t.refresh_screen(r(-10, -10, -1, -1));
        assert_eq!(t.dirty_count(), 0);
    }

    #[test]
    fn world_rects_honour_offset() {
        let mut t = grid();
        t.set_offset(Point::new(100, 0));
        t.clear();
        t.mark_dirty(r(100, 0, 101, 1));
        assert!(t.is_dirty(0, 0));
        assert_eq!(t.dirty_count(), 1);
    }

    #[test]
    fn marking_is_idempotent() {
        let mut t = grid();
        t.mark_dirty(r(0, 0, 3, 3));
        t.mark_dirty(r(0, 0, 3, 3));
        assert_eq!(t.dirty_count(), 1);
    }

    // ── read side ─────────────────────────────────────────────────────────

    #[test]
    fn set_offset_marks_everything_only_on_change() {
        let mut t = grid();
        t.set_offset(Point::zero());
        assert_eq!(t.dirty_count(), 0);
        t.set_offset(Point::new(1, 0));
        assert_eq!(t.dirty_count(), 8);
    }

    #[test]
    fn dirty_tiles_are_row_major_with_world_areas() {
        let mut t = grid();
        t.set_offset(Point::new(-5, 0));
        t.clear();
        t.refresh_screen(r(50, 9, 50, 9));
        t.refresh_screen(r(0, 0, 0, 0));
        let tiles: Vec<Tile> = t.dirty_tiles().collect();
        assert_eq!(tiles.len(), 2);
        assert_eq!((tiles[0].col, tiles[0].row), (0, 0));
        assert_eq!((tiles[1].col, tiles[1].row), (3, 1));
        assert_eq!(tiles[1].screen, r(48, 8, 63, 15));
        assert_eq!(tiles[1].world, r(43, 8, 58, 15));
    }

    #[test]
    fn clear_resets_all_flags() {
        let mut t = grid();
        t.refresh_all();
        t.clear();
        assert_eq!(t.dirty_count(), 0);
        assert!(!t.is_dirty(9, 9));
    }

    #[test]
    fn empty_grid_ignores_marks() {
        let mut t: Tiler<0, 0> = Tiler::new(Size::new(8, 8));
        t.mark_dirty(r(0, 0, 10, 10));
        assert_eq!(t.dirty_count(), 0);
        assert!(t.screen_rect().is_none());
    }
}

//! Frame driver.
//!
//! [`Engine`] ties the pieces together:
//! - a [`Scene`] whose single sink is a [`Tiler`] covering the panel
//! - a root list attached to that tiler, so anything linked below it reports
//!   its changes
//! - one [`TileCanvas`] reused for every dirty tile of a redraw pass
//!
//! Each frame the application mutates the scene, then calls
//! [`frame`](Engine::frame) (or `update` + `display`). Only tiles touched since
//! the previous pass are redrawn and flushed to the [`DisplayPort`].

mod config;

pub use config::EngineConfig;

use embedded_graphics::pixelcolor::BinaryColor;

use crate::canvas::TileCanvas;
use crate::coords::{Coord, Point, Size};
use crate::display::DisplayPort;
use crate::scene::{ObjectId, Scene, SceneError, Sprite};
use crate::tiler::{SinkId, Tiler};

/// Control directive returned by frame callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Scene, tiler and tile canvas for one panel.
///
/// - `K`: sprite payload
/// - `N`: scene capacity, including the root list
/// - `COLS x ROWS`: tile grid
/// - `TW x (TP * 8)`: tile canvas in pixels, at least one tile large
pub struct Engine<
    K,
    const N: usize,
    const COLS: usize,
    const ROWS: usize,
    const TW: usize,
    const TP: usize,
> {
    scene: Scene<K, Tiler<COLS, ROWS>, N>,
    canvas: TileCanvas<TW, TP>,
    root: ObjectId,
}

/// 128x64 SSD1306 panel split into 8x8 tiles.
pub type Ssd1306Engine<K, const N: usize> = Engine<K, N, 16, 8, 8, 1>;

impl<K, const N: usize, const COLS: usize, const ROWS: usize, const TW: usize, const TP: usize>
    Engine<K, N, COLS, ROWS, TW, TP>
where
    K: Sprite,
{
    pub fn new(config: EngineConfig) -> Result<Self, SceneError> {
        let canvas = TileCanvas::<TW, TP>::new();
        let max = canvas.size();
        let tile = config.tile_size.clamped();
        let tile_size = Size::new(tile.w.min(max.w), tile.h.min(max.h));
        if tile_size != tile {
            log::warn!("tile size {:?} exceeds canvas {:?}, using {:?}", tile, max, tile_size);
        }

        let mut tiler = Tiler::new(tile_size);
        tiler.set_offset(config.offset);
        tiler.clear();
        if config.full_refresh_on_start {
            tiler.refresh_all();
        }

        let mut scene = Scene::new([tiler]);
        let root = scene.create_list(Point::zero())?;
        scene.attach(root, Some(SinkId::PRIMARY));

        log::debug!(
            "engine: {}x{} tiles of {:?}, capacity {}",
            COLS,
            ROWS,
            tile_size,
            N
        );
        Ok(Self { scene, canvas, root })
    }

    #[inline]
    pub fn scene(&self) -> &Scene<K, Tiler<COLS, ROWS>, N> {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene<K, Tiler<COLS, ROWS>, N> {
        &mut self.scene
    }

    /// The list everything on screen hangs off.
    #[inline]
    pub fn root(&self) -> ObjectId {
        self.root
    }

    #[inline]
    pub fn tiler(&self) -> &Tiler<COLS, ROWS> {
        &self.scene.sinks()[0]
    }

    #[inline]
    pub fn tiler_mut(&mut self) -> &mut Tiler<COLS, ROWS> {
        &mut self.scene.sinks_mut()[0]
    }

    /// Moves the camera; the whole panel is redrawn on the next pass.
    #[inline]
    pub fn set_offset(&mut self, offset: Point) {
        self.tiler_mut().set_offset(offset);
    }

    /// Appends `object` to the root list.
    #[inline]
    pub fn add(&mut self, object: ObjectId) -> bool {
        self.scene.add(self.root, object)
    }

    /// Links `object` at the head of the root list (drawn first, so below
    /// everything else).
    #[inline]
    pub fn insert(&mut self, object: ObjectId) -> bool {
        self.scene.insert(self.root, object)
    }

    #[inline]
    pub fn remove(&mut self, object: ObjectId) -> bool {
        self.scene.remove(self.root, object)
    }

    /// Advances every object below the root by one frame.
    #[inline]
    pub fn update(&mut self) {
        self.scene.update(self.root);
    }

    /// Marks everything below the root dirty.
    #[inline]
    pub fn refresh(&mut self) {
        self.scene.refresh(self.root);
    }

    /// Redraws and flushes every dirty tile, returning how many were flushed.
    ///
    /// Tiles are cleared only after all of them reached the port; on a port
    /// error the dirty state is kept so the next pass retries.
    pub fn display<P: DisplayPort>(&mut self, port: &mut P) -> Result<usize, P::Error> {
        let tiler = &self.scene.sinks()[0];
        let mut flushed = 0;
        for tile in tiler.dirty_tiles() {
            self.canvas.set_origin(tile.world.p1());
            self.canvas.fill(BinaryColor::Off);
            if let Err(never) = self.scene.draw(self.root, &mut self.canvas, tile.world) {
                match never {}
            }
            port.flush(tile.screen, &self.canvas)?;
            flushed += 1;
        }
        self.tiler_mut().clear();
        if flushed > 0 {
            log::trace!("flushed {} tiles", flushed);
        }
        Ok(flushed)
    }

    /// `update` followed by `display`.
    pub fn frame<P: DisplayPort>(&mut self, port: &mut P) -> Result<usize, P::Error> {
        self.update();
        self.display(port)
    }

    /// Runs frames until `on_frame` asks to exit, returning the number of
    /// frames rendered.
    ///
    /// `on_frame` receives the engine and the frame index before each frame
    /// and is the place for input handling and pacing.
    pub fn run<P, F>(&mut self, port: &mut P, mut on_frame: F) -> Result<u64, P::Error>
    where
        P: DisplayPort,
        F: FnMut(&mut Self, u64) -> AppControl,
    {
        let mut index = 0u64;
        loop {
            if on_frame(self, index) == AppControl::Exit {
                log::debug!("engine exit after {} frames", index);
                return Ok(index);
            }
            self.frame(port)?;
            index = index.wrapping_add(1);
        }
    }

    /// Panel size covered by the tile grid.
    pub fn panel_size(&self) -> Size {
        let tile = self.tiler().tile_size();
        let w = (COLS as i32 * tile.w as i32).min(Coord::MAX as i32) as Coord;
        let h = (ROWS as i32 * tile.h as i32).min(Coord::MAX as i32) as Coord;
        Size::new(w, h)
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;
    use crate::coords::Rect;
    use crate::display::PanelBuffer;
    use crate::shapes::Shape;

    /// 32x16 panel, 8x8 tiles.
    type TestEngine = Engine<Shape, 8, 4, 2, 8, 1>;
    type Panel = PanelBuffer<32, 2>;

    fn quiet() -> EngineConfig {
        EngineConfig { full_refresh_on_start: false, ..EngineConfig::default() }
    }

    fn block(engine: &mut TestEngine, pos: Point, size: Size) -> ObjectId {
        engine.scene_mut().create(pos, size, Shape::fill()).unwrap()
    }

    /// Port that remembers flushed areas and can be told to fail.
    #[derive(Default)]
    struct Recorder {
        areas: Vec<Rect>,
        fail: bool,
    }

    #[derive(Debug, PartialEq)]
    struct Unplugged;

    impl DisplayPort for Recorder {
        type Error = Unplugged;

        fn flush<const W: usize, const P: usize>(
            &mut self,
            area: Rect,
            _canvas: &TileCanvas<W, P>,
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(Unplugged);
            }
            self.areas.push(area);
            Ok(())
        }
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn first_pass_paints_whole_panel() {
        let mut engine = TestEngine::new(EngineConfig::default()).unwrap();
        let mut panel = Panel::new();
        assert_eq!(engine.display(&mut panel).unwrap(), 8);
        assert_eq!(engine.display(&mut panel).unwrap(), 0);
    }

    #[test]
    fn tile_size_is_clamped_to_canvas() {
        let config = EngineConfig { tile_size: Size::new(16, 16), ..quiet() };
        let engine = TestEngine::new(config).unwrap();
        assert_eq!(engine.tiler().tile_size(), Size::new(8, 8));
        assert_eq!(engine.panel_size(), Size::new(32, 16));
    }

    #[test]
    fn root_is_attached() {
        let engine = TestEngine::new(quiet()).unwrap();
        let root = engine.scene().get(engine.root()).unwrap();
        assert!(root.is_list());
        assert_eq!(root.sink(), Some(SinkId::PRIMARY));
    }

    // ── redraw ────────────────────────────────────────────────────────────

    #[test]
    fn only_dirty_tiles_are_flushed() {
        let mut engine = TestEngine::new(quiet()).unwrap();
        let id = block(&mut engine, Point::new(1, 1), Size::new(4, 4));
        assert!(engine.add(id));

        let mut port = Recorder::default();
        assert_eq!(engine.display(&mut port).unwrap(), 1);
        assert_eq!(port.areas, [Rect::from_pos_size(Point::zero(), Size::new(8, 8))]);
    }

    #[test]
    fn sprites_land_on_the_panel() {
        let mut engine = TestEngine::new(quiet()).unwrap();
        let id = block(&mut engine, Point::new(6, 2), Size::new(4, 2));
        engine.add(id);

        let mut panel = Panel::new();
        assert_eq!(engine.display(&mut panel).unwrap(), 2);
        assert!(panel.pixel(6, 2) && panel.pixel(9, 3));
        assert!(!panel.pixel(5, 2) && !panel.pixel(10, 2));
    }

    #[test]
    fn moving_clears_the_old_area() {
        let mut engine = TestEngine::new(quiet()).unwrap();
        let id = block(&mut engine, Point::zero(), Size::new(2, 2));
        engine.add(id);
        let mut panel = Panel::new();
        engine.display(&mut panel).unwrap();

        engine.scene_mut().move_by(id, Point::new(20, 8));
        assert_eq!(engine.display(&mut panel).unwrap(), 2);
        assert!(!panel.pixel(0, 0));
        assert!(panel.pixel(20, 8) && panel.pixel(21, 9));
    }

    #[test]
    fn offset_shifts_the_world() {
        let mut engine = TestEngine::new(quiet()).unwrap();
        let id = block(&mut engine, Point::new(10, 0), Size::new(1, 1));
        engine.add(id);
        engine.set_offset(Point::new(8, 0));

        let mut panel = Panel::new();
        assert_eq!(engine.display(&mut panel).unwrap(), 8);
        assert!(panel.pixel(2, 0));
        assert!(!panel.pixel(10, 0));
    }

    #[test]
    fn port_error_keeps_tiles_dirty() {
        let mut engine = TestEngine::new(quiet()).unwrap();
        let id = block(&mut engine, Point::zero(), Size::new(1, 1));
        engine.add(id);

        let mut port = Recorder { fail: true, ..Recorder::default() };
        assert_eq!(engine.display(&mut port), Err(Unplugged));
        assert_eq!(engine.tiler().dirty_count(), 1);

        port.fail = false;
        assert_eq!(engine.display(&mut port), Ok(1));
        assert_eq!(engine.tiler().dirty_count(), 0);
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frame_updates_then_displays() {
        let mut engine = TestEngine::new(quiet()).unwrap();
        let ball = engine
            .scene_mut()
            .create(Point::new(6, 0), Size::new(2, 2), Shape::fill().with_velocity(Point::new(4, 0)))
            .unwrap();
        engine.add(ball);
        let mut panel = Panel::new();
        engine.display(&mut panel).unwrap();

        // (6,0)-(7,1) moves to (10,0)-(11,1): tiles 0 and 1 of the top row.
        assert_eq!(engine.frame(&mut panel).unwrap(), 2);
        assert_eq!(engine.scene().get(ball).unwrap().position(), Point::new(10, 0));
        assert!(panel.pixel(10, 0));
        assert!(!panel.pixel(6, 0));
    }

    #[test]
    fn run_stops_on_exit() {
        let mut engine = TestEngine::new(quiet()).unwrap();
        let mut panel = Panel::new();
        let frames = engine
            .run(&mut panel, |_, index| {
                if index == 3 { AppControl::Exit } else { AppControl::Continue }
            })
            .unwrap();
        assert_eq!(frames, 3);
    }

    #[test]
    fn removed_objects_are_erased() {
        let mut engine = TestEngine::new(quiet()).unwrap();
        let id = block(&mut engine, Point::new(24, 8), Size::new(8, 8));
        engine.add(id);
        let mut panel = Panel::new();
        engine.display(&mut panel).unwrap();
        assert!(panel.pixel(31, 15));

        assert!(engine.remove(id));
        assert_eq!(engine.display(&mut panel).unwrap(), 1);
        assert!(!panel.pixel(31, 15));
    }
}

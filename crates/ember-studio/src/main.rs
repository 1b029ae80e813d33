mod terminal;

use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};

use ember_engine::coords::{Point, Rect, Size};
use ember_engine::engine::{EngineConfig, Ssd1306Engine};
use ember_engine::logging::{LoggingConfig, init_logging};
use ember_engine::scene::{MenuLayout, ObjectId};
use ember_engine::shapes::{Bitmap, Shape};
use ember_engine::time::FrameClock;

use terminal::TerminalPort;

type Studio = Ssd1306Engine<Shape, 24>;

/// Demo parameters; `ember-studio [frames] [fps]`.
#[derive(Debug, Clone)]
struct StudioConfig {
    frames: u64,
    fps: u32,
    /// Frames between menu selection steps.
    menu_step: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self { frames: 300, fps: 30, menu_step: 20 }
    }
}

impl StudioConfig {
    fn from_args() -> Result<Self> {
        let mut config = Self::default();
        let mut args = std::env::args().skip(1);
        if let Some(frames) = args.next() {
            config.frames = frames
                .parse()
                .with_context(|| format!("invalid frame count {frames:?}"))?;
        }
        if let Some(fps) = args.next() {
            config.fps = fps.parse().with_context(|| format!("invalid fps {fps:?}"))?;
        }
        Ok(config)
    }
}

static FACE: [u8; 8] = [
    0b0011_1100,
    0b0100_0010,
    0b1010_0101,
    0b1000_0001,
    0b1010_0101,
    0b1001_1001,
    0b0100_0010,
    0b0011_1100,
];

/// Objects the demo animates after setup.
struct Cast {
    movers: Vec<ObjectId>,
    menu: ObjectId,
}

fn build(engine: &mut Studio) -> Result<Cast> {
    let scene = engine.scene_mut();
    let border = scene.create(Point::zero(), Size::new(128, 64), Shape::outline())?;

    let movers = vec![
        scene.create(Point::new(8, 10), Size::new(4, 4), Shape::fill().with_velocity(Point::new(2, 1)))?,
        scene.create(Point::new(40, 40), Size::new(6, 3), Shape::fill().with_velocity(Point::new(-1, 2)))?,
        scene.create(
            Point::new(20, 30),
            Size::new(8, 8),
            Shape::bitmap(Bitmap::new(&FACE, 8)).with_velocity(Point::new(1, -1)),
        )?,
    ];

    let menu = scene.create_menu(Point::new(76, 6), MenuLayout::List { width: 44 })?;
    for _ in 0..4 {
        let item = scene.create(Point::zero(), Size::new(36, 8), Shape::outline())?;
        if !scene.menu_add(menu, item) {
            return Err(anyhow!("menu rejected item {item:?}"));
        }
    }

    if !engine.insert(border) {
        return Err(anyhow!("root rejected border"));
    }
    for id in movers.iter().copied().chain([menu]) {
        if !engine.add(id) {
            return Err(anyhow!("root rejected {id:?}"));
        }
    }
    log::info!("scene ready: {} objects", engine.scene().len());
    Ok(Cast { movers, menu })
}

/// Reverses a mover's velocity before it would leave `bounds`.
fn bounce(engine: &mut Studio, id: ObjectId, bounds: Rect) {
    let Some(rect) = engine.scene().get(id).map(|o| o.rect()) else {
        return;
    };
    let Some(shape) = engine.scene_mut().kind_mut(id) else {
        return;
    };
    let next = rect.offset(shape.velocity);
    if next.p1().x <= bounds.p1().x || next.p2().x >= bounds.p2().x {
        shape.velocity.x = -shape.velocity.x;
    }
    if next.p1().y <= bounds.p1().y || next.p2().y >= bounds.p2().y {
        shape.velocity.y = -shape.velocity.y;
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let config = StudioConfig::from_args()?;
    log::info!("ember studio: {:?}", config);

    let mut engine = Studio::new(EngineConfig::default()).context("engine setup")?;
    let cast = build(&mut engine).context("scene setup")?;

    // Movers stay left of the menu.
    let bounds = Rect::new(Point::zero(), Point::new(72, 63));
    let mut port = TerminalPort::new();
    let mut clock = FrameClock::new(config.fps);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "\x1b[2J").context("clearing terminal")?;

    for _ in 0..config.frames {
        let time = clock.tick();
        for id in &cast.movers {
            bounce(&mut engine, *id, bounds);
        }
        if config.menu_step > 0 && time.frame_index % config.menu_step == config.menu_step - 1 {
            engine.scene_mut().menu_down(cast.menu);
        }

        let tiles = engine.frame(&mut port)?;
        port.present(&mut out, time.frame_index, tiles)
            .context("writing frame to terminal")?;
        clock.wait();
    }

    log::info!("done after {} frames", config.frames);
    Ok(())
}

//! Terminal stand-in for an SSD1306 panel.

use std::convert::Infallible;
use std::io::{self, Write};

use ember_engine::canvas::TileCanvas;
use ember_engine::coords::Rect;
use ember_engine::display::{DisplayPort, PanelBuffer};

pub const PANEL_W: usize = 128;
pub const PANEL_PAGES: usize = 8;

/// Collects flushed tiles in a panel buffer and prints it with half-block
/// characters, two panel rows per terminal line.
#[derive(Default)]
pub struct TerminalPort {
    panel: PanelBuffer<PANEL_W, PANEL_PAGES>,
    changed: bool,
}

impl TerminalPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraws the terminal if any tile arrived since the last call.
    pub fn present<W: Write>(&mut self, out: &mut W, frame: u64, tiles: usize) -> io::Result<()> {
        if !self.changed {
            return Ok(());
        }
        self.changed = false;

        // Home the cursor so frames overwrite each other.
        write!(out, "\x1b[H")?;
        let height = PanelBuffer::<PANEL_W, PANEL_PAGES>::HEIGHT;
        for y in (0..height).step_by(2) {
            let line: String = (0..PANEL_W)
                .map(|x| match (self.panel.pixel(x, y), self.panel.pixel(x, y + 1)) {
                    (false, false) => ' ',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (true, true) => '█',
                })
                .collect();
            writeln!(out, "|{line}|")?;
        }
        writeln!(out, "frame {frame:>5}  tiles {tiles:>3}  total flushes {:>6}", self.panel.flushes())?;
        out.flush()
    }
}

impl DisplayPort for TerminalPort {
    type Error = Infallible;

    fn flush<const W: usize, const P: usize>(
        &mut self,
        area: Rect,
        canvas: &TileCanvas<W, P>,
    ) -> Result<(), Self::Error> {
        self.changed = true;
        self.panel.flush(area, canvas)
    }
}

use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the previous tick, clamped.
    pub dt: Duration,
    /// Monotonic timestamp taken at the tick.
    pub now: Instant,
    pub frame_index: u64,
}

/// Paces a host-side frame loop.
///
/// Small panels are usually driven at a fixed rate; `tick` measures the
/// previous frame and `remaining` tells how long to wait before the next one
/// to hold the target rate. Delta time is clamped so a stalled process does
/// not make animations jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    target: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Clock targeting `fps` frames per second (at least 1).
    pub fn new(fps: u32) -> Self {
        let target = Duration::from_secs(1) / fps.max(1);
        Self {
            last: Instant::now(),
            frame_index: 0,
            target,
            dt_max: Duration::from_millis(250).max(target),
        }
    }

    #[inline]
    pub fn target(&self) -> Duration {
        self.target
    }

    /// Restarts timing from now, e.g. after the loop was paused.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Starts a new frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let ft = FrameTime { dt, now, frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Time left in the current frame before the target period elapses.
    pub fn remaining(&self) -> Duration {
        self.target.saturating_sub(self.last.elapsed())
    }

    /// Sleeps out the rest of the current frame.
    pub fn wait(&self) {
        let left = self.remaining();
        if !left.is_zero() {
            std::thread::sleep(left);
        }
    }
}

impl Default for FrameClock {
    /// 30 frames per second.
    fn default() -> Self {
        Self::new(30)
    }
}

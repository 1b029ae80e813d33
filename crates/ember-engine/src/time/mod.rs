//! Host-side frame timing.
//!
//! Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick()` at the start of each frame and `wait()` at its end

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};

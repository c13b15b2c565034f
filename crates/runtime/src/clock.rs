use std::time::Instant;

use crate::frame::Frame;

/// Source of the elapsed time handed to per-frame updates.
#[derive(Debug, Copy, Clone)]
pub enum FrameClock {
    /// Elapsed time is derived from the frame index, so runs replay exactly.
    Fixed,
    /// Elapsed time is read from a monotonic clock started with the loop.
    Wall(Instant),
}

impl FrameClock {
    pub fn wall() -> Self {
        FrameClock::Wall(Instant::now())
    }

    pub fn elapsed_ms(&self, frame: Frame) -> f64 {
        match self {
            FrameClock::Fixed => frame.elapsed_ms(),
            FrameClock::Wall(start) => start.elapsed().as_secs_f64() * 1000.0,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, FrameClock::Fixed)
    }
}

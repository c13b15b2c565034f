use foundation::time::Time;

/// Deterministic frame metadata.
///
/// This is the primary timebase for the host loop. It is intentionally
/// small and pure so it can be recorded and replayed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Fixed delta time (seconds).
    pub dt_s: f64,
    /// Time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    /// Frames at a fixed rate of `fps` frames per second.
    pub fn at_rate(index: u64, fps: f64) -> Self {
        Self::new(index, 1.0 / fps)
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.time.as_millis()
    }
}

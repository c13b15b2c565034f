/// Something that can be asked to repaint on the next frame.
pub trait RequestRedraw {
    fn request_redraw(&mut self);
}

/// Edge-triggered redraw flag consumed once per frame by the host loop.
///
/// Any number of requests within a frame collapse into a single repaint.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RedrawRequests {
    pending: bool,
    total: u64,
}

impl RedrawRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of requests ever made (not collapsed).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns `true` if a repaint was requested since the last call.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl RequestRedraw for RedrawRequests {
    fn request_redraw(&mut self) {
        self.pending = true;
        self.total += 1;
    }
}

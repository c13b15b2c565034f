/// Identifies a load request in a deterministic, stable way.
///
/// Small and copyable so it can be logged and compared without touching the
/// payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Request(pub u64);

/// Hands out monotonically increasing request ids.
#[derive(Debug, Default)]
pub struct RequestIds {
    next: u64,
}

impl RequestIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_request(&mut self) -> Request {
        let req = Request(self.next);
        self.next = self.next.wrapping_add(1);
        req
    }
}

/// Rejected construction input. Fatal at startup; nothing here is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    TooFewWaypoints { count: usize, min: usize },
    ZeroLengthPath,
    BadSmoothing(f64),
    ZeroSamples,
    BadLoopDuration(f64),
    ZeroForward,
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::TooFewWaypoints { count, min } => {
                write!(f, "path needs at least {min} waypoints, got {count}")
            }
            InvalidInput::ZeroLengthPath => write!(f, "path has zero length"),
            InvalidInput::BadSmoothing(v) => {
                write!(f, "smoothing must be finite and non-negative, got {v}")
            }
            InvalidInput::ZeroSamples => write!(f, "sample count must be positive"),
            InvalidInput::BadLoopDuration(v) => {
                write!(f, "loop duration must be positive, got {v} ms")
            }
            InvalidInput::ZeroForward => write!(f, "forward direction must be non-zero"),
        }
    }
}

impl std::error::Error for InvalidInput {}

use std::path::PathBuf;

use assets::LoadError;
use overlay::InvalidInput;

#[derive(Debug)]
pub enum DemoError {
    ConfigRead { path: PathBuf, source: std::io::Error },
    ConfigParse { path: PathBuf, source: serde_json::Error },
    InvalidInput(InvalidInput),
    Load(LoadError),
    TraceWrite { path: PathBuf, source: std::io::Error },
    TraceEncode(serde_json::Error),
    BadFrameRate(f64),
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoError::ConfigRead { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            DemoError::ConfigParse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
            DemoError::InvalidInput(err) => write!(f, "invalid scene input: {err}"),
            DemoError::Load(err) => write!(f, "model load failed: {err}"),
            DemoError::TraceWrite { path, source } => {
                write!(f, "cannot write trace {}: {source}", path.display())
            }
            DemoError::TraceEncode(err) => write!(f, "cannot encode trace: {err}"),
            DemoError::BadFrameRate(fps) => write!(f, "frame rate must be positive, got {fps}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DemoError::ConfigRead { source, .. } | DemoError::TraceWrite { source, .. } => {
                Some(source)
            }
            DemoError::ConfigParse { source, .. } => Some(source),
            DemoError::InvalidInput(err) => Some(err),
            DemoError::Load(err) => Some(err),
            DemoError::TraceEncode(err) => Some(err),
            DemoError::BadFrameRate(_) => None,
        }
    }
}

impl From<InvalidInput> for DemoError {
    fn from(err: InvalidInput) -> Self {
        DemoError::InvalidInput(err)
    }
}

impl From<LoadError> for DemoError {
    fn from(err: LoadError) -> Self {
        DemoError::Load(err)
    }
}

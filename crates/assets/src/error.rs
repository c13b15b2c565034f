use std::path::PathBuf;

/// Asset fetch failures, surfaced to the caller unchanged and never retried.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Empty {
        url: String,
    },
    /// The loader went away without delivering a result.
    Abandoned {
        url: String,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read model {}: {source}", path.display())
            }
            LoadError::Empty { url } => write!(f, "model {url} is empty"),
            LoadError::Abandoned { url } => write!(f, "load of {url} was abandoned"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::loader::AssetLoader;
use crate::pending::{PendingAsset, pending_pair};
use crate::request::RequestIds;

/// Raw model bytes. Decoding is left to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub url: String,
    pub data: Bytes,
}

impl ModelAsset {
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

/// Loads models from the local filesystem on the ambient tokio runtime.
///
/// Urls are resolved against `root`; a leading `file://` is ignored.
#[derive(Debug)]
pub struct FileModelLoader {
    root: PathBuf,
    ids: RequestIds,
}

impl FileModelLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ids: RequestIds::new(),
        }
    }

    pub fn resolve(&self, url: &str) -> PathBuf {
        let path = url.strip_prefix("file://").unwrap_or(url);
        self.root.join(path)
    }
}

impl AssetLoader for FileModelLoader {
    type Asset = ModelAsset;

    /// Must be called from within a tokio runtime.
    fn load_model(&mut self, url: &str) -> PendingAsset<ModelAsset> {
        let request = self.ids.next_request();
        let (mut completion, pending) = pending_pair(request, url);
        let path = self.resolve(url);
        let url = url.to_string();

        debug!(?request, path = %path.display(), "model load started");
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = completion.cancelled() => None,
                r = read_model(&path, &url) => Some(r),
            };
            match result {
                Some(r) => {
                    if !completion.complete(r) {
                        debug!(?request, "model load finished after consumer went away");
                    }
                }
                None => debug!(?request, "model load cancelled"),
            }
        });

        pending
    }
}

async fn read_model(path: &Path, url: &str) -> Result<ModelAsset, LoadError> {
    let data = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if data.is_empty() {
        return Err(LoadError::Empty {
            url: url.to_string(),
        });
    }

    info!("loaded model {url} ({} bytes)", data.len());
    Ok(ModelAsset {
        url: url.to_string(),
        data: Bytes::from(data),
    })
}

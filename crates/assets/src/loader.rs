use crate::pending::PendingAsset;

/// Fetches models asynchronously. Each call starts one independent load.
pub trait AssetLoader {
    type Asset;

    fn load_model(&mut self, url: &str) -> PendingAsset<Self::Asset>;
}

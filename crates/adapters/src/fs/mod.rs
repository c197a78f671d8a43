mod assets;

pub use assets::{is_supported_asset, FsAssetProvider};

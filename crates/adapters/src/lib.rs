pub mod engine;
pub mod fs;
pub mod presenters;

pub use engine::ImageCrateEngine;
pub use fs::{is_supported_asset, FsAssetProvider};
pub use presenters::{present_control_row, present_controls_json, present_display_state};

use std::path::{Path, PathBuf};

use filter_preview_application::{ApplicationError, AssetProvider};
use filter_preview_domain::Bitmap;
use image::ImageReader;
use tracing::debug;
use walkdir::WalkDir;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn is_supported_asset(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

/// Loads named bitmaps from an assets directory.
///
/// A name matches any supported image whose file stem equals it, at any depth
/// below the root. The first match in file-name order wins.
#[derive(Debug, Clone)]
pub struct FsAssetProvider {
    root: PathBuf,
}

impl FsAssetProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, name: &str) -> Result<PathBuf, ApplicationError> {
        if !self.root.is_dir() {
            return Err(ApplicationError::Io(format!(
                "asset directory does not exist or is not a directory: {}",
                self.root.display()
            )));
        }

        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .find(|path| {
                is_supported_asset(path)
                    && path.file_stem().and_then(|stem| stem.to_str()) == Some(name)
            })
            .ok_or_else(|| ApplicationError::AssetNotFound(name.to_string()))
    }
}

impl AssetProvider for FsAssetProvider {
    fn load_bitmap(&self, name: &str) -> Result<Bitmap, ApplicationError> {
        let path = self.locate(name)?;
        debug!(asset = name, path = %path.display(), "decoding asset");

        let decode_error = |reason: String| ApplicationError::AssetDecode {
            name: name.to_string(),
            reason,
        };
        let image = ImageReader::open(&path)
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .decode()
            .map_err(|error| decode_error(error.to_string()))?;

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Bitmap::new(width, height, rgba.into_raw())?)
    }
}

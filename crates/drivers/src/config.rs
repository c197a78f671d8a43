use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub assets_dir: PathBuf,
    pub source_image: String,
    pub window_width: usize,
    pub window_height: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            source_image: "image".to_string(),
            window_width: 420,
            window_height: 760,
        }
    }
}

impl AppConfig {
    pub fn with_overrides(mut self, assets_dir: Option<PathBuf>, source_image: Option<String>) -> Self {
        if let Some(dir) = assets_dir {
            self.assets_dir = dir;
        }
        if let Some(name) = source_image {
            self.source_image = name;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let config = AppConfig::default().with_overrides(None, Some("beach".to_string()));
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.source_image, "beach");
        assert_eq!((config.window_width, config.window_height), (420, 760));
    }
}

use filter_preview_domain::{Bitmap, ParameterKey};

use crate::ApplicationError;

/// Engine-space RGBA image produced by a filter, one `f32` per channel.
///
/// Samples are not clamped; values outside `0.0..=1.0` are resolved when the
/// output is rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutput {
    pub width: u32,
    pub height: u32,
    pub samples: Vec<f32>,
}

pub trait Filter {
    fn set_input(&mut self, source: &Bitmap) -> Result<(), ApplicationError>;

    fn set_parameter(&mut self, key: ParameterKey, value: f32) -> Result<(), ApplicationError>;

    fn output_image(&self) -> Option<FilterOutput>;
}

pub trait FilterEngine {
    /// Returns `None` when the engine does not know `filter_id`.
    fn create_filter(&self, filter_id: &str) -> Option<Box<dyn Filter>>;

    fn rasterize(&self, output: &FilterOutput) -> Result<Bitmap, ApplicationError>;

    fn supported_filters(&self) -> Vec<&'static str>;
}

pub trait AssetProvider {
    fn load_bitmap(&self, name: &str) -> Result<Bitmap, ApplicationError>;
}

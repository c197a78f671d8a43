use filter_preview_domain::{FilterId, DEFAULT_INTENSITY};

#[derive(Debug, Clone)]
pub struct LoadSourceImageCommand {
    pub asset_name: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SelectFilterCommand {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyFilterCommand {
    pub filter_id: FilterId,
    pub intensity: f32,
}

impl ApplyFilterCommand {
    pub fn new(filter_id: FilterId) -> Self {
        Self {
            filter_id,
            intensity: DEFAULT_INTENSITY,
        }
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetImageCommand;

#[derive(Debug, Clone, Default)]
pub struct FilterControlsQuery;

#[derive(Debug, Clone, Default)]
pub struct DisplayedImageQuery;

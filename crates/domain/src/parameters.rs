use serde::{Deserialize, Serialize};

use crate::filter::builtin;
use crate::FilterId;

pub const DEFAULT_INTENSITY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKey {
    Intensity,
    Radius,
    Saturation,
    Brightness,
    Contrast,
}

impl ParameterKey {
    pub fn name(self) -> &'static str {
        match self {
            Self::Intensity => "intensity",
            Self::Radius => "radius",
            Self::Saturation => "saturation",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSetting {
    pub key: ParameterKey,
    pub value: f32,
}

impl ParameterSetting {
    fn new(key: ParameterKey, value: f32) -> Self {
        Self { key, value }
    }
}

/// Engine parameters to set before rendering `filter_id`.
///
/// Filters without an entry are rendered with only their input image.
pub fn tuned_parameters(filter_id: &FilterId, intensity: f32) -> Vec<ParameterSetting> {
    use ParameterKey::*;

    match filter_id.as_str() {
        builtin::SEPIA_TONE => vec![ParameterSetting::new(Intensity, intensity)],
        builtin::VIGNETTE => vec![
            ParameterSetting::new(Intensity, intensity * 2.0),
            ParameterSetting::new(Radius, intensity * 30.0),
        ],
        builtin::COLOR_CONTROLS => vec![
            ParameterSetting::new(Saturation, 1.0),
            ParameterSetting::new(Brightness, 0.1),
            ParameterSetting::new(Contrast, 1.1),
        ],
        builtin::BLOOM => vec![
            ParameterSetting::new(Radius, 5.0),
            ParameterSetting::new(Intensity, 1.0),
        ],
        _ => Vec::new(),
    }
}

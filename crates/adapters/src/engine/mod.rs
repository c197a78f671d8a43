mod kernels;
mod spatial;

use filter_preview_application::{ApplicationError, Filter, FilterEngine, FilterOutput};
use filter_preview_domain::{builtin, Bitmap, ParameterKey};
use image::{DynamicImage, Rgba32FImage, RgbaImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterKind {
    SepiaTone,
    PhotoMono,
    PhotoChrome,
    PhotoFade,
    PhotoInstant,
    PhotoNoir,
    PhotoProcess,
    PhotoTonal,
    ColorInvert,
    ColorControls,
    Vignette,
    Bloom,
}

const ALL_KINDS: [FilterKind; 12] = [
    FilterKind::SepiaTone,
    FilterKind::PhotoMono,
    FilterKind::PhotoChrome,
    FilterKind::PhotoFade,
    FilterKind::PhotoInstant,
    FilterKind::PhotoNoir,
    FilterKind::PhotoProcess,
    FilterKind::PhotoTonal,
    FilterKind::ColorInvert,
    FilterKind::ColorControls,
    FilterKind::Vignette,
    FilterKind::Bloom,
];

impl FilterKind {
    fn from_id(filter_id: &str) -> Option<Self> {
        ALL_KINDS.into_iter().find(|kind| kind.id() == filter_id)
    }

    fn id(self) -> &'static str {
        match self {
            Self::SepiaTone => builtin::SEPIA_TONE,
            Self::PhotoMono => builtin::PHOTO_MONO,
            Self::PhotoChrome => builtin::PHOTO_CHROME,
            Self::PhotoFade => builtin::PHOTO_FADE,
            Self::PhotoInstant => builtin::PHOTO_INSTANT,
            Self::PhotoNoir => builtin::PHOTO_NOIR,
            Self::PhotoProcess => builtin::PHOTO_PROCESS,
            Self::PhotoTonal => builtin::PHOTO_TONAL,
            Self::ColorInvert => builtin::COLOR_INVERT,
            Self::ColorControls => builtin::COLOR_CONTROLS,
            Self::Vignette => builtin::VIGNETTE,
            Self::Bloom => builtin::BLOOM,
        }
    }

    /// Parameters the filter accepts, with the value used when none is set.
    fn defaults(self) -> &'static [(ParameterKey, f32)] {
        match self {
            Self::SepiaTone => &[(ParameterKey::Intensity, 1.0)],
            Self::ColorControls => &[
                (ParameterKey::Saturation, 1.0),
                (ParameterKey::Brightness, 0.0),
                (ParameterKey::Contrast, 1.0),
            ],
            Self::Vignette => &[(ParameterKey::Intensity, 0.0), (ParameterKey::Radius, 1.0)],
            Self::Bloom => &[(ParameterKey::Radius, 10.0), (ParameterKey::Intensity, 0.5)],
            _ => &[],
        }
    }
}

/// CPU filter engine backed by the `image` crate.
#[derive(Debug, Default)]
pub struct ImageCrateEngine;

impl FilterEngine for ImageCrateEngine {
    fn create_filter(&self, filter_id: &str) -> Option<Box<dyn Filter>> {
        let kind = FilterKind::from_id(filter_id)?;
        Some(Box::new(CpuFilter::new(kind)))
    }

    fn rasterize(&self, output: &FilterOutput) -> Result<Bitmap, ApplicationError> {
        if output.width == 0 || output.height == 0 {
            return Err(ApplicationError::Rasterize(format!(
                "output extent is empty ({}x{})",
                output.width, output.height
            )));
        }

        let expected = output.width as usize * output.height as usize * 4;
        if output.samples.len() != expected {
            return Err(ApplicationError::Rasterize(format!(
                "{} samples do not match a {}x{} image",
                output.samples.len(),
                output.width,
                output.height
            )));
        }

        let samples = output
            .samples
            .iter()
            .map(|value| if value.is_finite() { *value } else { 0.0 })
            .collect();
        let buffer = Rgba32FImage::from_raw(output.width, output.height, samples)
            .ok_or_else(|| ApplicationError::Rasterize("output buffer rejected".to_string()))?;

        let rgba = DynamicImage::ImageRgba32F(buffer).to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Bitmap::new(width, height, rgba.into_raw())?)
    }

    fn supported_filters(&self) -> Vec<&'static str> {
        ALL_KINDS.iter().map(|kind| kind.id()).collect()
    }
}

struct CpuFilter {
    kind: FilterKind,
    input: Option<Rgba32FImage>,
    parameters: Vec<(ParameterKey, f32)>,
}

impl CpuFilter {
    fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            input: None,
            parameters: kind.defaults().to_vec(),
        }
    }

    fn parameter(&self, key: ParameterKey) -> f32 {
        self.parameters
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
            .unwrap_or_default()
    }
}

fn rejected(kind: FilterKind, key: ParameterKey, value: f32, reason: &str) -> ApplicationError {
    ApplicationError::InvalidParameter {
        filter: kind.id().to_string(),
        key,
        value,
        reason: reason.to_string(),
    }
}

impl Filter for CpuFilter {
    fn set_input(&mut self, source: &Bitmap) -> Result<(), ApplicationError> {
        let rgba = RgbaImage::from_raw(source.width(), source.height(), source.pixels().to_vec())
            .ok_or_else(|| {
                ApplicationError::Rasterize(format!(
                    "source bitmap does not hold {}x{} RGBA pixels",
                    source.width(),
                    source.height()
                ))
            })?;
        self.input = Some(DynamicImage::ImageRgba8(rgba).to_rgba32f());
        Ok(())
    }

    fn set_parameter(&mut self, key: ParameterKey, value: f32) -> Result<(), ApplicationError> {
        let kind = self.kind;
        match self
            .parameters
            .iter_mut()
            .find(|(candidate, _)| *candidate == key)
        {
            Some(slot) => {
                slot.1 = value;
                Ok(())
            }
            None => Err(rejected(
                kind,
                key,
                value,
                "parameter is not accepted by this filter",
            )),
        }
    }

    fn output_image(&self) -> Option<FilterOutput> {
        let mut image = self.input.clone()?;

        match self.kind {
            FilterKind::SepiaTone => {
                kernels::sepia(&mut image, self.parameter(ParameterKey::Intensity))
            }
            FilterKind::PhotoMono => kernels::mono(&mut image),
            FilterKind::PhotoChrome => kernels::chrome(&mut image),
            FilterKind::PhotoFade => kernels::fade(&mut image),
            FilterKind::PhotoInstant => kernels::instant(&mut image),
            FilterKind::PhotoNoir => kernels::noir(&mut image),
            FilterKind::PhotoProcess => kernels::process(&mut image),
            FilterKind::PhotoTonal => kernels::tonal(&mut image),
            FilterKind::ColorInvert => kernels::invert(&mut image),
            FilterKind::ColorControls => kernels::color_controls(
                &mut image,
                self.parameter(ParameterKey::Saturation),
                self.parameter(ParameterKey::Brightness),
                self.parameter(ParameterKey::Contrast),
            ),
            FilterKind::Vignette => spatial::vignette(
                &mut image,
                self.parameter(ParameterKey::Intensity),
                self.parameter(ParameterKey::Radius),
            ),
            FilterKind::Bloom => {
                image = spatial::bloom(
                    &image,
                    self.parameter(ParameterKey::Radius),
                    self.parameter(ParameterKey::Intensity),
                )
            }
        }

        let (width, height) = image.dimensions();
        Some(FilterOutput {
            width,
            height,
            samples: image.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use filter_preview_domain::{tuned_parameters, FilterCatalog, FilterId};

    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Bitmap {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Bitmap::new(width, height, pixels).expect("bitmap")
    }

    fn render(filter_id: &str, source: &Bitmap) -> Bitmap {
        let engine = ImageCrateEngine;
        let mut filter = engine.create_filter(filter_id).expect("supported filter");
        filter.set_input(source).expect("input");
        let id = FilterId::new(filter_id).expect("id");
        for setting in tuned_parameters(&id, 1.0) {
            filter
                .set_parameter(setting.key, setting.value)
                .expect("tuned parameter accepted");
        }
        let output = filter.output_image().expect("output");
        engine.rasterize(&output).expect("rasterize")
    }

    #[test]
    fn every_catalog_filter_is_supported_with_its_tuning() {
        let source = solid(4, 4, [180, 90, 40, 255]);
        for entry in FilterCatalog::builtin().iter() {
            let rendered = render(entry.id.as_str(), &source);
            assert_eq!(rendered.width(), 4);
            assert_eq!(rendered.height(), 4);
        }
        assert_eq!(
            ImageCrateEngine.supported_filters().len(),
            FilterCatalog::builtin().len()
        );
    }

    #[test]
    fn unknown_filter_is_not_created() {
        assert!(ImageCrateEngine.create_filter("posterize").is_none());
        assert!(ImageCrateEngine.create_filter("").is_none());
    }

    #[test]
    fn invert_flips_color_channels_and_keeps_alpha() {
        let rendered = render(builtin::COLOR_INVERT, &solid(1, 1, [10, 200, 255, 128]));
        assert_eq!(rendered.pixel(0, 0), Some([245, 55, 0, 128]));
    }

    #[test]
    fn mono_produces_equal_channels() {
        let [r, g, b, a] = render(builtin::PHOTO_MONO, &solid(1, 1, [200, 40, 90, 255]))
            .pixel(0, 0)
            .expect("pixel");
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 255);
    }

    #[test]
    fn sepia_warms_a_neutral_gray() {
        let [r, g, b, _] = render(builtin::SEPIA_TONE, &solid(1, 1, [120, 120, 120, 255]))
            .pixel(0, 0)
            .expect("pixel");
        assert!(r > g && g > b, "expected warm tone, got {r},{g},{b}");
    }

    #[test]
    fn vibrant_brightens_and_stretches_midtones() {
        let [r, _, _, _] = render(builtin::COLOR_CONTROLS, &solid(1, 1, [128, 128, 128, 255]))
            .pixel(0, 0)
            .expect("pixel");
        assert!(r > 140, "expected brighter gray, got {r}");
    }

    #[test]
    fn vignette_darkens_corners_but_not_center() {
        let source = solid(21, 21, [200, 200, 200, 255]);
        let rendered = render(builtin::VIGNETTE, &source);

        assert_eq!(rendered.pixel(10, 10), Some([200, 200, 200, 255]));
        let corner = rendered.pixel(0, 0).expect("corner");
        assert!(corner[0] < 50, "corner should be dark, got {}", corner[0]);
    }

    #[test]
    fn bloom_spreads_light_into_dark_neighbours() {
        let mut pixels = Vec::new();
        for x in 0..16 {
            let value = if x < 8 { 255 } else { 0 };
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
        let source = Bitmap::new(16, 1, pixels).expect("bitmap");

        let rendered = render(builtin::BLOOM, &source);
        let near_edge = rendered.pixel(8, 0).expect("pixel");
        assert!(near_edge[0] > 0, "bloom should light up the dark side");
        assert_eq!(rendered.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn filter_without_input_has_no_output() {
        let filter = ImageCrateEngine
            .create_filter(builtin::PHOTO_NOIR)
            .expect("supported");
        assert!(filter.output_image().is_none());
    }

    #[test]
    fn set_parameter_rejects_keys_the_filter_does_not_take() {
        let mut invert = ImageCrateEngine
            .create_filter(builtin::COLOR_INVERT)
            .expect("supported");
        assert!(matches!(
            invert.set_parameter(ParameterKey::Intensity, 1.0),
            Err(ApplicationError::InvalidParameter { .. })
        ));

        let mut sepia = ImageCrateEngine
            .create_filter(builtin::SEPIA_TONE)
            .expect("supported");
        assert!(matches!(
            sepia.set_parameter(ParameterKey::Radius, 3.0),
            Err(ApplicationError::InvalidParameter { .. })
        ));
        assert!(sepia.set_parameter(ParameterKey::Intensity, 0.5).is_ok());
    }

    #[test]
    fn non_finite_intensity_still_renders() {
        let engine = ImageCrateEngine;
        let mut sepia = engine.create_filter(builtin::SEPIA_TONE).expect("supported");
        sepia
            .set_input(&solid(2, 2, [120, 120, 120, 255]))
            .expect("input");
        sepia
            .set_parameter(ParameterKey::Intensity, f32::NAN)
            .expect("any float is accepted");

        let output = sepia.output_image().expect("output");
        let bitmap = engine.rasterize(&output).expect("rasterize");
        assert_eq!(bitmap.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn rasterize_rejects_malformed_output() {
        let short = FilterOutput {
            width: 2,
            height: 2,
            samples: vec![0.0; 15],
        };
        assert!(matches!(
            ImageCrateEngine.rasterize(&short),
            Err(ApplicationError::Rasterize(_))
        ));

        let oversized = FilterOutput {
            width: 1,
            height: 1,
            samples: vec![0.5; 8],
        };
        assert!(matches!(
            ImageCrateEngine.rasterize(&oversized),
            Err(ApplicationError::Rasterize(_))
        ));

        let empty = FilterOutput {
            width: 0,
            height: 4,
            samples: Vec::new(),
        };
        assert!(matches!(
            ImageCrateEngine.rasterize(&empty),
            Err(ApplicationError::Rasterize(_))
        ));
    }

    #[test]
    fn rasterize_clamps_out_of_range_samples() {
        let output = FilterOutput {
            width: 1,
            height: 1,
            samples: vec![1.7, -0.4, f32::NAN, 1.0],
        };
        let bitmap = ImageCrateEngine.rasterize(&output).expect("rasterize");
        assert_eq!(bitmap.pixel(0, 0), Some([255, 0, 0, 255]));
    }
}

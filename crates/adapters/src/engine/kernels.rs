//! Per-pixel colour transforms. Samples are normalized RGB; alpha is left alone.

use image::Rgba32FImage;

type Rgb = [f32; 3];

fn map_rgb(image: &mut Rgba32FImage, transform: impl Fn(Rgb) -> Rgb) {
    for pixel in image.pixels_mut() {
        let [r, g, b] = transform([pixel[0], pixel[1], pixel[2]]);
        pixel[0] = r;
        pixel[1] = g;
        pixel[2] = b;
    }
}

fn luma([r, g, b]: Rgb) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

fn saturate(rgb: Rgb, amount: f32) -> Rgb {
    let gray = luma(rgb);
    rgb.map(|channel| gray + (channel - gray) * amount)
}

fn contrast(rgb: Rgb, amount: f32) -> Rgb {
    rgb.map(|channel| (channel - 0.5) * amount + 0.5)
}

fn gray(value: f32) -> Rgb {
    [value; 3]
}

pub fn sepia(image: &mut Rgba32FImage, intensity: f32) {
    let mix = intensity.clamp(0.0, 1.0);
    map_rgb(image, |[r, g, b]| {
        let toned = [
            0.393 * r + 0.769 * g + 0.189 * b,
            0.349 * r + 0.686 * g + 0.168 * b,
            0.272 * r + 0.534 * g + 0.131 * b,
        ];
        [
            r + (toned[0] - r) * mix,
            g + (toned[1] - g) * mix,
            b + (toned[2] - b) * mix,
        ]
    });
}

pub fn mono(image: &mut Rgba32FImage) {
    map_rgb(image, |rgb| gray(luma(rgb)));
}

pub fn noir(image: &mut Rgba32FImage) {
    map_rgb(image, |rgb| contrast(gray(luma(rgb)), 1.6));
}

pub fn tonal(image: &mut Rgba32FImage) {
    map_rgb(image, |rgb| gray(luma(rgb).max(0.0).powf(0.85)));
}

pub fn chrome(image: &mut Rgba32FImage) {
    map_rgb(image, |rgb| contrast(saturate(rgb, 1.25), 1.1));
}

pub fn fade(image: &mut Rgba32FImage) {
    map_rgb(image, |rgb| saturate(rgb.map(|c| c * 0.85 + 0.1), 0.7));
}

pub fn instant(image: &mut Rgba32FImage) {
    map_rgb(image, |[r, g, b]| {
        saturate([r * 0.95 + 0.06, g * 0.95 + 0.04, b * 0.85 + 0.06], 0.85)
    });
}

/// Cool shadows, warm highlights.
pub fn process(image: &mut Rgba32FImage) {
    map_rgb(image, |rgb| {
        let shift = (luma(rgb) - 0.5) * 0.12;
        contrast([rgb[0] + shift, rgb[1], rgb[2] - shift], 1.05)
    });
}

pub fn invert(image: &mut Rgba32FImage) {
    map_rgb(image, |rgb| rgb.map(|c| 1.0 - c));
}

pub fn color_controls(image: &mut Rgba32FImage, saturation: f32, brightness: f32, amount: f32) {
    map_rgb(image, |rgb| {
        let adjusted = saturate(rgb, saturation).map(|c| c + brightness);
        contrast(adjusted, amount)
    });
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn single(rgba: [f32; 4]) -> Rgba32FImage {
        Rgba32FImage::from_pixel(1, 1, Rgba(rgba))
    }

    #[test]
    fn neutral_color_controls_are_identity() {
        let mut image = single([0.2, 0.4, 0.6, 0.5]);
        color_controls(&mut image, 1.0, 0.0, 1.0);
        let pixel = image.get_pixel(0, 0);
        for (actual, expected) in pixel.0.iter().zip([0.2, 0.4, 0.6, 0.5]) {
            assert!((actual - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_intensity_sepia_keeps_the_image() {
        let mut image = single([0.1, 0.5, 0.9, 1.0]);
        sepia(&mut image, 0.0);
        assert_eq!(image.get_pixel(0, 0).0, [0.1, 0.5, 0.9, 1.0]);
    }

    #[test]
    fn fade_lifts_black() {
        let mut image = single([0.0, 0.0, 0.0, 1.0]);
        fade(&mut image);
        assert!(image.get_pixel(0, 0)[0] > 0.05);
    }

    #[test]
    fn noir_pushes_darks_darker() {
        let mut image = single([0.3, 0.3, 0.3, 1.0]);
        noir(&mut image);
        assert!(image.get_pixel(0, 0)[0] < 0.3);
    }
}

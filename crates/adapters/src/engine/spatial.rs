use image::{imageops, Rgba32FImage};

const MIN_BLUR_SIGMA: f32 = 0.5;

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Radial darkening toward the corners.
///
/// `radius` pulls the start of the falloff toward the centre; `intensity` 2.0
/// takes the far corners to black.
pub fn vignette(image: &mut Rgba32FImage, intensity: f32, radius: f32) {
    let (width, height) = image.dimensions();
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let half_diagonal = (center_x * center_x + center_y * center_y).sqrt().max(f32::EPSILON);
    let inner = 1.0 / (1.0 + radius.max(0.0) / 10.0);

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center_x;
        let dy = y as f32 + 0.5 - center_y;
        let distance = (dx * dx + dy * dy).sqrt() / half_diagonal;
        let factor = 1.0 - intensity * 0.5 * smoothstep(inner, 1.0, distance);

        pixel[0] *= factor;
        pixel[1] *= factor;
        pixel[2] *= factor;
    }
}

/// Screen-blends a gaussian-blurred copy over the image.
pub fn bloom(image: &Rgba32FImage, radius: f32, intensity: f32) -> Rgba32FImage {
    let glow = imageops::blur(image, radius.max(MIN_BLUR_SIGMA));
    let mut out = image.clone();

    for (pixel, halo) in out.pixels_mut().zip(glow.pixels()) {
        for channel in 0..3 {
            let base = pixel[channel].clamp(0.0, 1.0);
            let light = (halo[channel] * intensity).clamp(0.0, 1.0);
            pixel[channel] = 1.0 - (1.0 - base) * (1.0 - light);
        }
    }
    out
}

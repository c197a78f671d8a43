use filter_preview_domain::Bitmap;
use font8x8::UnicodeFonts;
use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::layout::Rect;

pub const GLYPH_SIZE: usize = 8;

/// 0RGB framebuffer in the layout `minifb` expects.
pub struct Canvas {
    width: usize,
    height: usize,
    buffer: Vec<u32>,
    clip: Option<Rect>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![0_u32; width * height],
            clip: None,
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.buffer
    }

    pub fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    pub fn fill_vertical_gradient(&mut self, top_color: u32, bottom_color: u32) {
        for y in 0..self.height {
            let t = y as f32 / self.height.max(1) as f32;
            let color = lerp_color(top_color, bottom_color, t);
            self.buffer[y * self.width..(y + 1) * self.width].fill(color);
        }
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(clip) = self.clip {
            if x < clip.left || x >= clip.right() || y < clip.top || y >= clip.bottom() {
                return;
            }
        }
        self.buffer[y * self.width + x] = color;
    }

    pub fn fill_rect(&mut self, left: i64, top: i64, w: usize, h: usize, color: u32) {
        for y in top..top + h as i64 {
            for x in left..left + w as i64 {
                self.set_pixel(x, y, color);
            }
        }
    }

    pub fn draw_rect(&mut self, left: i64, top: i64, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 {
            return;
        }
        let right = left + w as i64 - 1;
        let bottom = top + h as i64 - 1;
        for x in left..=right {
            self.set_pixel(x, top, color);
            self.set_pixel(x, bottom, color);
        }
        for y in top..=bottom {
            self.set_pixel(left, y, color);
            self.set_pixel(right, y, color);
        }
    }

    /// Filled rectangle with its corners cut to `radius`.
    pub fn fill_rounded_rect(
        &mut self,
        left: i64,
        top: i64,
        w: usize,
        h: usize,
        radius: usize,
        color: u32,
    ) {
        let radius = radius.min(w / 2).min(h / 2) as i64;
        let (w, h) = (w as i64, h as i64);
        for dy in 0..h {
            for dx in 0..w {
                let cx = if dx < radius {
                    radius - dx
                } else if dx >= w - radius {
                    dx - (w - radius - 1)
                } else {
                    0
                };
                let cy = if dy < radius {
                    radius - dy
                } else if dy >= h - radius {
                    dy - (h - radius - 1)
                } else {
                    0
                };
                if cx * cx + cy * cy > radius * radius {
                    continue;
                }
                self.set_pixel(left + dx, top + dy, color);
            }
        }
    }

    pub fn blit(&mut self, left: i64, top: i64, image: &FittedImage) {
        for y in 0..image.height {
            for x in 0..image.width {
                let color = image.pixels[y * image.width + x];
                self.set_pixel(left + x as i64, top + y as i64, color);
            }
        }
    }

    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, color: u32) {
        let mut cursor_x = x;
        for ch in text.chars() {
            self.draw_char(cursor_x, y, ch, color);
            cursor_x += GLYPH_SIZE as i64;
        }
    }

    fn draw_char(&mut self, x: i64, y: i64, ch: char, color: u32) {
        let glyph = font8x8::BASIC_FONTS.get(ch).unwrap_or([0; 8]);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (bits >> col) & 1 == 1 {
                    self.set_pixel(x + col as i64, y + row as i64, color);
                }
            }
        }
    }
}

pub fn text_width(text: &str) -> usize {
    text.chars().count() * GLYPH_SIZE
}

/// Displayed bitmap scaled to fit a box, as 0RGB pixels composited on `background`.
#[derive(Debug, Clone)]
pub struct FittedImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

pub fn fit_bitmap(bitmap: &Bitmap, max_width: usize, max_height: usize, background: u32) -> Option<FittedImage> {
    if max_width == 0 || max_height == 0 {
        return None;
    }
    let source = RgbaImage::from_raw(bitmap.width(), bitmap.height(), bitmap.pixels().to_vec())?;

    let scale = (max_width as f32 / bitmap.width() as f32)
        .min(max_height as f32 / bitmap.height() as f32);
    let width = ((bitmap.width() as f32 * scale).round() as u32).max(1);
    let height = ((bitmap.height() as f32 * scale).round() as u32).max(1);
    let scaled = imageops::resize(&source, width, height, FilterType::Triangle);

    let pixels = scaled
        .pixels()
        .map(|pixel| {
            let [r, g, b, a] = pixel.0;
            blend_over(background, [r, g, b], a)
        })
        .collect();

    Some(FittedImage {
        width: width as usize,
        height: height as usize,
        pixels,
    })
}

fn blend_over(background: u32, [r, g, b]: [u8; 3], alpha: u8) -> u32 {
    let foreground = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
    lerp_color(background, foreground, f32::from(alpha) / 255.0)
}

pub fn lerp_color(start: u32, end: u32, t: f32) -> u32 {
    let clamped = t.clamp(0.0, 1.0);
    let sr = ((start >> 16) & 0xFF) as f32;
    let sg = ((start >> 8) & 0xFF) as f32;
    let sb = (start & 0xFF) as f32;
    let er = ((end >> 16) & 0xFF) as f32;
    let eg = ((end >> 8) & 0xFF) as f32;
    let eb = (end & 0xFF) as f32;

    let r = (sr + (er - sr) * clamped).round() as u32;
    let g = (sg + (eg - sg) * clamped).round() as u32;
    let b = (sb + (eb - sb) * clamped).round() as u32;
    (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_ratio() {
        let bitmap = Bitmap::new(200, 100, vec![255; 200 * 100 * 4]).expect("bitmap");
        let fitted = fit_bitmap(&bitmap, 300, 300, 0).expect("fits");
        assert_eq!((fitted.width, fitted.height), (300, 150));
        assert_eq!(fitted.pixels[0], 0xFFFFFF);
    }

    #[test]
    fn transparent_pixels_show_the_background() {
        let bitmap = Bitmap::new(1, 1, vec![255, 0, 0, 0]).expect("bitmap");
        let fitted = fit_bitmap(&bitmap, 4, 4, 0x123456).expect("fits");
        assert!(fitted.pixels.iter().all(|pixel| *pixel == 0x123456));
    }

    #[test]
    fn clip_limits_drawing() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_clip(Some(Rect {
            left: 2,
            top: 2,
            width: 3,
            height: 3,
        }));
        canvas.fill_rect(-5, -5, 20, 20, 0xFFFFFF);

        let lit = canvas.pixels().iter().filter(|pixel| **pixel == 0xFFFFFF).count();
        assert_eq!(lit, 9);
        assert_eq!(canvas.pixels()[2 * 10 + 2], 0xFFFFFF);
        assert_eq!(canvas.pixels()[0], 0);
    }

    #[test]
    fn rounded_rect_skips_corners() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_rounded_rect(0, 0, 20, 20, 8, 0xFFFFFF);
        assert_eq!(canvas.pixels()[0], 0);
        assert_eq!(canvas.pixels()[10 * 20 + 10], 0xFFFFFF);
    }

    #[test]
    fn text_width_counts_glyphs() {
        assert_eq!(text_width("Sepia"), 40);
    }
}

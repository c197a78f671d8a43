use std::time::Duration;

use filter_preview_application::{
    DisplayMode, DisplayedImageQuery, FilterControl, FilterControlsQuery, PreviewScreen,
    ResetImageCommand, SelectFilterCommand,
};
use filter_preview_domain::Bitmap;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::{debug, info};

use crate::canvas::{fit_bitmap, text_width, Canvas, FittedImage, GLYPH_SIZE};
use crate::config::AppConfig;
use crate::layout::{
    Deferred, DeferredQueue, FilterStrip, Rect, ScreenLayout, TapTracker, BUTTON_WIDTH,
};

const FRAME_INTERVAL: Duration = Duration::from_micros(16_600);
const BUTTON_RADIUS: usize = 8;
const BACKGROUND_TOP: u32 = 0xF4F1EC;
const BACKGROUND_BOTTOM: u32 = 0xDDD6CB;
const IMAGE_BACKDROP: u32 = 0x1B1B1D;
const IMAGE_BORDER: u32 = 0xB9AE9C;
const BUTTON_COLOR: u32 = 0x3A3A3C;
const BUTTON_SELECTED: u32 = 0x0A84FF;
const BUTTON_HOVER: u32 = 0x55555A;
const LABEL_COLOR: u32 = 0xFFFFFF;
const PLACEHOLDER_TEXT: u32 = 0x8E8E93;

/// Scaled copy of the displayed bitmap, rebuilt only when the bitmap changes.
struct ImageCache {
    bitmap: Bitmap,
    fitted: Option<FittedImage>,
}

impl ImageCache {
    fn refresh(cache: &mut Option<Self>, displayed: Option<&Bitmap>, frame: Rect) {
        let Some(bitmap) = displayed else {
            *cache = None;
            return;
        };
        if cache
            .as_ref()
            .is_some_and(|cached| cached.bitmap.same_buffer(bitmap))
        {
            return;
        }
        debug!(
            width = bitmap.width(),
            height = bitmap.height(),
            "rescaling displayed image"
        );
        *cache = Some(Self {
            bitmap: bitmap.clone(),
            fitted: fit_bitmap(bitmap, frame.width, frame.height, IMAGE_BACKDROP),
        });
    }
}

pub fn launch_window(screen: &mut PreviewScreen, config: &AppConfig) -> Result<(), String> {
    let width = config.window_width;
    let height = config.window_height;

    let mut window = Window::new(
        &window_title(screen.display_mode()),
        width,
        height,
        WindowOptions::default(),
    )
    .map_err(|error| format!("failed to start UI window: {error}"))?;
    window.limit_update_rate(Some(FRAME_INTERVAL));

    let controls = screen.filter_controls(FilterControlsQuery);
    let mut canvas = Canvas::new(width, height);
    let mut strip = FilterStrip::new(controls.len());
    let mut deferred = DeferredQueue::default();
    // Buttons exist now; their total width is only known after the first pass.
    deferred.schedule(Deferred::RecomputeStripContent);

    let mut taps = TapTracker::default();
    let mut was_mouse_down = false;
    let mut cache: Option<ImageCache> = None;
    info!(width, height, filters = controls.len(), "preview window opened");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let layout = ScreenLayout::compute(width, height);

        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            screen.reset_image(ResetImageCommand);
        }

        if let Some((wheel_x, wheel_y)) = window.get_scroll_wheel() {
            let delta = if wheel_x.abs() > wheel_y.abs() {
                -wheel_x
            } else {
                -wheel_y
            };
            strip.scroll_by(delta, layout.strip.width);
        }

        let pointer = window.get_mouse_pos(MouseMode::Discard);
        let hovered = pointer.and_then(|(x, y)| strip.button_at(layout.strip, x, y));
        let mouse_down = window.get_mouse_down(MouseButton::Left);
        match (mouse_down, was_mouse_down) {
            (true, false) => {
                if let Some((x, y)) = pointer {
                    if layout.strip.contains(x, y) {
                        taps.press(x, hovered);
                    }
                }
            }
            (true, true) => {
                if let Some((x, _)) = pointer {
                    let delta = taps.drag_to(x);
                    if delta != 0.0 {
                        strip.scroll_by(delta, layout.strip.width);
                    }
                }
            }
            (false, true) => {
                if let Some(index) = taps.release(hovered) {
                    screen.select_filter(SelectFilterCommand { index });
                }
            }
            (false, false) => {}
        }
        was_mouse_down = mouse_down;

        ImageCache::refresh(
            &mut cache,
            screen.displayed_image(DisplayedImageQuery),
            layout.image_view,
        );

        canvas.fill_vertical_gradient(BACKGROUND_TOP, BACKGROUND_BOTTOM);
        draw_image_view(&mut canvas, layout.image_view, cache.as_ref());
        draw_strip(
            &mut canvas,
            layout.strip,
            &strip,
            &controls,
            screen.selected_index(),
            hovered,
        );

        window.set_title(&window_title(screen.display_mode()));
        window
            .update_with_buffer(canvas.pixels(), width, height)
            .map_err(|error| format!("failed to update UI window: {error}"))?;

        deferred.run(&mut strip);
    }

    info!("preview window closed");
    Ok(())
}

fn draw_image_view(canvas: &mut Canvas, frame: Rect, cache: Option<&ImageCache>) {
    let (left, top) = (frame.left as i64, frame.top as i64);
    canvas.fill_rect(left, top, frame.width, frame.height, IMAGE_BACKDROP);
    canvas.draw_rect(left - 1, top - 1, frame.width + 2, frame.height + 2, IMAGE_BORDER);

    match cache.and_then(|cached| cached.fitted.as_ref()) {
        Some(fitted) => {
            // Aspect fit, centred.
            let x = left + (frame.width.saturating_sub(fitted.width) / 2) as i64;
            let y = top + (frame.height.saturating_sub(fitted.height) / 2) as i64;
            canvas.set_clip(Some(frame));
            canvas.blit(x, y, fitted);
            canvas.set_clip(None);
        }
        None => {
            let message = "no image";
            let x = left + (frame.width.saturating_sub(text_width(message)) / 2) as i64;
            let y = top + (frame.height.saturating_sub(GLYPH_SIZE) / 2) as i64;
            canvas.draw_text(x, y, message, PLACEHOLDER_TEXT);
        }
    }
}

fn draw_strip(
    canvas: &mut Canvas,
    frame: Rect,
    strip: &FilterStrip,
    controls: &[FilterControl],
    selected: Option<usize>,
    hovered: Option<usize>,
) {
    canvas.set_clip(Some(frame));
    for control in controls {
        let left = strip.button_left(frame, control.index);
        if left + BUTTON_WIDTH as i64 <= frame.left as i64 || left >= frame.right() as i64 {
            continue;
        }

        let color = if selected == Some(control.index) {
            BUTTON_SELECTED
        } else if hovered == Some(control.index) {
            BUTTON_HOVER
        } else {
            BUTTON_COLOR
        };
        let top = frame.top as i64;
        canvas.fill_rounded_rect(left, top, BUTTON_WIDTH, frame.height, BUTTON_RADIUS, color);

        let (label_x, label_y) = label_origin(left, top, frame.height, &control.label);
        canvas.draw_text(label_x, label_y, &control.label, LABEL_COLOR);
    }
    canvas.set_clip(None);
}

fn label_origin(button_left: i64, button_top: i64, button_height: usize, label: &str) -> (i64, i64) {
    let x = button_left + (BUTTON_WIDTH as i64 - text_width(label) as i64) / 2;
    let y = button_top + (button_height.saturating_sub(GLYPH_SIZE) / 2) as i64;
    (x, y)
}

fn window_title(mode: &DisplayMode) -> String {
    let state = match mode {
        DisplayMode::Empty => "no image".to_string(),
        DisplayMode::Original => "original".to_string(),
        DisplayMode::Filtered(filter_id) => filter_id.to_string(),
    };
    format!("filter-preview | {state} | click a filter, R resets, Esc quits")
}

#[cfg(test)]
mod tests {
    use filter_preview_domain::{builtin, FilterId};

    use super::*;

    #[test]
    fn title_names_the_display_mode() {
        assert!(window_title(&DisplayMode::Empty).contains("| no image |"));
        assert!(window_title(&DisplayMode::Original).contains("| original |"));
        let filtered = DisplayMode::Filtered(FilterId::new(builtin::BLOOM).expect("id"));
        assert!(window_title(&filtered).contains("| bloom |"));
    }

    #[test]
    fn labels_are_centred_in_their_button() {
        assert_eq!(label_origin(10, 700, 60, "Mono"), (10 + 24, 726));
        assert_eq!(label_origin(-20, 0, 60, "Vignette"), (-20 + 8, 26));
    }

    #[test]
    fn image_cache_rebuilds_only_for_a_new_buffer() {
        let frame = Rect {
            left: 0,
            top: 0,
            width: 8,
            height: 8,
        };
        let first = Bitmap::new(2, 2, vec![200; 16]).expect("bitmap");
        let mut cache = None;

        let fitted_pixels = |cache: &Option<ImageCache>| {
            cache
                .as_ref()
                .and_then(|cached| cached.fitted.as_ref())
                .map(|fitted| (fitted.width, fitted.pixels.as_ptr()))
        };

        ImageCache::refresh(&mut cache, Some(&first), frame);
        let (fitted_width, first_pixels) = fitted_pixels(&cache).expect("fitted");
        assert_eq!(fitted_width, 8);

        ImageCache::refresh(&mut cache, Some(&first.clone()), frame);
        assert_eq!(fitted_pixels(&cache), Some((8, first_pixels)));

        let second = Bitmap::new(2, 2, vec![200; 16]).expect("bitmap");
        ImageCache::refresh(&mut cache, Some(&second), frame);
        assert!(cache.as_ref().is_some_and(|cached| cached.bitmap.same_buffer(&second)));

        ImageCache::refresh(&mut cache, None, frame);
        assert!(cache.is_none());
    }
}

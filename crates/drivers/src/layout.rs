use std::collections::VecDeque;

pub const IMAGE_TOP_INSET: usize = 20;
pub const IMAGE_WIDTH_RATIO: f32 = 0.9;
pub const IMAGE_STRIP_GAP: usize = 20;
pub const STRIP_SIDE_INSET: usize = 10;
pub const STRIP_BOTTOM_INSET: usize = 20;
pub const STRIP_HEIGHT: usize = 60;
pub const BUTTON_WIDTH: usize = 80;
pub const BUTTON_SPACING: usize = 10;
const BUTTON_STRIDE: usize = BUTTON_WIDTH + BUTTON_SPACING;
const DRAG_THRESHOLD: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn right(&self) -> usize {
        self.left + self.width
    }

    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left as f32
            && x < self.right() as f32
            && y >= self.top as f32
            && y < self.bottom() as f32
    }
}

/// Frames of the two screen regions for a given window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub image_view: Rect,
    pub strip: Rect,
}

impl ScreenLayout {
    pub fn compute(width: usize, height: usize) -> Self {
        let strip = Rect {
            left: STRIP_SIDE_INSET,
            top: height.saturating_sub(STRIP_BOTTOM_INSET + STRIP_HEIGHT),
            width: width.saturating_sub(STRIP_SIDE_INSET * 2),
            height: STRIP_HEIGHT,
        };

        // Square, 90% of the width, shrunk if it would run into the strip.
        let preferred = (width as f32 * IMAGE_WIDTH_RATIO).round() as usize;
        let available = strip
            .top
            .saturating_sub(IMAGE_TOP_INSET + IMAGE_STRIP_GAP);
        let side = preferred.min(available);
        let image_view = Rect {
            left: width.saturating_sub(side) / 2,
            top: IMAGE_TOP_INSET,
            width: side,
            height: side,
        };

        Self { image_view, strip }
    }
}

pub fn content_width(button_count: usize) -> usize {
    if button_count == 0 {
        return 0;
    }
    button_count * BUTTON_WIDTH + (button_count - 1) * BUTTON_SPACING
}

/// Horizontally scrollable row of equally sized filter buttons.
#[derive(Debug, Clone)]
pub struct FilterStrip {
    button_count: usize,
    content_width: Option<usize>,
    offset: usize,
}

impl FilterStrip {
    pub fn new(button_count: usize) -> Self {
        Self {
            button_count,
            content_width: None,
            offset: 0,
        }
    }

    pub fn recompute_content_width(&mut self) {
        self.content_width = Some(content_width(self.button_count));
    }

    pub fn max_offset(&self, viewport_width: usize) -> usize {
        self.content_width
            .map(|content| content.saturating_sub(viewport_width))
            .unwrap_or(0)
    }

    pub fn scroll_by(&mut self, delta: f32, viewport_width: usize) {
        let max = self.max_offset(viewport_width) as f32;
        let next = (self.offset as f32 + delta).round().clamp(0.0, max);
        self.offset = next as usize;
    }

    /// Screen x of a button's left edge; negative when scrolled past.
    pub fn button_left(&self, strip: Rect, index: usize) -> i64 {
        strip.left as i64 + (index * BUTTON_STRIDE) as i64 - self.offset as i64
    }

    pub fn button_at(&self, strip: Rect, x: f32, y: f32) -> Option<usize> {
        if !strip.contains(x, y) {
            return None;
        }
        let content_x = (x - strip.left as f32) as usize + self.offset;
        let index = content_x / BUTTON_STRIDE;
        let within_button = content_x % BUTTON_STRIDE < BUTTON_WIDTH;
        (within_button && index < self.button_count).then_some(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    RecomputeStripContent,
}

/// Work queued during a frame and run once that frame's layout pass is done.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: VecDeque<Deferred>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, task: Deferred) {
        if !self.tasks.contains(&task) {
            self.tasks.push_back(task);
        }
    }

    pub fn run(&mut self, strip: &mut FilterStrip) {
        while let Some(task) = self.tasks.pop_front() {
            match task {
                Deferred::RecomputeStripContent => strip.recompute_content_width(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    button: Option<usize>,
    origin_x: f32,
    last_x: f32,
    dragged: bool,
}

/// Turns raw pointer transitions into taps and strip drags.
///
/// A tap fires on release over the button that was pressed, unless the
/// pointer moved far enough to count as a scroll.
#[derive(Debug, Default)]
pub struct TapTracker {
    press: Option<Press>,
}

impl TapTracker {
    pub fn press(&mut self, x: f32, button: Option<usize>) {
        self.press = Some(Press {
            button,
            origin_x: x,
            last_x: x,
            dragged: false,
        });
    }

    /// Scroll delta for the strip, zero until the drag threshold is passed.
    pub fn drag_to(&mut self, x: f32) -> f32 {
        let Some(press) = self.press.as_mut() else {
            return 0.0;
        };
        if !press.dragged && (x - press.origin_x).abs() > DRAG_THRESHOLD {
            press.dragged = true;
        }
        let delta = if press.dragged { press.last_x - x } else { 0.0 };
        press.last_x = x;
        delta
    }

    pub fn release(&mut self, button: Option<usize>) -> Option<usize> {
        let press = self.press.take()?;
        if press.dragged {
            return None;
        }
        match (press.button, button) {
            (Some(pressed), Some(released)) if pressed == released => Some(pressed),
            _ => None,
        }
    }
}

//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use grid_browser::canvas::{Canvas, FontSlot, Rect};
use grid_browser::widget::Host;

/// Every character measures 6px, independent of font slot, so truncation
/// and layout assertions are exact.
pub const CHAR_WIDTH: f32 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: u32,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        color: u32,
    },
    StrokeRect {
        rect: Rect,
        line_width: f32,
        color: u32,
    },
    Gradient {
        rect: Rect,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        slot: FontSlot,
        color: u32,
    },
    Image {
        rect: Rect,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

/// Canvas that records draw calls instead of rasterizing
#[derive(Debug, Default)]
pub struct MockCanvas {
    pub ops: Vec<DrawOp>,
}

impl MockCanvas {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn fill_colors(&self) -> Vec<u32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn clip_depth_balanced(&self) -> bool {
        let mut depth = 0i32;
        for op in &self.ops {
            match op {
                DrawOp::PushClip { .. } => depth += 1,
                DrawOp::PopClip => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl Canvas for MockCanvas {
    fn fill_rect(&mut self, rect: Rect, color: u32) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: u32) {
        self.ops.push(DrawOp::RoundedRect { rect, radius, color });
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: f32, color: u32) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            line_width,
            color,
        });
    }

    fn fill_vertical_gradient(&mut self, rect: Rect, _top: u32, _bottom: u32) {
        self.ops.push(DrawOp::Gradient { rect });
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, slot: FontSlot, color: u32) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            slot,
            color,
        });
    }

    fn measure_text(&self, text: &str, _slot: FontSlot) -> f32 {
        text.chars().count() as f32 * CHAR_WIDTH
    }

    fn draw_image(&mut self, rect: Rect, _pixels: &[u8], _w: u32, _h: u32) {
        self.ops.push(DrawOp::Image { rect });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ops.push(DrawOp::PushClip { rect });
    }

    fn pop_clip(&mut self) {
        self.ops.push(DrawOp::PopClip);
    }
}

/// Host stub capturing the hidden output field and redraw requests
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub output: String,
    pub dirty: usize,
}

impl Host for RecordingHost {
    fn set_selection_output(&mut self, value: &str) {
        self.output = value.to_string();
    }

    fn mark_dirty(&mut self) {
        self.dirty += 1;
    }
}

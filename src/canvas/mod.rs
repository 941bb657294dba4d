//! Drawing contract between the renderer and the host surface
//!
//! The renderer is a pure function of widget state and a `Canvas`. The crate
//! ships a software implementation ([`pixel::PixelCanvas`]) that draws into a
//! caller-provided ARGB framebuffer; tests use a recording canvas with
//! deterministic text measurement.

pub mod pixel;

/// Axis-aligned rectangle in widget-local pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Which of the two fixed text styles to draw with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSlot {
    /// 12px: chip labels and the selection preview
    Label,
    /// 10px: the column-header summary
    Headers,
}

impl FontSlot {
    pub fn size_px(&self) -> f32 {
        match self {
            FontSlot::Label => 12.0,
            FontSlot::Headers => 10.0,
        }
    }
}

/// 2D drawing surface with text measurement and image blitting
///
/// Text coordinates are baseline positions. Clip rectangles nest; every
/// `push_clip` must be paired with a `pop_clip`.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: u32);

    /// Filled rectangle with rounded corners (used for the scrollbar capsule)
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: u32);

    /// Rectangle outline of the given line width
    fn stroke_rect(&mut self, rect: Rect, line_width: f32, color: u32);

    /// Vertical gradient from `top` at the rect's top edge to `bottom` at its
    /// bottom edge, alpha-blended over existing content
    fn fill_vertical_gradient(&mut self, rect: Rect, top: u32, bottom: u32);

    /// Draw `text` with its baseline at (x, y)
    fn draw_text(&mut self, x: f32, y: f32, text: &str, slot: FontSlot, color: u32);

    /// Advance width of `text` in the given style
    fn measure_text(&self, text: &str, slot: FontSlot) -> f32;

    /// Blit an RGBA image scaled to fill `rect`
    fn draw_image(&mut self, rect: Rect, pixels: &[u8], img_width: u32, img_height: u32);

    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);
}

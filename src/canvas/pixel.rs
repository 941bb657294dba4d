//! Software canvas over an ARGB pixel buffer
//!
//! Drawing primitives clip safely at buffer edges and at the current clip
//! rectangle. Glyphs are rasterized through fontdue and cached per
//! (character, size) in a [`TextEngine`] that outlives individual frames.

use std::collections::HashMap;

use fontdue::{Font, FontSettings, Metrics};

use super::{Canvas, FontSlot, Rect};

type GlyphCacheKey = (char, u32);
type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are ARGB (0xAARRGGBB); `alpha` overrides the foreground's own
/// alpha channel. Returns an opaque result.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Font plus glyph cache, owned by the host and shared across frames
pub struct TextEngine {
    font: Font,
    cache: GlyphCache,
}

impl TextEngine {
    /// Load a font from raw TTF/OTF bytes supplied by the host
    pub fn new(font_bytes: &[u8]) -> Result<Self, String> {
        let font = Font::from_bytes(font_bytes, FontSettings::default())
            .map_err(|e| format!("Failed to load font: {}", e))?;
        Ok(Self {
            font,
            cache: HashMap::new(),
        })
    }

    /// Advance width of a string at the given pixel size
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, size).advance_width)
            .sum()
    }

    fn glyph(&mut self, ch: char, size: f32) -> &(Metrics, Vec<u8>) {
        let key = (ch, size.to_bits());
        self.cache
            .entry(key)
            .or_insert_with(|| self.font.rasterize(ch, size))
    }
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end)
#[derive(Clone, Copy, Debug)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// One frame's worth of drawing into a borrowed ARGB buffer
pub struct PixelCanvas<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    text: &'a mut TextEngine,
    clip_stack: Vec<ClipRect>,
}

impl<'a> PixelCanvas<'a> {
    /// Wrap a framebuffer. If the buffer is smaller than width*height, the
    /// height is reduced to fit so no access can go out of bounds.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize, text: &'a mut TextEngine) -> Self {
        let (width, height) = if buffer.len() < width * height && width > 0 {
            (width, buffer.len() / width)
        } else {
            (width, height)
        };
        Self {
            buffer,
            width,
            height,
            text,
            clip_stack: Vec::new(),
        }
    }

    #[inline]
    fn clip(&self) -> ClipRect {
        self.clip_stack.last().copied().unwrap_or(ClipRect {
            x0: 0,
            y0: 0,
            x1: self.width,
            y1: self.height,
        })
    }

    /// Clamp a rect to the buffer and the active clip
    fn clamped(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let clip = self.clip();
        let x0 = (rect.x.max(0.0) as usize).min(self.width).max(clip.x0);
        let y0 = (rect.y.max(0.0) as usize).min(self.height).max(clip.y0);
        let x1 = (((rect.x + rect.width).max(0.0)) as usize).min(clip.x1);
        let y1 = (((rect.y + rect.height).max(0.0)) as usize).min(clip.y1);
        (x0, y0, x1.max(x0), y1.max(y0))
    }

    #[inline]
    fn blend_pixel(&mut self, x: usize, y: usize, color: u32, alpha: f32) {
        let clip = self.clip();
        if x < clip.x0 || x >= clip.x1 || y < clip.y0 || y >= clip.y1 {
            return;
        }
        let idx = y * self.width + x;
        if alpha >= 1.0 {
            self.buffer[idx] = color | 0xFF000000;
        } else if alpha > 0.0 {
            self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
        }
    }
}

impl Canvas for PixelCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.clamped(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            self.buffer[row_start + x0..row_start + x1].fill(color);
        }
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: u32) {
        if radius <= 0.5 {
            return self.fill_rect(rect, color);
        }
        let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0);
        let (x0, y0, x1, y1) = self.clamped(rect);
        let r2 = radius * radius;
        for y in y0..y1 {
            let row_start = y * self.width;
            let fy = y as f32 + 0.5;
            // Distance from the nearest corner arc center on the y axis
            let dy = if fy < rect.y + radius {
                rect.y + radius - fy
            } else if fy > rect.y + rect.height - radius {
                fy - (rect.y + rect.height - radius)
            } else {
                0.0
            };
            for x in x0..x1 {
                let fx = x as f32 + 0.5;
                let dx = if fx < rect.x + radius {
                    rect.x + radius - fx
                } else if fx > rect.x + rect.width - radius {
                    fx - (rect.x + rect.width - radius)
                } else {
                    0.0
                };
                if dx * dx + dy * dy <= r2 {
                    self.buffer[row_start + x] = color;
                }
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: f32, color: u32) {
        let w = line_width.max(1.0);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, w), color);
        self.fill_rect(
            Rect::new(rect.x, rect.y + rect.height - w, rect.width, w),
            color,
        );
        self.fill_rect(Rect::new(rect.x, rect.y, w, rect.height), color);
        self.fill_rect(
            Rect::new(rect.x + rect.width - w, rect.y, w, rect.height),
            color,
        );
    }

    fn fill_vertical_gradient(&mut self, rect: Rect, top: u32, bottom: u32) {
        let (x0, y0, x1, y1) = self.clamped(rect);
        if rect.height <= 0.0 {
            return;
        }
        for y in y0..y1 {
            let t = ((y as f32 + 0.5 - rect.y) / rect.height).clamp(0.0, 1.0);
            // Interpolate the full ARGB color, then blend by its alpha
            let lerp = |a: u32, b: u32, shift: u32| -> f32 {
                let av = ((a >> shift) & 0xFF) as f32;
                let bv = ((b >> shift) & 0xFF) as f32;
                av * (1.0 - t) + bv * t
            };
            let alpha = lerp(top, bottom, 24) / 255.0;
            let color = ((lerp(top, bottom, 16) as u32) << 16)
                | ((lerp(top, bottom, 8) as u32) << 8)
                | (lerp(top, bottom, 0) as u32);
            let row_start = y * self.width;
            for x in x0..x1 {
                let idx = row_start + x;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
            }
        }
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, slot: FontSlot, color: u32) {
        let size = slot.size_px();
        let mut pen_x = x;
        for ch in text.chars() {
            let (metrics, bitmap) = {
                let (m, b) = self.text.glyph(ch, size);
                (*m, b.clone())
            };
            let glyph_top = y - metrics.height as f32 - metrics.ymin as f32;
            for by in 0..metrics.height {
                for bx in 0..metrics.width {
                    let coverage = bitmap[by * metrics.width + bx];
                    if coverage == 0 {
                        continue;
                    }
                    let px = pen_x as isize + bx as isize + metrics.xmin as isize;
                    let py = (glyph_top + by as f32) as isize;
                    if px >= 0 && py >= 0 {
                        self.blend_pixel(
                            px as usize,
                            py as usize,
                            color,
                            coverage as f32 / 255.0,
                        );
                    }
                }
            }
            pen_x += metrics.advance_width;
        }
    }

    fn measure_text(&self, text: &str, slot: FontSlot) -> f32 {
        self.text.measure(text, slot.size_px())
    }

    fn draw_image(&mut self, rect: Rect, pixels: &[u8], img_width: u32, img_height: u32) {
        if img_width == 0 || img_height == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let (x0, y0, x1, y1) = self.clamped(rect);
        for y in y0..y1 {
            // Nearest-neighbor source row
            let sy = (((y as f32 + 0.5 - rect.y) / rect.height) * img_height as f32) as u32;
            let sy = sy.min(img_height - 1);
            for x in x0..x1 {
                let sx = (((x as f32 + 0.5 - rect.x) / rect.width) * img_width as f32) as u32;
                let sx = sx.min(img_width - 1);
                let src = ((sy * img_width + sx) * 4) as usize;
                if src + 3 >= pixels.len() {
                    continue;
                }
                let (r, g, b, a) = (
                    pixels[src] as u32,
                    pixels[src + 1] as u32,
                    pixels[src + 2] as u32,
                    pixels[src + 3],
                );
                let color = (r << 16) | (g << 8) | b;
                self.blend_pixel(x, y, color, a as f32 / 255.0);
            }
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        let outer = self.clip();
        let x0 = (rect.x.max(0.0) as usize).max(outer.x0).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).max(outer.y0).min(self.height);
        let x1 = (((rect.x + rect.width).max(0.0)) as usize).min(outer.x1);
        let y1 = (((rect.y + rect.height).max(0.0)) as usize).min(outer.y1);
        self.clip_stack.push(ClipRect {
            x0,
            y0,
            x1: x1.max(x0),
            y1: y1.max(y0),
        });
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }
}

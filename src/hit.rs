//! Pointer hit testing
//!
//! Maps a widget-local pointer position to either a chip index or the
//! scrollbar track. Grid hits use the column stride of the whole track
//! width, not the drawn cell width, so the small gaps between chips still
//! register as clicks on the nearer chip.

use crate::config::{BrowserConfig, CellFlow};
use crate::layout::GridLayout;

/// What a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A grid cell, by item index into the catalog
    Chip(usize),
    /// The scrollbar track (including the thumb)
    ScrollbarTrack,
}

/// Resolve a pointer position against the grid.
///
/// `x` and `y` are widget-local; `scroll_offset` translates into content
/// space. Returns `None` for the top panel, the bottom margin, the gutter
/// past the last column, and cells beyond the item count.
pub fn hit_test(
    config: &BrowserConfig,
    layout: &GridLayout,
    widget_width: f32,
    widget_height: f32,
    scroll_offset: f32,
    item_count: usize,
    x: f32,
    y: f32,
) -> Option<HitTarget> {
    let local_x = x + config.click_x_offset;
    let local_y = y - config.top_padding + config.click_y_offset;

    // Above the grid or in the bottom margin
    if local_y <= 0.0 || local_y >= widget_height - config.top_padding - config.bottom_skip {
        return None;
    }

    let track_edge = widget_width - config.scrollbar_width;
    if local_x >= track_edge {
        return Some(HitTarget::ScrollbarTrack);
    }
    if local_x < 0.0 {
        return None;
    }

    let col = match config.flow {
        CellFlow::FlexColumns { .. } => {
            // Stride over the full track so inter-chip gaps resolve
            let stride = track_edge / layout.columns as f32;
            (local_x / stride).floor() as usize
        }
        CellFlow::FixedSquares { .. } => {
            let col = (local_x / layout.column_pitch).floor() as usize;
            if col >= layout.columns {
                return None;
            }
            col
        }
    };
    let col = col.min(layout.columns.saturating_sub(1));

    let row = ((local_y + scroll_offset) / layout.row_pitch).floor() as usize;
    let index = row * layout.columns + col;
    if index < item_count {
        Some(HitTarget::Chip(index))
    } else {
        None
    }
}

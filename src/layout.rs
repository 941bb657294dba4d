//! Grid layout math
//!
//! Derives the column/row grid from the widget width and the variant's cell
//! metrics, and computes the virtualized row range for a scroll position.
//! All functions are pure so they can be tested without a drawing surface.

use crate::config::{BrowserConfig, CellFlow};

/// Resolved grid geometry for one widget width and item count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    /// Width of one cell (stretched for flex columns, fixed for squares)
    pub cell_width: f32,
    /// Horizontal distance between cell origins
    pub column_pitch: f32,
    /// Vertical distance between row origins
    pub row_pitch: f32,
    pub content_height: f32,
}

impl GridLayout {
    /// Compute the grid for the current widget width.
    ///
    /// Column count comes from the full width minus the scrollbar; the flex
    /// cell width additionally reserves the right grid inset and the padding
    /// around and between columns.
    pub fn compute(config: &BrowserConfig, widget_width: f32, item_count: usize) -> Self {
        let track_edge = widget_width - config.scrollbar_width;
        let grid_width = track_edge - config.grid_right_inset;
        let row_pitch = config.row_pitch();

        let (columns, cell_width, column_pitch) = match config.flow {
            CellFlow::FlexColumns { min_column_width } => {
                let columns = ((track_edge / min_column_width).floor() as usize).max(2);
                let cell_width =
                    (grid_width - config.cell_padding * (columns as f32 + 1.0)) / columns as f32;
                (columns, cell_width, cell_width + config.cell_padding)
            }
            CellFlow::FixedSquares { cell_size } => {
                let pitch = cell_size + config.cell_padding;
                let columns = ((grid_width / pitch).floor() as usize).max(1);
                (columns, cell_size, pitch)
            }
        };

        let rows = item_count.div_ceil(columns);
        Self {
            columns,
            rows,
            cell_width,
            column_pitch,
            row_pitch,
            content_height: rows as f32 * row_pitch,
        }
    }

    /// Rows intersecting `[scroll_offset, scroll_offset + viewport_height]`,
    /// expanded by a 2-row lookahead in each direction and clamped to the
    /// grid. Returned as a half-open `start..end` range.
    pub fn visible_rows(&self, scroll_offset: f32, viewport_height: f32) -> (usize, usize) {
        if self.rows == 0 || self.row_pitch <= 0.0 {
            return (0, 0);
        }
        let first = (scroll_offset / self.row_pitch).floor() as usize;
        let last = ((scroll_offset + viewport_height) / self.row_pitch).ceil() as usize;
        let start = first.saturating_sub(2);
        let end = (last + 2).min(self.rows);
        (start.min(end), end)
    }

    /// Cell origin within the grid area, before scroll translation
    pub fn cell_origin(&self, config: &BrowserConfig, row: usize, col: usize) -> (f32, f32) {
        match config.flow {
            CellFlow::FlexColumns { .. } => (
                config.extra_cell_padding + config.cell_padding + col as f32 * self.column_pitch,
                config.extra_cell_padding + config.cell_padding + row as f32 * self.row_pitch,
            ),
            CellFlow::FixedSquares { .. } => (
                config.cell_padding + col as f32 * self.column_pitch,
                config.cell_padding + row as f32 * self.row_pitch,
            ),
        }
    }
}

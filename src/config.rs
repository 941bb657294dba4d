//! Browser metrics and per-variant presets
//!
//! Every layout constant the renderer and hit-tester share lives here, so the
//! grid math can be tested without a live drawing surface. The three browser
//! variants (tabular rows, file thumbnails, flat tags) differ only in the
//! values below and in how items are labeled and serialized.

use serde::Deserialize;

/// Which browser variant this widget instance is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    /// Tabular rows with column headers; selection serializes row indices
    Rows,
    /// Flat file list with square thumbnail cells
    Files,
    /// Flat tag list
    Tags,
}

impl BrowserKind {
    /// Noun used in the preview line ("N prompts selected")
    pub fn noun(&self) -> &'static str {
        match self {
            BrowserKind::Rows => "row",
            BrowserKind::Files => "prompt",
            BrowserKind::Tags => "tag",
        }
    }
}

/// How cells flow into columns for a given viewport width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellFlow {
    /// As many columns as fit at `min_column_width`, but never fewer than two;
    /// column width stretches to fill the row
    FlexColumns { min_column_width: f32 },
    /// Fixed square cells; as many as fit, no stretching
    FixedSquares { cell_size: f32 },
}

/// Metric table for one widget instance
///
/// `click_x_offset`/`click_y_offset` calibrate for the host canvas coordinate
/// system and carry no layout meaning.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub kind: BrowserKind,
    pub min_width: f32,
    pub min_height: f32,
    /// Distance from the widget top to the grid area (host-native input
    /// widgets occupy this strip)
    pub top_padding: f32,
    pub bottom_padding: f32,
    /// Extra strip at the very bottom excluded from both grid and scrollbar
    pub bottom_skip: f32,
    pub cell_height: f32,
    pub cell_padding: f32,
    /// Additional inset applied to every cell position
    pub extra_cell_padding: f32,
    pub scrollbar_width: f32,
    /// Right inset between the grid and the scrollbar
    pub grid_right_inset: f32,
    /// Horizontal padding for text inside a chip
    pub text_padding: f32,
    pub preview_padding: f32,
    /// Baseline y of the one-line selection preview
    pub preview_skip: f32,
    /// Baseline y of the first header-summary line
    pub headers_skip: f32,
    pub headers_line_height: f32,
    pub flow: CellFlow,
    pub click_x_offset: f32,
    pub click_y_offset: f32,
}

impl BrowserConfig {
    /// Preset for the tabular row browser
    pub fn rows() -> Self {
        Self {
            kind: BrowserKind::Rows,
            min_width: 310.0,
            min_height: 340.0,
            top_padding: 190.0,
            bottom_padding: 5.0,
            bottom_skip: 10.0,
            cell_height: 28.0,
            cell_padding: 5.0,
            extra_cell_padding: 2.0,
            scrollbar_width: 13.0,
            grid_right_inset: 10.0,
            text_padding: 10.0,
            preview_padding: 20.0,
            preview_skip: 152.0,
            headers_skip: 20.0,
            headers_line_height: 12.0,
            flow: CellFlow::FlexColumns {
                min_column_width: 150.0,
            },
            click_x_offset: -2.0,
            click_y_offset: 0.0,
        }
    }

    /// Preset for the file/thumbnail browser
    pub fn files() -> Self {
        Self {
            kind: BrowserKind::Files,
            min_width: 390.0,
            min_height: 390.0,
            top_padding: 192.0,
            cell_height: 80.0,
            cell_padding: 10.0,
            extra_cell_padding: 0.0,
            flow: CellFlow::FixedSquares { cell_size: 80.0 },
            ..Self::rows()
        }
    }

    /// Preset for the tag browser
    pub fn tags() -> Self {
        Self {
            kind: BrowserKind::Tags,
            ..Self::rows()
        }
    }

    /// Preset matching a variant
    pub fn for_kind(kind: BrowserKind) -> Self {
        match kind {
            BrowserKind::Rows => Self::rows(),
            BrowserKind::Files => Self::files(),
            BrowserKind::Tags => Self::tags(),
        }
    }

    /// Vertical pitch of one grid row (cell plus padding)
    pub fn row_pitch(&self) -> f32 {
        self.cell_height + self.cell_padding
    }

    /// Height of the grid viewport (and the scrollbar track) for a widget of
    /// the given height
    pub fn viewport_height(&self, widget_height: f32) -> f32 {
        (widget_height - self.top_padding - self.bottom_padding - self.bottom_skip).max(0.0)
    }

    /// Enforce the variant's minimum widget size
    pub fn clamp_size(&self, width: f32, height: f32) -> (f32, f32) {
        (width.max(self.min_width), height.max(self.min_height))
    }
}

/// Ellipsis suffix appended by label truncation
pub const ELLIPSIS: &str = "...";

/// Hard floor for the scrollbar thumb height so long lists stay grabbable
pub const MIN_THUMB_HEIGHT: f32 = 20.0;

//! The paint pass
//!
//! `draw` is a pure function of widget state and a [`Canvas`]; it holds no
//! state of its own and triggers no fetches. Paint order: top panel text
//! (header summary and selection preview), grid background, virtualized
//! chips, scrollbar track and thumb.

use crate::canvas::{Canvas, FontSlot, Rect};
use crate::catalog::ItemCatalog;
use crate::config::{BrowserConfig, BrowserKind, CellFlow, ELLIPSIS, MIN_THUMB_HEIGHT};
use crate::layout::GridLayout;
use crate::selection::{SelectionMode, SelectionModel};
use crate::theme::Theme;
use crate::thumbs::ThumbnailCache;

/// Everything one frame reads
pub struct Frame<'a> {
    pub config: &'a BrowserConfig,
    pub theme: &'a Theme,
    pub catalog: &'a ItemCatalog,
    pub selection: &'a SelectionModel,
    pub mode: SelectionMode,
    pub thumbs: &'a ThumbnailCache,
    pub scroll_offset: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit `prefix + text` into `max_width`, dropping trailing characters of
/// `text` and re-measuring with the ellipsis appended until it fits. A
/// string that already fits is returned unchanged.
fn fit_with_prefix<C: Canvas + ?Sized>(
    canvas: &C,
    slot: FontSlot,
    max_width: f32,
    prefix: &str,
    text: &str,
) -> String {
    let full = format!("{prefix}{text}");
    if canvas.measure_text(&full, slot) <= max_width {
        return full;
    }
    let mut kept = text.to_string();
    loop {
        let candidate = format!("{prefix}{kept}{ELLIPSIS}");
        if kept.is_empty() || canvas.measure_text(&candidate, slot) <= max_width {
            return candidate;
        }
        kept.pop();
    }
}

/// Width-measured truncation with an ellipsis suffix
pub fn truncate_to_width<C: Canvas + ?Sized>(
    canvas: &C,
    text: &str,
    slot: FontSlot,
    max_width: f32,
) -> String {
    fit_with_prefix(canvas, slot, max_width, "", text)
}

/// Column-header summary: the first two headers always, the third only when
/// exactly three exist, and for more than four a bare `...` line followed by
/// the last header. Four headers show only the first two lines. Each line is
/// numbered `N. name` and truncated independently.
pub fn summarize_headers<C: Canvas + ?Sized>(
    canvas: &C,
    headers: &[String],
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    if headers.is_empty() {
        return lines;
    }
    let numbered = |canvas: &C, n: usize, name: &str| {
        fit_with_prefix(canvas, FontSlot::Headers, max_width, &format!("{n}. "), name)
    };
    for (i, header) in headers.iter().take(2).enumerate() {
        lines.push(numbered(canvas, i + 1, header));
    }
    if headers.len() == 3 {
        lines.push(numbered(canvas, 3, &headers[2]));
    } else if headers.len() > 4 {
        lines.push(ELLIPSIS.to_string());
        lines.push(numbered(canvas, headers.len(), &headers[headers.len() - 1]));
    }
    lines
}

fn noun_phrase(kind: BrowserKind, count: usize) -> String {
    match kind {
        BrowserKind::Rows => "rows".to_string(),
        BrowserKind::Tags => "tags".to_string(),
        BrowserKind::Files if count == 1 => "prompt".to_string(),
        BrowserKind::Files => "prompts".to_string(),
    }
}

/// The one-line selection preview, before truncation.
///
/// Random mode reports the sampling-pool size (the selection when non-empty,
/// otherwise the whole catalog). Multiple mode reports a count for rows and
/// files but echoes the serialized values for tags; Single mode shows the
/// sole selected label (tags again echo the serialization).
pub fn preview_text(
    kind: BrowserKind,
    mode: SelectionMode,
    selection: &SelectionModel,
    catalog: &ItemCatalog,
) -> String {
    match mode {
        SelectionMode::Random => {
            let count = if selection.is_empty() {
                catalog.len()
            } else {
                selection.len()
            };
            format!("selecting from {count} {}", noun_phrase(kind, count))
        }
        SelectionMode::Multiple => match kind {
            BrowserKind::Tags => selection.serialize(kind, catalog),
            _ => format!(
                "{} {} selected",
                selection.len(),
                noun_phrase(kind, selection.len())
            ),
        },
        SelectionMode::Single => match kind {
            BrowserKind::Tags => selection.serialize(kind, catalog),
            _ => selection
                .sole()
                .and_then(|i| catalog.get(i))
                .map(|item| item.label().to_string())
                .unwrap_or_default(),
        },
    }
}

/// Thumb rect for a scrollbar track: `(thumb_y, thumb_height)`.
///
/// The thumb height is proportional to the visible share of the content with
/// a hard 20px floor; when nothing can scroll the thumb fills the track
/// instead of dividing by zero.
pub fn scrollbar_thumb(
    track_y: f32,
    track_height: f32,
    content_height: f32,
    offset: f32,
) -> (f32, f32) {
    let max_offset = (content_height - track_height).max(0.0);
    if max_offset <= 0.0 {
        return (track_y, track_height);
    }
    let thumb_height = (track_height * (track_height / content_height))
        .max(MIN_THUMB_HEIGHT)
        .min(track_height);
    let thumb_y = track_y + (offset / max_offset) * (track_height - thumb_height);
    (thumb_y, thumb_height)
}

pub fn draw<C: Canvas + ?Sized>(canvas: &mut C, frame: &Frame<'_>) {
    let cfg = frame.config;
    let theme = frame.theme;
    let viewport = cfg.viewport_height(frame.height);
    let layout = GridLayout::compute(cfg, frame.width, frame.catalog.len());

    // Top panel behind the header summary and preview line
    canvas.fill_rect(
        Rect::new(0.0, 0.0, frame.width, cfg.top_padding),
        theme.top_bar.to_argb_u32(),
    );
    // Grid area down to the bottom skip strip
    canvas.fill_rect(
        Rect::new(
            0.0,
            cfg.top_padding,
            frame.width,
            (frame.height - cfg.top_padding - cfg.bottom_skip).max(0.0),
        ),
        theme.background.to_argb_u32(),
    );

    if frame.config.kind == BrowserKind::Rows {
        let max_width = frame.width - cfg.preview_padding * 2.0 - 40.0;
        let lines = summarize_headers(canvas, frame.catalog.headers(), max_width);
        for (i, line) in lines.iter().take(4).enumerate() {
            canvas.draw_text(
                cfg.preview_padding,
                cfg.headers_skip + cfg.headers_line_height * i as f32,
                line,
                FontSlot::Headers,
                theme.headers.to_argb_u32(),
            );
        }
    }

    let preview = preview_text(cfg.kind, frame.mode, frame.selection, frame.catalog);
    let preview = truncate_to_width(
        canvas,
        &preview,
        FontSlot::Label,
        frame.width - cfg.preview_padding * 2.0,
    );
    canvas.draw_text(
        cfg.preview_padding,
        cfg.preview_skip,
        &preview,
        FontSlot::Label,
        theme.text.to_argb_u32(),
    );

    draw_grid(canvas, frame, &layout, viewport);

    // Scrollbar track and thumb
    let track = Rect::new(
        frame.width - cfg.scrollbar_width,
        cfg.top_padding,
        cfg.scrollbar_width,
        viewport,
    );
    canvas.fill_rounded_rect(track, track.width / 2.0, theme.scrollbar_track.to_argb_u32());
    let (thumb_y, thumb_height) = scrollbar_thumb(
        track.y,
        track.height,
        layout.content_height,
        frame.scroll_offset,
    );
    canvas.fill_rounded_rect(
        Rect::new(track.x, thumb_y, track.width, thumb_height),
        track.width / 2.0,
        theme.scrollbar_thumb.to_argb_u32(),
    );
}

fn draw_grid<C: Canvas + ?Sized>(
    canvas: &mut C,
    frame: &Frame<'_>,
    layout: &GridLayout,
    viewport: f32,
) {
    let cfg = frame.config;
    let theme = frame.theme;
    let clip = Rect::new(
        0.0,
        cfg.top_padding,
        frame.width - cfg.scrollbar_width,
        viewport,
    );
    canvas.push_clip(clip);

    let (start_row, end_row) = layout.visible_rows(frame.scroll_offset, viewport);
    for row in start_row..end_row {
        for col in 0..layout.columns {
            let index = row * layout.columns + col;
            if index >= frame.catalog.len() {
                break;
            }
            let Some(item) = frame.catalog.get(index) else {
                break;
            };
            let (cell_x, cell_y) = layout.cell_origin(cfg, row, col);
            let cell = Rect::new(
                cell_x,
                cfg.top_padding - frame.scroll_offset + cell_y,
                layout.cell_width,
                cfg.cell_height,
            );
            let selected = frame.selection.contains(index);
            let fill = if selected {
                theme.chip_selected
            } else {
                theme.chip
            };
            canvas.fill_rect(cell, fill.to_argb_u32());

            if let CellFlow::FixedSquares { .. } = cfg.flow {
                if let Some(img) = frame.thumbs.get(item.raw()) {
                    canvas.push_clip(cell);
                    canvas.draw_image(cell, &img.pixels, img.width, img.height);
                    canvas.pop_clip();
                }
                // Legibility gradient behind the label
                let grad_h = cell.height / 2.0;
                canvas.fill_vertical_gradient(
                    Rect::new(cell.x, cell.y + cell.height - grad_h, cell.width, grad_h),
                    0x0000_0000,
                    0xFF00_0000,
                );
            }

            let label = truncate_to_width(
                canvas,
                item.label(),
                FontSlot::Label,
                cell.width - cfg.text_padding * 2.0,
            );
            let baseline = match cfg.flow {
                CellFlow::FlexColumns { .. } => cell.y + cell.height / 2.0 + 4.0,
                CellFlow::FixedSquares { .. } => cell.y + cell.height - cfg.text_padding,
            };
            canvas.draw_text(
                cell.x + cfg.text_padding,
                baseline,
                &label,
                FontSlot::Label,
                theme.text.to_argb_u32(),
            );

            if selected {
                if let CellFlow::FixedSquares { .. } = cfg.flow {
                    canvas.stroke_rect(
                        Rect::new(
                            cell.x - 2.0,
                            cell.y - 2.0,
                            cell.width + 4.0,
                            cell.height + 4.0,
                        ),
                        3.0,
                        theme.chip_selected.to_argb_u32(),
                    );
                }
            }
        }
    }

    canvas.pop_clip();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSnapshot;
    use crate::client::ListingResponse;

    /// Measures 6px per character, draws nothing
    struct RulerCanvas;

    impl Canvas for RulerCanvas {
        fn fill_rect(&mut self, _: Rect, _: u32) {}
        fn fill_rounded_rect(&mut self, _: Rect, _: f32, _: u32) {}
        fn stroke_rect(&mut self, _: Rect, _: f32, _: u32) {}
        fn fill_vertical_gradient(&mut self, _: Rect, _: u32, _: u32) {}
        fn draw_text(&mut self, _: f32, _: f32, _: &str, _: FontSlot, _: u32) {}
        fn measure_text(&self, text: &str, _: FontSlot) -> f32 {
            text.chars().count() as f32 * 6.0
        }
        fn draw_image(&mut self, _: Rect, _: &[u8], _: u32, _: u32) {}
        fn push_clip(&mut self, _: Rect) {}
        fn pop_clip(&mut self) {}
    }

    fn catalog_of(kind: BrowserKind, listing: ListingResponse) -> ItemCatalog {
        let mut catalog = ItemCatalog::default();
        catalog.apply(CatalogSnapshot::from_listing(kind, listing).unwrap());
        catalog
    }

    #[test]
    fn truncation_fits_and_is_stable() {
        let canvas = RulerCanvas;
        // 10 chars fit exactly in 60px
        assert_eq!(
            truncate_to_width(&canvas, "exactlyten", FontSlot::Label, 60.0),
            "exactlyten"
        );
        let out = truncate_to_width(&canvas, "much too long to fit", FontSlot::Label, 60.0);
        assert!(out.ends_with(ELLIPSIS));
        assert!(canvas.measure_text(&out, FontSlot::Label) <= 60.0);
        // Stable under repetition
        let again = truncate_to_width(&canvas, "much too long to fit", FontSlot::Label, 60.0);
        assert_eq!(out, again);
    }

    #[test]
    fn truncation_of_unfittable_width_degenerates_to_ellipsis() {
        let canvas = RulerCanvas;
        assert_eq!(
            truncate_to_width(&canvas, "anything", FontSlot::Label, 1.0),
            ELLIPSIS
        );
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn header_summary_policy() {
        let canvas = RulerCanvas;
        let wide = 1000.0;

        assert!(summarize_headers(&canvas, &[], wide).is_empty());
        assert_eq!(
            summarize_headers(&canvas, &headers(&["a", "b"]), wide),
            vec!["1. a", "2. b"]
        );
        assert_eq!(
            summarize_headers(&canvas, &headers(&["a", "b", "c"]), wide),
            vec!["1. a", "2. b", "3. c"]
        );
        // Exactly four: only the first two lines
        assert_eq!(
            summarize_headers(&canvas, &headers(&["a", "b", "c", "d"]), wide),
            vec!["1. a", "2. b"]
        );
        // More than four: two, ellipsis, last (with its real ordinal)
        assert_eq!(
            summarize_headers(&canvas, &headers(&["a", "b", "c", "d", "e", "f"]), wide),
            vec!["1. a", "2. b", "...", "6. f"]
        );
    }

    #[test]
    fn header_lines_truncate_with_their_numbering() {
        let canvas = RulerCanvas;
        // "1. " costs 18px, leaving room for 4 chars + "..." at 60px
        let lines = summarize_headers(&canvas, &headers(&["a_very_long_header", "b"]), 60.0);
        assert_eq!(lines[0], "1. a_ve...");
        assert!(canvas.measure_text(&lines[0], FontSlot::Headers) <= 60.0);
    }

    #[test]
    fn preview_phrasing_per_mode() {
        let catalog = catalog_of(
            BrowserKind::Rows,
            ListingResponse {
                headers: Some(headers(&["name", "text"])),
                rows: Some(vec![
                    headers(&["alpha", "x"]),
                    headers(&["beta", "y"]),
                    headers(&["gamma", "z"]),
                ]),
                ..Default::default()
            },
        );
        let mut sel = SelectionModel::default();

        assert_eq!(
            preview_text(BrowserKind::Rows, SelectionMode::Random, &sel, &catalog),
            "selecting from 3 rows"
        );
        assert_eq!(
            preview_text(BrowserKind::Rows, SelectionMode::Multiple, &sel, &catalog),
            "0 rows selected"
        );
        assert_eq!(
            preview_text(BrowserKind::Rows, SelectionMode::Single, &sel, &catalog),
            ""
        );

        sel.toggle(SelectionMode::Single, 1);
        assert_eq!(
            preview_text(BrowserKind::Rows, SelectionMode::Single, &sel, &catalog),
            "beta"
        );
        // A non-empty selection becomes the sampling pool
        assert_eq!(
            preview_text(BrowserKind::Rows, SelectionMode::Random, &sel, &catalog),
            "selecting from 1 rows"
        );
    }

    #[test]
    fn files_preview_pluralizes() {
        let catalog = catalog_of(
            BrowserKind::Files,
            ListingResponse {
                files: Some(headers(&["one.txt", "two.txt"])),
                ..Default::default()
            },
        );
        let mut sel = SelectionModel::default();
        sel.toggle(SelectionMode::Multiple, 0);
        assert_eq!(
            preview_text(BrowserKind::Files, SelectionMode::Multiple, &sel, &catalog),
            "1 prompt selected"
        );
        sel.toggle(SelectionMode::Multiple, 1);
        assert_eq!(
            preview_text(BrowserKind::Files, SelectionMode::Multiple, &sel, &catalog),
            "2 prompts selected"
        );
        // Single mode shows the extensionless label
        let mut sole = SelectionModel::default();
        sole.toggle(SelectionMode::Single, 1);
        assert_eq!(
            preview_text(BrowserKind::Files, SelectionMode::Single, &sole, &catalog),
            "two"
        );
    }

    #[test]
    fn tags_preview_echoes_selection() {
        let catalog = catalog_of(
            BrowserKind::Tags,
            ListingResponse {
                tags: Some(headers(&["red", "green", "blue"])),
                ..Default::default()
            },
        );
        let mut sel = SelectionModel::default();
        sel.toggle(SelectionMode::Multiple, 2);
        sel.toggle(SelectionMode::Multiple, 0);
        assert_eq!(
            preview_text(BrowserKind::Tags, SelectionMode::Multiple, &sel, &catalog),
            "red, blue"
        );
        assert_eq!(
            preview_text(BrowserKind::Tags, SelectionMode::Random, &sel, &catalog),
            "selecting from 2 tags"
        );
    }

    #[test]
    fn thumb_height_bounds() {
        // Proportional when content overflows
        let (y, h) = scrollbar_thumb(190.0, 135.0, 270.0, 0.0);
        assert_eq!(h, 67.5);
        assert_eq!(y, 190.0);

        // Hard floor for very long content
        let (_, h) = scrollbar_thumb(190.0, 135.0, 100_000.0, 0.0);
        assert_eq!(h, MIN_THUMB_HEIGHT);

        // Full-height thumb when nothing can scroll
        let (y, h) = scrollbar_thumb(190.0, 135.0, 50.0, 0.0);
        assert_eq!((y, h), (190.0, 135.0));
    }

    #[test]
    fn thumb_reaches_track_bottom_at_max_offset() {
        let track_y = 190.0;
        let track_h = 135.0;
        let content = 270.0;
        let max_offset = content - track_h;
        let (y, h) = scrollbar_thumb(track_y, track_h, content, max_offset);
        assert!((y + h - (track_y + track_h)).abs() < 1e-4);
    }
}

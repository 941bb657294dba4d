//! The browser widget: owns all state and implements the host contract
//!
//! The host adapter owns the draw surface and the node's input fields; it
//! forwards pointer/resize events, field edits and the refresh action to the
//! named methods here, calls `poll` before each redraw to drain worker
//! results, and `draw` to paint. All state lives on the UI thread; the only
//! cross-thread traffic is the refresh event channel.

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::catalog::{CatalogSnapshot, ItemCatalog};
use crate::client::BackendClient;
use crate::config::{BrowserConfig, BrowserKind};
use crate::hit::{self, HitTarget};
use crate::layout::GridLayout;
use crate::refresh::{self, RefreshEvent, RefreshRequest, SourceRef};
use crate::render::{self, Frame};
use crate::scroll::ScrollController;
use crate::selection::{SelectionMode, SelectionModel};
use crate::theme::Theme;
use crate::thumbs::ThumbnailCache;

/// What the widget needs from its host node
pub trait Host {
    /// Write the serialized selection to the hidden output field
    fn set_selection_output(&mut self, value: &str);
    /// Request a redraw
    fn mark_dirty(&mut self);
}

pub struct BrowserWidget {
    config: BrowserConfig,
    theme: Theme,
    catalog: ItemCatalog,
    selection: SelectionModel,
    mode: SelectionMode,
    scroll: ScrollController,
    thumbs: ThumbnailCache,
    client: Option<BackendClient>,
    width: f32,
    height: f32,
    source_ref: String,
    /// Canonical path the current source resolved to; filter-only refreshes
    /// reuse it instead of re-resolving
    resolved_source: Option<String>,
    filter: String,
    /// Bumped on every refresh; events from older generations are dropped
    generation: u64,
    events_tx: Sender<RefreshEvent>,
    events_rx: Receiver<RefreshEvent>,
}

impl BrowserWidget {
    pub fn new(kind: BrowserKind, theme: Theme) -> Self {
        let config = BrowserConfig::for_kind(kind);
        let (events_tx, events_rx) = mpsc::channel();
        let (width, height) = (config.min_width, config.min_height);
        Self {
            config,
            theme,
            catalog: ItemCatalog::default(),
            selection: SelectionModel::default(),
            mode: SelectionMode::default(),
            scroll: ScrollController::default(),
            thumbs: ThumbnailCache::default(),
            client: None,
            width,
            height,
            source_ref: String::new(),
            resolved_source: None,
            filter: String::new(),
            generation: 0,
            events_tx,
            events_rx,
        }
    }

    /// Attach the backend client; without one, field edits update state but
    /// no refresh runs (hosts then feed data through [`apply_snapshot`]).
    ///
    /// [`apply_snapshot`]: Self::apply_snapshot
    pub fn with_client(mut self, client: BackendClient) -> Self {
        self.client = Some(client);
        self
    }

    pub fn kind(&self) -> BrowserKind {
        self.config.kind
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    fn layout(&self) -> GridLayout {
        GridLayout::compute(&self.config, self.width, self.catalog.len())
    }

    fn viewport_height(&self) -> f32 {
        self.config.viewport_height(self.height)
    }

    fn publish_selection(&self, host: &mut dyn Host) {
        let serialized = self.selection.serialize(self.config.kind, &self.catalog);
        host.set_selection_output(&serialized);
        host.mark_dirty();
    }

    fn clear_selection(&mut self, host: &mut dyn Host) {
        self.selection.clear();
        self.publish_selection(host);
    }

    fn start_refresh(&mut self, source: SourceRef) {
        self.generation += 1;
        let Some(client) = &self.client else {
            debug!(generation = self.generation, "no backend client attached, refresh skipped");
            return;
        };
        refresh::spawn(
            client.clone(),
            RefreshRequest {
                generation: self.generation,
                kind: self.config.kind,
                source,
                filter: self.filter.clone(),
            },
            self.events_tx.clone(),
        );
    }

    /// Replace the catalog wholesale. Selection indices are only valid
    /// against one snapshot, so the selection clears alongside; scroll is
    /// clamped, not reset. Thumbnails rebuild from scratch.
    pub fn apply_snapshot(&mut self, snapshot: CatalogSnapshot, host: &mut dyn Host) {
        self.catalog.apply(snapshot);
        self.thumbs.clear();
        self.clear_selection(host);
        let content = self.layout().content_height;
        self.scroll.clamp(content, self.viewport_height());
        host.mark_dirty();
    }

    /// Drain worker events. Call once per host event-loop turn, before
    /// drawing.
    pub fn poll(&mut self, host: &mut dyn Host) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                RefreshEvent::Catalog {
                    generation,
                    resolved_path,
                    snapshot,
                } => {
                    if generation != self.generation {
                        debug!(
                            generation,
                            current = self.generation,
                            "dropping superseded listing"
                        );
                        continue;
                    }
                    self.resolved_source = Some(resolved_path);
                    self.apply_snapshot(snapshot, host);
                }
                RefreshEvent::Thumbnail {
                    generation,
                    file,
                    bytes,
                } => {
                    if generation != self.generation {
                        debug!(generation, current = self.generation, "dropping superseded thumbnail");
                        continue;
                    }
                    if self.thumbs.insert_encoded(&file, &bytes) {
                        host.mark_dirty();
                    }
                }
            }
        }
    }

    /// Paint the widget onto the host surface
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        render::draw(
            canvas,
            &Frame {
                config: &self.config,
                theme: &self.theme,
                catalog: &self.catalog,
                selection: &self.selection,
                mode: self.mode,
                thumbs: &self.thumbs,
                scroll_offset: self.scroll.offset(),
                width: self.width,
                height: self.height,
            },
        );
    }

    /// Pointer-down in widget-local coordinates. Returns true when handled.
    pub fn on_pointer_down(&mut self, x: f32, y: f32, host: &mut dyn Host) -> bool {
        let layout = self.layout();
        let target = hit::hit_test(
            &self.config,
            &layout,
            self.width,
            self.height,
            self.scroll.offset(),
            self.catalog.len(),
            x,
            y,
        );
        match target {
            Some(HitTarget::Chip(index)) => {
                self.selection.toggle(self.mode, index);
                self.publish_selection(host);
                true
            }
            Some(HitTarget::ScrollbarTrack) => {
                self.scroll.begin_drag(y);
                true
            }
            None => false,
        }
    }

    /// Pointer-move; only meaningful during a thumb drag
    pub fn on_pointer_move(&mut self, _x: f32, y: f32, host: &mut dyn Host) -> bool {
        if !self.scroll.is_dragging() {
            return false;
        }
        let content = self.layout().content_height;
        if self.scroll.drag_to(y, content, self.viewport_height()) {
            host.mark_dirty();
        }
        true
    }

    /// Pointer-up always ends any drag, regardless of where it happens
    pub fn on_pointer_up(&mut self) {
        self.scroll.end_drag();
    }

    /// Resize to the host-requested size, enforcing the variant minimum.
    /// Returns the accepted size for the host to write back to the node.
    pub fn on_resize(&mut self, width: f32, height: f32, host: &mut dyn Host) -> (f32, f32) {
        let (width, height) = self.config.clamp_size(width, height);
        self.width = width;
        self.height = height;
        let content = self.layout().content_height;
        self.scroll.clamp(content, self.viewport_height());
        host.mark_dirty();
        (width, height)
    }

    /// The source-reference field changed: clear the selection and refresh,
    /// re-resolving the reference.
    pub fn set_source(&mut self, value: &str, host: &mut dyn Host) {
        self.source_ref = value.to_string();
        self.resolved_source = None;
        self.clear_selection(host);
        self.start_refresh(SourceRef::Logical(self.source_ref.clone()));
    }

    /// The filter field changed: refresh with the new filter. The selection
    /// is not cleared here; the catalog replacement clears it on arrival.
    pub fn set_filter(&mut self, value: &str, host: &mut dyn Host) {
        self.filter = value.to_string();
        let source = match &self.resolved_source {
            Some(path) => SourceRef::Resolved(path.clone()),
            None => SourceRef::Logical(self.source_ref.clone()),
        };
        self.start_refresh(source);
        host.mark_dirty();
    }

    /// The mode field changed: switching policy invalidates the selection
    pub fn set_mode(&mut self, value: &str, host: &mut dyn Host) {
        match SelectionMode::parse(value) {
            Some(mode) => {
                self.mode = mode;
                self.clear_selection(host);
            }
            None => warn!(value, "unknown selection mode"),
        }
    }

    /// The explicit "Refresh / Clear" action
    pub fn refresh_clear(&mut self, host: &mut dyn Host) {
        self.clear_selection(host);
        self.start_refresh(SourceRef::Logical(self.source_ref.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ListingResponse;

    #[derive(Default)]
    struct RecordingHost {
        output: Option<String>,
        dirty: usize,
    }

    impl Host for RecordingHost {
        fn set_selection_output(&mut self, value: &str) {
            self.output = Some(value.to_string());
        }
        fn mark_dirty(&mut self) {
            self.dirty += 1;
        }
    }

    fn tag_snapshot(tags: &[&str]) -> CatalogSnapshot {
        CatalogSnapshot::from_listing(
            BrowserKind::Tags,
            ListingResponse {
                tags: Some(tags.iter().map(|s| s.to_string()).collect()),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn widget_with(tags: &[&str]) -> (BrowserWidget, RecordingHost) {
        let mut widget = BrowserWidget::new(BrowserKind::Tags, Theme::default());
        let mut host = RecordingHost::default();
        widget.apply_snapshot(tag_snapshot(tags), &mut host);
        (widget, host)
    }

    #[test]
    fn new_widget_starts_at_minimum_size() {
        let widget = BrowserWidget::new(BrowserKind::Files, Theme::default());
        assert_eq!(widget.size(), (390.0, 390.0));
        assert_eq!(widget.mode(), SelectionMode::Single);
    }

    #[test]
    fn resize_enforces_minimum_and_clamps_scroll() {
        let (mut widget, mut host) = widget_with(&["a"; 40]);
        // Drag far down first
        widget.on_pointer_down(305.0, 250.0, &mut host);
        widget.on_pointer_move(305.0, 5000.0, &mut host);
        widget.on_pointer_up();
        let before = widget.scroll_offset();
        assert!(before > 0.0);

        // Growing the widget shrinks max offset; offset clamps, not resets
        let accepted = widget.on_resize(100.0, 2000.0, &mut host);
        assert_eq!(accepted, (310.0, 2000.0));
        assert_eq!(widget.scroll_offset(), 0.0);
    }

    #[test]
    fn snapshot_replacement_clears_selection_and_output() {
        let (mut widget, mut host) = widget_with(&["a", "b", "c", "d"]);
        // Click the first chip: y just below the grid top
        assert!(widget.on_pointer_down(30.0, 200.0, &mut host));
        assert_eq!(host.output.as_deref(), Some("a"));

        widget.apply_snapshot(tag_snapshot(&["x", "y"]), &mut host);
        assert_eq!(host.output.as_deref(), Some(""));
        assert!(widget.selection().is_empty());
        assert_eq!(widget.catalog().len(), 2);
    }

    #[test]
    fn mode_change_clears_selection() {
        let (mut widget, mut host) = widget_with(&["a", "b"]);
        widget.on_pointer_down(30.0, 200.0, &mut host);
        assert!(!widget.selection().is_empty());

        widget.set_mode("multiple", &mut host);
        assert!(widget.selection().is_empty());
        assert_eq!(host.output.as_deref(), Some(""));
        assert_eq!(widget.mode(), SelectionMode::Multiple);

        // Unknown value leaves the mode untouched
        widget.set_mode("bogus", &mut host);
        assert_eq!(widget.mode(), SelectionMode::Multiple);
    }

    #[test]
    fn click_outside_grid_is_unhandled() {
        let (mut widget, mut host) = widget_with(&["a", "b"]);
        assert!(!widget.on_pointer_down(30.0, 50.0, &mut host));
        assert!(!widget.on_pointer_move(30.0, 60.0, &mut host));
    }

    #[test]
    fn drag_owns_pointer_until_release() {
        let (mut widget, mut host) = widget_with(&["a"; 40]);
        assert!(widget.on_pointer_down(305.0, 250.0, &mut host));
        assert!(widget.on_pointer_move(10.0, 260.0, &mut host), "x is irrelevant mid-drag");
        assert!(widget.scroll_offset() > 0.0);
        widget.on_pointer_up();
        assert!(!widget.on_pointer_move(10.0, 300.0, &mut host));
    }

    #[test]
    fn stale_generation_events_are_dropped() {
        let (mut widget, mut host) = widget_with(&["old"]);
        // Two refreshes issued back to back; only the later generation counts
        widget.set_filter("a", &mut host); // generation 1 (no client: no worker)
        widget.set_filter("ab", &mut host); // generation 2

        widget
            .events_tx
            .clone()
            .send(RefreshEvent::Catalog {
                generation: 1,
                resolved_path: "/data/tags.txt".into(),
                snapshot: tag_snapshot(&["stale"]),
            })
            .unwrap();
        widget
            .events_tx
            .clone()
            .send(RefreshEvent::Catalog {
                generation: 2,
                resolved_path: "/data/tags.txt".into(),
                snapshot: tag_snapshot(&["fresh-1", "fresh-2"]),
            })
            .unwrap();

        widget.poll(&mut host);
        assert_eq!(widget.catalog().len(), 2);
        assert_eq!(widget.catalog().get(0).unwrap().label(), "fresh-1");
    }
}

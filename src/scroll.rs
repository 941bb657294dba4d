//! Scroll state and the scrollbar-thumb drag gesture
//!
//! The offset is clamped to `[0, max_offset]` after every mutation; resizes
//! clamp but never reset it. Dragging scales pointer movement by the ratio
//! of content height to viewport height, so one pixel of thumb travel moves
//! the content proportionally further.

/// Active thumb drag; exists only between pointer-down on the track and
/// pointer-up
#[derive(Debug, Clone, Copy)]
struct DragState {
    anchor_pointer_y: f32,
    anchor_offset: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollController {
    offset: f32,
    drag: Option<DragState>,
}

impl ScrollController {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn max_offset(content_height: f32, viewport_height: f32) -> f32 {
        (content_height - viewport_height).max(0.0)
    }

    /// Re-clamp after a content or viewport change
    pub fn clamp(&mut self, content_height: f32, viewport_height: f32) {
        let max = Self::max_offset(content_height, viewport_height);
        self.offset = self.offset.clamp(0.0, max);
    }

    /// Begin a thumb drag at the given pointer y
    pub fn begin_drag(&mut self, pointer_y: f32) {
        self.drag = Some(DragState {
            anchor_pointer_y: pointer_y,
            anchor_offset: self.offset,
        });
    }

    /// Advance an active drag. Returns true when the offset changed.
    pub fn drag_to(&mut self, pointer_y: f32, content_height: f32, viewport_height: f32) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        if viewport_height <= 0.0 {
            return false;
        }
        let max = Self::max_offset(content_height, viewport_height);
        let delta = (pointer_y - drag.anchor_pointer_y) * (content_height / viewport_height);
        let next = (drag.anchor_offset + delta).clamp(0.0, max);
        let changed = next != self.offset;
        self.offset = next;
        changed
    }

    /// End the drag gesture (idempotent; safe on any pointer-up)
    pub fn end_drag(&mut self) {
        self.drag = None;
    }
}

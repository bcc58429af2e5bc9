//! Line-based virtual scroll.
//!
//! The scroll unit is one wrapped line. The offset is the index of the first
//! visible line and always stays in `0..=max_offset()` once clamped.
//! Vertical drags accumulate pixels and convert whole line heights into
//! steps, keeping the remainder for the next sample.

use core::ops::Range;

use crate::geometry::px;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    last_y: i32,
    residue: i32,
}

/// Scroll position over a list of logical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    line_height: u32,
    offset: usize,
    total_lines: usize,
    top: i32,
    bottom: i32,
    drag: Option<Drag>,
}

impl ScrollState {
    /// Empty list with an empty viewport.
    pub fn new(line_height: u32) -> Self {
        Self {
            line_height,
            offset: 0,
            total_lines: 0,
            top: 0,
            bottom: 0,
            drag: None,
        }
    }

    /// Index of the first visible line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of logical lines.
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Whole lines that fit between the viewport edges.
    pub fn visible_lines(&self) -> usize {
        let height = self.bottom.saturating_sub(self.top).max(0);
        match px(self.line_height) {
            0 => 0,
            line => height
                .checked_div(line)
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(0),
        }
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_lines())
    }

    /// Replace the line count; the offset is not clamped.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
    }

    /// Set the y range text rows are drawn in (`bottom` exclusive).
    pub fn set_viewport(&mut self, top: i32, bottom: i32) {
        self.top = top;
        self.bottom = bottom;
    }

    /// Pull the offset back into range.
    pub fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// Line indices to draw.
    pub fn window(&self) -> Range<usize> {
        let end = self
            .offset
            .saturating_add(self.visible_lines())
            .min(self.total_lines);
        self.offset.min(end)..end
    }

    /// Show the newest lines.
    pub fn snap_to_bottom(&mut self) {
        self.offset = usize::MAX;
        self.clamp();
    }

    /// Move by `steps` lines (positive = towards newer lines).
    ///
    /// Returns whether the offset changed.
    pub fn scroll_by(&mut self, steps: i32) -> bool {
        let before = self.offset;
        let magnitude = usize::try_from(steps.unsigned_abs()).unwrap_or(usize::MAX);
        self.offset = if steps >= 0 {
            self.offset.saturating_add(magnitude)
        } else {
            self.offset.saturating_sub(magnitude)
        };
        self.clamp();
        self.offset != before
    }

    /// Anchor a drag at `y`, dropping any previous residue.
    pub fn begin_drag(&mut self, y: i32) {
        self.drag = Some(Drag {
            last_y: y,
            residue: 0,
        });
    }

    /// Feed a drag sample.
    ///
    /// The first sample only anchors. Dragging the finger down by one line
    /// height reveals one older line. Returns whether the offset changed.
    pub fn drag_to(&mut self, y: i32) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            self.begin_drag(y);
            return false;
        };
        drag.residue = drag.residue.saturating_add(y.saturating_sub(drag.last_y));
        drag.last_y = y;

        let line = px(self.line_height);
        if line == 0 || drag.residue.abs() < line {
            return false;
        }
        let steps = drag.residue.checked_div(line).unwrap_or(0);
        drag.residue = drag.residue.checked_rem(line).unwrap_or(0);
        let moved = self.scroll_by(steps.saturating_neg());
        if moved {
            tracing::debug!(steps, offset = self.offset, "history scrolled");
        }
        moved
    }

    /// Finish the drag.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// A drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pixels accumulated towards the next step.
    pub fn residue(&self) -> i32 {
        self.drag.map_or(0, |d| d.residue)
    }
}

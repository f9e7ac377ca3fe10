//! Virtualized window over the current row sequence.
//!
//! Only rows inside the window are ever materialized. The rest of the
//! scrollable extent is represented by two spacers so the total height stays
//! `N * row_height` and the scrollbar behaves as if every row existed.

use crate::constants::{OVERSCAN_ROWS, ROW_HEIGHT, VIEWPORT_HEIGHT};
use serde::Serialize;
use std::ops::Range;

/// Index range to materialize plus the spacer extents around it
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ViewWindow {
    pub start: usize,
    pub end: usize,
    /// Height of the spacer before the first materialized row
    pub before_px: f64,
    /// Height of the spacer after the last materialized row
    pub after_px: f64,
}

impl ViewWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Compute the window for `total_rows` rows of height `row_height`, a
/// viewport of `viewport_height` scrolled to `scroll_offset`, with
/// `overscan` extra rows on each side.
///
/// `start = floor(S/H) - K` and `end = ceil((S+V)/H) + K`, clamped to the
/// row count. O(1) in the number of rows.
pub fn compute_window(
    total_rows: usize,
    row_height: f64,
    viewport_height: f64,
    scroll_offset: f64,
    overscan: usize,
) -> ViewWindow {
    if total_rows == 0 || !(row_height > 0.0) {
        return ViewWindow {
            start: 0,
            end: 0,
            before_px: 0.0,
            after_px: 0.0,
        };
    }

    let scroll = if scroll_offset.is_finite() {
        scroll_offset.max(0.0)
    } else {
        0.0
    };
    let viewport = if viewport_height.is_finite() {
        viewport_height.max(0.0)
    } else {
        0.0
    };

    let first_visible = (scroll / row_height).floor() as usize;
    let last_visible = ((scroll + viewport) / row_height).ceil() as usize;

    let end = last_visible.saturating_add(overscan).min(total_rows);
    let start = first_visible.saturating_sub(overscan).min(end);

    ViewWindow {
        start,
        end,
        before_px: start as f64 * row_height,
        after_px: (total_rows - end) as f64 * row_height,
    }
}

/// Scroll position and viewport geometry of the table body
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualScrollState {
    /// Current scroll offset (Y) in pixels
    scroll_y: f64,
    /// Visible height of the table container
    viewport_height: f64,
    /// Estimated height of one row
    row_height: f64,
    /// Rows materialized above and below the viewport
    overscan: usize,
}

impl Default for VirtualScrollState {
    fn default() -> Self {
        Self::new(VIEWPORT_HEIGHT, ROW_HEIGHT, OVERSCAN_ROWS)
    }
}

impl VirtualScrollState {
    pub fn new(viewport_height: f64, row_height: f64, overscan: usize) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height: viewport_height.max(0.0),
            row_height,
            overscan,
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Update visible height (e.g., when table is resized)
    pub fn set_viewport_height(&mut self, height: f64, total_rows: usize) {
        self.viewport_height = height.max(0.0);
        self.clamp(total_rows);
    }

    /// Update scroll position, clamping to valid range
    pub fn scroll_to(&mut self, y: f64, total_rows: usize) {
        let y = if y.is_finite() { y } else { 0.0 };
        self.scroll_y = y.clamp(0.0, self.max_scroll(total_rows));
    }

    /// Scroll by a delta amount
    pub fn scroll_by(&mut self, delta_y: f64, total_rows: usize) {
        self.scroll_to(self.scroll_y + delta_y, total_rows);
    }

    /// Re-clamp after the row count changed
    pub fn clamp(&mut self, total_rows: usize) {
        self.scroll_to(self.scroll_y, total_rows);
    }

    fn max_scroll(&self, total_rows: usize) -> f64 {
        (self.total_content_height(total_rows) - self.viewport_height).max(0.0)
    }

    /// Window to materialize at the current scroll position
    pub fn window(&self, total_rows: usize) -> ViewWindow {
        compute_window(
            total_rows,
            self.row_height,
            self.viewport_height,
            self.scroll_y,
            self.overscan,
        )
    }

    /// Calculate total content height for scrollbar
    pub fn total_content_height(&self, total_rows: usize) -> f64 {
        total_rows as f64 * self.row_height
    }

    /// Calculate scrollbar thumb position (0.0 to 1.0)
    pub fn scrollbar_position(&self, total_rows: usize) -> f64 {
        let total_height = self.total_content_height(total_rows);
        if total_height <= self.viewport_height {
            return 0.0;
        }
        self.scroll_y / (total_height - self.viewport_height)
    }
}

//! Pagination over the derived result.

use crate::constants::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use std::ops::Range;
use tracing::warn;

/// Page position over a result of `total_rows` rows.
///
/// `page_index` always lies in `0..page_count()`; every mutation clamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationState {
    /// Current page (0-indexed)
    page_index: usize,
    /// Rows per page
    page_size: usize,
    /// Number of rows being paged
    total_rows: usize,
    /// Accepted page sizes
    size_options: Vec<usize>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS.to_vec())
    }
}

impl PaginationState {
    pub fn new(page_size: usize, size_options: Vec<usize>) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            total_rows: 0,
            size_options,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn size_options(&self) -> &[usize] {
        &self.size_options
    }

    /// Number of pages, at least 1 so an empty result still shows "page 1 of 1"
    pub fn page_count(&self) -> usize {
        if self.total_rows == 0 {
            1
        } else {
            self.total_rows.div_ceil(self.page_size)
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.page_index < self.page_count().saturating_sub(1)
    }

    pub fn go_first(&mut self) {
        self.page_index = 0;
    }

    pub fn go_prev(&mut self) {
        if self.can_go_prev() {
            self.page_index -= 1;
        }
    }

    pub fn go_next(&mut self) {
        if self.can_go_next() {
            self.page_index += 1;
        }
    }

    pub fn go_last(&mut self) {
        self.page_index = self.page_count().saturating_sub(1);
    }

    /// Jump to a page, clamped into range
    pub fn set_page_index(&mut self, index: usize) {
        self.page_index = index.min(self.page_count().saturating_sub(1));
    }

    /// Update the row count being paged and clamp the page index.
    pub fn set_total_rows(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        self.clamp();
    }

    /// Change rows per page, keeping the previously first row on screen.
    ///
    /// The new page is the one containing the row that used to open the
    /// current page. Sizes outside the configured options are rejected.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !self.size_options.contains(&size) {
            warn!(
                "Rejected page size {} (allowed: {:?})",
                size, self.size_options
            );
            return false;
        }
        let first_row = self.page_index * self.page_size;
        self.page_size = size;
        self.page_index = first_row / size;
        self.clamp();
        true
    }

    fn clamp(&mut self) {
        let last = self.page_count().saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
        }
    }

    /// Get the range of rows to display for current page
    pub fn visible_range(&self) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(self.total_rows);
        let end = (start + self.page_size).min(self.total_rows);
        start..end
    }
}

/// Slice one page out of `rows`. Returns the page and the total row count.
pub fn slice<'r, T>(rows: &'r [T], state: &PaginationState) -> (&'r [T], usize) {
    let start = (state.page_index() * state.page_size()).min(rows.len());
    let end = (start + state.page_size()).min(rows.len());
    (&rows[start..end], rows.len())
}

//! Page navigation, page size and row source.

use super::{RowSource, TableController};
use crate::engine::PaginationState;
use crate::layout::KeyValueStore;

impl<S: KeyValueStore> TableController<S> {
    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.pagination.set_page_index(index);
        self.after_page_change();
    }

    pub fn first_page(&mut self) {
        self.pagination.go_first();
        self.after_page_change();
    }

    pub fn prev_page(&mut self) {
        self.pagination.go_prev();
        self.after_page_change();
    }

    pub fn next_page(&mut self) {
        self.pagination.go_next();
        self.after_page_change();
    }

    pub fn last_page(&mut self) {
        self.pagination.go_last();
        self.after_page_change();
    }

    /// Change rows per page. Sizes outside the configured options are
    /// rejected and leave the view unchanged.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if size == self.pagination.page_size() {
            return true;
        }
        let accepted = self.pagination.set_page_size(size);
        if accepted {
            self.after_page_change();
        }
        accepted
    }

    pub fn row_source(&self) -> RowSource {
        self.row_source
    }

    /// Choose whether the window runs over the current page or the whole
    /// result.
    pub fn set_row_source(&mut self, source: RowSource) {
        if self.row_source != source {
            self.row_source = source;
            self.after_page_change();
        }
    }

    fn after_page_change(&mut self) {
        self.scroll.scroll_to(0.0, self.current_rows().len());
    }
}

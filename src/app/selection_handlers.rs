//! Row selection handlers.
//!
//! Select-all is scoped to the rows on screen: the current page, or in
//! full-result mode the materialized window. Export and delete act on the
//! whole selection, which may span many pages and include rows the current
//! filters hide.

use super::{RowSource, TableController};
use crate::data::{Record, RowId};
use crate::engine::{PageSelectionState, Selection};
use crate::layout::KeyValueStore;
use tracing::debug;

impl<S: KeyValueStore> TableController<S> {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selection.is_selected(id)
    }

    /// Toggle one row. Ids not in the dataset are ignored.
    pub fn toggle_row(&mut self, id: RowId) {
        if !self.dataset.contains(id) {
            debug!("Ignoring selection toggle for missing row {:?}", id);
            return;
        }
        self.selection.toggle(id);
    }

    /// Rows select-all acts on. Never rows the renderer was not handed.
    pub fn select_all_scope(&self) -> &[RowId] {
        match self.row_source {
            RowSource::Page => self.page_row_ids(),
            RowSource::FullResult => &self.current_rows()[self.view_window().range()],
        }
    }

    /// Select every row in [`Self::select_all_scope`], or deselect them if
    /// all are already selected.
    pub fn toggle_page_selection(&mut self) {
        let scope = self.select_all_scope().to_vec();
        self.selection.toggle_page(&scope);
    }

    /// Header checkbox state for [`Self::select_all_scope`]
    pub fn page_selection_state(&self) -> PageSelectionState {
        self.selection.page_state(self.select_all_scope())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected rows that still exist
    pub fn selected_count(&self) -> usize {
        self.selection.count(&self.dataset)
    }

    /// Selected records in dataset order
    pub fn selected_records(&self) -> Vec<&Record> {
        self.selection.selected_rows(&self.dataset)
    }
}

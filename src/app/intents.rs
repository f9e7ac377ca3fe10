//! User intents emitted by the rendering surface.
//!
//! Every click, drag, keystroke and scroll maps to exactly one variant, and
//! every variant to exactly one controller operation.

use super::{DeleteRequest, ExportFile, RowSource, TableController};
use crate::data::{ColumnId, DataResult, RowId};
use crate::engine::{FilterValue, SortSpec};
use crate::layout::KeyValueStore;
use std::time::Instant;

#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    // Query
    ToggleSort(ColumnId),
    SetSort(SortSpec),
    SetFilter(ColumnId, FilterValue),
    ClearFilter(ColumnId),
    ClearFilters,
    SearchInput(String),
    SubmitSearch,

    // Pagination
    SetPageIndex(usize),
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    SetPageSize(usize),
    SetRowSource(RowSource),

    // Selection
    ToggleRow(RowId),
    TogglePageSelection,
    ClearSelection,

    // Layout
    SetColumnVisibility(ColumnId, bool),
    ShowAllColumns,
    HideAllColumns,
    ReorderColumn { dragged: ColumnId, target: ColumnId },
    ResizeColumn(ColumnId, u32),
    ResetLayout,

    // Window
    Scroll(f64),
    ResizeViewport(f64),

    // Bulk actions
    ExportResult,
    ExportSelected,
    RequestDeleteSelected,
    ConfirmDelete(DeleteRequest),
}

/// What a dispatched intent produced beyond updating view state
#[derive(Clone, Debug, PartialEq)]
pub enum IntentOutcome {
    Applied,
    /// The intent was valid but had no effect (e.g. hiding a pinned column)
    Ignored,
    Export(ExportFile),
    /// Ask the user to confirm deleting `count()` rows
    ConfirmDelete(DeleteRequest),
    Deleted(usize),
}

impl IntentOutcome {
    fn from_flag(applied: bool) -> Self {
        if applied {
            IntentOutcome::Applied
        } else {
            IntentOutcome::Ignored
        }
    }
}

impl<S: KeyValueStore> TableController<S> {
    /// Apply one user intent at time `now`.
    ///
    /// Only exports can fail; every other intent degrades to a no-op on
    /// invalid input.
    pub fn dispatch(&mut self, intent: Intent, now: Instant) -> DataResult<IntentOutcome> {
        let outcome = match intent {
            Intent::ToggleSort(column) => {
                self.toggle_sort(column);
                IntentOutcome::Applied
            }
            Intent::SetSort(spec) => {
                self.set_sort(spec);
                IntentOutcome::Applied
            }
            Intent::SetFilter(column, value) => {
                IntentOutcome::from_flag(self.set_filter(column, value))
            }
            Intent::ClearFilter(column) => {
                self.clear_filter(column);
                IntentOutcome::Applied
            }
            Intent::ClearFilters => {
                self.clear_filters();
                IntentOutcome::Applied
            }
            Intent::SearchInput(term) => {
                self.set_search_input(term, now);
                IntentOutcome::Applied
            }
            Intent::SubmitSearch => IntentOutcome::from_flag(self.flush_search()),
            Intent::SetPageIndex(index) => {
                self.set_page_index(index);
                IntentOutcome::Applied
            }
            Intent::FirstPage => {
                self.first_page();
                IntentOutcome::Applied
            }
            Intent::PrevPage => {
                self.prev_page();
                IntentOutcome::Applied
            }
            Intent::NextPage => {
                self.next_page();
                IntentOutcome::Applied
            }
            Intent::LastPage => {
                self.last_page();
                IntentOutcome::Applied
            }
            Intent::SetPageSize(size) => IntentOutcome::from_flag(self.set_page_size(size)),
            Intent::SetRowSource(source) => {
                self.set_row_source(source);
                IntentOutcome::Applied
            }
            Intent::ToggleRow(id) => {
                self.toggle_row(id);
                IntentOutcome::Applied
            }
            Intent::TogglePageSelection => {
                self.toggle_page_selection();
                IntentOutcome::Applied
            }
            Intent::ClearSelection => {
                self.clear_selection();
                IntentOutcome::Applied
            }
            Intent::SetColumnVisibility(column, visible) => {
                IntentOutcome::from_flag(self.set_column_visibility(column, visible))
            }
            Intent::ShowAllColumns => {
                self.show_all_columns();
                IntentOutcome::Applied
            }
            Intent::HideAllColumns => {
                self.hide_all_columns();
                IntentOutcome::Applied
            }
            Intent::ReorderColumn { dragged, target } => {
                IntentOutcome::from_flag(self.reorder_column(dragged, target))
            }
            Intent::ResizeColumn(column, px) => {
                IntentOutcome::from_flag(self.resize_column(column, px).is_some())
            }
            Intent::ResetLayout => {
                self.reset_layout();
                IntentOutcome::Applied
            }
            Intent::Scroll(y) => {
                self.scroll_to(y);
                IntentOutcome::Applied
            }
            Intent::ResizeViewport(height) => {
                self.set_viewport_height(height);
                IntentOutcome::Applied
            }
            Intent::ExportResult => IntentOutcome::Export(self.export_result_csv()?),
            Intent::ExportSelected => IntentOutcome::Export(self.export_selected_csv()?),
            Intent::RequestDeleteSelected => match self.request_delete_selected() {
                Some(request) => IntentOutcome::ConfirmDelete(request),
                None => IntentOutcome::Ignored,
            },
            Intent::ConfirmDelete(request) => IntentOutcome::Deleted(self.confirm_delete(request)),
        };
        Ok(outcome)
    }
}

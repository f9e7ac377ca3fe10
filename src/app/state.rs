//! Controller state - the TableController struct definition and its
//! supporting types.

use crate::config::ViewConfig;
use crate::data::{Dataset, PendingLoad, RowId};
use crate::engine::{Debouncer, FilterSpec, PaginationState, Selection, SortSpec, VirtualScrollState};
use crate::layout::ColumnLayoutManager;
use crate::perf::PipelineMonitor;
use std::collections::BTreeSet;

/// Which sequence the virtual window runs over
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowSource {
    /// The current page of the derived result
    #[default]
    Page,
    /// The whole derived result
    FullResult,
}

/// A pending delete awaiting confirmation.
///
/// Only [`super::TableController::request_delete_selected`] can create one,
/// so rows cannot be deleted without going through the confirmation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteRequest {
    pub(super) ids: BTreeSet<RowId>,
    pub(super) generation: u64,
}

impl DeleteRequest {
    /// Number of rows that will be deleted, for the confirmation prompt
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &BTreeSet<RowId> {
        &self.ids
    }
}

/// The single owner of all view state.
///
/// Every user intent maps to exactly one method; each method leaves the
/// derived result consistent before returning.
pub struct TableController<S> {
    pub(super) config: ViewConfig,
    pub(super) dataset: Dataset,

    // Query state
    pub(super) filters: FilterSpec,
    /// Raw search box text, ahead of the applied term while debouncing
    pub(super) search_input: String,
    pub(super) search_debounce: Debouncer<String>,
    pub(super) sort: SortSpec,

    // View state
    pub(super) pagination: PaginationState,
    pub(super) selection: Selection,
    pub(super) layout: ColumnLayoutManager<S>,
    pub(super) scroll: VirtualScrollState,
    pub(super) row_source: RowSource,

    /// Filtered and sorted row ids
    pub(super) result: Vec<RowId>,

    // Loading
    pub(super) pending_load: Option<PendingLoad>,
    pub(super) last_error: Option<String>,

    pub(super) stats: PipelineMonitor,
}

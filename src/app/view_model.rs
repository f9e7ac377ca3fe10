//! What the rendering surface consumes: the virtual window, materialized
//! rows, header metadata and the footer summary.

use super::{RowSource, TableController};
use crate::columns::FilterKind;
use crate::data::{ColumnId, Record, RowId};
use crate::engine::{FilterValue, SortDirection, ViewWindow, pagination};
use crate::format::format_position;
use crate::layout::KeyValueStore;
use crate::perf::RenderMetrics;
use serde::Serialize;

/// One row handed to the renderer
#[derive(Clone, Copy, Debug)]
pub struct MaterializedRow<'a> {
    pub id: RowId,
    pub record: &'a Record,
    pub selected: bool,
}

/// Header metadata for one visible column
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeaderCell {
    pub column: ColumnId,
    pub title: &'static str,
    pub width: u32,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
    pub filter_kind: Option<FilterKind>,
    /// Active filter value, if any
    pub filter: Option<FilterValue>,
}

/// Footer and toolbar summary
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewSummary {
    /// Rows matching filters and search
    pub result_count: usize,
    pub dataset_count: usize,
    /// 0-based page index
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    /// e.g. "51-100 of 1.2K"; the whole result in full-result mode
    pub position: String,
    pub selected_count: usize,
    /// A search term is applied
    pub search_active: bool,
    /// Keystrokes are waiting out the debounce period
    pub search_pending: bool,
}

impl<S: KeyValueStore> TableController<S> {
    /// Filtered and sorted ids of the whole result
    pub fn result_ids(&self) -> &[RowId] {
        &self.result
    }

    /// Ids on the current page
    pub fn page_row_ids(&self) -> &[RowId] {
        pagination::slice(&self.result, &self.pagination).0
    }

    /// Sequence the window runs over, per the row source
    pub fn current_rows(&self) -> &[RowId] {
        match self.row_source {
            RowSource::Page => self.page_row_ids(),
            RowSource::FullResult => &self.result,
        }
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    pub fn scroll_offset(&self) -> f64 {
        self.scroll.scroll_y()
    }

    /// Scroll the body; not debounced, O(1)
    pub fn scroll_to(&mut self, y: f64) {
        let rows = self.current_rows().len();
        self.scroll.scroll_to(y, rows);
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        let rows = self.current_rows().len();
        self.scroll.set_viewport_height(height, rows);
    }

    /// Total scrollable height of the body
    pub fn content_height(&self) -> f64 {
        self.scroll.total_content_height(self.current_rows().len())
    }

    pub fn view_window(&self) -> ViewWindow {
        self.scroll.window(self.current_rows().len())
    }

    /// Rows inside the window, and only those.
    pub fn materialize(&self) -> Vec<MaterializedRow<'_>> {
        let window = self.view_window();
        self.current_rows()[window.range()]
            .iter()
            .filter_map(|id| {
                self.dataset.get(*id).map(|record| MaterializedRow {
                    id: *id,
                    record,
                    selected: self.selection.is_selected(*id),
                })
            })
            .collect()
    }

    pub fn render_metrics(&self) -> RenderMetrics {
        RenderMetrics {
            total_rows: self.current_rows().len(),
            rendered_rows: self.view_window().len(),
            filtered_rows: self.result.len(),
            dataset_rows: self.dataset.len(),
        }
    }

    // ------------------------------------------------------------------
    // Chrome
    // ------------------------------------------------------------------

    /// Visible columns in order, with width, sort indicator and filter
    pub fn header(&self) -> Vec<HeaderCell> {
        let layout = self.layout.layout();
        self.layout
            .visible_columns()
            .into_iter()
            .map(|def| HeaderCell {
                column: def.id,
                title: def.header,
                width: layout.width(def),
                sortable: def.sortable,
                sort: self.sort.direction_of(def.id),
                filter_kind: def.filter,
                filter: self.filters.get(def.id).cloned(),
            })
            .collect()
    }

    pub fn summary(&self) -> ViewSummary {
        let range = match self.row_source {
            RowSource::Page => self.pagination.visible_range(),
            RowSource::FullResult => 0..self.result.len(),
        };
        ViewSummary {
            result_count: self.result.len(),
            dataset_count: self.dataset.len(),
            page_index: self.pagination.page_index(),
            page_count: self.pagination.page_count(),
            page_size: self.pagination.page_size(),
            position: format_position(range.start, range.end, self.result.len()),
            selected_count: self.selected_count(),
            search_active: !self.filters.search().is_empty(),
            search_pending: self.search_debounce.is_pending(),
        }
    }
}

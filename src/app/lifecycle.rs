//! Construction, dataset loading and pipeline recomputation.

use super::{RowSource, TableController};
use crate::columns::ColumnSet;
use crate::config::ViewConfig;
use crate::data::{
    Dataset, IngestOptions, LoadStatus, Record, RowId, detect_delimiter, spawn_ingest,
    spawn_ingest_file,
};
use crate::engine::{
    Debouncer, FilterSpec, PaginationState, Selection, SortSpec, VirtualScrollState, filter, sort,
};
use crate::layout::{ColumnLayoutManager, KeyValueStore, LayoutPersistence};
use crate::perf::{PipelineMonitor, ScopedTimer, measure};
use std::path::PathBuf;
use tracing::{debug, info, warn};

impl<S: KeyValueStore> TableController<S> {
    /// Create a controller with default configuration over `store`.
    pub fn new(store: S) -> Self {
        Self::with_config(ViewConfig::default(), store)
    }

    /// Create a controller. The stored column layout is loaded once here.
    pub fn with_config(config: ViewConfig, store: S) -> Self {
        let config = config.validate();
        let persistence = LayoutPersistence::with_key(store, config.layout_storage_key.clone());
        let layout = ColumnLayoutManager::new(ColumnSet::default(), persistence);

        Self {
            pagination: PaginationState::new(
                config.default_page_size,
                config.page_size_options.clone(),
            ),
            scroll: VirtualScrollState::new(
                config.viewport_height,
                config.row_height,
                config.overscan_rows,
            ),
            search_debounce: Debouncer::new(config.search_debounce()),
            config,
            dataset: Dataset::empty(),
            filters: FilterSpec::new(),
            search_input: String::new(),
            sort: SortSpec::default(),
            selection: Selection::new(),
            layout,
            row_source: RowSource::default(),
            result: Vec::new(),
            pending_load: None,
            last_error: None,
            stats: PipelineMonitor::new(),
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn columns(&self) -> &ColumnSet {
        self.layout.columns()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Message of the last failed load, cleared by the next successful one
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn stats(&self) -> &PipelineMonitor {
        &self.stats
    }

    /// Replace the dataset. Selection is cleared and the view starts over
    /// at the first page; filters, sort and layout are kept.
    pub fn load_records(&mut self, records: Vec<Record>) {
        self.dataset = Dataset::from_records(records);
        self.selection.clear();
        self.last_error = None;
        info!(
            "Loaded {} tracks (generation {})",
            self.dataset.len(),
            self.dataset.generation()
        );
        self.recompute(true);
    }

    /// Ingestion options from the configured limits
    fn ingest_options(&self, delimiter: u8) -> IngestOptions {
        IngestOptions {
            delimiter,
            max_rows: self.config.max_ingest_rows,
        }
    }

    /// Start ingesting bytes in the background. The delimiter is detected
    /// from the first lines. Any load already in flight is superseded.
    pub fn begin_load(&mut self, bytes: Vec<u8>) {
        let options = self.ingest_options(detect_delimiter(None, &bytes));
        if self.pending_load.is_some() {
            debug!("Superseding in-flight load");
        }
        self.pending_load = Some(spawn_ingest(bytes, options));
    }

    /// Start ingesting a file in the background.
    pub fn begin_load_file(&mut self, path: PathBuf) {
        let options = self.ingest_options(IngestOptions::default().delimiter);
        if self.pending_load.is_some() {
            debug!("Superseding in-flight load");
        }
        self.pending_load = Some(spawn_ingest_file(path, options));
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Install the result of a background load if it has finished.
    ///
    /// Returns `true` when a load completed (successfully or not). A failed
    /// load leaves an empty dataset and records the error message.
    pub fn poll_load(&mut self) -> bool {
        let Some(load) = self.pending_load.as_mut() else {
            return false;
        };
        match load.poll() {
            LoadStatus::Pending => false,
            LoadStatus::Ready(result) => {
                self.pending_load = None;
                match result {
                    Ok(records) => self.load_records(records),
                    Err(e) => {
                        warn!("Failed to load tracks: {}", e);
                        self.dataset = Dataset::empty();
                        self.selection.clear();
                        self.last_error = Some(e.to_string());
                        self.recompute(true);
                    }
                }
                true
            }
        }
    }

    /// Re-run filter and sort over the dataset.
    ///
    /// `reset_page` sends the view back to the first page (query changes);
    /// otherwise the page index is only clamped.
    pub(super) fn recompute(&mut self, reset_page: bool) {
        let _timer = ScopedTimer::with_default_threshold("recompute");
        let columns = self.layout.columns();

        let (admitted, filter_ms) =
            measure(|| filter::apply(&self.dataset, &self.filters, columns));
        let (sorted, sort_ms) = measure(|| sort::apply(admitted, &self.sort));
        let result: Vec<RowId> = sorted.iter().map(|row| row.id).collect();

        self.stats.record("filter", filter_ms);
        self.stats.record("sort", sort_ms);
        debug!(
            "Pipeline: {} of {} rows admitted (filter {:.2}ms, sort {:.2}ms)",
            result.len(),
            self.dataset.len(),
            filter_ms,
            sort_ms
        );

        self.result = result;
        self.pagination.set_total_rows(self.result.len());
        if reset_page {
            self.pagination.go_first();
            self.scroll.scroll_to(0.0, 0);
        }
        let window_rows = self.current_rows().len();
        self.scroll.clamp(window_rows);
    }
}

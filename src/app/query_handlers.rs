//! Filter, global search and sort handlers.

use super::TableController;
use crate::data::ColumnId;
use crate::engine::{FilterSpec, FilterValue, Predicate, SortDirection, SortSpec};
use crate::layout::KeyValueStore;
use std::time::Instant;
use tracing::debug;

impl<S: KeyValueStore> TableController<S> {
    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    /// Set a column filter. An empty value clears it.
    ///
    /// Returns `false`, leaving the filters untouched, when the value's shape
    /// does not fit the column's filter kind.
    pub fn set_filter(&mut self, column: ColumnId, value: FilterValue) -> bool {
        if !value.is_empty() {
            let fits = self
                .layout
                .columns()
                .get(column)
                .and_then(|def| Predicate::compile(def, &value))
                .is_some();
            if !fits {
                debug!("Rejecting filter {:?} on column {}", value, column);
                return false;
            }
        }
        if self.filters.get(column) != Some(&value) {
            self.filters.set(column, value);
            self.recompute(true);
        }
        true
    }

    pub fn clear_filter(&mut self, column: ColumnId) {
        if self.filters.remove(column).is_some() {
            self.recompute(true);
        }
    }

    /// Clear every column filter and the search term, pending or applied.
    pub fn clear_filters(&mut self) {
        self.search_debounce.cancel();
        self.search_input.clear();
        if self.filters.is_empty() {
            return;
        }
        self.filters = FilterSpec::new();
        self.recompute(true);
    }

    /// Text currently in the search box
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Record a keystroke in the search box. The pipeline re-runs only
    /// once the input has been quiet for the debounce period; see
    /// [`Self::tick`].
    pub fn set_search_input(&mut self, term: impl Into<String>, now: Instant) {
        let term = term.into();
        self.search_input = term.clone();
        self.search_debounce.push(term, now);
    }

    /// Advance time. Applies the pending search term if its quiet period
    /// has elapsed and returns whether the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search_debounce.poll(now) {
            Some(term) => self.apply_search(term),
            None => false,
        }
    }

    /// Apply the pending search term immediately (e.g. on Enter).
    pub fn flush_search(&mut self) -> bool {
        match self.search_debounce.flush() {
            Some(term) => self.apply_search(term),
            None => false,
        }
    }

    /// When the pending search term is due, for scheduling the next tick
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search_debounce.deadline()
    }

    fn apply_search(&mut self, term: String) -> bool {
        if self.filters.search() == term {
            return false;
        }
        debug!("Applying search term {:?}", term);
        self.filters.set_search(term);
        self.recompute(true);
        true
    }

    /// Sorted distinct genres for the genre filter's options
    pub fn genre_options(&self) -> Vec<String> {
        self.dataset.distinct_values(ColumnId::Genre)
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn sort_direction(&self, column: ColumnId) -> Option<SortDirection> {
        self.sort.direction_of(column)
    }

    /// Header click: cycle the column through ascending, descending and
    /// unsorted.
    pub fn toggle_sort(&mut self, column: ColumnId) {
        let Some(def) = self.layout.columns().get(column) else {
            return;
        };
        let before = self.sort.clone();
        self.sort.toggle(def);
        if self.sort != before {
            self.recompute(true);
        }
    }

    /// Replace the sort keys outright (multi-key sort).
    pub fn set_sort(&mut self, spec: SortSpec) {
        if self.sort == spec {
            return;
        }
        self.sort = spec;
        self.recompute(true);
    }
}

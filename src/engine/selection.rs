//! Selection model keyed by row identity.
//!
//! Membership is independent of filtering, sorting and paging: a selected
//! row stays selected while hidden. Only an explicit clear, deletion, or a
//! dataset replacement removes ids.

use crate::data::{Dataset, Record, RowId};
use std::collections::BTreeSet;

/// Header checkbox state for the current page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSelectionState {
    None,
    /// Indeterminate
    Some,
    All,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<RowId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: RowId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn set_all<I>(&mut self, ids: I, selected: bool)
    where
        I: IntoIterator<Item = RowId>,
    {
        for id in ids {
            if selected {
                self.ids.insert(id);
            } else {
                self.ids.remove(&id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.ids.contains(&id)
    }

    /// Raw membership, including ids that may no longer exist
    pub fn ids(&self) -> &BTreeSet<RowId> {
        &self.ids
    }

    /// Number of selected ids that still exist in the dataset
    pub fn count(&self, dataset: &Dataset) -> usize {
        self.ids.iter().filter(|id| dataset.contains(**id)).count()
    }

    /// Selected records in dataset order
    pub fn selected_rows<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        dataset
            .rows()
            .filter(|row| self.ids.contains(&row.id))
            .map(|row| row.record)
            .collect()
    }

    /// Header checkbox state for the rows on a page
    pub fn page_state(&self, page_ids: &[RowId]) -> PageSelectionState {
        let selected = page_ids.iter().filter(|id| self.ids.contains(id)).count();
        if selected == 0 {
            PageSelectionState::None
        } else if selected == page_ids.len() {
            PageSelectionState::All
        } else {
            PageSelectionState::Some
        }
    }

    /// Scoped select-all: select the given rows unless all are already
    /// selected, in which case deselect them. Other rows are untouched.
    pub fn toggle_page(&mut self, page_ids: &[RowId]) {
        let select = self.page_state(page_ids) != PageSelectionState::All;
        self.set_all(page_ids.iter().copied(), select);
    }

    /// Drop ids of rows that were deleted
    pub fn forget(&mut self, ids: &BTreeSet<RowId>) {
        self.ids.retain(|id| !ids.contains(id));
    }
}

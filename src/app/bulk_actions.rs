//! Export and delete.
//!
//! Deletion is presentation-only: confirmed rows leave the in-memory
//! dataset and the selection, nothing else.

use super::{DeleteRequest, TableController};
use crate::data::{DataResult, Record, export_date_today, export_file_name, export_tracks};
use crate::layout::KeyValueStore;
use chrono::NaiveDate;
use tracing::{info, warn};

/// An export ready to be offered as a download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl<S: KeyValueStore> TableController<S> {
    /// Export the whole filtered and sorted result.
    pub fn export_result_csv(&self) -> DataResult<ExportFile> {
        self.export_result_csv_on(export_date_today())
    }

    /// Same as [`Self::export_result_csv`] with an explicit date for the
    /// file name
    pub fn export_result_csv_on(&self, date: NaiveDate) -> DataResult<ExportFile> {
        let records: Vec<&Record> = self
            .result
            .iter()
            .filter_map(|id| self.dataset.get(*id))
            .collect();
        Ok(ExportFile {
            file_name: export_file_name(false, date),
            bytes: export_tracks(records)?,
        })
    }

    /// Export every selected row, including rows hidden by the current
    /// filters, in dataset order.
    pub fn export_selected_csv(&self) -> DataResult<ExportFile> {
        self.export_selected_csv_on(export_date_today())
    }

    pub fn export_selected_csv_on(&self, date: NaiveDate) -> DataResult<ExportFile> {
        Ok(ExportFile {
            file_name: export_file_name(true, date),
            bytes: export_tracks(self.selected_records())?,
        })
    }

    /// First step of delete-selected: returns the request to confirm, or
    /// `None` when nothing is selected.
    pub fn request_delete_selected(&self) -> Option<DeleteRequest> {
        let ids: std::collections::BTreeSet<_> = self
            .selection
            .ids()
            .iter()
            .copied()
            .filter(|id| self.dataset.contains(*id))
            .collect();
        if ids.is_empty() {
            return None;
        }
        Some(DeleteRequest {
            ids,
            generation: self.dataset.generation(),
        })
    }

    /// Second step: remove the confirmed rows. A request made against a
    /// dataset that has since been replaced is ignored. Returns the number
    /// of rows removed.
    pub fn confirm_delete(&mut self, request: DeleteRequest) -> usize {
        if request.generation != self.dataset.generation() {
            warn!("Ignoring delete confirmation for a replaced dataset");
            return 0;
        }
        let removed = self.dataset.remove(&request.ids);
        self.selection.forget(&request.ids);
        info!("Deleted {} tracks from the view", removed);
        self.recompute(false);
        removed
    }
}

//! The dataset of one load session and its row identity scheme.
//!
//! Row identity is the record's position in the ingested sequence. It is
//! assigned once by [`Dataset::from_records`] and carried alongside the
//! record through filtering, sorting and pagination. Deleting rows never
//! renumbers the survivors.

use super::record::{ColumnId, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter so every dataset instance gets a distinct generation
static GENERATION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable integer handle of a record within its dataset
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub usize);

impl RowId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A row identity paired with its record
#[derive(Clone, Copy, Debug)]
pub struct RowRef<'a> {
    pub id: RowId,
    pub record: &'a Record,
}

/// An ordered sequence of records, fixed for one load session apart from
/// presentation-only deletion.
#[derive(Debug)]
pub struct Dataset {
    /// Rows in original order; ids strictly ascending
    rows: Vec<(RowId, Record)>,
    /// Distinguishes this dataset from any dataset loaded before or after it
    generation: u64,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl Dataset {
    /// A dataset with no rows (the state before any successful load)
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    /// Assign row identities `0..n` in ingestion order.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            rows: records
                .into_iter()
                .enumerate()
                .map(|(i, r)| (RowId(i), r))
                .collect(),
            generation: GENERATION_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Iterate rows in original order
    pub fn rows(&self) -> impl ExactSizeIterator<Item = RowRef<'_>> + '_ {
        self.rows.iter().map(|(id, record)| RowRef { id: *id, record })
    }

    /// Look up a record by identity
    pub fn get(&self, id: RowId) -> Option<&Record> {
        self.rows
            .binary_search_by_key(&id, |(row_id, _)| *row_id)
            .ok()
            .map(|idx| &self.rows[idx].1)
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.get(id).is_some()
    }

    /// Remove rows from the in-memory dataset. Returns how many were removed.
    pub fn remove(&mut self, ids: &BTreeSet<RowId>) -> usize {
        let before = self.rows.len();
        self.rows.retain(|(id, _)| !ids.contains(id));
        before - self.rows.len()
    }

    /// Sorted distinct non-empty stringified values of a column
    pub fn distinct_values(&self, column: ColumnId) -> Vec<String> {
        self.rows
            .iter()
            .map(|(_, record)| record.value(column).to_string())
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

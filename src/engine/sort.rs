//! Sort engine: stable multi-key ordering over admitted rows.

use crate::columns::ColumnDef;
use crate::data::{ColumnId, Record, RowRef};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One sort key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: ColumnId,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(column: ColumnId) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: ColumnId) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }
}

/// Ordered list of sort keys, highest priority first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Direction of a column's key, for the header sort indicator
    pub fn direction_of(&self, column: ColumnId) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.direction)
    }

    /// Header click: ascending, then descending, then unsorted.
    ///
    /// The clicked column replaces any other key. Non-sortable columns are
    /// ignored.
    pub fn toggle(&mut self, def: &ColumnDef) {
        if !def.sortable {
            return;
        }
        let next = match self.direction_of(def.id) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };
        self.keys = next
            .map(|direction| {
                vec![SortKey {
                    column: def.id,
                    direction,
                }]
            })
            .unwrap_or_default();
    }

    /// Compare two records using all keys in order
    pub fn compare_records(&self, a: &Record, b: &Record) -> Ordering {
        for key in &self.keys {
            let ordering = a.value(key.column).compare(&b.value(key.column));
            if ordering != Ordering::Equal {
                return key.direction.apply(ordering);
            }
        }
        Ordering::Equal
    }
}

/// Order rows by the sort keys. Rows whose keys all tie keep their input order.
pub fn apply<'a>(mut rows: Vec<RowRef<'a>>, spec: &SortSpec) -> Vec<RowRef<'a>> {
    if spec.is_empty() {
        return rows;
    }
    // sort_by is stable
    rows.sort_by(|a, b| spec.compare_records(a.record, b.record));
    rows
}

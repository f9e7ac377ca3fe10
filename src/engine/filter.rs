//! Filter engine: per-column predicates plus global search.
//!
//! A [`FilterSpec`] holds raw user input. Before evaluation each entry is
//! compiled against its column definition into a [`Predicate`], so the
//! predicate shape is chosen once and never by inspecting cell values.

use crate::columns::{ColumnDef, ColumnSet, FilterKind};
use crate::data::{ColumnId, Dataset, Record, RowRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Inclusive numeric bounds as entered by the user (displayed units)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeInput {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeInput {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Parse bounds from free text. Blank or unparsable text leaves the
    /// bound unset.
    pub fn parse(min: &str, max: &str) -> Self {
        Self {
            min: parse_bound(min),
            max: parse_bound(max),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

fn parse_bound(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            debug!("Ignoring unparsable range bound {:?}", trimmed);
            None
        }
    }
}

/// Raw filter input for one column
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    Text(String),
    Equality(String),
    Range(RangeInput),
}

impl FilterValue {
    /// Whether this input would constrain anything at all
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) | FilterValue::Equality(s) => s.is_empty(),
            FilterValue::Range(range) => range.is_unbounded(),
        }
    }
}

/// Per-column filter values plus the applied global search term
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    columns: BTreeMap<ColumnId, FilterValue>,
    search: String,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column's filter. An empty value removes it.
    pub fn set(&mut self, column: ColumnId, value: FilterValue) {
        if value.is_empty() {
            self.columns.remove(&column);
        } else {
            self.columns.insert(column, value);
        }
    }

    pub fn remove(&mut self, column: ColumnId) -> Option<FilterValue> {
        self.columns.remove(&column)
    }

    pub fn get(&self, column: ColumnId) -> Option<&FilterValue> {
        self.columns.get(&column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnId, &FilterValue)> {
        self.columns.iter().map(|(id, v)| (*id, v))
    }

    /// Drop every column filter, keeping the search term
    pub fn clear_columns(&mut self) {
        self.columns.clear();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn column_filter_count(&self) -> usize {
        self.columns.len()
    }

    /// No column filter and no search term
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.search.is_empty()
    }
}

/// A column filter bound to its column's predicate shape
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Lowercased needle
    Text { column: ColumnId, needle: String },
    Equality { column: ColumnId, value: String },
    /// Bounds already converted to stored units
    Range {
        column: ColumnId,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl Predicate {
    /// Bind a value to a column definition.
    ///
    /// Returns `None` when the value is empty, the column has no filter, or
    /// the value's shape does not match the column's filter kind.
    pub fn compile(def: &ColumnDef, value: &FilterValue) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        let column = def.id;
        match (def.filter, value) {
            (Some(FilterKind::Text), FilterValue::Text(text)) => Some(Predicate::Text {
                column,
                needle: text.to_lowercase(),
            }),
            (Some(FilterKind::Equality), FilterValue::Equality(value)) => {
                Some(Predicate::Equality {
                    column,
                    value: value.clone(),
                })
            }
            (Some(FilterKind::Range { scale, .. }), FilterValue::Range(range)) => {
                Some(Predicate::Range {
                    column,
                    min: range.min.map(|v| scale.to_stored(v)),
                    max: range.max.map(|v| scale.to_stored(v)),
                })
            }
            (kind, value) => {
                debug!(
                    "Filter {:?} does not apply to column {} ({:?}); ignoring",
                    value, column, kind
                );
                None
            }
        }
    }

    pub fn column(&self) -> ColumnId {
        match self {
            Predicate::Text { column, .. }
            | Predicate::Equality { column, .. }
            | Predicate::Range { column, .. } => *column,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::Text { column, needle } => record
                .value(*column)
                .to_string()
                .to_lowercase()
                .contains(needle.as_str()),
            Predicate::Equality { column, value } => record.value(*column).to_string() == *value,
            Predicate::Range { column, min, max } => match record.value(*column).as_f64() {
                Some(v) => min.is_none_or(|lo| v >= lo) && max.is_none_or(|hi| v <= hi),
                None => false,
            },
        }
    }
}

/// Compiled form of a [`FilterSpec`], ready to test records
#[derive(Clone, Debug)]
pub struct CompiledFilter {
    predicates: Vec<Predicate>,
    /// Lowercased global search term, if any
    search: Option<String>,
    searchable: Vec<ColumnId>,
}

impl CompiledFilter {
    pub fn compile(spec: &FilterSpec, columns: &ColumnSet) -> Self {
        let predicates = spec
            .iter()
            .filter_map(|(id, value)| {
                let def = columns.get(id)?;
                Predicate::compile(def, value)
            })
            .collect();
        let search = (!spec.search().is_empty()).then(|| spec.search().to_lowercase());

        Self {
            predicates,
            search,
            searchable: columns.searchable().collect(),
        }
    }

    /// Nothing to test: every record is admitted
    pub fn is_pass_through(&self) -> bool {
        self.predicates.is_empty() && self.search.is_none()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Column predicates first, then global search across searchable columns.
    pub fn admits(&self, record: &Record) -> bool {
        if !self.predicates.iter().all(|p| p.matches(record)) {
            return false;
        }
        match &self.search {
            None => true,
            Some(term) => self.searchable.iter().any(|column| {
                record
                    .value(*column)
                    .to_string()
                    .to_lowercase()
                    .contains(term.as_str())
            }),
        }
    }
}

/// Admit rows of a dataset, preserving dataset order.
pub fn apply<'a>(dataset: &'a Dataset, spec: &FilterSpec, columns: &ColumnSet) -> Vec<RowRef<'a>> {
    let compiled = CompiledFilter::compile(spec, columns);
    apply_compiled(dataset, &compiled)
}

/// Same as [`apply`] with an already compiled filter.
pub fn apply_compiled<'a>(dataset: &'a Dataset, filter: &CompiledFilter) -> Vec<RowRef<'a>> {
    if filter.is_pass_through() {
        return dataset.rows().collect();
    }
    dataset.rows().filter(|row| filter.admits(row.record)).collect()
}

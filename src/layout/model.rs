//! Column layout and its stored form.
//!
//! [`ColumnLayout`] is the in-memory layout: visibility, order and sizing
//! keyed by [`ColumnId`]. [`StoredLayout`] is the versioned JSON shape kept
//! in the key-value store. Decoding is tolerant: anything unreadable is
//! treated as "no stored layout".

use crate::columns::{ColumnDef, ColumnSet};
use crate::constants::LAYOUT_SCHEMA_VERSION;
use crate::data::ColumnId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Column visibility, order and sizing.
///
/// Empty maps mean "default": every column visible, declared order, default
/// widths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    pub visibility: BTreeMap<ColumnId, bool>,
    pub order: Vec<ColumnId>,
    pub sizing: BTreeMap<ColumnId, u32>,
}

impl ColumnLayout {
    pub fn is_default(&self) -> bool {
        self.visibility.is_empty() && self.order.is_empty() && self.sizing.is_empty()
    }

    pub fn is_visible(&self, column: ColumnId) -> bool {
        self.visibility.get(&column).copied().unwrap_or(true)
    }

    /// Width of a column, falling back to its declared default
    pub fn width(&self, def: &ColumnDef) -> u32 {
        self.sizing
            .get(&def.id)
            .copied()
            .unwrap_or(def.default_size)
    }

    /// Listed columns first, then the rest in declared order.
    pub fn effective_order(&self, columns: &ColumnSet) -> Vec<ColumnId> {
        let mut order: Vec<ColumnId> = Vec::with_capacity(columns.len());
        for id in &self.order {
            if columns.get(*id).is_some() && !order.contains(id) {
                order.push(*id);
            }
        }
        for id in columns.declared_order() {
            if !order.contains(&id) {
                order.push(id);
            }
        }
        order
    }
}

fn legacy_version() -> u32 {
    1
}

/// Persisted layout schema.
///
/// A blob without `version` predates versioning and is read as version 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLayout {
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(default)]
    pub column_visibility: BTreeMap<String, bool>,
    #[serde(default)]
    pub column_order: Vec<String>,
    #[serde(default)]
    pub column_sizing: BTreeMap<String, serde_json::Number>,
}

impl StoredLayout {
    pub fn from_layout(layout: &ColumnLayout) -> Self {
        Self {
            version: LAYOUT_SCHEMA_VERSION,
            column_visibility: layout
                .visibility
                .iter()
                .map(|(id, visible)| (id.to_string(), *visible))
                .collect(),
            column_order: layout.order.iter().map(ToString::to_string).collect(),
            column_sizing: layout
                .sizing
                .iter()
                .map(|(id, px)| (id.to_string(), serde_json::Number::from(*px)))
                .collect(),
        }
    }

    /// Convert into a layout for `columns`.
    ///
    /// Unknown column ids are dropped, duplicate order entries collapse to
    /// their first position, and widths are clamped into each column's
    /// bounds. Returns `None` for a schema version newer than this build
    /// understands.
    pub fn into_layout(self, columns: &ColumnSet) -> Option<ColumnLayout> {
        if self.version > LAYOUT_SCHEMA_VERSION {
            warn!(
                "Stored layout version {} is newer than supported version {}; ignoring",
                self.version, LAYOUT_SCHEMA_VERSION
            );
            return None;
        }

        let known = |key: &str| -> Option<ColumnId> {
            let id = key.parse::<ColumnId>().ok().filter(|id| columns.get(*id).is_some());
            if id.is_none() {
                debug!("Dropping stored layout entry for unknown column {:?}", key);
            }
            id
        };

        let visibility = self
            .column_visibility
            .iter()
            .filter_map(|(key, visible)| known(key).map(|id| (id, *visible)))
            .collect();

        let mut order = Vec::new();
        for id in self.column_order.iter().filter_map(|key| known(key)) {
            if !order.contains(&id) {
                order.push(id);
            }
        }

        let sizing = self
            .column_sizing
            .iter()
            .filter_map(|(key, px)| {
                let def = columns.get(known(key)?)?;
                let px = px.as_f64().filter(|v| v.is_finite())?;
                let px = px.round().clamp(0.0, u32::MAX as f64) as u32;
                Some((def.id, def.clamp_size(px)))
            })
            .collect();

        Some(ColumnLayout {
            visibility,
            order,
            sizing,
        })
    }
}

/// Serialize a layout into its stored bytes
pub fn encode(layout: &ColumnLayout) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&StoredLayout::from_layout(layout))
}

/// Decode stored bytes. Malformed or unsupported data reads as absent.
pub fn decode(bytes: &[u8], columns: &ColumnSet) -> Option<ColumnLayout> {
    match serde_json::from_slice::<StoredLayout>(bytes) {
        Ok(stored) => stored.into_layout(columns),
        Err(e) => {
            warn!("Ignoring unreadable stored layout: {}", e);
            None
        }
    }
}

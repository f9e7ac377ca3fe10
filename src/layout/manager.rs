//! Column layout manager.
//!
//! Owns the current [`ColumnLayout`], applies visibility/order/size changes
//! against the column definitions, and writes the layout through on every
//! change. Persistence failures are logged and never surfaced.

use super::model::ColumnLayout;
use super::store::{KeyValueStore, LayoutPersistence};
use crate::columns::{ColumnDef, ColumnSet};
use crate::data::ColumnId;
use tracing::{debug, info, warn};

pub struct ColumnLayoutManager<S> {
    columns: ColumnSet,
    layout: ColumnLayout,
    persistence: LayoutPersistence<S>,
}

impl<S: KeyValueStore> ColumnLayoutManager<S> {
    /// Create a manager, loading any stored layout once.
    pub fn new(columns: ColumnSet, persistence: LayoutPersistence<S>) -> Self {
        let layout = persistence.load(&columns).unwrap_or_default();
        if !layout.is_default() {
            debug!("Restored stored column layout");
        }
        Self {
            columns,
            layout,
            persistence,
        }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn persistence(&self) -> &LayoutPersistence<S> {
        &self.persistence
    }

    /// Show or hide a column. Non-hideable columns ignore this.
    pub fn set_visibility(&mut self, column: ColumnId, visible: bool) -> bool {
        match self.columns.get(column) {
            Some(def) if def.hideable => {
                self.layout.visibility.insert(column, visible);
                self.persist();
                true
            }
            Some(_) => {
                debug!("Column {} cannot be hidden; ignoring", column);
                false
            }
            None => false,
        }
    }

    /// Make every hideable column visible
    pub fn show_all(&mut self) {
        self.set_all_hideable(true);
    }

    /// Hide every hideable column
    pub fn hide_all(&mut self) {
        self.set_all_hideable(false);
    }

    fn set_all_hideable(&mut self, visible: bool) {
        for def in self.columns.iter().filter(|d| d.hideable) {
            self.layout.visibility.insert(def.id, visible);
        }
        self.persist();
    }

    /// Replace the column order. Unknown and repeated ids are dropped.
    pub fn set_order(&mut self, order: Vec<ColumnId>) {
        let mut cleaned = Vec::with_capacity(order.len());
        for id in order {
            if self.columns.get(id).is_some() && !cleaned.contains(&id) {
                cleaned.push(id);
            }
        }
        self.layout.order = cleaned;
        self.persist();
    }

    /// Drag-reorder: move `dragged` to the position `target` holds once
    /// `dragged` has been taken out of the current order.
    pub fn reorder(&mut self, dragged: ColumnId, target: ColumnId) -> bool {
        if dragged == target
            || self.columns.get(dragged).is_none()
            || self.columns.get(target).is_none()
        {
            return false;
        }
        let mut order = self.layout.effective_order(&self.columns);
        order.retain(|id| *id != dragged);
        let Some(index) = order.iter().position(|id| *id == target) else {
            return false;
        };
        order.insert(index, dragged);
        self.layout.order = order;
        self.persist();
        true
    }

    /// Resize a column, clamped into its declared bounds. Returns the
    /// applied width.
    pub fn set_size(&mut self, column: ColumnId, px: u32) -> Option<u32> {
        let width = self.columns.get(column)?.clamp_size(px);
        self.layout.sizing.insert(column, width);
        self.persist();
        Some(width)
    }

    /// Restore defaults and delete the stored layout.
    pub fn reset(&mut self) {
        self.layout = ColumnLayout::default();
        if let Err(e) = self.persistence.clear() {
            warn!("Failed to clear stored layout: {}", e);
        }
        info!("Column layout reset to defaults");
    }

    pub fn is_visible(&self, column: ColumnId) -> bool {
        self.layout.is_visible(column)
    }

    /// Visible columns in effective order
    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.layout
            .effective_order(&self.columns)
            .into_iter()
            .filter(|id| self.layout.is_visible(*id))
            .filter_map(|id| self.columns.get(id))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|d| self.layout.is_visible(d.id))
            .count()
    }

    /// Columns whose id or header contains `query`, case-insensitively,
    /// in effective order.
    pub fn search_columns(&self, query: &str) -> Vec<&ColumnDef> {
        let needle = query.trim().to_lowercase();
        self.layout
            .effective_order(&self.columns)
            .into_iter()
            .filter_map(|id| self.columns.get(id))
            .filter(|def| {
                needle.is_empty()
                    || def.id.as_str().contains(&needle)
                    || def.header.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn width(&self, column: ColumnId) -> Option<u32> {
        self.columns.get(column).map(|def| self.layout.width(def))
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.layout) {
            warn!("Failed to persist column layout: {}", e);
        }
    }
}

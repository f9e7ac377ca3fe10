//! Column visibility, order and sizing handlers.

use super::TableController;
use crate::columns::ColumnDef;
use crate::data::ColumnId;
use crate::layout::{ColumnLayout, KeyValueStore};

impl<S: KeyValueStore> TableController<S> {
    pub fn layout(&self) -> &ColumnLayout {
        self.layout.layout()
    }

    /// Show or hide a column. Returns `false` for columns that cannot be
    /// hidden.
    pub fn set_column_visibility(&mut self, column: ColumnId, visible: bool) -> bool {
        self.layout.set_visibility(column, visible)
    }

    pub fn show_all_columns(&mut self) {
        self.layout.show_all();
    }

    pub fn hide_all_columns(&mut self) {
        self.layout.hide_all();
    }

    /// Drop `dragged` onto `target`
    pub fn reorder_column(&mut self, dragged: ColumnId, target: ColumnId) -> bool {
        self.layout.reorder(dragged, target)
    }

    pub fn set_column_order(&mut self, order: Vec<ColumnId>) {
        self.layout.set_order(order);
    }

    /// Resize a column; returns the width after clamping
    pub fn resize_column(&mut self, column: ColumnId, px: u32) -> Option<u32> {
        self.layout.set_size(column, px)
    }

    /// Restore the default layout and delete the stored one
    pub fn reset_layout(&mut self) {
        self.layout.reset();
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.layout.visible_columns()
    }

    /// Column management panel search
    pub fn search_columns(&self, query: &str) -> Vec<&ColumnDef> {
        self.layout.search_columns(query)
    }

    /// e.g. "9 of 11 columns visible"
    pub fn column_visibility_label(&self) -> String {
        format!(
            "{} of {} columns visible",
            self.layout.visible_count(),
            self.layout.columns().len()
        )
    }
}

//! Application module - the table controller and everything it exposes to
//! the rendering surface.
//!
//! This module is organized into several submodules:
//! - `state` - The TableController struct definition and supporting types
//! - `lifecycle` - Construction, loading and pipeline recomputation
//! - `query_handlers` - Filters, debounced global search and sorting
//! - `pagination_handlers` - Page navigation, page size and row source
//! - `selection_handlers` - Row and page-scoped selection
//! - `layout_handlers` - Column visibility, order and sizing
//! - `view_model` - Virtual window, materialized rows, header and summary
//! - `bulk_actions` - Export and confirmed delete
//! - `intents` - User intent dispatch

mod bulk_actions;
mod intents;
mod layout_handlers;
mod lifecycle;
mod pagination_handlers;
mod query_handlers;
mod selection_handlers;
mod state;
mod view_model;

pub use bulk_actions::ExportFile;
pub use intents::{Intent, IntentOutcome};
pub use state::{DeleteRequest, RowSource, TableController};
pub use view_model::{HeaderCell, MaterializedRow, ViewSummary};

//! Interactive view engine for large track tables.
//!
//! A [`TableController`] owns a dataset of [`Record`]s plus the mutable view
//! state around it (filters, sort keys, pagination, selection and column
//! layout) and derives from them the result sequence and the small window of
//! rows a renderer actually needs to draw.

pub mod app;
pub mod columns;
pub mod config;
pub mod constants;
pub mod data;
pub mod engine;
pub mod format;
pub mod layout;
pub mod logging;
pub mod perf;

pub use app::{Intent, IntentOutcome, RowSource, TableController};
pub use columns::{ColumnDef, ColumnSet, FilterKind, RangeScale};
pub use config::ViewConfig;
pub use data::{ColumnId, DataError, DataResult, Dataset, Record, RowId};
pub use layout::{ColumnLayout, FileStore, KeyValueStore, MemoryStore};

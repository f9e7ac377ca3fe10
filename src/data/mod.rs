//! Data model, ingestion and export
//!
//! This module owns everything that touches raw track data: the [`Record`]
//! type, the row identity scheme of a [`Dataset`], and the delimited-text
//! codec used to load and export it.
//!
//! ## Performance
//!
//! For large files use [`spawn_ingest_file`], which parses on a worker
//! thread and is polled without blocking.
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Common errors include:
//! - `TooLarge`: File exceeds size limits
//! - `TooManyRows`: Dataset exceeds row limits
//! - `EmptyFile` / `MissingColumns`: Nothing usable in the header
//! - `Io`/`Csv`: File system and decoding errors

mod csv_parser;
mod dataset;
mod error;
mod loader;
mod record;

pub use csv_parser::*;
pub use dataset::*;
pub use error::*;
pub use loader::*;
pub use record::*;

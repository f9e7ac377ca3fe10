//! Column layout: model, persistence and manager.

pub mod manager;
pub mod model;
pub mod store;

pub use manager::ColumnLayoutManager;
pub use model::{ColumnLayout, StoredLayout};
pub use store::{
    FileStore, KeyValueStore, LayoutPersistence, MemoryStore, PersistenceError,
    default_store_dir,
};

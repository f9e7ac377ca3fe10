//! Persistence collaborator for the column layout.
//!
//! The medium is a plain key-value byte store. Two backends ship with the
//! crate: [`MemoryStore`] for tests and embedding, and [`FileStore`] which
//! keeps one file per key under the platform data directory.

use super::model::{ColumnLayout, decode, encode};
use crate::columns::ColumnSet;
use crate::constants::{LAYOUT_STORAGE_KEY, STORE_DIR_NAME};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from writing the persisted layout
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string-keyed byte store scoped to the local device
pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> io::Result<()>;
    /// Removing a missing key succeeds
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// In-process store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> io::Result<()> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

/// Default directory for the file store, e.g. `~/.local/share/tracktable`
pub fn default_store_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(STORE_DIR_NAME))
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory, if one exists
    pub fn in_default_dir() -> Option<Self> {
        default_store_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key. Characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        // Write to a sibling temp file and rename so readers never see a
        // partially written value
        let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
        file.write_all(value)?;
        file.as_file().sync_all()?;
        file.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Loads, saves and clears the layout under a single fixed key.
#[derive(Clone, Debug)]
pub struct LayoutPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LayoutPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, LAYOUT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored layout. Read failures and corrupt data are logged
    /// and reported as absent.
    pub fn load(&self, columns: &ColumnSet) -> Option<ColumnLayout> {
        match self.store.get(&self.key) {
            Ok(Some(bytes)) => decode(&bytes, columns),
            Ok(None) => {
                debug!("No stored layout under {:?}", self.key);
                None
            }
            Err(e) => {
                warn!("Failed to read stored layout: {}", e);
                None
            }
        }
    }

    pub fn save(&self, layout: &ColumnLayout) -> Result<(), PersistenceError> {
        let bytes = encode(layout)?;
        self.store.set(&self.key, &bytes)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}

//! View configuration.
//!
//! Every field defaults to the value in [`crate::constants`], so a config
//! file only needs the keys it wants to change.
//!
//! ```json
//! { "page_size_options": [10, 20], "default_page_size": 20 }
//! ```

use crate::constants::{
    DEFAULT_PAGE_SIZE, LAYOUT_STORAGE_KEY, MAX_INGEST_ROWS, OVERSCAN_ROWS, PAGE_SIZE_OPTIONS,
    ROW_HEIGHT, SEARCH_DEBOUNCE_MS, VIEWPORT_HEIGHT,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size_options: Vec<usize>,
    pub default_page_size: usize,
    pub row_height: f64,
    pub viewport_height: f64,
    pub overscan_rows: usize,
    pub search_debounce_ms: u64,
    pub layout_storage_key: String,
    pub max_ingest_rows: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            row_height: ROW_HEIGHT,
            viewport_height: VIEWPORT_HEIGHT,
            overscan_rows: OVERSCAN_ROWS,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            layout_storage_key: LAYOUT_STORAGE_KEY.to_string(),
            max_ingest_rows: MAX_INGEST_ROWS,
        }
    }
}

impl ViewConfig {
    /// Parse a JSON config and normalize it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ViewConfig =
            serde_json::from_str(json).context("Failed to parse view config")?;
        Ok(config.validate())
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read view config {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid view config {}", path.display()))
    }

    /// Replace invalid values with defaults.
    pub fn validate(mut self) -> Self {
        let defaults = ViewConfig::default();

        self.page_size_options.retain(|size| *size > 0);
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
        if self.page_size_options.is_empty() {
            warn!("Config has no usable page sizes; using defaults");
            self.page_size_options = defaults.page_size_options.clone();
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            warn!(
                "Default page size {} is not among the options {:?}",
                self.default_page_size, self.page_size_options
            );
            self.default_page_size = if self.page_size_options.contains(&defaults.default_page_size)
            {
                defaults.default_page_size
            } else {
                self.page_size_options[0]
            };
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            warn!("Invalid row height {}; using {}", self.row_height, defaults.row_height);
            self.row_height = defaults.row_height;
        }
        if !(self.viewport_height.is_finite() && self.viewport_height >= 0.0) {
            warn!(
                "Invalid viewport height {}; using {}",
                self.viewport_height, defaults.viewport_height
            );
            self.viewport_height = defaults.viewport_height;
        }
        if self.layout_storage_key.is_empty() {
            self.layout_storage_key = defaults.layout_storage_key;
        }
        if self.max_ingest_rows == 0 {
            self.max_ingest_rows = defaults.max_ingest_rows;
        }
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

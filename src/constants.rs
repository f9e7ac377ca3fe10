//! Application-wide constants.
//!
//! Centralizes magic numbers and layout values to make the codebase
//! more maintainable and self-documenting. Every value here can be
//! overridden through [`crate::config::ViewConfig`].

// ============================================================================
// Pagination
// ============================================================================

/// Page size options offered by the page size selector
pub const PAGE_SIZE_OPTIONS: &[usize] = &[25, 50, 100, 200];

/// Rows per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 50;

// ============================================================================
// Virtual Scrolling
// ============================================================================

/// Estimated row height in pixels for window calculations
pub const ROW_HEIGHT: f64 = 50.0;

/// Height of the scrollable table body in pixels
pub const VIEWPORT_HEIGHT: f64 = 600.0;

/// Number of rows to materialize above/below the viewport as buffer
pub const OVERSCAN_ROWS: usize = 10;

// ============================================================================
// Input Timing
// ============================================================================

/// Quiet period after the last global-search keystroke before the
/// pipeline re-runs
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

// ============================================================================
// Persistence
// ============================================================================

/// Key under which the column layout is stored
pub const LAYOUT_STORAGE_KEY: &str = "spotify-table-preferences";

/// Current version of the stored layout schema
pub const LAYOUT_SCHEMA_VERSION: u32 = 1;

/// Directory name used by the file-backed store under the platform data dir
pub const STORE_DIR_NAME: &str = "tracktable";

// ============================================================================
// Ingestion Limits
// ============================================================================

/// Maximum number of data rows accepted from a single stream
pub const MAX_INGEST_ROWS: usize = 1_000_000;

/// Maximum file size in megabytes accepted by path-based ingestion
pub const MAX_INGEST_SIZE_MB: usize = 200;

// ============================================================================
// Export
// ============================================================================

/// File name prefix for exported tracks
pub const EXPORT_FILE_PREFIX: &str = "spotify-tracks";

// ============================================================================
// Profiling
// ============================================================================

/// Pipeline recomputation slower than this is logged at warn level
pub const RECOMPUTE_WARN_MS: f64 = 16.67;

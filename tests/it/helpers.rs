//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TrackBuilder` - Builder pattern for creating test records
//! - `TestControllerBuilder` - Controllers with data, config and store
//! - Helper functions like `popularity_tracks()`, `sample_tracks()`, etc.
//! - Common assertions over the derived view

#![allow(dead_code)]

use std::time::Instant;
use tracktable::app::TableController;
use tracktable::config::ViewConfig;
use tracktable::data::{Record, RowId};
use tracktable::layout::MemoryStore;

// ============================================================================
// TrackBuilder - Builder pattern for creating test records
// ============================================================================

/// Builder for creating test records.
///
/// # Example
/// ```ignore
/// let track = TrackBuilder::new("Yellow")
///     .artist("Coldplay")
///     .genre("rock")
///     .popularity(90)
///     .build();
/// ```
#[derive(Debug)]
pub struct TrackBuilder {
    record: Record,
}

impl TrackBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            record: Record {
                track_name: name.into(),
                ..Default::default()
            },
        }
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.record.artist_name = artist.into();
        self
    }

    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.record.album_name = album.into();
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.record.genre = genre.into();
        self
    }

    pub fn popularity(mut self, popularity: i64) -> Self {
        self.record.popularity = popularity;
        self
    }

    pub fn tempo(mut self, tempo: f64) -> Self {
        self.record.tempo = tempo;
        self
    }

    pub fn energy(mut self, energy: f64) -> Self {
        self.record.energy = energy;
        self
    }

    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.record.duration_ms = duration_ms;
        self
    }

    pub fn explicit(mut self, explicit: bool) -> Self {
        self.record.explicit = explicit;
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Five tracks with popularity `[10, 85, 90, 40, 100]`
pub fn popularity_tracks() -> Vec<Record> {
    [10, 85, 90, 40, 100]
        .iter()
        .enumerate()
        .map(|(i, p)| {
            TrackBuilder::new(format!("Track {}", i))
                .popularity(*p)
                .build()
        })
        .collect()
}

/// `count` varied tracks; genre cycles through rock/pop/jazz and every
/// third track is explicit.
pub fn sample_tracks(count: usize) -> Vec<Record> {
    const GENRES: [&str; 3] = ["rock", "pop", "jazz"];
    (0..count)
        .map(|i| {
            TrackBuilder::new(format!("Track {}", i))
                .artist(format!("Artist {}", i % 7))
                .album(format!("Album {}", i % 11))
                .genre(GENRES[i % GENRES.len()])
                .popularity((i * 37 % 101) as i64)
                .tempo(60.0 + (i % 120) as f64)
                .energy((i % 100) as f64 / 100.0)
                .duration_ms(120_000 + (i as i64 % 60) * 1000)
                .explicit(i % 3 == 0)
                .build()
        })
        .collect()
}

// ============================================================================
// TestControllerBuilder
// ============================================================================

pub struct TestControllerBuilder {
    config: ViewConfig,
    store: MemoryStore,
    records: Vec<Record>,
}

impl Default for TestControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestControllerBuilder {
    pub fn new() -> Self {
        Self {
            config: ViewConfig::default(),
            store: MemoryStore::new(),
            records: Vec::new(),
        }
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    /// Accept these page sizes and start at the first one
    pub fn with_page_sizes(mut self, sizes: &[usize]) -> Self {
        self.config.page_size_options = sizes.to_vec();
        self.config.default_page_size = sizes[0];
        self
    }

    pub fn with_viewport(mut self, viewport_height: f64, row_height: f64, overscan: usize) -> Self {
        self.config.viewport_height = viewport_height;
        self.config.row_height = row_height;
        self.config.overscan_rows = overscan;
        self
    }

    pub fn with_max_ingest_rows(mut self, max_rows: usize) -> Self {
        self.config.max_ingest_rows = max_rows;
        self
    }

    pub fn with_store(mut self, store: MemoryStore) -> Self {
        self.store = store;
        self
    }

    pub fn build(self) -> TableController<MemoryStore> {
        let mut controller = TableController::with_config(self.config, self.store);
        if !self.records.is_empty() {
            controller.load_records(self.records);
        }
        controller
    }
}

/// Controller over `records` with default configuration
pub fn controller_with(records: Vec<Record>) -> TableController<MemoryStore> {
    TestControllerBuilder::new().with_records(records).build()
}

// ============================================================================
// Assertions and accessors
// ============================================================================

/// Row indices of the derived result, in result order
pub fn result_indices(controller: &TableController<MemoryStore>) -> Vec<usize> {
    controller.result_ids().iter().map(|id| id.index()).collect()
}

/// Row indices on the current page
pub fn page_indices(controller: &TableController<MemoryStore>) -> Vec<usize> {
    controller
        .page_row_ids()
        .iter()
        .map(|id| id.index())
        .collect()
}

/// Popularity values of the derived result, in result order
pub fn result_popularity(controller: &TableController<MemoryStore>) -> Vec<i64> {
    controller
        .result_ids()
        .iter()
        .filter_map(|id| controller.dataset().get(*id))
        .map(|r| r.popularity)
        .collect()
}

pub fn row(index: usize) -> RowId {
    RowId(index)
}

/// Fixed start time for debounce tests
pub fn t0() -> Instant {
    Instant::now()
}

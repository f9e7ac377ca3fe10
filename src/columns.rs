//! Declarative column definitions.
//!
//! Everything the engine needs to know about a column (how it filters,
//! whether it sorts, hides or takes part in global search, and its size
//! bounds) is fixed here at definition time. Engines dispatch on these
//! definitions rather than inspecting values at runtime.

use crate::data::ColumnId;
use serde::Serialize;

/// How a range predicate maps displayed bounds onto stored values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeScale {
    /// Bounds compare against the stored value directly
    Identity,
    /// Stored value is a 0..1 fraction, bounds are entered as 0..100
    Percent,
}

impl RangeScale {
    /// Convert a displayed bound into the stored value's unit.
    pub fn to_stored(self, bound: f64) -> f64 {
        match self {
            RangeScale::Identity => bound,
            RangeScale::Percent => bound / 100.0,
        }
    }
}

/// Predicate shape a column accepts
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FilterKind {
    /// Case-insensitive substring match
    Text,
    /// Exact match on the stringified value
    Equality,
    /// Inclusive numeric range, with the displayed domain for the input
    Range {
        domain_min: f64,
        domain_max: f64,
        scale: RangeScale,
    },
}

/// Static definition of a table column
#[derive(Clone, Debug, Serialize)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub header: &'static str,
    pub filter: Option<FilterKind>,
    pub sortable: bool,
    pub hideable: bool,
    /// Participates in global search
    pub searchable: bool,
    pub min_size: u32,
    pub default_size: u32,
    pub max_size: u32,
}

impl ColumnDef {
    fn new(id: ColumnId, header: &'static str, sizes: (u32, u32, u32)) -> Self {
        Self {
            id,
            header,
            filter: None,
            sortable: true,
            hideable: true,
            searchable: true,
            min_size: sizes.0,
            default_size: sizes.1,
            max_size: sizes.2,
        }
    }

    fn with_filter(mut self, filter: FilterKind) -> Self {
        self.filter = Some(filter);
        self
    }

    fn pinned(mut self) -> Self {
        self.hideable = false;
        self
    }

    fn unsearchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Clamp a width into this column's bounds.
    pub fn clamp_size(&self, px: u32) -> u32 {
        px.clamp(self.min_size, self.max_size)
    }
}

const PERCENT_RANGE: FilterKind = FilterKind::Range {
    domain_min: 0.0,
    domain_max: 100.0,
    scale: RangeScale::Percent,
};

const POPULARITY_RANGE: FilterKind = FilterKind::Range {
    domain_min: 0.0,
    domain_max: 100.0,
    scale: RangeScale::Identity,
};

/// The track table's columns in declaration order.
pub fn track_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new(ColumnId::TrackName, "Track Name", (120, 240, 600))
            .with_filter(FilterKind::Text)
            .pinned(),
        ColumnDef::new(ColumnId::ArtistName, "Artist", (100, 180, 480))
            .with_filter(FilterKind::Text),
        ColumnDef::new(ColumnId::AlbumName, "Album", (100, 180, 480)),
        ColumnDef::new(ColumnId::Genre, "Genre", (80, 120, 320)).with_filter(FilterKind::Equality),
        ColumnDef::new(ColumnId::Popularity, "Popularity", (80, 110, 240))
            .with_filter(POPULARITY_RANGE),
        ColumnDef::new(ColumnId::Tempo, "Tempo (BPM)", (80, 110, 240)),
        ColumnDef::new(ColumnId::Energy, "Energy", (80, 110, 240)).with_filter(PERCENT_RANGE),
        ColumnDef::new(ColumnId::Danceability, "Danceability", (80, 120, 240)),
        ColumnDef::new(ColumnId::DurationMs, "Duration", (80, 100, 200)),
        ColumnDef::new(ColumnId::ReleaseDate, "Release Date", (100, 120, 240)),
        ColumnDef::new(ColumnId::Explicit, "Explicit", (60, 90, 160)).unsearchable(),
    ]
}

/// Column definitions with lookup by id
#[derive(Clone, Debug)]
pub struct ColumnSet {
    defs: Vec<ColumnDef>,
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::new(track_columns())
    }
}

impl ColumnSet {
    pub fn new(defs: Vec<ColumnDef>) -> Self {
        Self { defs }
    }

    pub fn get(&self, id: ColumnId) -> Option<&ColumnDef> {
        self.defs.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDef> {
        self.defs.iter()
    }

    /// Declared order of column ids
    pub fn declared_order(&self) -> Vec<ColumnId> {
        self.defs.iter().map(|d| d.id).collect()
    }

    /// Columns that take part in global search
    pub fn searchable(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.defs.iter().filter(|d| d.searchable).map(|d| d.id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

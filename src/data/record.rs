//! Core record types for the track table.
//!
//! A [`Record`] is one immutable row of the dataset. Columns are addressed
//! through the closed [`ColumnId`] enum so that predicate, sort and layout
//! code can never refer to a field that does not exist.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One track as delivered by ingestion. Immutable once ingested.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    /// May be empty
    pub genre: String,
    /// 0..=100
    pub popularity: i64,
    /// Beats per minute
    pub tempo: f64,
    /// 0.0..=1.0
    pub energy: f64,
    /// 0.0..=1.0
    pub danceability: f64,
    pub duration_ms: i64,
    /// Kept verbatim, never parsed
    pub release_date: String,
    pub explicit: bool,
}

impl Record {
    /// Borrow the value of a single column.
    pub fn value(&self, column: ColumnId) -> CellValue<'_> {
        match column {
            ColumnId::TrackName => CellValue::Text(&self.track_name),
            ColumnId::ArtistName => CellValue::Text(&self.artist_name),
            ColumnId::AlbumName => CellValue::Text(&self.album_name),
            ColumnId::Genre => CellValue::Text(&self.genre),
            ColumnId::Popularity => CellValue::Integer(self.popularity),
            ColumnId::Tempo => CellValue::Float(self.tempo),
            ColumnId::Energy => CellValue::Float(self.energy),
            ColumnId::Danceability => CellValue::Float(self.danceability),
            ColumnId::DurationMs => CellValue::Integer(self.duration_ms),
            ColumnId::ReleaseDate => CellValue::Text(&self.release_date),
            ColumnId::Explicit => CellValue::Bool(self.explicit),
        }
    }
}

/// Identifier of a record field, in declaration order.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnId {
    TrackName,
    ArtistName,
    AlbumName,
    Genre,
    Popularity,
    Tempo,
    Energy,
    Danceability,
    DurationMs,
    ReleaseDate,
    Explicit,
}

impl ColumnId {
    /// All columns in declaration order
    pub const ALL: [ColumnId; 11] = [
        ColumnId::TrackName,
        ColumnId::ArtistName,
        ColumnId::AlbumName,
        ColumnId::Genre,
        ColumnId::Popularity,
        ColumnId::Tempo,
        ColumnId::Energy,
        ColumnId::Danceability,
        ColumnId::DurationMs,
        ColumnId::ReleaseDate,
        ColumnId::Explicit,
    ];

    /// Canonical field name, also used as the export header and storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::TrackName => "track_name",
            ColumnId::ArtistName => "artist_name",
            ColumnId::AlbumName => "album_name",
            ColumnId::Genre => "genre",
            ColumnId::Popularity => "popularity",
            ColumnId::Tempo => "tempo",
            ColumnId::Energy => "energy",
            ColumnId::Danceability => "danceability",
            ColumnId::DurationMs => "duration_ms",
            ColumnId::ReleaseDate => "release_date",
            ColumnId::Explicit => "explicit",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnId::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown column: {s}"))
    }
}

/// A borrowed, typed cell value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue<'_> {
    /// Stringified form used by equality predicates and global search.
    pub fn to_string(&self) -> String {
        match self {
            CellValue::Text(s) => (*s).to_string(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Float(n) => n.to_string(),
            CellValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        }
    }

    /// Numeric view for range predicates. Text and booleans have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Float(n) => Some(*n),
            CellValue::Text(_) | CellValue::Bool(_) => None,
        }
    }

    /// Order two values of the same column.
    ///
    /// Strings compare on the raw value, numbers numerically (floats with a
    /// total order), booleans `false < true`.
    pub fn compare(&self, other: &CellValue<'_>) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.to_string().cmp(&b.to_string()),
            },
        }
    }
}

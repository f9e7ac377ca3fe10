//! CSV and TSV ingestion and export for track tables.
//!
//! Ingestion turns a delimited byte stream with a header row into an ordered
//! sequence of [`Record`]s. It is tolerant per field (a missing or invalid
//! value becomes `""`, `0` or `false`) and strict per stream (an empty or
//! undecodable stream is a single descriptive [`DataError`]).
//!
//! ## Header aliasing
//!
//! Each field accepts its canonical name and a few human-readable variants,
//! e.g. `track_name` or `Track Name`. The view engine never sees raw header
//! names.
//!
//! ## Memory Limits
//!
//! - Files larger than [`MAX_INGEST_SIZE_MB`]MB are rejected
//! - Streams with more than [`MAX_INGEST_ROWS`] rows are rejected

use crate::constants::{EXPORT_FILE_PREFIX, MAX_INGEST_ROWS, MAX_INGEST_SIZE_MB};
use crate::data::error::{DataError, DataResult};
use crate::data::record::{ColumnId, Record};
use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Options controlling a single ingestion
#[derive(Clone, Debug)]
pub struct IngestOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Maximum number of data rows accepted
    pub max_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_rows: MAX_INGEST_ROWS,
        }
    }
}

/// Header names accepted for each field, canonical name first
fn header_aliases(column: ColumnId) -> &'static [&'static str] {
    match column {
        ColumnId::TrackName => &["track_name", "Track Name"],
        ColumnId::ArtistName => &["artist_name", "Artist Name", "artist"],
        ColumnId::AlbumName => &["album_name", "Album Name", "album"],
        ColumnId::Genre => &["genre", "playlist_genre"],
        ColumnId::Popularity => &["popularity"],
        ColumnId::Tempo => &["tempo"],
        ColumnId::Energy => &["energy"],
        ColumnId::Danceability => &["danceability"],
        ColumnId::DurationMs => &["duration_ms"],
        ColumnId::ReleaseDate => &["release_date", "track_album_release_date"],
        ColumnId::Explicit => &["explicit"],
    }
}

/// Position of each field in the header row, if present.
///
/// Aliases are tried in order, so the canonical name wins when a file
/// carries both spellings.
#[derive(Debug, Default)]
struct HeaderMap {
    positions: [Option<usize>; ColumnId::ALL.len()],
}

impl HeaderMap {
    fn resolve(headers: &StringRecord) -> Self {
        let mut map = HeaderMap::default();
        for (slot, column) in ColumnId::ALL.iter().enumerate() {
            map.positions[slot] = header_aliases(*column)
                .iter()
                .find_map(|alias| headers.iter().position(|h| h.trim() == *alias));
        }
        map
    }

    fn is_empty(&self) -> bool {
        self.positions.iter().all(Option::is_none)
    }

    fn field<'r>(&self, row: &'r StringRecord, column: ColumnId) -> Option<&'r str> {
        let slot = ColumnId::ALL.iter().position(|c| *c == column)?;
        self.positions[slot].and_then(|idx| row.get(idx))
    }
}

/// Parse a track file from disk.
///
/// Detects the delimiter from the extension (`.tsv` uses tab) or from the
/// first lines of content; `options.delimiter` is ignored. The row limit
/// in `options` applies.
pub fn parse_tracks_file(path: &Path, options: &IngestOptions) -> DataResult<Vec<Record>> {
    let metadata = std::fs::metadata(path)?;
    let size_mb = metadata.len() / (1024 * 1024);
    if size_mb > MAX_INGEST_SIZE_MB as u64 {
        return Err(DataError::TooLarge {
            size_mb,
            max_mb: MAX_INGEST_SIZE_MB,
        });
    }

    let bytes = std::fs::read(path)?;
    let options = IngestOptions {
        delimiter: detect_delimiter(Some(path), &bytes),
        ..options.clone()
    };
    parse_tracks(&bytes, &options)
}

/// Parse a delimited byte stream into records.
pub fn parse_tracks(bytes: &[u8], options: &IngestOptions) -> DataResult<Vec<Record>> {
    parse_tracks_reader(bytes, options)
}

/// Parse delimited text from any reader into records.
pub fn parse_tracks_reader<R: Read>(reader: R, options: &IngestOptions) -> DataResult<Vec<Record>> {
    let start = std::time::Instant::now();
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(DataError::EmptyFile);
    }
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DataError::NoColumns);
    }

    let header_map = HeaderMap::resolve(&headers);
    if header_map.is_empty() {
        return Err(DataError::MissingColumns(
            headers.iter().collect::<Vec<_>>().join(", "),
        ));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if records.len() >= options.max_rows {
            return Err(DataError::TooManyRows {
                rows: records.len() + 1,
                max_rows: options.max_rows,
            });
        }
        records.push(record_from_row(&header_map, &row));
    }

    debug!(
        "Ingested {} tracks ({} header fields) in {:?}",
        records.len(),
        headers.len(),
        start.elapsed()
    );
    Ok(records)
}

fn record_from_row(map: &HeaderMap, row: &StringRecord) -> Record {
    let text = |column| map.field(row, column).unwrap_or_default().to_string();
    let number = |column| parse_number(map.field(row, column), column);

    Record {
        track_name: text(ColumnId::TrackName),
        artist_name: text(ColumnId::ArtistName),
        album_name: text(ColumnId::AlbumName),
        genre: text(ColumnId::Genre),
        popularity: number(ColumnId::Popularity).round().clamp(0.0, 100.0) as i64,
        tempo: number(ColumnId::Tempo),
        energy: number(ColumnId::Energy),
        danceability: number(ColumnId::Danceability),
        duration_ms: number(ColumnId::DurationMs).round().max(0.0) as i64,
        release_date: text(ColumnId::ReleaseDate),
        explicit: parse_flag(map.field(row, ColumnId::Explicit)),
    }
}

/// Parse a numeric field; anything missing, unparsable or non-finite is 0
fn parse_number(value: Option<&str>, column: ColumnId) -> f64 {
    let Some(raw) = value else {
        return 0.0;
    };
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => {
            if !trimmed.is_empty() {
                trace!("Defaulting {column} value {trimmed:?} to 0");
            }
            0.0
        }
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    value
        .map(|v| {
            matches!(
                v.trim().to_lowercase().as_str(),
                "true" | "1" | "yes" | "y" | "t"
            )
        })
        .unwrap_or(false)
}

/// Detect the delimiter to use for parsing
pub fn detect_delimiter(path: Option<&Path>, content: &[u8]) -> u8 {
    if let Some(ext) = path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        if ext.eq_ignore_ascii_case("tsv") {
            return b'\t';
        }
    }

    // Count delimiters in first few lines to determine most likely
    let sample = String::from_utf8_lossy(&content[..content.len().min(4096)]);
    let first_lines: String = sample.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let semicolon_count = first_lines.matches(';').count();

    if tab_count > comma_count && tab_count > semicolon_count {
        b'\t'
    } else if semicolon_count > comma_count {
        b';'
    } else {
        b','
    }
}

/// Check if a file path looks like a delimited track file
pub fn is_data_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "csv" | "tsv"))
        .unwrap_or(false)
}

/// Write records as delimited text: header row first, every field quoted.
pub fn write_tracks_csv<'a, W, I>(writer: W, records: I) -> DataResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record(ColumnId::ALL.iter().map(|c| c.as_str()))?;
    for record in records {
        csv_writer.write_record(ColumnId::ALL.iter().map(|c| record.value(*c).to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export records into an in-memory byte buffer
pub fn export_tracks<'a, I>(records: I) -> DataResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buffer = Vec::new();
    write_tracks_csv(&mut buffer, records)?;
    Ok(buffer)
}

/// File name for an export, e.g. `spotify-tracks-selected-2024-03-01.csv`
pub fn export_file_name(selected_only: bool, date: NaiveDate) -> String {
    let scope = if selected_only { "-selected" } else { "" };
    format!("{}{}-{}.csv", EXPORT_FILE_PREFIX, scope, date.format("%Y-%m-%d"))
}

/// Today's date on the local clock, for export file names
pub fn export_date_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

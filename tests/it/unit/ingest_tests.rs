//! Unit tests for ingestion and export.

use std::fs;
use tempfile::tempdir;
use tracktable::data::{
    DataError, IngestOptions, export_tracks, is_data_file, parse_tracks, parse_tracks_file,
};

const SPOTIFY_HEADER: &str = "track_name,artist_name,album_name,genre,popularity,tempo,energy,danceability,duration_ms,release_date,explicit";

#[test]
fn test_full_row_is_normalized() {
    let content = format!(
        "{}\nYellow,Coldplay,Parachutes,rock,90,173.4,0.66,0.43,266773,2000-07-10,False\n",
        SPOTIFY_HEADER
    );
    let records = parse_tracks(content.as_bytes(), &IngestOptions::default()).unwrap();
    assert_eq!(records.len(), 1);

    let track = &records[0];
    assert_eq!(track.track_name, "Yellow");
    assert_eq!(track.artist_name, "Coldplay");
    assert_eq!(track.album_name, "Parachutes");
    assert_eq!(track.genre, "rock");
    assert_eq!(track.popularity, 90);
    assert!((track.tempo - 173.4).abs() < 1e-9);
    assert!((track.energy - 0.66).abs() < 1e-9);
    assert!((track.danceability - 0.43).abs() < 1e-9);
    assert_eq!(track.duration_ms, 266_773);
    assert_eq!(track.release_date, "2000-07-10");
    assert!(!track.explicit);
}

#[test]
fn test_human_readable_headers_with_padding() {
    let content = " Track Name , Artist Name ,Album Name\nSong,Someone,Record\n";
    let records = parse_tracks(content.as_bytes(), &IngestOptions::default()).unwrap();
    assert_eq!(records[0].track_name, "Song");
    assert_eq!(records[0].artist_name, "Someone");
    assert_eq!(records[0].album_name, "Record");
}

#[test]
fn test_explicit_flag_spellings() {
    let content = "track_name,explicit\na,TRUE\nb,1\nc,yes\nd,Y\ne,t\nf,no\ng,\n";
    let records = parse_tracks(content.as_bytes(), &IngestOptions::default()).unwrap();
    let flags: Vec<bool> = records.iter().map(|r| r.explicit).collect();
    assert_eq!(flags, vec![true, true, true, true, true, false, false]);
}

#[test]
fn test_quoted_fields_with_delimiters() {
    let content = "track_name,artist_name\n\"Hello, Goodbye\",\"The \"\"Fab\"\" Four\"\n";
    let records = parse_tracks(content.as_bytes(), &IngestOptions::default()).unwrap();
    assert_eq!(records[0].track_name, "Hello, Goodbye");
    assert_eq!(records[0].artist_name, "The \"Fab\" Four");
}

#[test]
fn test_parse_tsv_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tracks.tsv");
    fs::write(&path, "track_name\tpopularity\nA\t12\nB\t34\n").unwrap();

    let records = parse_tracks_file(&path, &IngestOptions::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].popularity, 34);
}

#[test]
fn test_file_parse_honors_row_limit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tracks.csv");
    fs::write(&path, "track_name\na\nb\nc\nd\n").unwrap();

    let options = IngestOptions {
        max_rows: 2,
        ..IngestOptions::default()
    };
    let result = parse_tracks_file(&path, &options);
    assert!(matches!(
        result,
        Err(DataError::TooManyRows { rows: 3, max_rows: 2 })
    ));
}

#[test]
fn test_file_parse_detects_delimiter_over_options() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tracks.txt");
    fs::write(&path, "track_name;genre\nA;rock\n").unwrap();

    let records = parse_tracks_file(&path, &IngestOptions::default()).unwrap();
    assert_eq!(records[0].genre, "rock");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = parse_tracks_file(&dir.path().join("missing.csv"), &IngestOptions::default());
    assert!(matches!(result, Err(DataError::Io(_))));
}

#[test]
fn test_header_only_file_is_empty_dataset() {
    let records = parse_tracks(b"track_name,genre\n", &IngestOptions::default()).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_error_message_names_the_headers() {
    let err = parse_tracks(b"id,title\n1,x\n", &IngestOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No recognized track columns in header: id, title"
    );
}

#[test]
fn test_is_data_file() {
    assert!(is_data_file(std::path::Path::new("tracks.CSV")));
    assert!(is_data_file(std::path::Path::new("tracks.tsv")));
    assert!(!is_data_file(std::path::Path::new("tracks.json")));
}

#[test]
fn test_export_then_import_preserves_records() {
    let content = format!(
        "{}\nYellow,Coldplay,Parachutes,rock,90,173.4,0.66,0.43,266773,2000-07-10,true\n\
         \"Hello, Goodbye\",The Beatles,,pop,75,96,0.5,0.6,208000,1967,false\n",
        SPOTIFY_HEADER
    );
    let records = parse_tracks(content.as_bytes(), &IngestOptions::default()).unwrap();
    let exported = export_tracks(&records).unwrap();
    let reimported = parse_tracks(&exported, &IngestOptions::default()).unwrap();
    assert_eq!(reimported, records);
}

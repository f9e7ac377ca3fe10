//! Background ingestion.
//!
//! Parsing a large file can take longer than a frame, so ingestion runs on a
//! worker thread and hands its result back over a channel. The owner polls
//! [`PendingLoad::poll`] from its own loop; nothing is shared but the
//! channel.

use super::csv_parser::{IngestOptions, parse_tracks, parse_tracks_file};
use super::error::{DataError, DataResult};
use super::record::Record;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, error};

/// State of a background load as seen by its owner
#[derive(Debug)]
pub enum LoadStatus {
    /// The worker has not finished yet
    Pending,
    /// The worker finished; the result can only be taken once
    Ready(DataResult<Vec<Record>>),
}

/// Handle to an ingestion running on a worker thread
#[derive(Debug)]
pub struct PendingLoad {
    rx: Option<Receiver<DataResult<Vec<Record>>>>,
}

impl PendingLoad {
    fn spawn<F>(name: &str, job: F) -> Self
    where
        F: FnOnce() -> DataResult<Vec<Record>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let task_name = name.to_string();
        let spawned = thread::Builder::new()
            .name(format!("ingest-{}", name))
            .spawn(move || {
                let start = std::time::Instant::now();
                let result = job();
                match &result {
                    Ok(records) => debug!(
                        "Task '{}' ingested {} tracks in {:?}",
                        task_name,
                        records.len(),
                        start.elapsed()
                    ),
                    Err(e) => error!("Task '{}' failed: {}", task_name, e),
                }
                // Receiver may already be gone if the load was superseded
                let _ = tx.send(result);
            });

        match spawned {
            Ok(_) => Self { rx: Some(rx) },
            Err(e) => {
                error!("Failed to spawn ingestion thread: {}", e);
                let (tx, rx) = mpsc::channel();
                let _ = tx.send(Err(DataError::Io(e)));
                Self { rx: Some(rx) }
            }
        }
    }

    /// Check for a finished result without blocking.
    pub fn poll(&mut self) -> LoadStatus {
        let Some(rx) = self.rx.as_ref() else {
            return LoadStatus::Ready(Err(DataError::Other(
                "load result already taken".to_string(),
            )));
        };
        match rx.try_recv() {
            Ok(result) => {
                self.rx = None;
                LoadStatus::Ready(result)
            }
            Err(TryRecvError::Empty) => LoadStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                LoadStatus::Ready(Err(DataError::Other(
                    "ingestion worker exited without a result".to_string(),
                )))
            }
        }
    }

    /// Block until the worker finishes.
    pub fn wait(mut self) -> DataResult<Vec<Record>> {
        match self.rx.take() {
            Some(rx) => rx.recv().unwrap_or_else(|_| {
                Err(DataError::Other(
                    "ingestion worker exited without a result".to_string(),
                ))
            }),
            None => Err(DataError::Other("load result already taken".to_string())),
        }
    }

    /// Whether a result is still outstanding
    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }
}

/// Ingest an in-memory byte stream on a worker thread.
pub fn spawn_ingest(bytes: Vec<u8>, options: IngestOptions) -> PendingLoad {
    PendingLoad::spawn("bytes", move || parse_tracks(&bytes, &options))
}

/// Ingest a file on a worker thread. The delimiter is detected from the
/// file, so only the limits in `options` apply.
pub fn spawn_ingest_file(path: PathBuf, options: IngestOptions) -> PendingLoad {
    PendingLoad::spawn("file", move || parse_tracks_file(&path, &options))
}

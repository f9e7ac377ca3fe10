//! Performance monitoring utilities.
//!
//! Provides timing instrumentation for the view pipeline so slow
//! recomputations show up in the logs.
//!
//! ## Features
//!
//! - **Scoped timers**: RAII-style timing for code blocks
//! - **Aggregated statistics**: Per-stage rolling timing windows
//! - **Render metrics**: How much of the result the window keeps off screen
//!
//! ## Usage
//!
//! ```ignore
//! use tracktable::perf::ScopedTimer;
//!
//! fn recompute() {
//!     let _timer = ScopedTimer::with_default_threshold("recompute");
//!     // ... work ...
//! }
//! ```

use crate::constants::RECOMPUTE_WARN_MS;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

/// Number of samples to keep for operation statistics
const STATS_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Operation Statistics
// ============================================================================

/// Statistics for a specific operation type.
#[derive(Debug, Clone)]
pub struct OperationStats {
    /// Recent timing samples in milliseconds
    samples: VecDeque<f64>,
    /// Total invocation count
    count: u64,
    /// Minimum observed time
    min_ms: f64,
    /// Maximum observed time
    max_ms: f64,
    /// Running sum for average calculation
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            min_ms: f64::MAX,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    /// Record a new timing sample.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    /// Get the average time over recent samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    /// Get the p95 (95th percentile) time.
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }

    /// Total number of samples ever recorded
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of samples in the rolling window
    pub fn window_len(&self) -> usize {
        self.samples.len()
    }

    pub fn min_ms(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.min_ms }
    }

    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }
}

// ============================================================================
// Pipeline Monitor
// ============================================================================

/// Per-stage timing statistics for pipeline recomputation.
#[derive(Debug, Default)]
pub struct PipelineMonitor {
    stages: HashMap<&'static str, OperationStats>,
}

impl PipelineMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stage timing.
    pub fn record(&mut self, stage: &'static str, elapsed_ms: f64) {
        self.stages.entry(stage).or_default().record(elapsed_ms);
    }

    /// Get statistics for a specific stage.
    pub fn stats(&self, stage: &str) -> Option<&OperationStats> {
        self.stages.get(stage)
    }

    /// Log the slowest stages at debug level.
    pub fn log_summary(&self) {
        let mut stages: Vec<_> = self.stages.iter().collect();
        stages.sort_by(|a, b| b.1.average().total_cmp(&a.1.average()));

        debug!("Pipeline stage timings:");
        for (name, stats) in stages.iter().take(5) {
            debug!(
                "  {}: avg={:.2}ms, p95={:.2}ms, max={:.2}ms, count={}",
                name,
                stats.average(),
                stats.p95(),
                stats.max_ms(),
                stats.count()
            );
        }
    }

    /// Reset all statistics.
    pub fn reset(&mut self) {
        self.stages.clear();
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that logs duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    /// Create a new scoped timer with a warning threshold.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Create a timer with the default threshold (one 60 FPS frame).
    pub fn with_default_threshold(name: &'static str) -> Self {
        Self::new(name, RECOMPUTE_WARN_MS)
    }

    /// Get elapsed time without stopping the timer.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        } else {
            debug!("{}: {:.2}ms", self.name, elapsed_ms);
        }
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Measure execution time of a closure and return both the result and elapsed time.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}

// ============================================================================
// Render Metrics
// ============================================================================

/// How much work virtualization saves for the current view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderMetrics {
    /// Rows in the sequence being windowed (page or full result)
    pub total_rows: usize,
    /// Rows actually materialized
    pub rendered_rows: usize,
    /// Rows matching the current filters
    pub filtered_rows: usize,
    /// Rows in the dataset
    pub dataset_rows: usize,
}

impl RenderMetrics {
    /// Percentage of rows kept off screen, 0..=100
    pub fn reduction_percent(&self) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        let skipped = self.total_rows.saturating_sub(self.rendered_rows);
        skipped as f64 / self.total_rows as f64 * 100.0
    }
}

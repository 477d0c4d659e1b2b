// ═══════════════════════════════════════════════════════════════
// INGEST METRICS - what the load did, counted without locks
// ═══════════════════════════════════════════════════════════════
//
// The mapper never fails a row, it quietly degrades bad cells to their
// defaults. These counters are where that quiet becomes visible: how many
// rows came in, how many numeric cells had text we couldn't read, how many
// dates were the 1899 placeholder, and how long the fetch took.

use std::time::Duration;

use portable_atomic::{AtomicF64, AtomicU64, Ordering};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct IngestSnapshot {
    pub fetch_attempts: u64,
    pub fetch_failures: u64,
    pub rows_received: u64,
    pub rows_mapped: u64,
    pub numeric_cells_zeroed: u64,
    pub sentinel_dates: u64,
    pub date_fallbacks: u64,
    pub last_fetch_seconds: f64,
}

#[derive(Debug)]
pub struct IngestMetrics {
    fetch_attempts: AtomicU64,
    fetch_failures: AtomicU64,
    rows_received: AtomicU64,
    rows_mapped: AtomicU64,
    numeric_cells_zeroed: AtomicU64,
    sentinel_dates: AtomicU64,
    date_fallbacks: AtomicU64,
    last_fetch_seconds: AtomicF64,
}

impl Default for IngestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestMetrics {
    pub fn new() -> Self {
        Self {
            fetch_attempts: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
            rows_received: AtomicU64::new(0),
            rows_mapped: AtomicU64::new(0),
            numeric_cells_zeroed: AtomicU64::new(0),
            sentinel_dates: AtomicU64::new(0),
            date_fallbacks: AtomicU64::new(0),
            last_fetch_seconds: AtomicF64::new(0.0),
        }
    }

    pub fn record_fetch(&self, elapsed: Duration, ok: bool) {
        self.fetch_attempts.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.fetch_failures.fetch_add(1, Ordering::Relaxed);
        }
        self.last_fetch_seconds
            .store(elapsed.as_secs_f64(), Ordering::Relaxed);
    }

    pub fn add_rows_received(&self, n: usize) {
        self.rows_received.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub fn increment_rows_mapped(&self) {
        self.rows_mapped.fetch_add(1, Ordering::Relaxed);
    }

    /// A numeric cell had content that didn't read as a number.
    pub fn increment_numeric_zeroed(&self) {
        self.numeric_cells_zeroed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_sentinel_dates(&self) {
        self.sentinel_dates.fetch_add(1, Ordering::Relaxed);
    }

    /// A date cell had content that didn't parse and the fallback was used.
    pub fn increment_date_fallbacks(&self) {
        self.date_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> IngestSnapshot {
        IngestSnapshot {
            fetch_attempts: self.fetch_attempts.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            rows_received: self.rows_received.load(Ordering::Relaxed),
            rows_mapped: self.rows_mapped.load(Ordering::Relaxed),
            numeric_cells_zeroed: self.numeric_cells_zeroed.load(Ordering::Relaxed),
            sentinel_dates: self.sentinel_dates.load(Ordering::Relaxed),
            date_fallbacks: self.date_fallbacks.load(Ordering::Relaxed),
            last_fetch_seconds: self.last_fetch_seconds.load(Ordering::Relaxed),
        }
    }
}

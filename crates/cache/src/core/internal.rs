//! Internal counters and clock helpers

use crate::types::StoreStats;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Atomic counters behind [`StoreStats`]
#[derive(Debug, Default)]
pub struct StoreCounters {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub expired: AtomicU64,
    pub corrupt: AtomicU64,
    pub read_errors: AtomicU64,
    pub writes: AtomicU64,
    pub write_errors: AtomicU64,
    pub removals: AtomicU64,
    pub vacuum_runs: AtomicU64,
    pub vacuum_removed: AtomicU64,
    pub vacuum_errors: AtomicU64,
}

impl StoreCounters {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expired(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_corrupt(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.corrupt.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_read_error(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_vacuum(&self, removed: u64, errors: u64) {
        self.vacuum_runs.fetch_add(1, Ordering::Relaxed);
        self.vacuum_removed.fetch_add(removed, Ordering::Relaxed);
        self.vacuum_errors.fetch_add(errors, Ordering::Relaxed);
    }

    pub fn snapshot(&self, lock_entries: usize) -> StoreStats {
        StoreStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            corrupt: self.corrupt.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            vacuum_runs: self.vacuum_runs.load(Ordering::Relaxed),
            vacuum_removed: self.vacuum_removed.load(Ordering::Relaxed),
            vacuum_errors: self.vacuum_errors.load(Ordering::Relaxed),
            lock_entries,
        }
    }
}

/// Time since the Unix epoch; a clock before 1970 reads as zero
pub fn unix_now() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

/// Shortest ttl a record is written with
pub const MIN_TTL: Duration = Duration::from_secs(1);

/// Expiry timestamp for a record written at `now` with `ttl`.
///
/// The deadline is truncated to whole seconds, so a record expires up to one
/// second early and never late. `ttl` is clamped to [`MIN_TTL`] so the
/// stored second is always after `now`.
pub fn expires_at(now: Duration, ttl: Duration) -> u64 {
    now.saturating_add(ttl.max(MIN_TTL)).as_secs()
}

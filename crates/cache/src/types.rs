//! Public result and statistics types

use serde::{Deserialize, Serialize};

/// Outcome of a detailed lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Live record; the payload is returned unmodified
    Hit(Vec<u8>),
    /// Nothing usable at the key's path
    Miss(MissReason),
}

/// Why a lookup missed. `Store::get` collapses all of these into `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// No file at the record path
    Absent,
    /// Record expiry is at or before now
    Expired,
    /// File is shorter than the expiry prefix
    Corrupt,
    /// The file exists but could not be read
    Unreadable,
}

impl MissReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Expired => "expired",
            Self::Corrupt => "corrupt",
            Self::Unreadable => "unreadable",
        }
    }
}

impl std::fmt::Display for MissReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Lookup {
    /// Collapse to the payload, discarding the miss reason
    pub fn into_payload(self) -> Option<Vec<u8>> {
        match self {
            Self::Hit(payload) => Some(payload),
            Self::Miss(_) => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// Snapshot of store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub hits: u64,
    /// All misses, including the expired/corrupt/unreadable ones counted below
    pub misses: u64,
    pub expired: u64,
    pub corrupt: u64,
    pub read_errors: u64,
    pub writes: u64,
    pub write_errors: u64,
    pub removals: u64,
    pub vacuum_runs: u64,
    /// Records (expired or corrupt) and temp files deleted by the vacuum
    pub vacuum_removed: u64,
    pub vacuum_errors: u64,
    /// Keys with a live entry in the lock table
    pub lock_entries: usize,
}

impl StoreStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Result of one vacuum sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacuumReport {
    /// Files visited
    pub scanned: u64,
    /// Expired records deleted
    pub expired: u64,
    /// Corrupt records deleted
    pub corrupt: u64,
    /// Stale temp files from interrupted writes deleted
    pub orphaned_temp: u64,
    /// Files skipped because a reader or writer held them
    pub busy: u64,
    /// Per-file or walk failures; the sweep continued past each one
    pub errors: u64,
}

impl VacuumReport {
    pub fn removed(&self) -> u64 {
        self.expired + self.corrupt + self.orphaned_temp
    }
}

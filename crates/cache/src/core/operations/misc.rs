//! Path lookup and statistics

use crate::core::types::Store;
use crate::keys::shard_path;
use crate::types::StoreStats;
use std::path::PathBuf;

impl Store {
    /// On-disk location of the record for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        shard_path(&self.inner.root, key)
    }

    /// Snapshot of the store counters
    pub fn stats(&self) -> StoreStats {
        self.inner.stats.snapshot(self.inner.locks.len())
    }
}

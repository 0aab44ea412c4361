//! Per-key reader/writer locks
//!
//! Each record path gets its own `tokio::sync::RwLock`, created on first use.
//! The map itself is a `DashMap`, so finding or inserting a lock only holds
//! one map shard for the duration of a hash lookup; unrelated keys never wait
//! on each other. An entry is dropped from the map once the last guard for it
//! is released and nobody is waiting on it.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Table of per-path locks owned by a store
#[derive(Debug, Default)]
pub struct KeyLockTable {
    locks: DashMap<PathBuf, Arc<RwLock<()>>>,
}

/// Guard for one path. Releasing it may prune the table entry.
pub struct KeyGuard<'a, G> {
    table: &'a KeyLockTable,
    path: PathBuf,
    guard: Option<G>,
}

pub type KeyReadGuard<'a> = KeyGuard<'a, OwnedRwLockReadGuard<()>>;
pub type KeyWriteGuard<'a> = KeyGuard<'a, OwnedRwLockWriteGuard<()>>;

impl KeyLockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared access to `path`; any number of readers may hold it at once
    pub async fn read(&self, path: &Path) -> KeyReadGuard<'_> {
        let guard = self.lock_for(path).read_owned().await;
        KeyGuard {
            table: self,
            path: path.to_path_buf(),
            guard: Some(guard),
        }
    }

    /// Exclusive access to `path`
    pub async fn write(&self, path: &Path) -> KeyWriteGuard<'_> {
        let guard = self.lock_for(path).write_owned().await;
        KeyGuard {
            table: self,
            path: path.to_path_buf(),
            guard: Some(guard),
        }
    }

    /// Exclusive access to `path` if nobody holds it right now
    pub fn try_write(&self, path: &Path) -> Option<KeyWriteGuard<'_>> {
        match self.lock_for(path).try_write_owned() {
            Ok(guard) => Some(KeyGuard {
                table: self,
                path: path.to_path_buf(),
                guard: Some(guard),
            }),
            Err(_) => {
                self.release(path);
                None
            }
        }
    }

    /// Number of paths with a live lock entry
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn lock_for(&self, path: &Path) -> Arc<RwLock<()>> {
        if let Some(lock) = self.locks.get(path) {
            return Arc::clone(lock.value());
        }
        Arc::clone(self.locks.entry(path.to_path_buf()).or_default().value())
    }

    // Only the map holds the Arc: no guard is alive and no task is waiting.
    // The check runs under the shard write lock, which `lock_for` also takes
    // to insert, so a concurrent acquirer either sees the entry or recreates it.
    fn release(&self, path: &Path) {
        self.locks
            .remove_if(path, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl<G> KeyGuard<'_, G> {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<G> Drop for KeyGuard<'_, G> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.table.release(&self.path);
    }
}

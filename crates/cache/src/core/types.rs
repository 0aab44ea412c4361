//! Core store types and structures

use crate::concurrent::KeyLockTable;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::internal::StoreCounters;

/// Disk-backed TTL key/value store
///
/// Cloning is cheap; every clone shares the same lock table, counters and
/// vacuum task.
#[derive(Clone)]
pub struct Store {
    pub(super) inner: Arc<StoreInner>,
}

pub(super) struct StoreInner {
    /// Cache root; every record lives below it
    pub root: PathBuf,
    /// Period of the background vacuum, zero when disabled
    pub cleanup_interval: Duration,
    /// Per-record locks
    pub locks: KeyLockTable,
    /// Statistics
    pub stats: StoreCounters,
    /// Background vacuum task, `None` once shut down or when disabled
    pub vacuum: Mutex<Option<VacuumTask>>,
}

pub(super) struct VacuumTask {
    pub shutdown: watch::Sender<bool>,
    pub handle: JoinHandle<()>,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        // The loop finishes the file it is on and exits
        if let Some(task) = self.vacuum.get_mut().take() {
            let _ = task.shutdown.send(true);
        }
    }
}

impl Store {
    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Configured vacuum period (zero means the background vacuum is off)
    pub fn cleanup_interval(&self) -> Duration {
        self.inner.cleanup_interval
    }

    /// Whether the background vacuum task is still attached to this store
    pub fn vacuum_running(&self) -> bool {
        self.inner
            .vacuum
            .lock()
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("root", &self.inner.root)
            .field("cleanup_interval", &self.inner.cleanup_interval)
            .field("lock_entries", &self.inner.locks.len())
            .finish()
    }
}

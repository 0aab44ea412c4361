//! Store construction

use crate::concurrent::KeyLockTable;
use crate::config::StoreConfig;
use crate::errors::{Result, StoreError};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;

use super::internal::StoreCounters;
use super::types::{Store, StoreInner};
use super::vacuum::start_vacuum_task;

impl Store {
    /// Open a store rooted at `root`, creating the directory if absent.
    ///
    /// The background vacuum runs every `cleanup_interval`, first firing one
    /// interval after construction. A zero interval disables it; call
    /// [`Store::vacuum`] to sweep manually. Must be called within a tokio
    /// runtime.
    pub async fn new(root: impl Into<PathBuf>, cleanup_interval: Duration) -> Result<Self> {
        let root = root.into();

        match fs::create_dir_all(&root).await {
            Ok(()) => {}
            Err(e) => return Err(StoreError::io(root, "create cache root", e)),
        }

        let inner = Arc::new(StoreInner {
            root,
            cleanup_interval,
            locks: KeyLockTable::new(),
            stats: StoreCounters::default(),
            vacuum: Mutex::new(None),
        });

        let store = Self { inner };

        start_vacuum_task(&store);

        Ok(store)
    }

    /// Validate `config` and open the store it describes
    pub async fn from_config(config: &StoreConfig) -> Result<Self> {
        match config.validate() {
            Ok(()) => {}
            Err(e) => return Err(e),
        }
        Self::new(config.path.clone(), config.cleanup).await
    }
}

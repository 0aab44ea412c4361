//! Record removal

use crate::core::types::Store;
use crate::errors::{Result, StoreError};
use crate::keys::shard_path;
use tokio::fs;

impl Store {
    /// Delete the record for `key`. Returns `false` if there was none.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        let path = shard_path(&self.inner.root, key);
        let _guard = self.inner.locks.write(&path).await;

        match fs::remove_file(&path).await {
            Ok(()) => {
                self.inner.stats.record_removal();
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, "remove cache record", e)),
        }
    }
}

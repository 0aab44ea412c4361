//! Record writes

use crate::core::internal::{expires_at, unix_now};
use crate::core::types::Store;
use crate::errors::{Result, StoreError};
use crate::keys::shard_path;
use crate::storage::{encode, write_atomic};
use std::time::Duration;
use tokio::fs;

impl Store {
    /// Store `payload` under `key` for `ttl`, replacing any previous record.
    ///
    /// A zero `ttl` is rejected before the filesystem is touched; a ttl under
    /// one second is stored as one second. Filesystem failures are returned;
    /// callers treat them as "serve uncached".
    pub async fn set(&self, key: &str, payload: &[u8], ttl: Duration) -> Result<()> {
        if ttl.is_zero() {
            return Err(StoreError::invalid_argument("ttl must be greater than zero"));
        }

        let path = shard_path(&self.inner.root, key);
        let parent = match path.parent() {
            Some(p) => p.to_path_buf(),
            None => {
                return Err(StoreError::invalid_argument(format!(
                    "record path '{}' has no parent directory",
                    path.display()
                )))
            }
        };

        let record = encode(expires_at(unix_now(), ttl), payload);

        let _guard = self.inner.locks.write(&path).await;

        match fs::create_dir_all(&parent).await {
            Ok(()) => {}
            Err(e) => {
                self.inner.stats.record_write_error();
                return Err(StoreError::io(parent, "create shard directory", e));
            }
        }

        match write_atomic(&path, &record).await {
            Ok(()) => {}
            Err(e) => {
                self.inner.stats.record_write_error();
                tracing::warn!(key, "Failed to write cache record: {}", e);
                return Err(e);
            }
        }

        self.inner.stats.record_write();
        tracing::trace!(key, bytes = payload.len(), ttl_secs = ttl.as_secs(), "cache write");
        Ok(())
    }
}

//! Record reads

use crate::core::types::Store;
use crate::keys::shard_path;
use crate::storage::{decode, RECORD_HEADER_LEN};
use crate::types::{Lookup, MissReason};
use tokio::fs;

use crate::core::internal::unix_now;

impl Store {
    /// Read the payload stored under `key`.
    ///
    /// Missing, expired, corrupt and unreadable records all return `None`;
    /// the distinction is only visible through logs and [`Store::stats`].
    /// Expired files are left for the vacuum.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.get_detailed(key).await.into_payload()
    }

    /// Like [`Store::get`], but reports why a lookup missed
    pub async fn get_detailed(&self, key: &str) -> Lookup {
        let path = shard_path(&self.inner.root, key);

        let read = {
            let _guard = self.inner.locks.read(&path).await;
            fs::read(&path).await
        };

        let mut bytes = match read {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.inner.stats.record_miss();
                tracing::trace!(key, "cache miss");
                return Lookup::Miss(MissReason::Absent);
            }
            Err(e) => {
                self.inner.stats.record_read_error();
                tracing::warn!("Failed to read cache record {}: {}", path.display(), e);
                return Lookup::Miss(MissReason::Unreadable);
            }
        };

        let (expires_at, expired) = match decode(&path, &bytes) {
            Ok(record) => (record.expires_at, record.is_expired_at(unix_now())),
            Err(e) => {
                self.inner.stats.record_corrupt();
                tracing::warn!(key, "{}", e);
                return Lookup::Miss(MissReason::Corrupt);
            }
        };

        if expired {
            self.inner.stats.record_expired();
            tracing::trace!(key, expires_at, "cache record expired");
            return Lookup::Miss(MissReason::Expired);
        }

        self.inner.stats.record_hit();
        tracing::trace!(key, payload_len = bytes.len() - RECORD_HEADER_LEN, "cache hit");
        bytes.drain(..RECORD_HEADER_LEN);
        Lookup::Hit(bytes)
    }
}

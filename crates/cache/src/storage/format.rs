//! Record format
//!
//! A record file is an 8-byte little-endian unsigned expiry timestamp
//! (whole seconds since the Unix epoch) immediately followed by the payload.
//! There is no length field: the payload is everything after byte 8.

use crate::errors::{Result, StoreError};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Size of the expiry prefix in bytes
pub const RECORD_HEADER_LEN: usize = 8;

/// A decoded record borrowing its payload from the file bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Expiry as Unix seconds
    pub expires_at: u64,
    pub payload: &'a [u8],
}

impl Record<'_> {
    /// See [`is_expired`]
    #[inline]
    pub fn is_expired_at(&self, now: Duration) -> bool {
        is_expired(self.expires_at, now)
    }
}

/// A record whose expiry second is at or before `now` (time since the Unix
/// epoch, full precision) is treated as absent
#[inline]
pub fn is_expired(expires_at: u64, now: Duration) -> bool {
    Duration::from_secs(expires_at) <= now
}

/// Serialize a record
pub fn encode(expires_at: u64, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(RECORD_HEADER_LEN + payload.len());
    bytes.extend_from_slice(&expires_at.to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Deserialize a record. `path` is only used for error context.
pub fn decode<'a>(path: &Path, bytes: &'a [u8]) -> Result<Record<'a>> {
    match bytes.split_first_chunk::<RECORD_HEADER_LEN>() {
        Some((prefix, payload)) => Ok(Record {
            expires_at: u64::from_le_bytes(*prefix),
            payload,
        }),
        None => Err(StoreError::corrupt(
            path,
            format!(
                "record is {} bytes, shorter than the {RECORD_HEADER_LEN}-byte expiry prefix",
                bytes.len()
            ),
        )),
    }
}

/// Read only the expiry prefix of the record at `path`
pub async fn read_expiry(path: &Path) -> Result<u64> {
    let mut file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) => return Err(StoreError::io(path, "open cache record", e)),
    };

    let mut prefix = [0u8; RECORD_HEADER_LEN];
    match file.read_exact(&mut prefix).await {
        Ok(_) => Ok(u64::from_le_bytes(prefix)),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(StoreError::corrupt(
            path,
            format!("record is shorter than the {RECORD_HEADER_LEN}-byte expiry prefix"),
        )),
        Err(e) => Err(StoreError::io(path, "read cache record prefix", e)),
    }
}

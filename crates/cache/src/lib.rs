//! Disk-resident TTL store for an HTTP response cache
//!
//! This crate persists opaque byte payloads keyed by arbitrary strings:
//! - Checksum-sharded record paths (`root/h1/h2/h3/h4/<escaped key>`)
//! - An 8-byte little-endian expiry prefix in front of the raw payload
//! - Per-key reader/writer locks; distinct keys proceed in parallel
//! - A background vacuum that removes expired and corrupt records
//!
//! The HTTP layer talks to it through [`Store::get`] and [`Store::set`];
//! every failure degrades to a cache miss or an uncached response.

pub mod concurrent;
pub mod config;
pub mod core;
pub mod errors;
pub mod keys;
pub mod storage;
pub mod types;

pub use config::{ConfigSource, StoreConfig, StoreConfigBuilder};
pub use core::Store;
pub use errors::{Error, RecoveryHint, Result, StoreError};
pub use keys::{sanitize_key, shard_path, ShardHash};
pub use types::{Lookup, MissReason, StoreStats, VacuumReport};

//! The disk-backed TTL store
//!
//! This module provides the store behind the HTTP response cache:
//! - 4-level checksum sharding of record files (see `crate::keys`)
//! - Whole-file atomic writes with an embedded expiry prefix
//! - Per-key reader/writer locking; unrelated keys never contend
//! - A background vacuum that deletes expired and corrupt records

pub mod internal;

// Private modules
mod builder;
mod operations;
mod types;
mod vacuum;

// Re-export the main Store type
pub use types::Store;

#[cfg(test)]
mod tests;

//! Concurrency primitives for the store

pub mod lock_table;

pub use lock_table::{KeyGuard, KeyLockTable, KeyReadGuard, KeyWriteGuard};

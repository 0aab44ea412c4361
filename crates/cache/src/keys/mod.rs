//! Key-to-path sharding
//!
//! A cache key is mapped to `root/h1/h2/h3/h4/<sanitized-key>`. The four
//! directory levels come from the bytes of a 32-bit checksum of the raw key,
//! which bounds the number of entries in any one directory. The file name is
//! the key itself, escaped so that every key yields exactly one legal file
//! name and no two keys yield the same one.

pub mod hash;
pub mod sanitize;

pub use hash::ShardHash;
pub use sanitize::sanitize_key;

use std::path::{Path, PathBuf};

/// Number of directory levels between the root and a record file
pub const SHARD_DEPTH: usize = 4;

/// Compute the on-disk location of `key` under `root`
#[inline]
pub fn shard_path(root: &Path, key: &str) -> PathBuf {
    let mut path = shard_dir(root, key);
    path.push(sanitize_key(key));
    path
}

/// Directory holding the record for `key`
pub fn shard_dir(root: &Path, key: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in ShardHash::of(key).segments() {
        path.push(segment);
    }
    path
}

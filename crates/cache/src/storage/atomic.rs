//! Atomic record writes
//!
//! Records are written to a dot-prefixed temporary file in the destination
//! directory and renamed over the target, so a concurrent reader sees either
//! the previous file or the complete new one, never a truncated prefix.

use crate::errors::{Result, StoreError};
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

const TEMP_PREFIX: char = '.';
const TEMP_SUFFIX: &str = ".tmp";

/// Write `content` to `path` atomically. The parent directory must exist.
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) => p,
        None => {
            return Err(StoreError::invalid_argument(format!(
                "record path '{}' has no parent directory",
                path.display()
            )))
        }
    };

    // Same directory as the target so the rename never crosses filesystems
    let temp_path = parent.join(format!("{TEMP_PREFIX}{}{TEMP_SUFFIX}", Uuid::new_v4()));

    match write_and_sync(&temp_path, content).await {
        Ok(()) => {}
        Err(e) => {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }
    }

    match fs::rename(&temp_path, path).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&temp_path).await;
            Err(StoreError::io(path, "rename cache record into place", e))
        }
    }
}

async fn write_and_sync(temp_path: &Path, content: &[u8]) -> Result<()> {
    let mut file = match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(temp_path)
        .await
    {
        Ok(f) => f,
        Err(e) => return Err(StoreError::io(temp_path, "create temporary record", e)),
    };

    match file.write_all(content).await {
        Ok(()) => {}
        Err(e) => return Err(StoreError::io(temp_path, "write temporary record", e)),
    }

    match file.sync_all().await {
        Ok(()) => Ok(()),
        Err(e) => Err(StoreError::io(temp_path, "sync temporary record", e)),
    }
}

/// Whether `path` names a temporary file left by [`write_atomic`]
pub fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(TEMP_PREFIX) && name.ends_with(TEMP_SUFFIX))
}

//! Vacuum: deletion of expired and corrupt records

mod background;

pub(super) use background::start_vacuum_task;

use crate::errors::StoreError;
use crate::storage::{is_expired, is_temp_file, read_expiry};
use crate::types::VacuumReport;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::sync::watch;
use walkdir::WalkDir;

use super::internal::unix_now;
use super::types::{Store, StoreInner};

/// Temp files younger than this may belong to a write in progress
pub const ORPHAN_TEMP_GRACE: Duration = Duration::from_secs(60);

enum FileOutcome {
    Kept,
    Expired,
    Corrupt,
    Busy,
}

impl Store {
    /// Run one vacuum sweep now and report what it did
    pub async fn vacuum(&self) -> VacuumReport {
        Self::sweep(&self.inner, None).await
    }

    /// Walk the cache root and delete every expired or corrupt record.
    ///
    /// Only the listing runs up front; each file is then locked, re-checked
    /// and deleted on its own, so foreground traffic is never held up for
    /// more than one file. A failure on one file is logged and skipped.
    pub(super) async fn sweep(
        inner: &StoreInner,
        stop: Option<&watch::Receiver<bool>>,
    ) -> VacuumReport {
        let mut report = VacuumReport::default();

        let root = inner.root.clone();
        let (files, walk_errors) = match tokio::task::spawn_blocking(move || list_files(&root)).await
        {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!("Cache vacuum walk failed: {}", e);
                report.errors += 1;
                inner.stats.record_vacuum(0, report.errors);
                return report;
            }
        };
        report.errors += walk_errors;

        for path in files {
            if stop.is_some_and(|rx| *rx.borrow()) {
                tracing::debug!("Cache vacuum interrupted by shutdown");
                break;
            }
            report.scanned += 1;

            if is_temp_file(&path) {
                match remove_orphaned_temp(&path).await {
                    Ok(true) => report.orphaned_temp += 1,
                    Ok(false) => {}
                    Err(e) => {
                        report.errors += 1;
                        tracing::warn!("{}", e);
                    }
                }
                continue;
            }

            match Self::vacuum_file(inner, &path).await {
                Ok(FileOutcome::Kept) => {}
                Ok(FileOutcome::Expired) => report.expired += 1,
                Ok(FileOutcome::Corrupt) => report.corrupt += 1,
                Ok(FileOutcome::Busy) => report.busy += 1,
                Err(e) => {
                    report.errors += 1;
                    tracing::warn!("Cache vacuum skipped {}: {}", path.display(), e);
                }
            }
        }

        inner.stats.record_vacuum(report.removed(), report.errors);
        tracing::debug!(
            scanned = report.scanned,
            expired = report.expired,
            corrupt = report.corrupt,
            orphaned_temp = report.orphaned_temp,
            busy = report.busy,
            errors = report.errors,
            "Cache vacuum finished"
        );
        report
    }

    async fn vacuum_file(inner: &StoreInner, path: &Path) -> Result<FileOutcome, StoreError> {
        // A key in use right now is live traffic; the next sweep will see it
        let _guard = match inner.locks.try_write(path) {
            Some(guard) => guard,
            None => return Ok(FileOutcome::Busy),
        };

        let outcome = match read_expiry(path).await {
            Ok(expires_at) if is_expired(expires_at, unix_now()) => FileOutcome::Expired,
            Ok(_) => return Ok(FileOutcome::Kept),
            Err(StoreError::CorruptRecord { reason, .. }) => {
                tracing::warn!("Removing corrupt cache record {}: {}", path.display(), reason);
                FileOutcome::Corrupt
            }
            // Removed between the walk and now
            Err(StoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(FileOutcome::Kept)
            }
            Err(e) => return Err(e),
        };

        match fs::remove_file(path).await {
            Ok(()) => Ok(outcome),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileOutcome::Kept),
            Err(e) => Err(StoreError::io(path, "remove expired cache record", e)),
        }
    }
}

/// Every regular file below `root`, plus the number of unreadable entries
fn list_files(root: &Path) -> (Vec<PathBuf>, u64) {
    let mut files = Vec::new();
    let mut errors = 0;

    for entry in WalkDir::new(root).min_depth(1) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                errors += 1;
                tracing::warn!("Error reading cache directory entry: {}", e);
            }
        }
    }

    (files, errors)
}

async fn remove_orphaned_temp(path: &Path) -> Result<bool, StoreError> {
    let modified = match fs::metadata(path).await.and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(StoreError::io(path, "stat temporary record", e)),
    };

    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or_default();
    if age < ORPHAN_TEMP_GRACE {
        return Ok(false);
    }

    match fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!("Removed orphaned temp file {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::io(path, "remove orphaned temporary record", e)),
    }
}

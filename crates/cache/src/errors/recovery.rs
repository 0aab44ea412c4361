//! Recovery utilities for store errors

use super::types::{RecoveryHint, StoreError};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

impl StoreError {
    /// Get the recovery hint for this error
    #[must_use]
    pub const fn recovery_hint(&self) -> &RecoveryHint {
        match self {
            Self::Io { recovery_hint, .. }
            | Self::CorruptRecord { recovery_hint, .. }
            | Self::InvalidArgument { recovery_hint, .. }
            | Self::Configuration { recovery_hint, .. } => recovery_hint,
        }
    }

    /// Check if this error is transient and can be retried
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self.recovery_hint(), RecoveryHint::Retry { .. })
    }

    /// Check if this error indicates a corrupt record
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self, Self::CorruptRecord { .. })
    }
}

impl RecoveryHint {
    /// Pick a hint for a filesystem error on `path`
    pub(crate) fn for_io(error: &std::io::Error, path: &Path) -> Self {
        match error.kind() {
            ErrorKind::PermissionDenied => Self::CheckPermissions {
                path: path.to_path_buf(),
            },
            ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut => Self::Retry {
                after: Duration::from_millis(10),
            },
            ErrorKind::NotFound => Self::Ignore,
            ErrorKind::InvalidInput => Self::UpdateConfiguration,
            _ => Self::CheckDiskSpace,
        }
    }
}

//! Core error types for the cache store

use std::path::PathBuf;
use std::time::Duration;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Re-export StoreError as Error for convenience
pub use StoreError as Error;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure while reading, writing, creating or removing
    #[error("I/O error during {operation} on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
        recovery_hint: RecoveryHint,
    },

    /// A record on disk could not be decoded
    #[error("corrupt cache record '{}': {reason}", path.display())]
    CorruptRecord {
        path: PathBuf,
        reason: String,
        recovery_hint: RecoveryHint,
    },

    /// A caller supplied an argument the store refuses before touching disk
    #[error("invalid argument: {message}")]
    InvalidArgument {
        message: String,
        recovery_hint: RecoveryHint,
    },

    /// Store configuration is unusable
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        recovery_hint: RecoveryHint,
    },
}

/// Recovery hints for error handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryHint {
    /// Retry the operation
    Retry { after: Duration },

    /// Check file permissions
    CheckPermissions { path: PathBuf },

    /// Check disk space and clean up if needed
    CheckDiskSpace,

    /// Delete the offending record and retry
    ClearAndRetry,

    /// Update store configuration
    UpdateConfiguration,

    /// Operation can be safely ignored
    Ignore,
}

impl StoreError {
    /// Build an `Io` error, picking the recovery hint from the error kind
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
        let path = path.into();
        let recovery_hint = RecoveryHint::for_io(&source, &path);
        Self::Io {
            path,
            operation,
            source,
            recovery_hint,
        }
    }

    /// Build a `CorruptRecord` error
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptRecord {
            path: path.into(),
            reason: reason.into(),
            recovery_hint: RecoveryHint::ClearAndRetry,
        }
    }

    /// Build an `InvalidArgument` error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            recovery_hint: RecoveryHint::Ignore,
        }
    }

    /// Build a `Configuration` error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            recovery_hint: RecoveryHint::UpdateConfiguration,
        }
    }
}

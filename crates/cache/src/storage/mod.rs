//! On-disk record storage
//!
//! - [`format`]: the record codec (expiry prefix + raw payload)
//! - [`atomic`]: temp-file-then-rename writes

pub mod atomic;
pub mod format;

pub use atomic::{is_temp_file, write_atomic};
pub use format::{decode, encode, is_expired, read_expiry, Record, RECORD_HEADER_LEN};

//! File name escaping for cache keys

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Bytes that never appear verbatim in a record file name.
///
/// Covers path separators, characters reserved on common filesystems and the
/// escape character itself. Non-ASCII bytes are always escaped.
pub const UNSAFE_FILENAME_BYTES: &AsciiSet = &CONTROLS
    .add(b'/')
    .add(b'\\')
    .add(b':')
    .add(b'*')
    .add(b'?')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'|')
    .add(b'%');

/// File name used for the empty key. A lone `%` is never produced by escaping.
const EMPTY_KEY_NAME: &str = "%";

/// Escape `key` into a single file name.
///
/// The mapping is injective. A leading `.` is escaped too, so a record name
/// never starts with a dot: `.`/`..` cannot be produced and the store's
/// dot-prefixed temp files live in a separate namespace.
pub fn sanitize_key(key: &str) -> String {
    if key.is_empty() {
        return EMPTY_KEY_NAME.to_string();
    }

    match key.strip_prefix('.') {
        Some(rest) => format!("%2E{}", utf8_percent_encode(rest, UNSAFE_FILENAME_BYTES)),
        None => utf8_percent_encode(key, UNSAFE_FILENAME_BYTES).to_string(),
    }
}

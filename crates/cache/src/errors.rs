//! Error handling for the cache store
//!
//! Every fallible store operation returns [`StoreError`]. Each variant carries
//! a [`RecoveryHint`] so callers (the HTTP caching layer, the CLI) can decide
//! whether to retry, degrade to an uncached response, or ask an operator to
//! look at the cache directory.

mod recovery;
mod types;

pub use types::*;

//! Store configuration with precedence and validation
//!
//! Values are layered: defaults, then an optional JSON file, then the
//! `FORCECACHE_*` environment variables, then explicit overrides (the CLI).
//! Field names match the middleware configuration (`path`, `cleanup` in
//! seconds) so the same file can be shared.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`StoreConfig::path`]
pub const ENV_PATH: &str = "FORCECACHE_PATH";
/// Environment variable overriding [`StoreConfig::cleanup`], in seconds
pub const ENV_CLEANUP: &str = "FORCECACHE_CLEANUP";

/// Default vacuum period
pub const DEFAULT_CLEANUP: Duration = Duration::from_secs(5 * 60);

/// Configuration for opening a [`crate::Store`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Cache root directory, created if absent
    pub path: PathBuf,
    /// Vacuum period
    #[serde(with = "duration_secs")]
    pub cleanup: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: std::env::temp_dir().join("forcecache"),
            cleanup: DEFAULT_CLEANUP,
        }
    }
}

impl StoreConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::configuration(format!("invalid store configuration: {e}")))
    }

    /// Check the configuration is usable for a long-running store
    pub fn validate(&self) -> Result<()> {
        self.validate_path()?;
        if self.cleanup.is_zero() {
            return Err(Error::configuration(
                "cleanup must be at least one second",
            ));
        }
        Ok(())
    }

    /// Check only the cache root, for stores opened without a vacuum
    pub fn validate_path(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::configuration("path must not be empty"));
        }
        Ok(())
    }
}

/// Source of configuration for debugging and precedence tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default configuration
    Default,
    /// Configuration file
    ConfigFile(PathBuf),
    /// Environment variable
    EnvironmentVariable(String),
    /// Command line argument
    CommandLine,
}

/// Builder applying configuration layers in precedence order
#[derive(Debug, Clone)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
    path_source: ConfigSource,
    cleanup_source: ConfigSource,
}

impl StoreConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            path_source: ConfigSource::Default,
            cleanup_source: ConfigSource::Default,
        }
    }

    /// Layer a JSON file over the current values
    pub fn with_file(mut self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path, "read config file", e))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| Error::configuration(format!("{}: {e}", path.display())))?;
        let file = StoreConfig::from_json_str(&content)?;

        // Only fields present in the file take precedence
        if value.get("path").is_some() {
            self.config.path = file.path;
            self.path_source = ConfigSource::ConfigFile(path.to_path_buf());
        }
        if value.get("cleanup").is_some() {
            self.config.cleanup = file.cleanup;
            self.cleanup_source = ConfigSource::ConfigFile(path.to_path_buf());
        }
        Ok(self)
    }

    /// Layer `FORCECACHE_PATH` / `FORCECACHE_CLEANUP` over the current values
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(path) = std::env::var_os(ENV_PATH).filter(|v| !v.is_empty()) {
            self.config.path = PathBuf::from(path);
            self.path_source = ConfigSource::EnvironmentVariable(ENV_PATH.to_string());
        }

        if let Ok(raw) = std::env::var(ENV_CLEANUP) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{ENV_CLEANUP} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            self.config.cleanup = Duration::from_secs(secs);
            self.cleanup_source = ConfigSource::EnvironmentVariable(ENV_CLEANUP.to_string());
        }
        Ok(self)
    }

    /// Set the cache root
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.config.path = path;
        self.path_source = ConfigSource::CommandLine;
        self
    }

    /// Set the vacuum period
    pub fn with_cleanup(mut self, cleanup: Duration) -> Self {
        self.config.cleanup = cleanup;
        self.cleanup_source = ConfigSource::CommandLine;
        self
    }

    /// Where the effective `path` came from
    pub fn path_source(&self) -> &ConfigSource {
        &self.path_source
    }

    /// Where the effective `cleanup` came from
    pub fn cleanup_source(&self) -> &ConfigSource {
        &self.cleanup_source
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<StoreConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Return the configuration without validating it
    pub fn into_config(self) -> StoreConfig {
        self.config
    }
}

impl Default for StoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

//! Client configuration via `redkey.toml`
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! client that follows the process-wide prefix, talks to database 0 and
//! reports `0.0` for the extreme scores of an empty sorted set.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Config file name looked up by embedders.
pub const CONFIG_FILE_NAME: &str = "redkey.toml";

/// What `min_score` / `max_score` return for an empty sorted set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyScorePolicy {
    /// Report `0.0`, indistinguishable from a real extreme score of zero
    #[default]
    Zero,
    /// Fail with [`Error::EmptyCollection`]
    Error,
}

/// Client configuration loaded from `redkey.toml`.
///
/// # Example
///
/// ```toml
/// key_prefix = "app:"
/// database = 2
/// connection = "127.0.0.1:6379"
/// empty_score_policy = "error"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Instance prefix; `None` (or empty) follows the process-wide default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<String>,
    /// Logical database index on the store.
    pub database: u32,
    /// Connection identity, interpreted by the store implementation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    /// Behaviour of min/max score on an empty sorted set.
    pub empty_score_policy: EmptyScorePolicy,
}

impl ClientConfig {
    /// Config with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the instance prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.key_prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    /// Set the database index.
    pub fn with_database(mut self, database: u32) -> Self {
        self.database = database;
        self
    }

    /// Set the connection identity.
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Set the empty-score policy.
    pub fn with_empty_score_policy(mut self, policy: EmptyScorePolicy) -> Self {
        self.empty_score_policy = policy;
        self
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# redkey client configuration
#
# Prefix applied to every key. Omit to use the process-wide default.
# key_prefix = "app:"

# Logical database index on the store.
database = 0

# Connection identity, interpreted by the store implementation.
# connection = "127.0.0.1:6379"

# What min/max score return for an empty sorted set: "zero" or "error".
#   "zero"  = report 0, same as a real extreme score of zero
#   "error" = fail with an empty-collection error
empty_score_policy = "zero"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid config TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        let config = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(target: "redkey::config", path = %path.display(), "Loaded client config");
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Io {
                reason: format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| Error::Io {
            reason: format!("Failed to write config file '{}': {}", path.display(), e),
        })
    }
}

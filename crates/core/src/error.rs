//! Error types for redkey
//!
//! All failures surfaced by the client are represented by the [`Error`] enum.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! # Categories
//!
//! | Category | Variants | Description |
//! |----------|----------|-------------|
//! | Codec | `Deserialization`, `Serialization` | Value could not be encoded/decoded |
//! | Remote | `Remote`, `WrongType`, `NoSuchKey` | Reported by the store, passed through unmodified |
//! | Query | `EmptyCollection` | Strict min/max score on an empty sorted set |
//! | System | `Config`, `Io` | Configuration loading |
//!
//! Primitive reads against missing keys are NOT errors: they decode to the
//! type's zero value (see [`crate::codec`]).

use std::io;
use thiserror::Error;

/// Result type alias for redkey operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for redkey
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // ==================== Codec ====================
    /// Stored value could not be decoded into the requested type
    #[error("deserialization error: {reason}")]
    Deserialization {
        /// What went wrong
        reason: String,
    },

    /// Value could not be encoded as a structured document
    #[error("serialization error: {reason}")]
    Serialization {
        /// What went wrong
        reason: String,
    },

    // ==================== Remote ====================
    /// The store rejected or failed the call
    #[error("remote error: {reason}")]
    Remote {
        /// Message reported by the store
        reason: String,
    },

    /// Operation against a key holding the wrong kind of structure
    #[error("WRONGTYPE operation against key {key} holding the wrong kind of value")]
    WrongType {
        /// Qualified key
        key: String,
    },

    /// Key required by the operation does not exist
    #[error("no such key: {key}")]
    NoSuchKey {
        /// Qualified key
        key: String,
    },

    // ==================== Query ====================
    /// Min/max score requested on an empty sorted set under the strict policy
    #[error("sorted set is empty: {key}")]
    EmptyCollection {
        /// Qualified key
        key: String,
    },

    // ==================== System ====================
    /// Invalid configuration
    #[error("configuration error: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },

    /// I/O error while reading or writing configuration
    #[error("I/O error: {reason}")]
    Io {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Create a deserialization error
    pub fn deserialization(reason: impl Into<String>) -> Self {
        Error::Deserialization {
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(reason: impl Into<String>) -> Self {
        Error::Serialization {
            reason: reason.into(),
        }
    }

    /// Create a remote error
    pub fn remote(reason: impl Into<String>) -> Self {
        Error::Remote {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Whether this error was produced by the store rather than by the client
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Remote { .. } | Error::WrongType { .. } | Error::NoSuchKey { .. }
        )
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::Io {
                reason: e.to_string(),
            }
        } else if e.is_data() || e.is_syntax() || e.is_eof() {
            Error::deserialization(e.to_string())
        } else {
            Error::serialization(e.to_string())
        }
    }
}

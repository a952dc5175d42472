//! Core types for redkey
//!
//! This crate holds everything that does not talk to a store:
//! - Error: the error enum shared by every crate
//! - codec: typed values to stored strings and back
//! - namespace: key prefixing (instance override or process-wide default)
//! - range: sorted set range queries and their native forms
//! - config: `redkey.toml` client configuration
//! - types: small shared enums

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod error;
pub mod namespace;
pub mod range;
pub mod types;

pub use codec::{decode, decode_str, encode, Encoding};
pub use config::{ClientConfig, EmptyScorePolicy, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use namespace::{default_prefix, set_default_prefix, KeyNamespace, ResolvedPrefix};
pub use range::{
    Exclusivity, LexBound, NativeRange, Order, RangeBounds, RangeMode, RangeQueryTranslator,
    RangeSpec, ScoreBound, ScoredEntry, ScoredMember, ValueBound,
};
pub use types::SetCombine;

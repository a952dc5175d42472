//! redkey - typed, namespaced access to a sorted key-value store
//!
//! redkey sits between application code and a Redis-style store. Values go
//! in and come out as Rust types, keys are qualified with a prefix, and sorted
//! set range queries are expressed once and translated to the store's native
//! form.
//!
//! # Quick Start
//!
//! ```
//! use redkey::{Client, Exclusivity, RangeSpec, SortedSetFacade};
//!
//! let client = Client::in_memory();
//! client.set_prefix("app:");
//!
//! client.sorted_set_add("scores", "alice", 10.0)?;
//! client.sorted_set_add("scores", "bob", 20.0)?;
//!
//! let low: Vec<String> = client.sorted_set_range(
//!     "scores",
//!     &RangeSpec::by_score(0.0, 15.0).exclusivity(Exclusivity::IncludeBoth),
//! )?;
//! assert_eq!(low, vec!["alice"]);
//! # Ok::<(), redkey::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `redkey-core`: codec, key namespace, range translation, configuration
//! - `redkey-store`: the [`RemoteStore`] trait and the in-process [`MemoryStore`]
//! - `redkey-api`: [`Client`] and the facade traits grouped by data structure

pub use redkey_api::*;
pub use redkey_core::{
    codec, decode, decode_str, default_prefix, encode, set_default_prefix, ClientConfig,
    EmptyScorePolicy, Encoding, Error, Exclusivity, KeyNamespace, LexBound, NativeRange, Order,
    RangeBounds, RangeMode, RangeQueryTranslator, RangeSpec, ResolvedPrefix, Result, ScoreBound,
    ScoredEntry, ScoredMember, SetCombine, ValueBound, CONFIG_FILE_NAME,
};
pub use redkey_store::{MemoryStore, MessageHandler, RemoteStore};

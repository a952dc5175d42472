//! Public API layer for redkey
//!
//! [`Client`] gives typed access to a key/value structure store:
//! - keys are namespaced with the client's prefix before they leave
//! - values are encoded with [`redkey_core::codec`] and decoded by the
//!   type the caller asks for
//! - sorted set ranges are one [`RangeSpec`](redkey_core::RangeSpec)
//!
//! ## Quick Start
//!
//! ```
//! use redkey_api::{Client, SortedSetFacade};
//! use redkey_core::{Exclusivity, Order};
//!
//! let client = Client::in_memory();
//! client.set_prefix("game:");
//! client.sorted_set_add("scores", "alice", 10.0).unwrap();
//! client.sorted_set_add("scores", "bob", 20.0).unwrap();
//!
//! let low: Vec<String> = client
//!     .sorted_set_range_by_score("scores", 0.0, 15.0, Exclusivity::IncludeBoth, Order::Ascending)
//!     .unwrap();
//! assert_eq!(low, vec!["alice"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod facade;

pub use client::Client;
pub use facade::{
    HashFacade, KeyFacade, ListFacade, PubSubFacade, SetFacade, SortedSetFacade, StringFacade,
};

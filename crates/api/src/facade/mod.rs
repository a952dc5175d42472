//! Facade traits - typed collection operations
//!
//! One trait per structure. Each is implemented for [`Client`](crate::Client)
//! over any [`RemoteStore`](redkey_store::RemoteStore).
//!
//! ## Call shape
//!
//! Every facade call is: qualify key(s) → encode value(s) → exactly one
//! store call → decode. No reordering, no hidden extra round trips.
//!
//! ## Module Structure
//!
//! - `strings`: single values, counters
//! - `lists`: ordered lists
//! - `hashes`: field maps
//! - `sets`: unordered sets and set algebra
//! - `sorted_sets`: scored sets and range queries
//! - `keys`: delete, rename, expiry
//! - `pubsub`: channel messaging

pub mod hashes;
pub mod keys;
pub mod lists;
pub mod pubsub;
pub mod sets;
pub mod sorted_sets;
pub mod strings;

pub use hashes::HashFacade;
pub use keys::KeyFacade;
pub use lists::ListFacade;
pub use pubsub::PubSubFacade;
pub use sets::SetFacade;
pub use sorted_sets::SortedSetFacade;
pub use strings::StringFacade;

//! Store layer for redkey
//!
//! - [`RemoteStore`]: native operations on qualified keys and encoded values
//! - [`MemoryStore`]: in-process implementation with the store's own rules

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod remote;

pub use memory::MemoryStore;
pub use remote::{MessageHandler, RemoteStore};

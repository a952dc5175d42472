//! Client Comprehensive Test Suite
//!
//! End-to-end behaviour of `Client` over `MemoryStore`, one module per data
//! structure plus the cross-cutting concerns (namespacing, configuration).
//!
//! ## Layer Separation
//!
//! Codec and namespace unit behaviour lives in the `properties` suite and
//! the crates' own tests. Here every assertion goes through the facade
//! traits, so a failure means the client and store disagree.

#[path = "../common/mod.rs"]
mod common;

mod config_tests;
mod key_tests;
mod list_tests;
mod namespace_tests;
mod pubsub_tests;
mod sorted_set_tests;
mod string_tests;

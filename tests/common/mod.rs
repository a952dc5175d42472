//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Once};

pub use redkey::{
    Client, ClientConfig, EmptyScorePolicy, Error, Exclusivity, MemoryStore, Order, RangeSpec,
    RemoteStore, ScoredMember, ValueBound,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output through the test harness.
///
/// Output is captured and only shown for failing tests.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .try_init();
    });
}

// ============================================================================
// Clients
// ============================================================================

static NEXT_PREFIX: AtomicU64 = AtomicU64::new(0);

/// A prefix no other test in this process will use.
pub fn unique_prefix(label: &str) -> String {
    let n = NEXT_PREFIX.fetch_add(1, Ordering::Relaxed);
    format!("test:{label}:{n}:")
}

/// Client over a fresh store with its own prefix.
pub fn client(label: &str) -> Client {
    init_tracing();
    let client = Client::in_memory();
    client.set_prefix(unique_prefix(label));
    client
}

/// Two clients sharing one store, each with its own prefix.
pub fn client_pair(label: &str) -> (Client, Client) {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let a = Client::new(Arc::clone(&store));
    a.set_prefix(unique_prefix(label));
    let b = Client::new(store);
    b.set_prefix(unique_prefix(label));
    (a, b)
}

/// Client that fails min/max score on empty sorted sets.
pub fn strict_client(label: &str) -> Client {
    init_tracing();
    let config = ClientConfig::new()
        .with_key_prefix(unique_prefix(label))
        .with_empty_score_policy(EmptyScorePolicy::Error);
    Client::with_config(Arc::new(MemoryStore::new()), config)
}

/// Sorted set `key` holding members a, b, c at scores 10, 20, 30.
pub fn seed_scores(client: &Client, key: &str) {
    use redkey::SortedSetFacade;

    for (member, score) in [("a", 10.0), ("b", 20.0), ("c", 30.0)] {
        client
            .sorted_set_add(key, member, score)
            .expect("seed sorted set");
    }
}

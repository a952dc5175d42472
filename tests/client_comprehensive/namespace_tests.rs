//! Key prefixing: instance override, process-wide default, prefix changes
//!
//! Every other test in this binary sets an instance prefix, so only
//! `default_prefix_applies_without_override` touches the process-wide value.

use std::sync::Arc;

use crate::common::*;
use redkey::{set_default_prefix, KeyFacade, SortedSetFacade, StringFacade};

#[test]
fn instance_prefix_is_applied_once() {
    let client = Client::in_memory();
    client.set_prefix("app:");
    client.string_set("k", "v", None).unwrap();

    assert_eq!(client.store().get("app:k").unwrap().as_deref(), Some("v"));
    assert_eq!(client.store().get("app:app:k").unwrap(), None);
    assert_eq!(client.store().len(), 1);
}

#[test]
fn default_prefix_applies_without_override() {
    let store = Arc::new(MemoryStore::new());
    let follower = Client::new(Arc::clone(&store));
    let pinned = Client::new(Arc::clone(&store));
    pinned.set_prefix("pinned:");

    set_default_prefix("global:");
    follower.string_set("k", "1", None).unwrap();
    pinned.string_set("k", "2", None).unwrap();
    set_default_prefix("");

    assert_eq!(store.get("global:k").unwrap().as_deref(), Some("1"));
    assert_eq!(store.get("pinned:k").unwrap().as_deref(), Some("2"));
}

#[test]
fn clients_sharing_a_store_are_isolated() {
    let (a, b) = client_pair("ns");
    a.string_set_value("counter", &1, None).unwrap();
    b.string_set_value("counter", &2, None).unwrap();

    assert_eq!(a.string_get_value::<i32>("counter").unwrap(), 1);
    assert_eq!(b.string_get_value::<i32>("counter").unwrap(), 2);
    assert!(a.key_delete("counter").unwrap());
    assert!(b.key_exists("counter").unwrap());
}

#[test]
fn prefix_change_affects_subsequent_calls_only() {
    let client = Client::in_memory();
    client.set_prefix("v1:");
    client.sorted_set_add("board", "alice", 10.0).unwrap();

    client.set_prefix("v2:");
    assert_eq!(client.sorted_set_length("board").unwrap(), 0);
    client.sorted_set_add("board", "bob", 20.0).unwrap();

    client.set_prefix("v1:");
    let v1: Vec<String> = client.sorted_set_range("board", &RangeSpec::all()).unwrap();
    assert_eq!(v1, vec!["alice"]);
}

#[test]
fn resolved_prefix_is_a_snapshot() {
    let client = Client::in_memory();
    client.set_prefix("before:");
    let snapshot = client.prefix();
    client.set_prefix("after:");

    assert_eq!(snapshot.qualify("k"), "before:k");
    assert_eq!(client.prefix().qualify("k"), "after:k");
}

#[test]
fn config_prefix_becomes_the_override() {
    let config = ClientConfig::new().with_key_prefix("cfg:");
    let client = Client::with_config(Arc::new(MemoryStore::new()), config);
    assert!(client.namespace().has_override());
    client.string_set("k", "v", None).unwrap();
    assert_eq!(client.store().get("cfg:k").unwrap().as_deref(), Some("v"));

    client.clear_prefix();
    assert!(!client.namespace().has_override());
}

//! Whole-key operations and time to live

use std::time::Duration;

use crate::common::*;
use redkey::{KeyFacade, ListFacade, StringFacade};

#[test]
fn delete_across_structures() {
    let client = client("keys");
    client.string_set("s", "v", None).unwrap();
    client.list_right_push("l", &1).unwrap();

    assert_eq!(client.key_delete_many(&["s", "l", "ghost"]).unwrap(), 2);
    assert!(!client.key_exists("s").unwrap());
    assert!(!client.key_exists("l").unwrap());
}

#[test]
fn rename_keeps_both_keys_namespaced() {
    let client = client("keys");
    let prefix = client.prefix();
    client.string_set("old", "payload", None).unwrap();

    assert!(client.key_rename("old", "new").unwrap());

    let qualified_new = prefix.qualify("new");
    assert_eq!(
        client.store().get(&qualified_new).unwrap().as_deref(),
        Some("payload")
    );
    assert_eq!(client.store().get("new").unwrap(), None);
    assert!(!client.key_exists("old").unwrap());
}

#[test]
fn rename_missing_key_fails() {
    let client = client("keys");
    let err = client.key_rename("ghost", "other").unwrap_err();
    assert!(matches!(err, Error::NoSuchKey { .. }));
}

#[test]
fn rename_moves_the_ttl() {
    let client = client("keys");
    client
        .string_set("temp", "v", Some(Duration::from_millis(30)))
        .unwrap();
    client.key_rename("temp", "moved").unwrap();
    assert_eq!(client.string_get("moved").unwrap(), "v");

    std::thread::sleep(Duration::from_millis(60));
    assert!(!client.key_exists("moved").unwrap());
}

#[test]
fn expire_then_persist() {
    let client = client("keys");
    client.string_set("k", "v", None).unwrap();

    assert!(!client.key_expire("k", None).unwrap());
    assert!(client.key_expire("k", Some(Duration::from_millis(20))).unwrap());
    assert!(client.key_expire("k", None).unwrap());

    std::thread::sleep(Duration::from_millis(40));
    assert!(client.key_exists("k").unwrap());
}

#[test]
fn expire_missing_key_is_false() {
    let client = client("keys");
    assert!(!client.key_expire("ghost", Some(Duration::from_secs(1))).unwrap());
}

#[test]
fn expired_structures_disappear() {
    let client = client("keys");
    client.list_right_push("queue", "job").unwrap();
    client
        .key_expire("queue", Some(Duration::from_millis(20)))
        .unwrap();

    std::thread::sleep(Duration::from_millis(40));
    assert!(!client.key_exists("queue").unwrap());
    assert_eq!(client.list_length("queue").unwrap(), 0);
}

//! Strings: typed values, absent defaults, counters, expiry

use std::collections::BTreeMap;
use std::time::Duration;

use crate::common::*;
use redkey::StringFacade;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: u8,
    tags: Vec<String>,
    limits: BTreeMap<String, f64>,
}

fn profile() -> Profile {
    Profile {
        name: "alice".to_string(),
        age: 31,
        tags: vec!["admin".to_string(), "ops".to_string()],
        limits: BTreeMap::from([("rate".to_string(), 2.5)]),
    }
}

#[test]
fn primitives_round_trip() {
    let client = client("strings");
    client.string_set_value("i", &-42i64, None).unwrap();
    client.string_set_value("f", &0.25f64, None).unwrap();
    client.string_set_value("b", &true, None).unwrap();
    client.string_set_value("c", &'x', None).unwrap();
    client.string_set_value("s", "plain text", None).unwrap();

    assert_eq!(client.string_get_value::<i64>("i").unwrap(), -42);
    assert_eq!(client.string_get_value::<f64>("f").unwrap(), 0.25);
    assert!(client.string_get_value::<bool>("b").unwrap());
    assert_eq!(client.string_get_value::<char>("c").unwrap(), 'x');
    assert_eq!(client.string_get_value::<String>("s").unwrap(), "plain text");
}

#[test]
fn composite_round_trip() {
    let client = client("strings");
    let value = profile();
    client.string_set_value("profile", &value, None).unwrap();
    assert_eq!(client.string_get_value::<Profile>("profile").unwrap(), value);

    let raw = client.string_get("profile").unwrap();
    assert!(raw.starts_with('{'), "composites are stored as JSON: {raw}");
}

#[test]
fn absent_primitives_read_as_zero_values() {
    let client = client("strings");
    assert_eq!(client.string_get_value::<i32>("missing").unwrap(), 0);
    assert!(!client.string_get_value::<bool>("missing").unwrap());
    assert_eq!(client.string_get_value::<String>("missing").unwrap(), "");
    assert_eq!(client.string_get_value::<Option<Profile>>("missing").unwrap(), None);
}

#[test]
fn absent_composite_is_a_deserialization_error() {
    let client = client("strings");
    let err = client.string_get_value::<Profile>("missing").unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

#[test]
fn wrong_shape_is_a_deserialization_error() {
    let client = client("strings");
    client.string_set("n", "not a number", None).unwrap();
    assert!(matches!(
        client.string_get_value::<i64>("n"),
        Err(Error::Deserialization { .. })
    ));
}

#[test]
fn many_keeps_slot_order() {
    let client = client("strings");
    client
        .string_set_many(&[("x", "one"), ("y", "two")])
        .unwrap();
    let values: Vec<String> = client.string_get_many(&["y", "missing", "x"]).unwrap();
    assert_eq!(values, vec!["two", "", "one"]);
}

#[test]
fn counters() {
    let client = client("strings");
    assert_eq!(client.string_increment("hits", 1.0).unwrap(), 1.0);
    assert_eq!(client.string_increment("hits", 1.5).unwrap(), 2.5);
    assert_eq!(client.string_decrement("hits", 0.5).unwrap(), 2.0);
    assert_eq!(client.string_get_value::<f64>("hits").unwrap(), 2.0);
}

#[test]
fn set_with_expiry_vanishes() {
    let client = client("strings");
    client
        .string_set_value("flash", &1u8, Some(Duration::from_millis(20)))
        .unwrap();
    assert_eq!(client.string_get_value::<u8>("flash").unwrap(), 1);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(client.string_get_value::<u8>("flash").unwrap(), 0);
}

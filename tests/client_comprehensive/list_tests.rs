//! Lists: both ends, removal, empty pops

use crate::common::*;
use redkey::ListFacade;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Job {
    id: u32,
    queue: String,
}

#[test]
fn push_both_ends_and_range() {
    let client = client("list");
    assert_eq!(client.list_right_push("l", &2).unwrap(), 1);
    assert_eq!(client.list_right_push("l", &3).unwrap(), 2);
    assert_eq!(client.list_left_push("l", &1).unwrap(), 3);

    assert_eq!(client.list_range::<i32>("l").unwrap(), vec![1, 2, 3]);
    assert_eq!(client.list_length("l").unwrap(), 3);
}

#[test]
fn pops_drain_the_list() {
    let client = client("list");
    for n in [1, 2, 3] {
        client.list_right_push("l", &n).unwrap();
    }
    assert_eq!(client.list_left_pop::<i32>("l").unwrap(), 1);
    assert_eq!(client.list_right_pop::<i32>("l").unwrap(), 3);
    assert_eq!(client.list_right_pop::<i32>("l").unwrap(), 2);
    assert_eq!(client.list_length("l").unwrap(), 0);
}

#[test]
fn empty_pop_follows_absent_rules() {
    let client = client("list");
    assert_eq!(client.list_left_pop::<u64>("empty").unwrap(), 0);
    assert_eq!(client.list_right_pop::<String>("empty").unwrap(), "");
    assert!(matches!(
        client.list_right_pop::<Job>("empty"),
        Err(Error::Deserialization { .. })
    ));
}

#[test]
fn remove_every_occurrence() {
    let client = client("list");
    for word in ["a", "b", "a", "c", "a"] {
        client.list_right_push("words", word).unwrap();
    }
    assert_eq!(client.list_remove("words", "a").unwrap(), 3);
    assert_eq!(client.list_range::<String>("words").unwrap(), vec!["b", "c"]);
    assert_eq!(client.list_remove("words", "zzz").unwrap(), 0);
}

#[test]
fn composite_elements() {
    let client = client("list");
    let job = Job {
        id: 4,
        queue: "mail".to_string(),
    };
    client.list_right_push("jobs", &job).unwrap();
    assert_eq!(client.list_left_pop::<Job>("jobs").unwrap(), job);
}

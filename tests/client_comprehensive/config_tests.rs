//! `redkey.toml` loading and its effect on a client

use std::sync::Arc;

use crate::common::*;
use redkey::{SortedSetFacade, StringFacade, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let config = ClientConfig::new()
        .with_key_prefix("svc:")
        .with_database(3)
        .with_connection("127.0.0.1:6379")
        .with_empty_score_policy(EmptyScorePolicy::Error);

    config.write_to_file(&path).unwrap();
    assert_eq!(ClientConfig::from_file(&path).unwrap(), config);
}

#[test]
fn default_file_is_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    ClientConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(ClientConfig::from_file(&path).unwrap(), ClientConfig::default());

    std::fs::write(&path, "database = 5\n").unwrap();
    ClientConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(ClientConfig::from_file(&path).unwrap().database, 5);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ClientConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn bad_policy_is_a_config_error() {
    let err = ClientConfig::from_toml_str("empty_score_policy = \"panic\"").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn loaded_config_drives_the_client() {
    let config = ClientConfig::from_toml_str(
        r#"
        key_prefix = "loaded:"
        empty_score_policy = "error"
        "#,
    )
    .unwrap();
    let store = Arc::new(MemoryStore::new());
    let client = Client::with_config(Arc::clone(&store), config);

    client.string_set("k", "v", None).unwrap();
    assert_eq!(store.get("loaded:k").unwrap().as_deref(), Some("v"));
    assert!(matches!(
        client.sorted_set_min_score("empty"),
        Err(Error::EmptyCollection { .. })
    ));
}

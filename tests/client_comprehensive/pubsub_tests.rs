//! Pub/sub: receiver counts, encoded payloads, global channels

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::common::*;
use redkey::{codec, MessageHandler, PubSubFacade};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Chat {
    from: String,
    body: String,
}

fn counting_handler() -> (MessageHandler, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let handler: MessageHandler = Arc::new(move |_channel: &str, _message: &str| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (handler, count)
}

#[test]
fn publish_counts_receivers() {
    let client = client("pubsub");
    let channel = unique_prefix("chan");
    assert_eq!(client.publish(&channel, "nobody").unwrap(), 0);

    let (first, first_count) = counting_handler();
    let (second, second_count) = counting_handler();
    client.subscribe(&channel, Some(first)).unwrap();
    client.subscribe(&channel, Some(second)).unwrap();

    assert_eq!(client.publish(&channel, "hi").unwrap(), 2);
    assert_eq!(first_count.load(Ordering::SeqCst), 1);
    assert_eq!(second_count.load(Ordering::SeqCst), 1);

    client.unsubscribe(&channel).unwrap();
    assert_eq!(client.publish(&channel, "bye").unwrap(), 0);
}

#[test]
fn payload_is_encoded() {
    let client = client("pubsub");
    let channel = unique_prefix("chan");
    let received = Arc::new(parking_lot::Mutex::new(None));
    let sink = Arc::clone(&received);
    client
        .subscribe(
            &channel,
            Some(Arc::new(move |_: &str, message: &str| {
                *sink.lock() = Some(message.to_string());
            })),
        )
        .unwrap();

    let chat = Chat {
        from: "alice".to_string(),
        body: "hello".to_string(),
    };
    client.publish(&channel, &chat).unwrap();

    let raw = received.lock().take().unwrap();
    assert_eq!(codec::decode_str::<Chat>(&raw).unwrap(), chat);
}

#[test]
fn channels_ignore_key_prefix() {
    let (a, b) = client_pair("pubsub");
    let channel = unique_prefix("shared");
    let (handler, count) = counting_handler();
    a.subscribe(&channel, Some(handler)).unwrap();

    assert_eq!(b.publish(&channel, &7).unwrap(), 1);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn default_handler_still_receives() {
    let client = client("pubsub");
    let channel = unique_prefix("logged");
    client.subscribe(&channel, None).unwrap();
    assert_eq!(client.publish(&channel, "logged message").unwrap(), 1);

    client.unsubscribe_all().unwrap();
    assert_eq!(client.publish(&channel, "dropped").unwrap(), 0);
}

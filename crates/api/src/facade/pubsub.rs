//! Pub/sub facade
//!
//! Channels are global to the store: they are never namespaced, so two
//! clients with different prefixes still share every channel.

use serde::Serialize;

use redkey_core::Result;
use redkey_store::MessageHandler;

/// Channel messaging
pub trait PubSubFacade {
    /// Register `handler` for `channel`
    ///
    /// Without a handler, received messages are logged at `info` level under
    /// the `redkey::pubsub` target.
    fn subscribe(&self, channel: &str, handler: Option<MessageHandler>) -> Result<()>;

    /// Publish an encoded message, returning how many receivers got it
    fn publish<T: Serialize + ?Sized>(&self, channel: &str, message: &T) -> Result<i64>;

    /// Drop every handler on `channel`
    fn unsubscribe(&self, channel: &str) -> Result<()>;

    /// Drop every handler on every channel
    fn unsubscribe_all(&self) -> Result<()>;
}

// =============================================================================
// Implementation
// =============================================================================

use std::sync::Arc;

use redkey_core::codec;
use redkey_store::RemoteStore;

use crate::client::Client;

fn log_message(channel: &str, message: &str) {
    tracing::info!(target: "redkey::pubsub", channel, message, "Message received");
}

impl<S: RemoteStore> PubSubFacade for Client<S> {
    fn subscribe(&self, channel: &str, handler: Option<MessageHandler>) -> Result<()> {
        let handler = handler.unwrap_or_else(|| Arc::new(log_message));
        self.store().subscribe(channel, handler)
    }

    fn publish<T: Serialize + ?Sized>(&self, channel: &str, message: &T) -> Result<i64> {
        let encoded = codec::encode(message)?;
        self.store().publish(channel, encoded)
    }

    fn unsubscribe(&self, channel: &str) -> Result<()> {
        self.store().unsubscribe(channel)
    }

    fn unsubscribe_all(&self) -> Result<()> {
        self.store().unsubscribe_all()
    }
}

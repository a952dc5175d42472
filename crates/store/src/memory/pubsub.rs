//! Channel subscriptions
//!
//! Handlers are cloned out of the lock before delivery, so a handler may
//! itself subscribe or publish without deadlocking.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::remote::MessageHandler;

#[derive(Default)]
pub(crate) struct Subscriptions {
    channels: RwLock<HashMap<String, Vec<MessageHandler>>>,
}

impl Subscriptions {
    pub(crate) fn subscribe(&self, channel: &str, handler: MessageHandler) {
        self.channels
            .write()
            .entry(channel.to_string())
            .or_default()
            .push(handler);
    }

    /// Deliver synchronously, returning the number of handlers invoked
    pub(crate) fn publish(&self, channel: &str, message: &str) -> i64 {
        let handlers = match self.channels.read().get(channel) {
            Some(handlers) => handlers.clone(),
            None => return 0,
        };
        for handler in &handlers {
            handler(channel, message);
        }
        handlers.len() as i64
    }

    pub(crate) fn unsubscribe(&self, channel: &str) -> usize {
        self.channels
            .write()
            .remove(channel)
            .map_or(0, |handlers| handlers.len())
    }

    pub(crate) fn unsubscribe_all(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.values().map(Vec::len).sum();
        channels.clear();
        count
    }

    pub(crate) fn channel_count(&self) -> usize {
        self.channels.read().len()
    }
}

//! List facade
//!
//! | Facade | Store |
//! |--------|-------|
//! | `list_remove(key, v)` | `lrem(qualify(key), 0, encode(v))` |
//! | `list_range(key)` | `lrange(qualify(key), 0, -1)` decoded |
//! | `list_right_push(key, v)` | `rpush(qualify(key), encode(v))` |
//! | `list_left_push(key, v)` | `lpush(qualify(key), encode(v))` |
//! | `list_right_pop(key)` | `decode(rpop(qualify(key)))` |
//! | `list_left_pop(key)` | `decode(lpop(qualify(key)))` |
//! | `list_length(key)` | `llen(qualify(key))` |

use serde::de::DeserializeOwned;
use serde::Serialize;

use redkey_core::Result;

/// Ordered list operations
pub trait ListFacade {
    /// Remove every occurrence of `value`, returning how many were removed
    fn list_remove<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<i64>;

    /// Every element, head first
    fn list_range<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>>;

    /// Append to the tail, returning the new length
    fn list_right_push<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<i64>;

    /// Prepend to the head, returning the new length
    fn list_left_push<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<i64>;

    /// Pop from the tail
    ///
    /// An empty list yields the zero value for primitives and fails for
    /// composites.
    fn list_right_pop<T: DeserializeOwned>(&self, key: &str) -> Result<T>;

    /// Pop from the head, with the same empty-list rule as `list_right_pop`
    fn list_left_pop<T: DeserializeOwned>(&self, key: &str) -> Result<T>;

    /// Number of elements, 0 when absent
    fn list_length(&self, key: &str) -> Result<i64>;
}

// =============================================================================
// Implementation
// =============================================================================

use redkey_core::codec;
use redkey_store::RemoteStore;

use crate::client::Client;

impl<S: RemoteStore> ListFacade for Client<S> {
    fn list_remove<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<i64> {
        let key = self.key(key);
        let encoded = codec::encode(value)?;
        self.store().lrem(&key, 0, &encoded)
    }

    fn list_range<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let stored = self.store().lrange(&self.key(key), 0, -1)?;
        codec::decode_all(&stored)
    }

    fn list_right_push<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<i64> {
        let key = self.key(key);
        let encoded = codec::encode(value)?;
        self.store().rpush(&key, encoded)
    }

    fn list_left_push<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<i64> {
        let key = self.key(key);
        let encoded = codec::encode(value)?;
        self.store().lpush(&key, encoded)
    }

    fn list_right_pop<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let stored = self.store().rpop(&self.key(key))?;
        codec::decode(stored.as_deref())
    }

    fn list_left_pop<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let stored = self.store().lpop(&self.key(key))?;
        codec::decode(stored.as_deref())
    }

    fn list_length(&self, key: &str) -> Result<i64> {
        self.store().llen(&self.key(key))
    }
}

//! Hash facade
//!
//! Field names are plain strings, except for `hash_delete_many` and
//! `hash_keys`, which run field names through the value codec so typed
//! field identifiers round-trip.

use serde::de::DeserializeOwned;
use serde::Serialize;

use redkey_core::Result;

/// Field-map operations
pub trait HashFacade {
    /// Whether `field` exists
    fn hash_exists(&self, key: &str, field: &str) -> Result<bool>;

    /// Store an encoded value in `field`; true when the field is new
    fn hash_set<T: Serialize + ?Sized>(&self, key: &str, field: &str, value: &T) -> Result<bool>;

    /// Delete `field`; true when it existed
    fn hash_delete(&self, key: &str, field: &str) -> Result<bool>;

    /// Delete encoded fields, returning how many existed
    fn hash_delete_many<F: Serialize>(&self, key: &str, fields: &[F]) -> Result<i64>;

    /// Decoded value of `field`
    fn hash_get<T: DeserializeOwned>(&self, key: &str, field: &str) -> Result<T>;

    /// Add `delta` to the number in `field`
    fn hash_increment(&self, key: &str, field: &str, delta: f64) -> Result<f64>;

    /// Subtract `delta` from the number in `field`
    fn hash_decrement(&self, key: &str, field: &str, delta: f64) -> Result<f64> {
        self.hash_increment(key, field, -delta)
    }

    /// Field names decoded as `T`
    fn hash_keys<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>>;
}

// =============================================================================
// Implementation
// =============================================================================

use redkey_core::codec;
use redkey_store::RemoteStore;

use crate::client::Client;

impl<S: RemoteStore> HashFacade for Client<S> {
    fn hash_exists(&self, key: &str, field: &str) -> Result<bool> {
        self.store().hexists(&self.key(key), field)
    }

    fn hash_set<T: Serialize + ?Sized>(&self, key: &str, field: &str, value: &T) -> Result<bool> {
        let key = self.key(key);
        let encoded = codec::encode(value)?;
        self.store().hset(&key, field, encoded)
    }

    fn hash_delete(&self, key: &str, field: &str) -> Result<bool> {
        let removed = self.store().hdel(&self.key(key), &[field.to_string()])?;
        Ok(removed > 0)
    }

    fn hash_delete_many<F: Serialize>(&self, key: &str, fields: &[F]) -> Result<i64> {
        let key = self.key(key);
        let fields = codec::encode_all(fields)?;
        self.store().hdel(&key, &fields)
    }

    fn hash_get<T: DeserializeOwned>(&self, key: &str, field: &str) -> Result<T> {
        let stored = self.store().hget(&self.key(key), field)?;
        codec::decode(stored.as_deref())
    }

    fn hash_increment(&self, key: &str, field: &str, delta: f64) -> Result<f64> {
        self.store().hincr_by_float(&self.key(key), field, delta)
    }

    fn hash_keys<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let fields = self.store().hkeys(&self.key(key))?;
        codec::decode_all(&fields)
    }
}

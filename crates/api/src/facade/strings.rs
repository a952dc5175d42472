//! String facade
//!
//! | Facade | Store |
//! |--------|-------|
//! | `string_set(key, s, ttl)` | `set(qualify(key), s, ttl)` |
//! | `string_set_value(key, v, ttl)` | `set(qualify(key), encode(v), ttl)` |
//! | `string_set_many(pairs)` | `mset(qualify_all(keys), encode_all(values))` |
//! | `string_get(key)` | `get(qualify(key))`, empty when absent |
//! | `string_get_value(key)` | `decode(get(qualify(key)))` |
//! | `string_get_many(keys)` | `mget(qualify_all(keys))` decoded slot by slot |
//! | `string_increment(key, d)` | `incr_by_float(qualify(key), d)` |

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use redkey_core::Result;

/// Single-value operations
pub trait StringFacade {
    /// Store a raw string
    fn string_set(&self, key: &str, value: &str, expiry: Option<Duration>) -> Result<bool>;

    /// Store an encoded value
    ///
    /// `expiry` replaces any previous TTL; `None` leaves the key persistent.
    fn string_set_value<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        expiry: Option<Duration>,
    ) -> Result<bool>;

    /// Store several encoded values in one call
    fn string_set_many<T: Serialize>(&self, pairs: &[(&str, T)]) -> Result<bool>;

    /// Raw string at `key`; empty when absent
    fn string_get(&self, key: &str) -> Result<String>;

    /// Decoded value at `key`
    ///
    /// Absent keys decode to the zero value for primitives and fail for
    /// composites.
    fn string_get_value<T: DeserializeOwned>(&self, key: &str) -> Result<T>;

    /// Decoded values at `keys`, in the same order
    fn string_get_many<T: DeserializeOwned>(&self, keys: &[&str]) -> Result<Vec<T>>;

    /// Add `delta` to the number at `key`
    fn string_increment(&self, key: &str, delta: f64) -> Result<f64>;

    /// Subtract `delta` from the number at `key`
    fn string_decrement(&self, key: &str, delta: f64) -> Result<f64> {
        self.string_increment(key, -delta)
    }
}

// =============================================================================
// Implementation
// =============================================================================

use redkey_core::codec;
use redkey_store::RemoteStore;

use crate::client::Client;

impl<S: RemoteStore> StringFacade for Client<S> {
    fn string_set(&self, key: &str, value: &str, expiry: Option<Duration>) -> Result<bool> {
        self.store().set(&self.key(key), value.to_string(), expiry)
    }

    fn string_set_value<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        expiry: Option<Duration>,
    ) -> Result<bool> {
        let key = self.key(key);
        let encoded = codec::encode(value)?;
        self.store().set(&key, encoded, expiry)
    }

    fn string_set_many<T: Serialize>(&self, pairs: &[(&str, T)]) -> Result<bool> {
        let prefix = self.prefix();
        let encoded = pairs
            .iter()
            .map(|(key, value)| Ok((prefix.qualify(key), codec::encode(value)?)))
            .collect::<Result<Vec<_>>>()?;
        self.store().mset(encoded)
    }

    fn string_get(&self, key: &str) -> Result<String> {
        Ok(self.store().get(&self.key(key))?.unwrap_or_default())
    }

    fn string_get_value<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let stored = self.store().get(&self.key(key))?;
        codec::decode(stored.as_deref())
    }

    fn string_get_many<T: DeserializeOwned>(&self, keys: &[&str]) -> Result<Vec<T>> {
        let stored = self.store().mget(&self.keys(keys))?;
        codec::decode_all_optional(&stored)
    }

    fn string_increment(&self, key: &str, delta: f64) -> Result<f64> {
        self.store().incr_by_float(&self.key(key), delta)
    }
}

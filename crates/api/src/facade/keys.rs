//! Key facade
//!
//! | Facade | Store |
//! |--------|-------|
//! | `key_delete(key)` | `del([qualify(key)])` |
//! | `key_delete_many(keys)` | `del(qualify_all(keys))` |
//! | `key_exists(key)` | `exists(qualify(key))` |
//! | `key_rename(key, new)` | `rename(qualify(key), qualify(new))`, one prefix for both |
//! | `key_expire(key, ttl)` | `expire(qualify(key), ttl)`, `None` persists |

use std::time::Duration;

use redkey_core::Result;

/// Whole-key operations
pub trait KeyFacade {
    /// Delete `key`; true when it existed
    fn key_delete(&self, key: &str) -> Result<bool>;

    /// Delete keys, returning how many existed
    fn key_delete_many(&self, keys: &[&str]) -> Result<i64>;

    /// Whether `key` exists
    fn key_exists(&self, key: &str) -> Result<bool>;

    /// Rename `key` to `new_key`
    ///
    /// Both names are qualified with the same prefix. Fails with
    /// [`Error::NoSuchKey`](redkey_core::Error::NoSuchKey) when `key` does
    /// not exist.
    fn key_rename(&self, key: &str, new_key: &str) -> Result<bool>;

    /// Set the time to live of `key`, or remove it with `None`
    fn key_expire(&self, key: &str, expiry: Option<Duration>) -> Result<bool>;
}

// =============================================================================
// Implementation
// =============================================================================

use redkey_store::RemoteStore;

use crate::client::Client;

impl<S: RemoteStore> KeyFacade for Client<S> {
    fn key_delete(&self, key: &str) -> Result<bool> {
        let removed = self.store().del(&[self.key(key)])?;
        Ok(removed > 0)
    }

    fn key_delete_many(&self, keys: &[&str]) -> Result<i64> {
        self.store().del(&self.keys(keys))
    }

    fn key_exists(&self, key: &str) -> Result<bool> {
        self.store().exists(&self.key(key))
    }

    fn key_rename(&self, key: &str, new_key: &str) -> Result<bool> {
        let prefix = self.prefix();
        self.store()
            .rename(&prefix.qualify(key), &prefix.qualify(new_key))
    }

    fn key_expire(&self, key: &str, expiry: Option<Duration>) -> Result<bool> {
        self.store().expire(&self.key(key), expiry)
    }
}

//! Unordered set facade

use serde::de::DeserializeOwned;
use serde::Serialize;

use redkey_core::{Result, SetCombine};

/// Unordered, unique-member set operations
pub trait SetFacade {
    /// Add `member`; true when it was not present
    fn set_add<T: Serialize + ?Sized>(&self, key: &str, member: &T) -> Result<bool>;

    /// Remove `member`; true when it was present
    fn set_remove<T: Serialize + ?Sized>(&self, key: &str, member: &T) -> Result<bool>;

    /// Whether `member` is present
    fn set_contains<T: Serialize + ?Sized>(&self, key: &str, member: &T) -> Result<bool>;

    /// Every member, decoded
    fn set_members<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>>;

    /// Cardinality, 0 when absent
    fn set_length(&self, key: &str) -> Result<i64>;

    /// Combine the sets at `keys` with `op`
    fn set_combine<T: DeserializeOwned>(&self, keys: &[&str], op: SetCombine) -> Result<Vec<T>>;

    /// Members of any of the sets
    fn set_union<T: DeserializeOwned>(&self, keys: &[&str]) -> Result<Vec<T>> {
        self.set_combine(keys, SetCombine::Union)
    }

    /// Members of all of the sets
    fn set_intersect<T: DeserializeOwned>(&self, keys: &[&str]) -> Result<Vec<T>> {
        self.set_combine(keys, SetCombine::Intersect)
    }

    /// Members of the first set missing from every other
    fn set_difference<T: DeserializeOwned>(&self, keys: &[&str]) -> Result<Vec<T>> {
        self.set_combine(keys, SetCombine::Difference)
    }
}

// =============================================================================
// Implementation
// =============================================================================

use redkey_core::codec;
use redkey_store::RemoteStore;

use crate::client::Client;

impl<S: RemoteStore> SetFacade for Client<S> {
    fn set_add<T: Serialize + ?Sized>(&self, key: &str, member: &T) -> Result<bool> {
        let key = self.key(key);
        let encoded = codec::encode(member)?;
        self.store().sadd(&key, encoded)
    }

    fn set_remove<T: Serialize + ?Sized>(&self, key: &str, member: &T) -> Result<bool> {
        let key = self.key(key);
        let encoded = codec::encode(member)?;
        self.store().srem(&key, &encoded)
    }

    fn set_contains<T: Serialize + ?Sized>(&self, key: &str, member: &T) -> Result<bool> {
        let key = self.key(key);
        let encoded = codec::encode(member)?;
        self.store().sismember(&key, &encoded)
    }

    fn set_members<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let members = self.store().smembers(&self.key(key))?;
        codec::decode_all(&members)
    }

    fn set_length(&self, key: &str) -> Result<i64> {
        self.store().scard(&self.key(key))
    }

    fn set_combine<T: DeserializeOwned>(&self, keys: &[&str], op: SetCombine) -> Result<Vec<T>> {
        let qualified = self.keys(keys);
        tracing::debug!(
            target: "redkey::set",
            command = op.command(),
            keys = qualified.len(),
            "Set combine"
        );
        let members = self.store().scombine(op, &qualified)?;
        codec::decode_all(&members)
    }
}

//! The remote store seam
//!
//! [`RemoteStore`] is the only way the client reaches data. Every key it
//! receives is already namespaced and every value already encoded, so an
//! implementation never sees a typed value or a logical key.
//!
//! Implementations report their own failures as
//! [`Error::Remote`](redkey_core::Error::Remote) (or the more specific
//! `WrongType` / `NoSuchKey`); the client passes them through unmodified.

use std::sync::Arc;
use std::time::Duration;

use redkey_core::range::{LexBound, NativeRange, Order, ScoreBound, ScoredEntry};
use redkey_core::{Result, SetCombine};

/// Callback invoked with `(channel, message)` for each published message
pub type MessageHandler = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Native operations of a key/value structure store
///
/// Method names follow the store's own command vocabulary. Keys are
/// qualified; values, members and fields are encoded strings.
pub trait RemoteStore: Send + Sync {
    // ==================== Strings ====================

    /// Value at `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Values at `keys`, one slot per key in the same order
    fn mget(&self, keys: &[String]) -> Result<Vec<Option<String>>>;

    /// Store `value`; `expiry` replaces any previous TTL, `None` clears it
    fn set(&self, key: &str, value: String, expiry: Option<Duration>) -> Result<bool>;

    /// Store every pair; existing TTLs are cleared
    fn mset(&self, pairs: Vec<(String, String)>) -> Result<bool>;

    /// Add `delta` to the float at `key` (missing counts as 0)
    fn incr_by_float(&self, key: &str, delta: f64) -> Result<f64>;

    // ==================== Lists ====================

    /// Remove occurrences of `value`: `count > 0` from the head, `< 0` from
    /// the tail, `0` all of them
    fn lrem(&self, key: &str, count: i64, value: &str) -> Result<i64>;

    /// Elements in `start..=stop`, negative indices count from the end
    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>>;

    /// Push to the head, returning the new length
    fn lpush(&self, key: &str, value: String) -> Result<i64>;

    /// Push to the tail, returning the new length
    fn rpush(&self, key: &str, value: String) -> Result<i64>;

    /// Pop from the head
    fn lpop(&self, key: &str) -> Result<Option<String>>;

    /// Pop from the tail
    fn rpop(&self, key: &str) -> Result<Option<String>>;

    /// List length, 0 when absent
    fn llen(&self, key: &str) -> Result<i64>;

    // ==================== Hashes ====================

    /// Whether `field` exists
    fn hexists(&self, key: &str, field: &str) -> Result<bool>;

    /// Set `field`, returning true when the field is new
    fn hset(&self, key: &str, field: &str, value: String) -> Result<bool>;

    /// Delete fields, returning how many existed
    fn hdel(&self, key: &str, fields: &[String]) -> Result<i64>;

    /// Value of `field`
    fn hget(&self, key: &str, field: &str) -> Result<Option<String>>;

    /// Add `delta` to the float in `field` (missing counts as 0)
    fn hincr_by_float(&self, key: &str, field: &str, delta: f64) -> Result<f64>;

    /// Field names
    fn hkeys(&self, key: &str) -> Result<Vec<String>>;

    // ==================== Sets ====================

    /// Add `member`, returning true when it was not present
    fn sadd(&self, key: &str, member: String) -> Result<bool>;

    /// Remove `member`, returning true when it was present
    fn srem(&self, key: &str, member: &str) -> Result<bool>;

    /// Whether `member` is present
    fn sismember(&self, key: &str, member: &str) -> Result<bool>;

    /// Every member
    fn smembers(&self, key: &str) -> Result<Vec<String>>;

    /// Cardinality, 0 when absent
    fn scard(&self, key: &str) -> Result<i64>;

    /// Union, intersection or difference across `keys`
    fn scombine(&self, op: SetCombine, keys: &[String]) -> Result<Vec<String>>;

    // ==================== Sorted sets ====================

    /// Add or update `member`, returning true when it was not present
    fn zadd(&self, key: &str, member: String, score: f64) -> Result<bool>;

    /// Add or update every entry, returning how many were new
    fn zadd_many(&self, key: &str, entries: Vec<ScoredEntry>) -> Result<i64>;

    /// Entries at ranks `start..=stop` under `order`
    fn zrange_by_rank(&self, key: &str, start: i64, stop: i64, order: Order)
        -> Result<Vec<ScoredEntry>>;

    /// Entries with scores between the bounds, sequenced by `order`
    fn zrange_by_score(
        &self,
        key: &str,
        min: &ScoreBound,
        max: &ScoreBound,
        order: Order,
    ) -> Result<Vec<ScoredEntry>>;

    /// Entries whose members lie between the bounds, sequenced by `order`
    fn zrange_by_lex(
        &self,
        key: &str,
        min: &LexBound,
        max: &LexBound,
        order: Order,
    ) -> Result<Vec<ScoredEntry>>;

    /// Cardinality, 0 when absent
    fn zcard(&self, key: &str) -> Result<i64>;

    /// Number of members between the lexical bounds
    fn zlex_count(&self, key: &str, min: &LexBound, max: &LexBound) -> Result<i64>;

    /// Score of `member`
    fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>>;

    /// Remove members, returning how many existed
    fn zrem(&self, key: &str, members: &[String]) -> Result<i64>;

    /// Remove members between the lexical bounds
    fn zrem_range_by_lex(&self, key: &str, min: &LexBound, max: &LexBound) -> Result<i64>;

    /// Remove members at ascending ranks `start..=stop`
    fn zrem_range_by_rank(&self, key: &str, start: i64, stop: i64) -> Result<i64>;

    /// Remove members with scores between the bounds
    fn zrem_range_by_score(&self, key: &str, min: &ScoreBound, max: &ScoreBound) -> Result<i64>;

    /// Add `delta` to the score of `member` (missing counts as 0)
    fn zincr_by(&self, key: &str, member: String, delta: f64) -> Result<f64>;

    /// Execute a translated range query
    fn zrange(&self, key: &str, range: &NativeRange) -> Result<Vec<ScoredEntry>> {
        match range {
            NativeRange::Rank { start, stop, order } => {
                self.zrange_by_rank(key, *start, *stop, *order)
            }
            NativeRange::Score { min, max, order } => self.zrange_by_score(key, min, max, *order),
            NativeRange::Lex { min, max, order } => self.zrange_by_lex(key, min, max, *order),
        }
    }

    // ==================== Keys ====================

    /// Delete keys, returning how many existed
    fn del(&self, keys: &[String]) -> Result<i64>;

    /// Whether `key` exists
    fn exists(&self, key: &str) -> Result<bool>;

    /// Move `key` to `new_key`, replacing whatever `new_key` held
    fn rename(&self, key: &str, new_key: &str) -> Result<bool>;

    /// Set a TTL, or remove it with `None`; false when nothing changed
    fn expire(&self, key: &str, ttl: Option<Duration>) -> Result<bool>;

    // ==================== Pub/sub ====================

    /// Register `handler` for `channel`
    fn subscribe(&self, channel: &str, handler: MessageHandler) -> Result<()>;

    /// Deliver `message`, returning how many receivers got it
    fn publish(&self, channel: &str, message: String) -> Result<i64>;

    /// Drop every handler on `channel`
    fn unsubscribe(&self, channel: &str) -> Result<()>;

    /// Drop every handler on every channel
    fn unsubscribe_all(&self) -> Result<()>;
}

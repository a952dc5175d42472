//! In-process store
//!
//! [`MemoryStore`] implements [`RemoteStore`] against a sharded in-memory
//! keyspace. It follows the store's native rules closely enough to stand in
//! for a networked deployment in tests and embedded use:
//!
//! - a key holds one structure; the wrong accessor fails with `WRONGTYPE`;
//! - expired keys are invisible and removed when next touched;
//! - a list, hash, set or sorted set that becomes empty deletes its key;
//! - publish delivers synchronously on the caller's thread.
//!
//! # Design
//!
//! - DashMap: sharded keyspace, one shard locked per operation
//! - No shard guard is held across two keys, so multi-key calls never
//!   deadlock against each other

mod entry;
mod pubsub;
mod sorted_set;

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, trace};

use redkey_core::range::{LexBound, Order, ScoreBound, ScoredEntry};
use redkey_core::{Error, Result, SetCombine};

use crate::remote::{MessageHandler, RemoteStore};
use entry::{Entry, Structure};
use pubsub::Subscriptions;
use sorted_set::SortedSet;

/// Resolve `start..=stop` against a collection of `len` elements
///
/// Negative indices count from the end. Returns `None` when the range
/// selects nothing.
pub(crate) fn normalize_range(start: i64, stop: i64, len: usize) -> Option<(usize, usize)> {
    let len = len as i64;
    if len == 0 {
        return None;
    }
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

fn parse_float(raw: &str) -> Result<f64> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| Error::remote("ERR value is not a valid float"))
}

fn checked_sum(current: f64, delta: f64) -> Result<f64> {
    let sum = current + delta;
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(Error::remote("ERR increment would produce NaN or Infinity"))
    }
}

fn deadline(ttl: Duration, command: &str) -> Result<Instant> {
    Instant::now().checked_add(ttl).ok_or_else(|| {
        Error::remote(format!("ERR invalid expire time in '{}' command", command))
    })
}

/// Sharded in-memory keyspace with pub/sub
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
    subscriptions: Subscriptions,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .count()
    }

    /// Whether no live key exists
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remaining time to live of `key`, `None` when absent or persistent
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.purge_expired(key);
        let now = Instant::now();
        self.entries
            .get(key)
            .and_then(|entry| entry.expires_at)
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Drop every key; subscriptions are kept
    pub fn flush(&self) {
        self.entries.clear();
    }

    /// Channels with at least one handler
    pub fn channel_count(&self) -> usize {
        self.subscriptions.channel_count()
    }

    fn purge_expired(&self, key: &str) {
        let now = Instant::now();
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            trace!(target: "redkey::store", key, "Expired key removed");
        }
    }

    fn drop_if_empty(&self, key: &str) {
        self.entries.remove_if(key, |_, entry| entry.value.is_empty());
    }

    /// Run `f` against the structure at `key`; `None` when the key is absent
    fn read<R>(&self, key: &str, f: impl FnOnce(&Structure) -> Result<R>) -> Result<Option<R>> {
        self.purge_expired(key);
        match self.entries.get(key) {
            Some(entry) => f(&entry.value).map(Some),
            None => Ok(None),
        }
    }

    /// Mutate an existing structure; never creates the key
    fn update<R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut Structure) -> Result<R>,
    ) -> Result<Option<R>> {
        self.purge_expired(key);
        let outcome = match self.entries.get_mut(key) {
            Some(mut entry) => f(&mut entry.value).map(Some),
            None => Ok(None),
        };
        self.drop_if_empty(key);
        outcome
    }

    /// Mutate the structure at `key`, creating it with `create` when absent
    fn upsert<R>(
        &self,
        key: &str,
        create: fn() -> Structure,
        f: impl FnOnce(&mut Structure) -> Result<R>,
    ) -> Result<R> {
        self.purge_expired(key);
        let mut created = false;
        let outcome = {
            let mut entry = self.entries.entry(key.to_string()).or_insert_with(|| {
                created = true;
                Entry::new(create())
            });
            f(&mut entry.value)
        };
        if created && outcome.is_err() {
            self.entries.remove(key);
        } else {
            self.drop_if_empty(key);
        }
        outcome
    }

    fn sorted_set_read<R>(
        &self,
        key: &str,
        f: impl FnOnce(&SortedSet) -> R,
    ) -> Result<Option<R>> {
        self.read(key, |value| value.sorted_set(key).map(f))
    }

    fn sorted_set_remove(
        &self,
        key: &str,
        select: impl FnOnce(&SortedSet) -> Vec<ScoredEntry>,
    ) -> Result<i64> {
        let removed = self.update(key, |value| {
            let zset = value.sorted_set_mut(key)?;
            let doomed = select(zset);
            Ok(zset.remove_entries(&doomed))
        })?;
        Ok(removed.unwrap_or(0))
    }
}

impl RemoteStore for MemoryStore {
    // ==================== Strings ====================

    fn get(&self, key: &str) -> Result<Option<String>> {
        self.read(key, |value| value.text(key).cloned())
    }

    fn mget(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        // Non-string keys read as absent rather than failing the batch
        keys.iter()
            .map(|key| {
                self.read(key, |value| match value {
                    Structure::Text(text) => Ok(Some(text.clone())),
                    _ => Ok(None),
                })
                .map(Option::flatten)
            })
            .collect()
    }

    fn set(&self, key: &str, value: String, expiry: Option<Duration>) -> Result<bool> {
        if expiry.is_some_and(|ttl| ttl.is_zero()) {
            return Err(Error::remote("ERR invalid expire time in 'set' command"));
        }
        let expires_at = expiry.map(|ttl| deadline(ttl, "set")).transpose()?;
        let mut entry = Entry::new(Structure::Text(value));
        entry.expires_at = expires_at;
        self.entries.insert(key.to_string(), entry);
        Ok(true)
    }

    fn mset(&self, pairs: Vec<(String, String)>) -> Result<bool> {
        for (key, value) in pairs {
            self.entries.insert(key, Entry::new(Structure::Text(value)));
        }
        Ok(true)
    }

    fn incr_by_float(&self, key: &str, delta: f64) -> Result<f64> {
        self.upsert(
            key,
            || Structure::Text(String::new()),
            |value| {
                let text = value.text_mut(key)?;
                let next = checked_sum(parse_float(text)?, delta)?;
                *text = next.to_string();
                Ok(next)
            },
        )
    }

    // ==================== Lists ====================

    fn lrem(&self, key: &str, count: i64, value: &str) -> Result<i64> {
        let removed = self.update(key, |structure| {
            let list = structure.list_mut(key)?;
            let limit = if count == 0 {
                usize::MAX
            } else {
                count.unsigned_abs() as usize
            };
            let mut removed = 0;
            if count >= 0 {
                let mut i = 0;
                while i < list.len() && removed < limit {
                    if list[i] == value {
                        list.remove(i);
                        removed += 1;
                    } else {
                        i += 1;
                    }
                }
            } else {
                let mut i = list.len();
                while i > 0 && removed < limit {
                    i -= 1;
                    if list[i] == value {
                        list.remove(i);
                        removed += 1;
                    }
                }
            }
            Ok(removed as i64)
        })?;
        Ok(removed.unwrap_or(0))
    }

    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        let elements = self.read(key, |value| {
            let list = value.list(key)?;
            Ok(match normalize_range(start, stop, list.len()) {
                Some((from, to)) => list.range(from..=to).cloned().collect(),
                None => Vec::new(),
            })
        })?;
        Ok(elements.unwrap_or_default())
    }

    fn lpush(&self, key: &str, value: String) -> Result<i64> {
        self.upsert(key, || Structure::List(VecDeque::new()), |structure| {
            let list = structure.list_mut(key)?;
            list.push_front(value);
            Ok(list.len() as i64)
        })
    }

    fn rpush(&self, key: &str, value: String) -> Result<i64> {
        self.upsert(key, || Structure::List(VecDeque::new()), |structure| {
            let list = structure.list_mut(key)?;
            list.push_back(value);
            Ok(list.len() as i64)
        })
    }

    fn lpop(&self, key: &str) -> Result<Option<String>> {
        self.update(key, |value| Ok(value.list_mut(key)?.pop_front()))
            .map(Option::flatten)
    }

    fn rpop(&self, key: &str) -> Result<Option<String>> {
        self.update(key, |value| Ok(value.list_mut(key)?.pop_back()))
            .map(Option::flatten)
    }

    fn llen(&self, key: &str) -> Result<i64> {
        let len = self.read(key, |value| Ok(value.list(key)?.len() as i64))?;
        Ok(len.unwrap_or(0))
    }

    // ==================== Hashes ====================

    fn hexists(&self, key: &str, field: &str) -> Result<bool> {
        let exists = self.read(key, |value| Ok(value.hash(key)?.contains_key(field)))?;
        Ok(exists.unwrap_or(false))
    }

    fn hset(&self, key: &str, field: &str, value: String) -> Result<bool> {
        self.upsert(key, || Structure::Hash(BTreeMap::new()), |structure| {
            Ok(structure
                .hash_mut(key)?
                .insert(field.to_string(), value)
                .is_none())
        })
    }

    fn hdel(&self, key: &str, fields: &[String]) -> Result<i64> {
        let removed = self.update(key, |value| {
            let hash = value.hash_mut(key)?;
            Ok(fields
                .iter()
                .filter(|field| hash.remove(field.as_str()).is_some())
                .count() as i64)
        })?;
        Ok(removed.unwrap_or(0))
    }

    fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        self.read(key, |value| Ok(value.hash(key)?.get(field).cloned()))
            .map(Option::flatten)
    }

    fn hincr_by_float(&self, key: &str, field: &str, delta: f64) -> Result<f64> {
        self.upsert(key, || Structure::Hash(BTreeMap::new()), |value| {
            let hash = value.hash_mut(key)?;
            let current = match hash.get(field) {
                Some(raw) => parse_float(raw)?,
                None => 0.0,
            };
            let next = checked_sum(current, delta)?;
            hash.insert(field.to_string(), next.to_string());
            Ok(next)
        })
    }

    fn hkeys(&self, key: &str) -> Result<Vec<String>> {
        let fields = self.read(key, |value| Ok(value.hash(key)?.keys().cloned().collect()))?;
        Ok(fields.unwrap_or_default())
    }

    // ==================== Sets ====================

    fn sadd(&self, key: &str, member: String) -> Result<bool> {
        self.upsert(key, || Structure::Set(BTreeSet::new()), |value| {
            Ok(value.set_mut(key)?.insert(member))
        })
    }

    fn srem(&self, key: &str, member: &str) -> Result<bool> {
        let removed = self.update(key, |value| Ok(value.set_mut(key)?.remove(member)))?;
        Ok(removed.unwrap_or(false))
    }

    fn sismember(&self, key: &str, member: &str) -> Result<bool> {
        let present = self.read(key, |value| Ok(value.set(key)?.contains(member)))?;
        Ok(present.unwrap_or(false))
    }

    fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let members = self.read(key, |value| Ok(value.set(key)?.iter().cloned().collect()))?;
        Ok(members.unwrap_or_default())
    }

    fn scard(&self, key: &str) -> Result<i64> {
        let len = self.read(key, |value| Ok(value.set(key)?.len() as i64))?;
        Ok(len.unwrap_or(0))
    }

    fn scombine(&self, op: SetCombine, keys: &[String]) -> Result<Vec<String>> {
        let mut sets = Vec::with_capacity(keys.len());
        for key in keys {
            let members = self.read(key, |value| Ok(value.set(key)?.clone()))?;
            sets.push(members.unwrap_or_default());
        }

        let mut sets = sets.into_iter();
        let Some(first) = sets.next() else {
            return Ok(Vec::new());
        };
        let combined: BTreeSet<String> = sets.fold(first, |acc, next| match op {
            SetCombine::Union => acc.union(&next).cloned().collect(),
            SetCombine::Intersect => acc.intersection(&next).cloned().collect(),
            SetCombine::Difference => acc.difference(&next).cloned().collect(),
        });
        trace!(
            target: "redkey::store",
            command = op.command(),
            keys = keys.len(),
            result = combined.len(),
            "Set combine"
        );
        Ok(combined.into_iter().collect())
    }

    // ==================== Sorted sets ====================

    fn zadd(&self, key: &str, member: String, score: f64) -> Result<bool> {
        self.upsert(key, || Structure::SortedSet(SortedSet::default()), |value| {
            value.sorted_set_mut(key)?.insert(member, score)
        })
    }

    fn zadd_many(&self, key: &str, entries: Vec<ScoredEntry>) -> Result<i64> {
        self.upsert(key, || Structure::SortedSet(SortedSet::default()), |value| {
            let zset = value.sorted_set_mut(key)?;
            let mut added = 0;
            for entry in entries {
                if zset.insert(entry.member, entry.score)? {
                    added += 1;
                }
            }
            Ok(added)
        })
    }

    fn zrange_by_rank(
        &self,
        key: &str,
        start: i64,
        stop: i64,
        order: Order,
    ) -> Result<Vec<ScoredEntry>> {
        let entries = self.sorted_set_read(key, |zset| zset.range_by_rank(start, stop, order))?;
        Ok(entries.unwrap_or_default())
    }

    fn zrange_by_score(
        &self,
        key: &str,
        min: &ScoreBound,
        max: &ScoreBound,
        order: Order,
    ) -> Result<Vec<ScoredEntry>> {
        let entries = self.sorted_set_read(key, |zset| zset.range_by_score(min, max, order))?;
        Ok(entries.unwrap_or_default())
    }

    fn zrange_by_lex(
        &self,
        key: &str,
        min: &LexBound,
        max: &LexBound,
        order: Order,
    ) -> Result<Vec<ScoredEntry>> {
        let entries = self.sorted_set_read(key, |zset| zset.range_by_lex(min, max, order))?;
        Ok(entries.unwrap_or_default())
    }

    fn zcard(&self, key: &str) -> Result<i64> {
        let len = self.sorted_set_read(key, |zset| zset.len() as i64)?;
        Ok(len.unwrap_or(0))
    }

    fn zlex_count(&self, key: &str, min: &LexBound, max: &LexBound) -> Result<i64> {
        let count = self.sorted_set_read(key, |zset| {
            zset.range_by_lex(min, max, Order::Ascending).len() as i64
        })?;
        Ok(count.unwrap_or(0))
    }

    fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>> {
        self.sorted_set_read(key, |zset| zset.score(member))
            .map(Option::flatten)
    }

    fn zrem(&self, key: &str, members: &[String]) -> Result<i64> {
        let removed = self.update(key, |value| {
            let zset = value.sorted_set_mut(key)?;
            Ok(members.iter().filter(|member| zset.remove(member)).count() as i64)
        })?;
        Ok(removed.unwrap_or(0))
    }

    fn zrem_range_by_lex(&self, key: &str, min: &LexBound, max: &LexBound) -> Result<i64> {
        self.sorted_set_remove(key, |zset| zset.range_by_lex(min, max, Order::Ascending))
    }

    fn zrem_range_by_rank(&self, key: &str, start: i64, stop: i64) -> Result<i64> {
        self.sorted_set_remove(key, |zset| zset.range_by_rank(start, stop, Order::Ascending))
    }

    fn zrem_range_by_score(&self, key: &str, min: &ScoreBound, max: &ScoreBound) -> Result<i64> {
        self.sorted_set_remove(key, |zset| zset.range_by_score(min, max, Order::Ascending))
    }

    fn zincr_by(&self, key: &str, member: String, delta: f64) -> Result<f64> {
        self.upsert(key, || Structure::SortedSet(SortedSet::default()), |value| {
            value.sorted_set_mut(key)?.increment(member, delta)
        })
    }

    // ==================== Keys ====================

    fn del(&self, keys: &[String]) -> Result<i64> {
        let mut removed = 0;
        for key in keys {
            self.purge_expired(key);
            if self.entries.remove(key.as_str()).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        self.purge_expired(key);
        Ok(self.entries.contains_key(key))
    }

    fn rename(&self, key: &str, new_key: &str) -> Result<bool> {
        self.purge_expired(key);
        let Some((_, entry)) = self.entries.remove(key) else {
            return Err(Error::NoSuchKey {
                key: key.to_string(),
            });
        };
        self.entries.insert(new_key.to_string(), entry);
        debug!(target: "redkey::store", from = key, to = new_key, "Key renamed");
        Ok(true)
    }

    fn expire(&self, key: &str, ttl: Option<Duration>) -> Result<bool> {
        self.purge_expired(key);
        match ttl {
            // A zero TTL expires the key on the spot
            Some(ttl) if ttl.is_zero() => Ok(self.entries.remove(key).is_some()),
            Some(ttl) => {
                let expires_at = deadline(ttl, "expire")?;
                Ok(match self.entries.get_mut(key) {
                    Some(mut entry) => {
                        entry.expires_at = Some(expires_at);
                        true
                    }
                    None => false,
                })
            }
            None => Ok(match self.entries.get_mut(key) {
                Some(mut entry) => entry.expires_at.take().is_some(),
                None => false,
            }),
        }
    }

    // ==================== Pub/sub ====================

    fn subscribe(&self, channel: &str, handler: MessageHandler) -> Result<()> {
        self.subscriptions.subscribe(channel, handler);
        debug!(target: "redkey::store", channel, "Subscribed");
        Ok(())
    }

    fn publish(&self, channel: &str, message: String) -> Result<i64> {
        let receivers = self.subscriptions.publish(channel, &message);
        trace!(target: "redkey::store", channel, receivers, "Published");
        Ok(receivers)
    }

    fn unsubscribe(&self, channel: &str) -> Result<()> {
        let dropped = self.subscriptions.unsubscribe(channel);
        debug!(target: "redkey::store", channel, dropped, "Unsubscribed");
        Ok(())
    }

    fn unsubscribe_all(&self) -> Result<()> {
        let dropped = self.subscriptions.unsubscribe_all();
        debug!(target: "redkey::store", dropped, "Unsubscribed from every channel");
        Ok(())
    }
}

//! Sorted set facade
//!
//! Every range read goes through one [`RangeSpec`]: the facade translates it
//! with [`RangeQueryTranslator`], runs the native query and decodes the
//! reply in store order.
//!
//! | Facade | Store |
//! |--------|-------|
//! | `sorted_set_range(key, spec)` | `zrange(qualify(key), translate(spec))` members decoded |
//! | `sorted_set_range_with_scores(key, spec)` | same, decoded with scores |
//! | `sorted_set_first_score(key)` | `zrange_by_rank(qualify(key), 0, 0, Ascending)` |
//! | `sorted_set_last_score(key)` | `zrange_by_rank(qualify(key), 0, 0, Descending)` |
//! | `sorted_set_min_score(key)` | `first_score`, empty handled by [`EmptyScorePolicy`] |
//! | `sorted_set_max_score(key)` | `last_score`, empty handled by [`EmptyScorePolicy`] |
//!
//! Value ranges take [`ValueBound`] ends so either side can be left open
//! (`-` / `+` on the wire).
//!
//! [`EmptyScorePolicy`]: redkey_core::EmptyScorePolicy

use serde::de::DeserializeOwned;
use serde::Serialize;

use redkey_core::range::{Exclusivity, Order, RangeSpec, ScoredMember, ValueBound};
use redkey_core::Result;

/// Scored, ordered set operations
pub trait SortedSetFacade {
    /// Add or rescore `member`; true when it was not present
    fn sorted_set_add<T: Serialize + ?Sized>(&self, key: &str, member: &T, score: f64)
        -> Result<bool>;

    /// Add or rescore several members; a missing score counts as `0`
    ///
    /// Returns how many members were new.
    fn sorted_set_add_many<T: Serialize>(&self, key: &str, entries: &[(T, Option<f64>)])
        -> Result<i64>;

    /// Members selected by `spec`, in query order
    fn sorted_set_range<T: DeserializeOwned, V: Serialize>(
        &self,
        key: &str,
        spec: &RangeSpec<V>,
    ) -> Result<Vec<T>>;

    /// Members and scores selected by `spec`, in query order
    fn sorted_set_range_with_scores<T: DeserializeOwned, V: Serialize>(
        &self,
        key: &str,
        spec: &RangeSpec<V>,
    ) -> Result<Vec<ScoredMember<T>>>;

    /// Members at ranks `start..=stop` under `order`
    fn sorted_set_range_by_rank<T: DeserializeOwned>(
        &self,
        key: &str,
        start: i64,
        stop: i64,
        order: Order,
    ) -> Result<Vec<T>> {
        self.sorted_set_range(key, &RangeSpec::by_rank(start, stop).order(order))
    }

    /// Members with scores between `min` and `max`
    fn sorted_set_range_by_score<T: DeserializeOwned>(
        &self,
        key: &str,
        min: f64,
        max: f64,
        exclusivity: Exclusivity,
        order: Order,
    ) -> Result<Vec<T>> {
        let spec = RangeSpec::by_score(min, max)
            .exclusivity(exclusivity)
            .order(order);
        self.sorted_set_range(key, &spec)
    }

    /// Members whose encoded value lies between `min` and `max`
    fn sorted_set_range_by_value<T: DeserializeOwned, V: Serialize>(
        &self,
        key: &str,
        min: ValueBound<V>,
        max: ValueBound<V>,
        exclusivity: Exclusivity,
        order: Order,
    ) -> Result<Vec<T>> {
        let spec = RangeSpec::by_value_bounds(min, max)
            .exclusivity(exclusivity)
            .order(order);
        self.sorted_set_range(key, &spec)
    }

    /// Cardinality, 0 when absent
    fn sorted_set_length(&self, key: &str) -> Result<i64>;

    /// Number of members whose encoded value lies between `min` and `max`
    fn sorted_set_length_by_value<V: Serialize>(
        &self,
        key: &str,
        min: ValueBound<V>,
        max: ValueBound<V>,
        exclusivity: Exclusivity,
    ) -> Result<i64>;

    /// Score of `member`
    fn sorted_set_score<T: Serialize + ?Sized>(&self, key: &str, member: &T) -> Result<Option<f64>>;

    /// Lowest score, `None` when the set is empty
    fn sorted_set_first_score(&self, key: &str) -> Result<Option<f64>>;

    /// Highest score, `None` when the set is empty
    fn sorted_set_last_score(&self, key: &str) -> Result<Option<f64>>;

    /// Lowest score
    ///
    /// An empty set reports `0.0` under the default policy, which cannot be
    /// told apart from a real minimum of zero. Use `sorted_set_first_score`
    /// to distinguish.
    fn sorted_set_min_score(&self, key: &str) -> Result<f64>;

    /// Highest score, with the same empty-set rule as `sorted_set_min_score`
    fn sorted_set_max_score(&self, key: &str) -> Result<f64>;

    /// Remove `member`; true when it was present
    fn sorted_set_remove<T: Serialize + ?Sized>(&self, key: &str, member: &T) -> Result<bool>;

    /// Remove members, returning how many were present
    fn sorted_set_remove_many<T: Serialize>(&self, key: &str, members: &[T]) -> Result<i64>;

    /// Remove members whose encoded value lies between `min` and `max`
    fn sorted_set_remove_range_by_value<V: Serialize>(
        &self,
        key: &str,
        min: ValueBound<V>,
        max: ValueBound<V>,
        exclusivity: Exclusivity,
    ) -> Result<i64>;

    /// Remove members at ascending ranks `start..=stop`
    fn sorted_set_remove_range_by_rank(&self, key: &str, start: i64, stop: i64) -> Result<i64>;

    /// Remove members with scores between `min` and `max`
    fn sorted_set_remove_range_by_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
        exclusivity: Exclusivity,
    ) -> Result<i64>;

    /// Add `delta` to the score of `member`, returning the new score
    fn sorted_set_increment<T: Serialize + ?Sized>(&self, key: &str, member: &T, delta: f64)
        -> Result<f64>;

    /// Subtract `delta` from the score of `member`, returning the new score
    fn sorted_set_decrement<T: Serialize + ?Sized>(
        &self,
        key: &str,
        member: &T,
        delta: f64,
    ) -> Result<f64> {
        self.sorted_set_increment(key, member, -delta)
    }
}

// =============================================================================
// Implementation
// =============================================================================

use tracing::debug;

use redkey_core::codec;
use redkey_core::range::{RangeQueryTranslator, ScoredEntry};
use redkey_store::RemoteStore;

use crate::client::Client;

impl<S: RemoteStore> Client<S> {
    fn zrange_native<V: Serialize>(
        &self,
        key: &str,
        spec: &RangeSpec<V>,
    ) -> Result<Vec<ScoredEntry>> {
        let qualified = self.key(key);
        let native = RangeQueryTranslator::translate(spec)?;
        let entries = self.store().zrange(&qualified, &native)?;
        debug!(
            target: "redkey::zset",
            key = %qualified,
            mode = ?spec.mode(),
            order = ?spec.order,
            returned = entries.len(),
            "Range query"
        );
        Ok(entries)
    }

    fn extreme_score(&self, key: &str, order: Order) -> Result<Option<f64>> {
        let native = match order {
            Order::Ascending => RangeQueryTranslator::min_score_query(),
            Order::Descending => RangeQueryTranslator::max_score_query(),
        };
        let entries = self.store().zrange(&self.key(key), &native)?;
        Ok(RangeQueryTranslator::extreme_score(&entries))
    }
}

impl<S: RemoteStore> SortedSetFacade for Client<S> {
    fn sorted_set_add<T: Serialize + ?Sized>(
        &self,
        key: &str,
        member: &T,
        score: f64,
    ) -> Result<bool> {
        let key = self.key(key);
        let encoded = codec::encode(member)?;
        self.store().zadd(&key, encoded, score)
    }

    fn sorted_set_add_many<T: Serialize>(
        &self,
        key: &str,
        entries: &[(T, Option<f64>)],
    ) -> Result<i64> {
        let key = self.key(key);
        let encoded = entries
            .iter()
            .map(|(member, score)| {
                Ok(ScoredEntry::new(codec::encode(member)?, score.unwrap_or(0.0)))
            })
            .collect::<Result<Vec<_>>>()?;
        self.store().zadd_many(&key, encoded)
    }

    fn sorted_set_range<T: DeserializeOwned, V: Serialize>(
        &self,
        key: &str,
        spec: &RangeSpec<V>,
    ) -> Result<Vec<T>> {
        let entries = self.zrange_native(key, spec)?;
        RangeQueryTranslator::decode_members(entries)
    }

    fn sorted_set_range_with_scores<T: DeserializeOwned, V: Serialize>(
        &self,
        key: &str,
        spec: &RangeSpec<V>,
    ) -> Result<Vec<ScoredMember<T>>> {
        let entries = self.zrange_native(key, spec)?;
        RangeQueryTranslator::decode_scored(entries)
    }

    fn sorted_set_length(&self, key: &str) -> Result<i64> {
        self.store().zcard(&self.key(key))
    }

    fn sorted_set_length_by_value<V: Serialize>(
        &self,
        key: &str,
        min: ValueBound<V>,
        max: ValueBound<V>,
        exclusivity: Exclusivity,
    ) -> Result<i64> {
        let key = self.key(key);
        let (min, max) = RangeQueryTranslator::lex_bounds(&min, &max, exclusivity)?;
        self.store().zlex_count(&key, &min, &max)
    }

    fn sorted_set_score<T: Serialize + ?Sized>(
        &self,
        key: &str,
        member: &T,
    ) -> Result<Option<f64>> {
        let key = self.key(key);
        let encoded = codec::encode(member)?;
        self.store().zscore(&key, &encoded)
    }

    fn sorted_set_first_score(&self, key: &str) -> Result<Option<f64>> {
        self.extreme_score(key, Order::Ascending)
    }

    fn sorted_set_last_score(&self, key: &str) -> Result<Option<f64>> {
        self.extreme_score(key, Order::Descending)
    }

    fn sorted_set_min_score(&self, key: &str) -> Result<f64> {
        let score = self.sorted_set_first_score(key)?;
        self.extreme_or_policy(key, score)
    }

    fn sorted_set_max_score(&self, key: &str) -> Result<f64> {
        let score = self.sorted_set_last_score(key)?;
        self.extreme_or_policy(key, score)
    }

    fn sorted_set_remove<T: Serialize + ?Sized>(&self, key: &str, member: &T) -> Result<bool> {
        let key = self.key(key);
        let encoded = codec::encode(member)?;
        let removed = self.store().zrem(&key, &[encoded])?;
        Ok(removed > 0)
    }

    fn sorted_set_remove_many<T: Serialize>(&self, key: &str, members: &[T]) -> Result<i64> {
        let key = self.key(key);
        let encoded = codec::encode_all(members)?;
        self.store().zrem(&key, &encoded)
    }

    fn sorted_set_remove_range_by_value<V: Serialize>(
        &self,
        key: &str,
        min: ValueBound<V>,
        max: ValueBound<V>,
        exclusivity: Exclusivity,
    ) -> Result<i64> {
        let key = self.key(key);
        let (min, max) = RangeQueryTranslator::lex_bounds(&min, &max, exclusivity)?;
        self.store().zrem_range_by_lex(&key, &min, &max)
    }

    fn sorted_set_remove_range_by_rank(&self, key: &str, start: i64, stop: i64) -> Result<i64> {
        self.store().zrem_range_by_rank(&self.key(key), start, stop)
    }

    fn sorted_set_remove_range_by_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
        exclusivity: Exclusivity,
    ) -> Result<i64> {
        let key = self.key(key);
        let (min, max) = RangeQueryTranslator::score_bounds(min, max, exclusivity);
        self.store().zrem_range_by_score(&key, &min, &max)
    }

    fn sorted_set_increment<T: Serialize + ?Sized>(
        &self,
        key: &str,
        member: &T,
        delta: f64,
    ) -> Result<f64> {
        let key = self.key(key);
        let encoded = codec::encode(member)?;
        self.store().zincr_by(&key, encoded, delta)
    }
}

//! Sorted set index
//!
//! Members are unique and ordered by `(score, member bytes)`. A hash map
//! gives O(1) score lookup, and a `BTreeSet` keyed on `(score, member)` gives
//! the ordered walk every range query needs.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use redkey_core::range::{LexBound, Order, ScoreBound, ScoredEntry};
use redkey_core::{Error, Result};

use super::normalize_range;

/// f64 with a total order
#[derive(Debug, Clone, Copy)]
struct Score(f64);

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SortedSet {
    scores: HashMap<String, f64>,
    ordered: BTreeSet<(Score, String)>,
}

impl SortedSet {
    pub(crate) fn len(&self) -> usize {
        self.scores.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Add or rescore `member`; true when it was new
    pub(crate) fn insert(&mut self, member: String, score: f64) -> Result<bool> {
        if score.is_nan() {
            return Err(Error::remote("ERR value is not a valid float"));
        }
        // -0.0 and 0.0 are the same score
        let score = score + 0.0;
        match self.scores.insert(member.clone(), score) {
            Some(old) => {
                self.ordered.remove(&(Score(old), member.clone()));
                self.ordered.insert((Score(score), member));
                Ok(false)
            }
            None => {
                self.ordered.insert((Score(score), member));
                Ok(true)
            }
        }
    }

    pub(crate) fn score(&self, member: &str) -> Option<f64> {
        self.scores.get(member).copied()
    }

    pub(crate) fn remove(&mut self, member: &str) -> bool {
        match self.scores.remove_entry(member) {
            Some((member, score)) => {
                self.ordered.remove(&(Score(score), member));
                true
            }
            None => false,
        }
    }

    pub(crate) fn increment(&mut self, member: String, delta: f64) -> Result<f64> {
        let score = self.score(&member).unwrap_or(0.0) + delta;
        if score.is_nan() {
            return Err(Error::remote("ERR resulting score is not a number (NaN)"));
        }
        self.insert(member, score)?;
        Ok(score)
    }

    fn walk(&self, order: Order) -> Box<dyn Iterator<Item = &(Score, String)> + '_> {
        match order {
            Order::Ascending => Box::new(self.ordered.iter()),
            Order::Descending => Box::new(self.ordered.iter().rev()),
        }
    }

    /// Ranks count from the first element of `order`
    pub(crate) fn range_by_rank(&self, start: i64, stop: i64, order: Order) -> Vec<ScoredEntry> {
        let Some((from, to)) = normalize_range(start, stop, self.len()) else {
            return Vec::new();
        };
        self.walk(order)
            .skip(from)
            .take(to - from + 1)
            .map(|(score, member)| ScoredEntry::new(member.as_str(), score.0))
            .collect()
    }

    pub(crate) fn range_by_score(
        &self,
        min: &ScoreBound,
        max: &ScoreBound,
        order: Order,
    ) -> Vec<ScoredEntry> {
        self.walk(order)
            .filter(|(score, _)| min.admits_above(score.0) && max.admits_below(score.0))
            .map(|(score, member)| ScoredEntry::new(member.as_str(), score.0))
            .collect()
    }

    pub(crate) fn range_by_lex(
        &self,
        min: &LexBound,
        max: &LexBound,
        order: Order,
    ) -> Vec<ScoredEntry> {
        self.walk(order)
            .filter(|(_, member)| min.admits_above(member) && max.admits_below(member))
            .map(|(score, member)| ScoredEntry::new(member.as_str(), score.0))
            .collect()
    }

    /// Remove the members of `entries`, returning how many were present
    pub(crate) fn remove_entries(&mut self, entries: &[ScoredEntry]) -> i64 {
        entries
            .iter()
            .filter(|entry| self.remove(&entry.member))
            .count() as i64
    }
}

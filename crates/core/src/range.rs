//! Sorted set range queries
//!
//! One [`RangeSpec`] describes every range query a sorted set supports:
//!
//! | Mode | Bounds | Exclusivity | Order |
//! |------|--------|-------------|-------|
//! | by rank | `start`, `stop` indices, `-1` = last | ignored (always inclusive) | sequence direction |
//! | by score | `min`, `max` (`±inf` allowed) | per bound | sequence direction |
//! | by lexical value | `min`, `max` member values, or open ends | per bound | sequence direction only |
//!
//! [`RangeQueryTranslator::translate`] turns a spec into the [`NativeRange`]
//! a store executes, and
//! [`RangeQueryTranslator::decode_scored`] turns the store's scored entries
//! back into typed [`ScoredMember`]s.
//!
//! ## Defaults
//!
//! - rank bounds: `0..=-1` (whole collection), see [`RangeSpec::all`]
//! - score bounds: `-inf..=+inf`, see [`RangeSpec::by_score_all`]
//! - exclusivity: [`Exclusivity::IncludeBoth`]
//! - order: [`Order::Ascending`]
//!
//! ## Min / max score
//!
//! The extreme scores are rank queries for exactly one element (`0..=0`),
//! ascending for the minimum and descending for the maximum. An empty set
//! yields no element; what the caller then sees is decided by
//! [`EmptyScorePolicy`](crate::config::EmptyScorePolicy).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec;
use crate::error::Result;

/// Direction of the returned sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Order {
    /// Lowest score (or value) first
    #[default]
    Ascending,
    /// Highest score (or value) first
    Descending,
}

impl Order {
    /// The opposite direction
    pub fn reverse(self) -> Self {
        match self {
            Order::Ascending => Order::Descending,
            Order::Descending => Order::Ascending,
        }
    }
}

/// Which range bounds are excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Exclusivity {
    /// Closed range: both bounds included
    #[default]
    IncludeBoth,
    /// Start excluded, stop included
    ExcludeStart,
    /// Start included, stop excluded
    ExcludeStop,
    /// Open range: both bounds excluded
    ExcludeBoth,
}

impl Exclusivity {
    /// `(start_excluded, stop_excluded)`
    pub fn flags(self) -> (bool, bool) {
        match self {
            Exclusivity::IncludeBoth => (false, false),
            Exclusivity::ExcludeStart => (true, false),
            Exclusivity::ExcludeStop => (false, true),
            Exclusivity::ExcludeBoth => (true, true),
        }
    }
}

/// Query mode of a [`RangeSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeMode {
    /// Positions under the current order
    ByRank,
    /// Score interval
    ByScore,
    /// Member value interval
    ByLexicalValue,
}

/// Typed bounds of a range query
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBounds<V> {
    /// Zero-based ranks; negative values count from the end
    Rank {
        /// First rank
        start: i64,
        /// Last rank (inclusive)
        stop: i64,
    },
    /// Score interval
    Score {
        /// Lower score
        min: f64,
        /// Upper score
        max: f64,
    },
    /// Member value interval, compared on the encoded form
    Lex {
        /// Lower value
        min: ValueBound<V>,
        /// Upper value
        max: ValueBound<V>,
    },
}

/// One end of a member value interval
///
/// `Lowest` and `Highest` are the store's `-` and `+`: they sort below and
/// above every member and ignore exclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueBound<V> {
    /// Below every member
    Lowest,
    /// Above every member
    Highest,
    /// A member value, compared on its encoded form
    Value(V),
}

/// Unified range query over a sorted set
///
/// `V` is the member type used by lexical bounds. Rank and score specs are
/// built on `RangeSpec<String>` so the parameter never needs spelling out.
///
/// ```
/// use redkey_core::range::{Exclusivity, Order, RangeSpec};
///
/// let top_three = RangeSpec::by_rank(0, 2).order(Order::Descending);
/// let passing = RangeSpec::by_score(50.0, f64::INFINITY).exclusivity(Exclusivity::ExcludeStart);
/// let names = RangeSpec::by_value("a", "m");
/// let tail = RangeSpec::by_value_from("m");
/// # let _ = (top_three, passing, names, tail);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSpec<V = String> {
    /// Bounds; their variant selects the mode
    pub bounds: RangeBounds<V>,
    /// Excluded bounds (ignored for rank queries)
    pub exclusivity: Exclusivity,
    /// Direction of the returned sequence
    pub order: Order,
}

impl RangeSpec<String> {
    /// Rank range `start..=stop`
    pub fn by_rank(start: i64, stop: i64) -> Self {
        Self::from_bounds(RangeBounds::Rank { start, stop })
    }

    /// The whole collection, `0..=-1`
    pub fn all() -> Self {
        Self::by_rank(0, -1)
    }

    /// Score range `min..=max`
    pub fn by_score(min: f64, max: f64) -> Self {
        Self::from_bounds(RangeBounds::Score { min, max })
    }

    /// Every score, `-inf..=+inf`
    pub fn by_score_all() -> Self {
        Self::by_score(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Single-element rank query used for the extreme scores
    pub fn extreme(order: Order) -> Self {
        Self::by_rank(0, 0).order(order)
    }
}

impl Default for RangeSpec<String> {
    fn default() -> Self {
        Self::all()
    }
}

impl<V> RangeSpec<V> {
    /// Value range `min..=max`
    pub fn by_value(min: V, max: V) -> Self {
        Self::by_value_bounds(ValueBound::Value(min), ValueBound::Value(max))
    }

    /// Value range with explicit ends, either of which may be open
    pub fn by_value_bounds(min: ValueBound<V>, max: ValueBound<V>) -> Self {
        Self::from_bounds(RangeBounds::Lex { min, max })
    }

    /// Every value from `min` up
    pub fn by_value_from(min: V) -> Self {
        Self::by_value_bounds(ValueBound::Value(min), ValueBound::Highest)
    }

    /// Every value up to `max`
    pub fn by_value_to(max: V) -> Self {
        Self::by_value_bounds(ValueBound::Lowest, ValueBound::Value(max))
    }

    fn from_bounds(bounds: RangeBounds<V>) -> Self {
        Self {
            bounds,
            exclusivity: Exclusivity::default(),
            order: Order::default(),
        }
    }

    /// Set which bounds are excluded
    pub fn exclusivity(mut self, exclusivity: Exclusivity) -> Self {
        self.exclusivity = exclusivity;
        self
    }

    /// Set the sequence direction
    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Shorthand for `order(Order::Descending)`
    pub fn descending(self) -> Self {
        self.order(Order::Descending)
    }

    /// Query mode selected by the bounds
    pub fn mode(&self) -> RangeMode {
        match self.bounds {
            RangeBounds::Rank { .. } => RangeMode::ByRank,
            RangeBounds::Score { .. } => RangeMode::ByScore,
            RangeBounds::Lex { .. } => RangeMode::ByLexicalValue,
        }
    }
}

// =============================================================================
// Native forms
// =============================================================================

/// One end of a score range as the store expects it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBound {
    /// Bound score, may be infinite
    pub value: f64,
    /// Whether the bound itself is excluded
    pub exclusive: bool,
}

impl ScoreBound {
    /// Included bound
    pub fn inclusive(value: f64) -> Self {
        Self {
            value,
            exclusive: false,
        }
    }

    /// Excluded bound
    pub fn exclusive(value: f64) -> Self {
        Self {
            value,
            exclusive: true,
        }
    }

    /// Whether `score` lies on the admitted side of this bound used as a minimum
    pub fn admits_above(&self, score: f64) -> bool {
        if self.exclusive {
            score > self.value
        } else {
            score >= self.value
        }
    }

    /// Whether `score` lies on the admitted side of this bound used as a maximum
    pub fn admits_below(&self, score: f64) -> bool {
        if self.exclusive {
            score < self.value
        } else {
            score <= self.value
        }
    }

    /// Protocol argument form: `10`, `(10`, `-inf`, `(+inf`
    pub fn to_arg(&self) -> String {
        let value = if self.value == f64::INFINITY {
            "+inf".to_string()
        } else if self.value == f64::NEG_INFINITY {
            "-inf".to_string()
        } else {
            self.value.to_string()
        };
        if self.exclusive {
            format!("({}", value)
        } else {
            value
        }
    }
}

impl fmt::Display for ScoreBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_arg())
    }
}

/// One end of a lexical range as the store expects it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexBound {
    /// `-`, below every member
    Lowest,
    /// `+`, above every member
    Highest,
    /// `[value` or `(value`
    Value {
        /// Encoded member value
        value: String,
        /// Whether the bound itself is excluded
        exclusive: bool,
    },
}

impl LexBound {
    /// Included bound
    pub fn inclusive(value: impl Into<String>) -> Self {
        LexBound::Value {
            value: value.into(),
            exclusive: false,
        }
    }

    /// Excluded bound
    pub fn exclusive(value: impl Into<String>) -> Self {
        LexBound::Value {
            value: value.into(),
            exclusive: true,
        }
    }

    /// Byte-wise check of `member` against this bound used as a minimum
    pub fn admits_above(&self, member: &str) -> bool {
        match self {
            LexBound::Lowest => true,
            LexBound::Highest => false,
            LexBound::Value { value, exclusive } => {
                let (member, bound) = (member.as_bytes(), value.as_bytes());
                if *exclusive {
                    member > bound
                } else {
                    member >= bound
                }
            }
        }
    }

    /// Byte-wise check of `member` against this bound used as a maximum
    pub fn admits_below(&self, member: &str) -> bool {
        match self {
            LexBound::Lowest => false,
            LexBound::Highest => true,
            LexBound::Value { value, exclusive } => {
                let (member, bound) = (member.as_bytes(), value.as_bytes());
                if *exclusive {
                    member < bound
                } else {
                    member <= bound
                }
            }
        }
    }

    /// Protocol argument form: `-`, `+`, `[value` or `(value`
    pub fn to_arg(&self) -> String {
        match self {
            LexBound::Lowest => "-".to_string(),
            LexBound::Highest => "+".to_string(),
            LexBound::Value { value, exclusive } => {
                let marker = if *exclusive { '(' } else { '[' };
                format!("{}{}", marker, value)
            }
        }
    }
}

impl fmt::Display for LexBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_arg())
    }
}

/// Range query in the shape the store executes
#[derive(Debug, Clone, PartialEq)]
pub enum NativeRange {
    /// Rank range, inclusive at both ends
    Rank {
        /// First rank
        start: i64,
        /// Last rank
        stop: i64,
        /// Sequence direction; ranks count from the first element of it
        order: Order,
    },
    /// Score range
    Score {
        /// Lower bound
        min: ScoreBound,
        /// Upper bound
        max: ScoreBound,
        /// Sequence direction
        order: Order,
    },
    /// Lexical range
    Lex {
        /// Lower bound
        min: LexBound,
        /// Upper bound
        max: LexBound,
        /// Sequence direction; does not affect bound comparison
        order: Order,
    },
}

impl NativeRange {
    /// Sequence direction of the query
    pub fn order(&self) -> Order {
        match self {
            NativeRange::Rank { order, .. }
            | NativeRange::Score { order, .. }
            | NativeRange::Lex { order, .. } => *order,
        }
    }
}

/// Member and score as returned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry {
    /// Encoded member
    pub member: String,
    /// Score
    pub score: f64,
}

impl ScoredEntry {
    /// Create an entry
    pub fn new(member: impl Into<String>, score: f64) -> Self {
        Self {
            member: member.into(),
            score,
        }
    }
}

/// Decoded member paired with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMember<T> {
    /// Decoded member
    pub member: T,
    /// Score
    pub score: f64,
}

// =============================================================================
// Translator
// =============================================================================

/// Converts between [`RangeSpec`] and the store's native range forms
///
/// Stateless; every method is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeQueryTranslator;

impl RangeQueryTranslator {
    /// Translate a spec into its native shape
    ///
    /// Lexical bounds are encoded with the value codec so they compare
    /// against members exactly as stored.
    ///
    /// # Errors
    ///
    /// Only lexical bounds can fail, and only if their `Serialize` impl does.
    pub fn translate<V: Serialize>(spec: &RangeSpec<V>) -> Result<NativeRange> {
        let order = spec.order;
        let native = match &spec.bounds {
            // Rank ranges are inclusive at both ends; exclusivity does not apply
            RangeBounds::Rank { start, stop } => NativeRange::Rank {
                start: *start,
                stop: *stop,
                order,
            },
            RangeBounds::Score { min, max } => {
                let (min, max) = Self::score_bounds(*min, *max, spec.exclusivity);
                NativeRange::Score { min, max, order }
            }
            RangeBounds::Lex { min, max } => {
                let (min, max) = Self::lex_bounds(min, max, spec.exclusivity)?;
                NativeRange::Lex { min, max, order }
            }
        };
        Ok(native)
    }

    /// Native score bounds for `min..max` under `exclusivity`
    pub fn score_bounds(min: f64, max: f64, exclusivity: Exclusivity) -> (ScoreBound, ScoreBound) {
        let (start_excluded, stop_excluded) = exclusivity.flags();
        (
            ScoreBound {
                value: min,
                exclusive: start_excluded,
            },
            ScoreBound {
                value: max,
                exclusive: stop_excluded,
            },
        )
    }

    /// Native lexical bounds for `min..max` under `exclusivity`
    ///
    /// Open ends become `-` / `+` whatever the exclusivity says.
    pub fn lex_bounds<V: Serialize>(
        min: &ValueBound<V>,
        max: &ValueBound<V>,
        exclusivity: Exclusivity,
    ) -> Result<(LexBound, LexBound)> {
        let (start_excluded, stop_excluded) = exclusivity.flags();
        Ok((
            Self::lex_bound(min, start_excluded)?,
            Self::lex_bound(max, stop_excluded)?,
        ))
    }

    fn lex_bound<V: Serialize>(bound: &ValueBound<V>, exclusive: bool) -> Result<LexBound> {
        Ok(match bound {
            ValueBound::Lowest => LexBound::Lowest,
            ValueBound::Highest => LexBound::Highest,
            ValueBound::Value(value) => LexBound::Value {
                value: codec::encode(value)?,
                exclusive,
            },
        })
    }

    /// Decode scored entries, preserving the store's order
    pub fn decode_scored<T: DeserializeOwned>(
        entries: Vec<ScoredEntry>,
    ) -> Result<Vec<ScoredMember<T>>> {
        entries
            .into_iter()
            .map(|entry| {
                Ok(ScoredMember {
                    member: codec::decode_str(&entry.member)?,
                    score: entry.score,
                })
            })
            .collect()
    }

    /// Decode members only, preserving the store's order
    pub fn decode_members<T: DeserializeOwned>(entries: Vec<ScoredEntry>) -> Result<Vec<T>> {
        codec::decode_all(entries.iter().map(|entry| entry.member.as_str()))
    }

    /// Native query for the lowest score
    pub fn min_score_query() -> NativeRange {
        NativeRange::Rank {
            start: 0,
            stop: 0,
            order: Order::Ascending,
        }
    }

    /// Native query for the highest score
    pub fn max_score_query() -> NativeRange {
        NativeRange::Rank {
            start: 0,
            stop: 0,
            order: Order::Descending,
        }
    }

    /// Score of the single element an extreme query returned, if any
    pub fn extreme_score(entries: &[ScoredEntry]) -> Option<f64> {
        entries.first().map(|entry| entry.score)
    }
}

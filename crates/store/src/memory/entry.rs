//! Keyspace entries
//!
//! A key holds exactly one structure. Accessors return `WRONGTYPE` when the
//! caller expects a different one.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::time::Instant;

use redkey_core::{Error, Result};

use super::sorted_set::SortedSet;

/// Structure held by a key
#[derive(Debug, Clone)]
pub(crate) enum Structure {
    Text(String),
    List(VecDeque<String>),
    Hash(BTreeMap<String, String>),
    Set(BTreeSet<String>),
    SortedSet(SortedSet),
}

fn wrong_type(key: &str) -> Error {
    Error::WrongType {
        key: key.to_string(),
    }
}

macro_rules! accessors {
    ($($variant:ident => $get:ident, $get_mut:ident: $ty:ty;)*) => {
        $(
            pub(crate) fn $get(&self, key: &str) -> Result<&$ty> {
                match self {
                    Structure::$variant(inner) => Ok(inner),
                    _ => Err(wrong_type(key)),
                }
            }

            pub(crate) fn $get_mut(&mut self, key: &str) -> Result<&mut $ty> {
                match self {
                    Structure::$variant(inner) => Ok(inner),
                    _ => Err(wrong_type(key)),
                }
            }
        )*
    };
}

impl Structure {
    accessors! {
        Text => text, text_mut: String;
        List => list, list_mut: VecDeque<String>;
        Hash => hash, hash_mut: BTreeMap<String, String>;
        Set => set, set_mut: BTreeSet<String>;
        SortedSet => sorted_set, sorted_set_mut: SortedSet;
    }

    /// Collections delete their key once empty; strings never do
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Structure::Text(_) => false,
            Structure::List(list) => list.is_empty(),
            Structure::Hash(hash) => hash.is_empty(),
            Structure::Set(set) => set.is_empty(),
            Structure::SortedSet(zset) => zset.is_empty(),
        }
    }
}

/// Structure plus optional expiry deadline
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) value: Structure,
    pub(crate) expires_at: Option<Instant>,
}

impl Entry {
    pub(crate) fn new(value: Structure) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }
}

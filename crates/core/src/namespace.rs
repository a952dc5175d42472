//! Key namespacing
//!
//! Every key sent to the store is the logical key prefixed with a namespace
//! prefix. The prefix is resolved when the operation starts:
//!
//! 1. the instance override, if one is set (an empty override is honoured);
//! 2. otherwise the process-wide default ([`set_default_prefix`]).
//!
//! # Concurrency hazard
//!
//! [`KeyNamespace::set_prefix`] mutates state shared by every caller of the
//! same instance. The lock only guarantees that each operation sees one
//! coherent prefix: an operation that already resolved its prefix keeps it,
//! and every operation that resolves afterwards sees the new one. Two callers
//! racing `set_prefix` against each other's operations get no ordering
//! guarantee. Treat the prefix as single-writer, or give each tenant its own
//! client.
//!
//! # Example
//!
//! ```
//! use redkey_core::namespace::KeyNamespace;
//!
//! let ns = KeyNamespace::with_prefix("app:");
//! assert_eq!(ns.qualify("user:1"), "app:user:1");
//!
//! let resolved = ns.resolve();
//! assert_eq!(resolved.qualify_all(["a", "b"]), vec!["app:a", "app:b"]);
//! ```

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

static DEFAULT_PREFIX: Lazy<RwLock<Arc<str>>> = Lazy::new(|| RwLock::new(Arc::from("")));

/// Set the process-wide default prefix
///
/// Applies to every [`KeyNamespace`] without an instance override, from
/// the next operation they start.
pub fn set_default_prefix(prefix: impl Into<String>) {
    let prefix: String = prefix.into();
    tracing::debug!(target: "redkey::namespace", prefix = %prefix, "Default prefix changed");
    *DEFAULT_PREFIX.write() = Arc::from(prefix);
}

/// Current process-wide default prefix
pub fn default_prefix() -> Arc<str> {
    Arc::clone(&DEFAULT_PREFIX.read())
}

/// Prefix snapshot used for the keys of one operation
///
/// Resolving once per operation means a multi-key operation never mixes
/// two prefixes, even if the instance prefix changes mid-call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrefix(Arc<str>);

impl ResolvedPrefix {
    /// Wrap an explicit prefix
    pub fn new(prefix: impl Into<Arc<str>>) -> Self {
        Self(prefix.into())
    }

    /// The prefix string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `prefix + key`
    pub fn qualify(&self, key: &str) -> String {
        let mut qualified = String::with_capacity(self.0.len() + key.len());
        qualified.push_str(&self.0);
        qualified.push_str(key);
        qualified
    }

    /// Qualify every key, preserving order and cardinality (no dedup)
    pub fn qualify_all<I, S>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter().map(|k| self.qualify(k.as_ref())).collect()
    }

    /// Remove this prefix from a qualified key, if present
    pub fn strip<'a>(&self, qualified: &'a str) -> Option<&'a str> {
        qualified.strip_prefix(self.as_str())
    }
}

impl fmt::Display for ResolvedPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applies the namespace prefix to keys
///
/// Holds the optional instance override. Cloning shares nothing: the clone
/// starts with the same override and evolves independently.
#[derive(Default)]
pub struct KeyNamespace {
    instance: RwLock<Option<Arc<str>>>,
}

impl KeyNamespace {
    /// Namespace that follows the process-wide default
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace with an instance override
    ///
    /// An empty prefix counts as "no override".
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        let ns = Self::new();
        if !prefix.is_empty() {
            ns.set_prefix(prefix);
        }
        ns
    }

    /// Replace the instance override for all subsequent operations
    ///
    /// An empty prefix is a real override: keys go unprefixed whatever the
    /// process-wide default is. Use [`clear_prefix`](Self::clear_prefix) to
    /// follow the default again.
    ///
    /// Keys already qualified and operations already in flight are not
    /// affected. See the module docs for the concurrency hazard.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        let prefix: String = prefix.into();
        tracing::debug!(target: "redkey::namespace", prefix = %prefix, "Instance prefix changed");
        *self.instance.write() = Some(Arc::from(prefix));
    }

    /// Drop the instance override so the process-wide default applies
    pub fn clear_prefix(&self) {
        *self.instance.write() = None;
    }

    /// Whether an instance override is set
    pub fn has_override(&self) -> bool {
        self.instance.read().is_some()
    }

    /// Resolve the prefix for one operation
    pub fn resolve(&self) -> ResolvedPrefix {
        match self.instance.read().as_ref() {
            Some(prefix) => ResolvedPrefix(Arc::clone(prefix)),
            None => ResolvedPrefix(default_prefix()),
        }
    }

    /// `prefix + key`, resolving the prefix now
    pub fn qualify(&self, key: &str) -> String {
        self.resolve().qualify(key)
    }

    /// Qualify every key under a single resolution
    pub fn qualify_all<I, S>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.resolve().qualify_all(keys)
    }
}

impl Clone for KeyNamespace {
    fn clone(&self) -> Self {
        Self {
            instance: RwLock::new(self.instance.read().clone()),
        }
    }
}

impl fmt::Debug for KeyNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyNamespace")
            .field("instance", &*self.instance.read())
            .finish()
    }
}

//! Client
//!
//! [`Client`] binds a [`RemoteStore`] to a [`KeyNamespace`] and a
//! [`ClientConfig`]. It carries no other state: every facade method
//! qualifies its keys, encodes its values, makes exactly one store call and
//! decodes the reply.

use std::fmt;
use std::sync::Arc;

use redkey_core::namespace::{KeyNamespace, ResolvedPrefix};
use redkey_core::{ClientConfig, EmptyScorePolicy, Error, Result};
use redkey_store::{MemoryStore, RemoteStore};

/// Typed client over a remote store
///
/// `Client` is `Send + Sync` whenever the store is; share it through `Arc`.
///
/// ```
/// use redkey_api::{Client, StringFacade};
///
/// let client = Client::in_memory();
/// client.set_prefix("app:");
/// client.string_set_value("visits", &3u32, None).unwrap();
/// assert_eq!(client.string_get_value::<u32>("visits").unwrap(), 3);
/// assert_eq!(client.string_get_value::<u32>("missing").unwrap(), 0);
/// ```
pub struct Client<S = MemoryStore> {
    store: Arc<S>,
    namespace: KeyNamespace,
    config: ClientConfig,
}

impl Client<MemoryStore> {
    /// Client over a fresh [`MemoryStore`] with default configuration
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

impl<S: RemoteStore> Client<S> {
    /// Client with default configuration
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ClientConfig::default())
    }

    /// Client configured from `config`
    ///
    /// `config.key_prefix` becomes the instance prefix override.
    pub fn with_config(store: Arc<S>, config: ClientConfig) -> Self {
        let namespace = match config.key_prefix.as_deref() {
            Some(prefix) => KeyNamespace::with_prefix(prefix),
            None => KeyNamespace::new(),
        };
        tracing::debug!(
            target: "redkey::client",
            prefix = ?config.key_prefix,
            database = config.database,
            "Client created"
        );
        Self {
            store,
            namespace,
            config,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shared handle to the underlying store
    pub fn store_arc(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Key namespace of this client
    pub fn namespace(&self) -> &KeyNamespace {
        &self.namespace
    }

    /// Replace the instance prefix for all subsequent operations
    ///
    /// An empty prefix clears the override. Operations already in flight
    /// keep the prefix they resolved; see [`redkey_core::namespace`] for the
    /// concurrency hazard.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.namespace.set_prefix(prefix);
    }

    /// Drop the instance prefix so the process-wide default applies
    pub fn clear_prefix(&self) {
        self.namespace.clear_prefix();
    }

    /// Prefix the next operation would use
    pub fn prefix(&self) -> ResolvedPrefix {
        self.namespace.resolve()
    }

    pub(crate) fn key(&self, key: &str) -> String {
        self.namespace.qualify(key)
    }

    pub(crate) fn keys<I, K>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.namespace.qualify_all(keys)
    }

    /// Apply the empty-score policy to an extreme score lookup
    pub(crate) fn extreme_or_policy(&self, key: &str, score: Option<f64>) -> Result<f64> {
        match (score, self.config.empty_score_policy) {
            (Some(score), _) => Ok(score),
            (None, EmptyScorePolicy::Zero) => Ok(0.0),
            (None, EmptyScorePolicy::Error) => Err(Error::EmptyCollection {
                key: key.to_string(),
            }),
        }
    }
}

impl<S> Clone for Client<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            namespace: self.namespace.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> fmt::Debug for Client<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("namespace", &self.namespace)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//! Time-expiring, identifier-keyed object cache.
//!
//! Entries become invisible once older than the cache's expiration window
//! and are re-fetched by the owning [`ObjectStore`](crate::store::ObjectStore)
//! on the next access. Concurrent writers race benignly: the last insert
//! wins, and every insert is an idempotent re-fetch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde_json::Value;
use tracing::trace;

/// Default lifetime of a cache entry, in seconds.
pub const DEFAULT_EXPIRATION_SECS: u64 = 10;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

/// A thread-safe cache whose entries expire after a fixed window.
#[derive(Debug)]
pub struct ObjectCache<V = Value> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    expiration: RwLock<Duration>,
}

impl<V: Clone> Default for ObjectCache<V> {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_EXPIRATION_SECS))
    }
}

impl<V: Clone> ObjectCache<V> {
    pub fn new(expiration: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            expiration: RwLock::new(expiration),
        }
    }

    pub fn expiration(&self) -> Duration {
        *self.expiration.read()
    }

    /// Change the window; applies to existing entries too.
    pub fn set_expiration(&self, expiration: Duration) {
        *self.expiration.write() = expiration;
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        trace!(%key, "cache insert");
        self.entries.write().insert(
            key,
            Entry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// The cached value, unless absent or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let expiration = self.expiration();
        self.entries
            .read()
            .get(key)
            .filter(|e| e.fetched_at.elapsed() < expiration)
            .map(|e| e.value.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.entries.write().remove(key).map(|e| e.value)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let expiration = self.expiration();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.fetched_at.elapsed() < expiration);
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

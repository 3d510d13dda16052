//! Cache Store Module
//!
//! A single keyed namespace with TTL expiration, lazy eviction on read and
//! a full sweep used by the cleanup engine.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::cache::CacheEntry;

// == TTL Policy ==
/// How a store decides the TTL of a newly set entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlPolicy {
    /// Callers may pass a TTL per entry; `default_ttl` applies when they don't.
    PerEntry { default_ttl: Duration },
    /// Every entry shares the same TTL; caller-supplied TTLs are ignored.
    Shared(Duration),
}

impl TtlPolicy {
    /// Resolves the TTL to materialize into an entry.
    pub fn resolve(&self, requested: Option<Duration>) -> Duration {
        match *self {
            TtlPolicy::PerEntry { default_ttl } => requested.unwrap_or(default_ttl),
            TtlPolicy::Shared(ttl) => ttl,
        }
    }
}

// == TTL Store ==
/// One cache namespace guarded by its own lock.
#[derive(Debug)]
pub struct TtlStore<V> {
    /// Store name used in log output
    name: &'static str,
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// TTL policy applied on set
    policy: TtlPolicy,
}

impl<V> TtlStore<V> {
    // == Constructor ==
    /// Creates an empty store with the given name and TTL policy.
    pub fn new(name: &'static str, policy: TtlPolicy) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
            policy,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn policy(&self) -> TtlPolicy {
        self.policy
    }
}

impl<V: Clone> TtlStore<V> {
    // == Set ==
    /// Stores a payload under `key`, replacing any existing entry.
    ///
    /// The insertion time is reset to now.
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `value` - Payload to store
    /// * `ttl` - Requested TTL, only honored by [`TtlPolicy::PerEntry`] stores
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let entry = CacheEntry::new(value, self.policy.resolve(ttl));
        self.entries.write().await.insert(key.into(), entry);
    }

    // == Get ==
    /// Looks up the payload stored under `key`.
    ///
    /// # Returns
    /// `Some(value)` while the entry's age is within its TTL, otherwise
    /// `None`. An expired entry is removed as a side effect of the lookup.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Re-check under the write lock: the key may have been overwritten
        // between releasing the read lock and acquiring this one.
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    // == Remove ==
    /// Removes an entry regardless of its age.
    ///
    /// # Returns
    /// The removed payload, or `None` if the key was absent.
    pub async fn remove(&self, key: &str) -> Option<V> {
        self.entries.write().await.remove(key).map(|entry| entry.value)
    }

    // == Sweep ==
    /// Removes every entry that has expired as of `now`.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Clear ==
    /// Drops every entry, returning how many were held.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        count
    }

    // == Length ==
    /// Returns the number of held entries, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

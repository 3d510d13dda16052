//! Cache Entry Module
//!
//! Defines a single cached payload together with its insertion time and TTL.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with payload and expiry metadata.
///
/// Every entry carries its own TTL, including entries of stores whose TTL is
/// fixed for the whole namespace; the store resolves it when the entry is set.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload
    pub value: V,
    /// Moment the entry was inserted (or last overwritten)
    pub inserted_at: Instant,
    /// Maximum age before the entry is considered expired
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
            ttl,
        }
    }

    // == Age ==
    /// Returns how long the entry has existed as of `now`.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived its TTL as of `now`.
    ///
    /// An entry whose age is exactly its TTL is still live; it only expires
    /// once the age strictly exceeds the TTL.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.age_at(now) > self.ttl
    }
}

//! Cache Manager Module
//!
//! Facade over the query, session and temporary stores. Owns the cleanup
//! engine, the stats recorder and the background scheduler.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::{
    CleanupReport, CumulativeStats, MemoryProbe, NoopReclaim, ProcessMemory, ReclaimHint,
    StatsRecorder, StatsSnapshot, TtlPolicy, TtlStore,
};
use crate::config::Config;
use crate::tasks::Scheduler;

// == Cache Manager ==
/// Process-wide cache with three namespaces and periodic TTL cleanup.
///
/// Created once at startup and shared as an `Arc` with whatever needs it.
/// Construction arms the cleanup scheduler, so it must happen inside a tokio
/// runtime.
pub struct CacheManager<V> {
    query: TtlStore<V>,
    session: TtlStore<V>,
    temporary: TtlStore<V>,
    stats: StatsRecorder,
    reclaim: Box<dyn ReclaimHint>,
    /// Held for the whole duration of a full cleanup
    cleanup_gate: Mutex<()>,
    /// Incremented at the start of every full cleanup
    generation: AtomicU64,
    scheduler: Scheduler,
}

impl<V> CacheManager<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Starts a manager with the process memory probe and no reclaim hint.
    pub fn start(config: &Config) -> Arc<Self> {
        CacheManagerBuilder::from_config(config).start()
    }

    // == Query Store ==
    /// Caches a query result.
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `value` - Query result to store
    /// * `ttl` - Optional TTL, defaults to the configured query TTL
    pub async fn set_query(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.query.set(key, value, ttl).await;
    }

    /// Looks up a cached query result.
    ///
    /// # Returns
    /// `Some(value)` while the entry is live, `None` if it is missing or
    /// expired. An expired entry is evicted by the lookup.
    pub async fn get_query(&self, key: &str) -> Option<V> {
        self.query.get(key).await
    }

    pub async fn remove_query(&self, key: &str) -> Option<V> {
        self.query.remove(key).await
    }

    // == Session Store ==
    /// Stores session data under the shared session TTL.
    pub async fn set_session(&self, key: impl Into<String>, value: V) {
        self.session.set(key, value, None).await;
    }

    pub async fn get_session(&self, key: &str) -> Option<V> {
        self.session.get(key).await
    }

    pub async fn remove_session(&self, key: &str) -> Option<V> {
        self.session.remove(key).await
    }

    // == Temporary Store ==
    /// Stores scratch data under the shared temporary TTL.
    pub async fn set_temporary_data(&self, key: impl Into<String>, value: V) {
        self.temporary.set(key, value, None).await;
    }

    /// Same lookup rules as [`CacheManager::get_query`].
    pub async fn get_temporary_data(&self, key: &str) -> Option<V> {
        self.temporary.get(key).await
    }

    pub async fn remove_temporary_data(&self, key: &str) -> Option<V> {
        self.temporary.remove(key).await
    }

    // == Full Cleanup ==
    /// Sweeps expired entries from every store and records the run.
    ///
    /// Runs are serialized: a call made while another run is active waits
    /// for it to finish. Each store is locked only while it is swept.
    pub async fn perform_full_cleanup(&self) -> CleanupReport {
        let _gate = self.cleanup_gate.lock().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let memory_before_mb = self.stats.current_memory_mb();
        info!("Starting full cache cleanup (run #{})", generation);

        let query_evicted = self.sweep(&self.query).await;
        let session_evicted = self.sweep(&self.session).await;
        let temporary_evicted = self.sweep(&self.temporary).await;

        self.reclaim.reclaim();

        let memory_after_mb = self.stats.current_memory_mb();
        self.stats
            .record_cleanup(memory_before_mb, memory_after_mb)
            .await;

        let report = CleanupReport {
            generation,
            query_evicted,
            session_evicted,
            temporary_evicted,
            memory_before_mb,
            memory_after_mb,
        };
        info!(
            "Cache cleanup finished: {} entries evicted, {:.2}MB freed",
            report.total_evicted(),
            report.memory_freed_mb()
        );
        report
    }

    async fn sweep(&self, store: &TtlStore<V>) -> usize {
        let evicted = store.sweep(Instant::now()).await;
        if evicted > 0 {
            info!("Cache cleanup: removed {} expired {} entries", evicted, store.name());
        } else {
            debug!("Cache cleanup: no expired {} entries found", store.name());
        }
        evicted
    }

    // == Clear All ==
    /// Drops every entry in every store, bypassing TTLs.
    ///
    /// Cumulative cleanup stats are left untouched. Returns the number of
    /// entries dropped.
    pub async fn clear_all(&self) -> usize {
        let dropped =
            self.query.clear().await + self.session.clear().await + self.temporary.clear().await;
        self.reclaim.reclaim();
        info!("All cache entries cleared manually ({} dropped)", dropped);
        dropped
    }

    // == Stats ==
    /// Returns cumulative stats, live store sizes and current memory usage.
    pub async fn get_stats(&self) -> StatsSnapshot {
        let query = self.query.len().await;
        let session = self.session.len().await;
        let temporary = self.temporary.len().await;
        self.stats.snapshot(query, session, temporary).await
    }

    pub async fn cumulative_stats(&self) -> CumulativeStats {
        self.stats.cumulative().await
    }

    /// Number of full cleanups started so far.
    pub fn cleanup_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl<V> CacheManager<V> {
    // == Lifecycle ==
    /// Halts the scheduler. Stores keep their contents; an in-flight
    /// cleanup is allowed to finish. Calling it again is a no-op.
    pub fn stop(&self) {
        if self.scheduler.stop() {
            info!("Cache manager stopped");
        } else {
            debug!("Cache manager already stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }
}

impl<V> std::fmt::Debug for CacheManager<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("query", &self.query.policy())
            .field("session", &self.session.policy())
            .field("temporary", &self.temporary.policy())
            .field("generation", &self.generation)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

// == Builder ==
/// Configures TTLs, the cleanup interval and the host capabilities used by
/// a [`CacheManager`].
pub struct CacheManagerBuilder {
    query_ttl: Duration,
    session_ttl: Duration,
    temporary_ttl: Duration,
    cleanup_interval: Duration,
    memory_probe: Box<dyn MemoryProbe>,
    reclaim_hint: Box<dyn ReclaimHint>,
}

impl Default for CacheManagerBuilder {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CacheManagerBuilder {
    pub fn from_config(config: &Config) -> Self {
        Self {
            query_ttl: Duration::from_secs(config.query_ttl),
            session_ttl: Duration::from_secs(config.session_ttl),
            temporary_ttl: Duration::from_secs(config.temporary_ttl),
            cleanup_interval: Duration::from_secs(config.cleanup_interval),
            memory_probe: Box::new(ProcessMemory::new()),
            reclaim_hint: Box::new(NoopReclaim),
        }
    }

    /// Default TTL for query entries set without an explicit TTL.
    pub fn query_ttl(mut self, ttl: Duration) -> Self {
        self.query_ttl = ttl;
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn temporary_ttl(mut self, ttl: Duration) -> Self {
        self.temporary_ttl = ttl;
        self
    }

    /// Period of the background cleanup. Must be non-zero and small enough
    /// to add to the current instant; [`CacheManagerBuilder::start`] panics
    /// otherwise.
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    pub fn memory_probe(mut self, probe: impl MemoryProbe + 'static) -> Self {
        self.memory_probe = Box::new(probe);
        self
    }

    pub fn reclaim_hint(mut self, hint: impl ReclaimHint + 'static) -> Self {
        self.reclaim_hint = Box::new(hint);
        self
    }

    // == Start ==
    /// Builds the manager and arms its cleanup scheduler.
    ///
    /// # Panics
    /// Panics in the calling thread if called outside a tokio runtime, or if
    /// the cleanup interval is zero or too large to schedule. Use
    /// [`Config::validate`] to reject such values up front.
    pub fn start<V>(self) -> Arc<CacheManager<V>>
    where
        V: Clone + Send + Sync + 'static,
    {
        let Self {
            query_ttl,
            session_ttl,
            temporary_ttl,
            cleanup_interval,
            memory_probe,
            reclaim_hint,
        } = self;

        let manager = Arc::new_cyclic(|weak| CacheManager {
            query: TtlStore::new(
                "query",
                TtlPolicy::PerEntry {
                    default_ttl: query_ttl,
                },
            ),
            session: TtlStore::new("session", TtlPolicy::Shared(session_ttl)),
            temporary: TtlStore::new("temporary", TtlPolicy::Shared(temporary_ttl)),
            stats: StatsRecorder::new(memory_probe),
            reclaim: reclaim_hint,
            cleanup_gate: Mutex::new(()),
            generation: AtomicU64::new(0),
            scheduler: Scheduler::start(weak.clone(), cleanup_interval),
        });
        info!(
            "Cache manager started: cleanup every {}s, TTLs query={}s session={}s temporary={}s",
            cleanup_interval.as_secs(),
            query_ttl.as_secs(),
            session_ttl.as_secs(),
            temporary_ttl.as_secs()
        );
        manager
    }
}

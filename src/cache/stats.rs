//! Cache Statistics Module
//!
//! Cumulative cleanup counters plus the point-in-time snapshot served to
//! the admin surface.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::cache::MemoryProbe;

// == Cumulative Stats ==
/// Counters that persist across cleanup runs.
///
/// Only the most recent run's memory readings are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeStats {
    /// Number of full cleanups completed
    pub total_cleanups: u64,
    /// Completion time of the latest full cleanup
    pub last_cleanup: Option<DateTime<Utc>>,
    /// Process memory in MB measured before the latest cleanup
    #[serde(rename = "memoryBefore")]
    pub memory_before_mb: f64,
    /// Process memory in MB measured after the latest cleanup
    #[serde(rename = "memoryAfter")]
    pub memory_after_mb: f64,
}

impl CumulativeStats {
    // == Constructor ==
    /// Creates stats with zero counters and no cleanup recorded.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Cleanup ==
    /// Records a finished full cleanup, overwriting the previous readings.
    pub fn record_cleanup(&mut self, memory_before_mb: f64, memory_after_mb: f64) {
        self.last_cleanup = Some(Utc::now());
        self.total_cleanups += 1;
        self.memory_before_mb = memory_before_mb;
        self.memory_after_mb = memory_after_mb;
    }
}

// == Stats Snapshot ==
/// Read-only composite of cumulative stats, live store sizes and the
/// current memory reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    #[serde(flatten)]
    pub cumulative: CumulativeStats,
    pub query_cache_size: usize,
    pub session_cache_size: usize,
    pub temporary_data_size: usize,
    /// Freshly measured process memory in MB
    #[serde(rename = "currentMemoryUsage")]
    pub current_memory_mb: f64,
}

// == Cleanup Report ==
/// Outcome of a single full cleanup run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    /// Generation number assigned when the run started
    pub generation: u64,
    pub query_evicted: usize,
    pub session_evicted: usize,
    pub temporary_evicted: usize,
    pub memory_before_mb: f64,
    pub memory_after_mb: f64,
}

impl CleanupReport {
    /// Total entries evicted across all stores.
    pub fn total_evicted(&self) -> usize {
        self.query_evicted + self.session_evicted + self.temporary_evicted
    }

    /// Memory released by this run, in MB. Negative if usage grew.
    pub fn memory_freed_mb(&self) -> f64 {
        self.memory_before_mb - self.memory_after_mb
    }
}

// == Stats Recorder ==
/// Owns the cumulative stats and the memory probe used around cleanups.
pub struct StatsRecorder {
    cumulative: RwLock<CumulativeStats>,
    probe: Box<dyn MemoryProbe>,
}

impl StatsRecorder {
    pub fn new(probe: Box<dyn MemoryProbe>) -> Self {
        Self {
            cumulative: RwLock::new(CumulativeStats::new()),
            probe,
        }
    }

    /// Takes a fresh memory reading; never cached.
    pub fn current_memory_mb(&self) -> f64 {
        self.probe.current_mb()
    }

    pub async fn record_cleanup(&self, memory_before_mb: f64, memory_after_mb: f64) {
        self.cumulative
            .write()
            .await
            .record_cleanup(memory_before_mb, memory_after_mb);
    }

    pub async fn cumulative(&self) -> CumulativeStats {
        self.cumulative.read().await.clone()
    }

    // == Snapshot ==
    /// Combines the cumulative stats with the given live store sizes.
    pub async fn snapshot(
        &self,
        query_cache_size: usize,
        session_cache_size: usize,
        temporary_data_size: usize,
    ) -> StatsSnapshot {
        StatsSnapshot {
            cumulative: self.cumulative().await,
            query_cache_size,
            session_cache_size,
            temporary_data_size,
            current_memory_mb: self.current_memory_mb(),
        }
    }
}

impl std::fmt::Debug for StatsRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsRecorder").finish_non_exhaustive()
    }
}

//! Cache Module
//!
//! Provides the three TTL-expiring namespaces (query, session, temporary),
//! the cleanup engine and cumulative statistics.

mod entry;
mod manager;
mod memory;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use manager::{CacheManager, CacheManagerBuilder};
pub use memory::{MemoryProbe, NoopReclaim, ProcessMemory, ProcessMemoryInfo, ReclaimHint};
pub use stats::{CleanupReport, CumulativeStats, StatsRecorder, StatsSnapshot};
pub use store::{TtlPolicy, TtlStore};

// == Public Constants ==
/// Default TTL for query entries set without an explicit TTL
pub const DEFAULT_QUERY_TTL_SECS: u64 = 60 * 60;

/// TTL shared by every session entry
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// TTL shared by every temporary entry
pub const DEFAULT_TEMPORARY_TTL_SECS: u64 = 2 * 60 * 60;

/// Period of the scheduled full cleanup
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 30 * 60;

/// Longest accepted cleanup period from configuration
pub const MAX_CLEANUP_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

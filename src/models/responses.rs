//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies. The stats body is
//! [`crate::cache::StatsSnapshot`] serialized as-is.

use serde::Serialize;

use crate::cache::{CleanupReport, ProcessMemoryInfo};

/// Response body for POST /api/system/cache/cleanup
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub message: String,
    pub report: CleanupReport,
}

impl CleanupResponse {
    pub fn new(report: CleanupReport) -> Self {
        Self {
            success: true,
            message: format!(
                "Cache cleanup completed, {} expired entries removed",
                report.total_evicted()
            ),
            report,
        }
    }
}

/// Response body for POST /api/system/cache/clear
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
    /// Number of entries dropped across all stores
    pub dropped: usize,
}

impl ClearResponse {
    pub fn new(dropped: usize) -> Self {
        Self {
            success: true,
            message: "All cache entries cleared".to_string(),
            dropped,
        }
    }
}

/// Response body for GET /api/system/memory
///
/// Reports zeros when the platform gives no process readings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryResponse {
    pub rss_mb: f64,
    pub virtual_mb: f64,
    pub uptime_secs: u64,
    /// Server version
    pub version: String,
}

impl MemoryResponse {
    pub fn new(info: Option<ProcessMemoryInfo>) -> Self {
        let (rss_mb, virtual_mb, uptime_secs) = info
            .map(|i| (i.rss_mb, i.virtual_mb, i.uptime_secs))
            .unwrap_or((0.0, 0.0, 0));
        Self {
            rss_mb,
            virtual_mb,
            uptime_secs,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

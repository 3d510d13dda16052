//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::cache::{CacheManager, ProcessMemory, StatsSnapshot};
use crate::config::Config;
use crate::error::Result;
use crate::models::{CleanupResponse, ClearResponse, HealthResponse, MemoryResponse};

/// Cache manager instantiated for JSON payloads.
pub type JsonCacheManager = CacheManager<Value>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide cache manager
    pub cache: Arc<JsonCacheManager>,
    /// Process inspector behind the memory endpoint
    pub memory: Arc<ProcessMemory>,
}

impl AppState {
    /// Wraps an already started cache manager.
    pub fn new(cache: Arc<JsonCacheManager>) -> Self {
        Self {
            cache,
            memory: Arc::new(ProcessMemory::new()),
        }
    }

    /// Starts a cache manager from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheManager::start(config))
    }
}

/// Handler for GET /api/system/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.cache.get_stats().await)
}

/// Handler for POST /api/system/cache/cleanup
///
/// Runs on its own task so a panic surfaces as a 500 instead of tearing
/// down the connection.
pub async fn cleanup_handler(State(state): State<AppState>) -> Result<Json<CleanupResponse>> {
    let cache = state.cache.clone();
    let report = tokio::spawn(async move { cache.perform_full_cleanup().await }).await?;

    Ok(Json(CleanupResponse::new(report)))
}

/// Handler for POST /api/system/cache/clear
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let cache = state.cache.clone();
    let dropped = tokio::spawn(async move { cache.clear_all().await }).await?;

    Ok(Json(ClearResponse::new(dropped)))
}

/// Handler for GET /api/system/memory
pub async fn memory_handler(State(state): State<AppState>) -> Json<MemoryResponse> {
    Json(MemoryResponse::new(state.memory.info()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

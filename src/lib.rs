//! TTL Cache Manager - In-process multi-namespace cache
//!
//! Keeps query results, session data and temporary data in three separate
//! stores, each with its own TTL policy, swept by a periodic background
//! cleanup and reported through cumulative statistics.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheManager, CacheManagerBuilder, StatsSnapshot};
pub use config::Config;

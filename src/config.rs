//! Configuration Module
//!
//! Handles loading and validating cache manager configuration from
//! environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{
    DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_QUERY_TTL_SECS, DEFAULT_SESSION_TTL_SECS,
    DEFAULT_TEMPORARY_TTL_SECS, MAX_CLEANUP_INTERVAL_SECS,
};
use crate::error::ConfigError;

/// Cache manager and admin server configuration.
///
/// All durations are in seconds and can be set via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interval between scheduled full cleanups
    pub cleanup_interval: u64,
    /// Default TTL for query entries without an explicit TTL
    pub query_ttl: u64,
    /// TTL shared by all session entries
    pub session_ttl: u64,
    /// TTL shared by all temporary entries
    pub temporary_ttl: u64,
    /// Admin HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `CLEANUP_INTERVAL` - Cleanup frequency (default: 1800)
    /// - `QUERY_TTL` - Default query TTL (default: 3600)
    /// - `SESSION_TTL` - Session TTL (default: 86400)
    /// - `TEMPORARY_TTL` - Temporary data TTL (default: 7200)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            query_ttl: env_or("QUERY_TTL", defaults.query_ttl),
            session_ttl: env_or("SESSION_TTL", defaults.session_ttl),
            temporary_ttl: env_or("TEMPORARY_TTL", defaults.temporary_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Rejects values the cache manager cannot run with.
    ///
    /// Every duration must be non-zero, and the cleanup interval may not
    /// exceed [`MAX_CLEANUP_INTERVAL_SECS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cleanup_interval > MAX_CLEANUP_INTERVAL_SECS {
            return Err(ConfigError::InvalidValue {
                name: "CLEANUP_INTERVAL",
                reason: format!("must be at most {} seconds", MAX_CLEANUP_INTERVAL_SECS),
            });
        }

        let durations = [
            ("CLEANUP_INTERVAL", self.cleanup_interval),
            ("QUERY_TTL", self.query_ttl),
            ("SESSION_TTL", self.session_ttl),
            ("TEMPORARY_TTL", self.temporary_ttl),
        ];
        for (name, value) in durations {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL_SECS,
            query_ttl: DEFAULT_QUERY_TTL_SECS,
            session_ttl: DEFAULT_SESSION_TTL_SECS,
            temporary_ttl: DEFAULT_TEMPORARY_TTL_SECS,
            server_port: 3000,
        }
    }
}

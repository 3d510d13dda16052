//! Response models for the admin API
//!
//! This module defines the DTOs used for serializing HTTP response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{CleanupResponse, ClearResponse, HealthResponse, MemoryResponse};

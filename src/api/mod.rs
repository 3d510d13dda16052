//! API Module
//!
//! HTTP handlers and routing for the cache admin REST API.
//!
//! # Endpoints
//! - `GET /api/system/cache/stats` - Cache statistics
//! - `POST /api/system/cache/cleanup` - Trigger a full cleanup
//! - `POST /api/system/cache/clear` - Clear every store
//! - `GET /api/system/memory` - Process memory usage
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

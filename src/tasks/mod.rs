//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the lifetime of the
//! cache manager.
//!
//! # Tasks
//! - Scheduled cleanup: runs a full TTL sweep of every store at a fixed interval

mod cleanup;

pub use cleanup::{spawn_cleanup_task, Scheduler};

//! Scheduled Cleanup Task
//!
//! Background task that runs a full cache cleanup at a fixed interval until
//! the scheduler is stopped or the manager is dropped.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheManager;

// == Scheduler ==
/// Handle to the periodic cleanup task.
///
/// Stopped → Running when started, Running → Stopped on [`Scheduler::stop`].
/// Dropping the handle also stops the task.
#[derive(Debug)]
pub struct Scheduler {
    shutdown: watch::Sender<bool>,
}

impl Scheduler {
    /// Arms the cleanup timer for `manager`.
    ///
    /// # Arguments
    /// * `manager` - Weak handle to the manager to clean
    /// * `interval` - Period between cleanups
    ///
    /// # Panics
    /// Panics in the calling thread if called outside a tokio runtime, if
    /// `interval` is zero, or if `interval` is too large to schedule.
    pub fn start<V>(manager: Weak<CacheManager<V>>, interval: Duration) -> Self
    where
        V: Clone + Send + Sync + 'static,
    {
        let (shutdown, shutdown_rx) = watch::channel(false);
        spawn_cleanup_task(manager, interval, shutdown_rx);
        Self { shutdown }
    }

    /// Cancels future ticks. Returns `false` if already stopped.
    pub fn stop(&self) -> bool {
        !self.shutdown.send_replace(true)
    }

    pub fn is_running(&self) -> bool {
        !*self.shutdown.borrow()
    }
}

/// Spawns the loop behind a [`Scheduler`].
///
/// The first cleanup runs one full `interval` after spawning. A tick that
/// arrives while a cleanup is still running is skipped rather than queued,
/// and the cleanup itself is never interrupted by a shutdown request.
///
/// # Panics
/// The interval is checked before the task is spawned, so these panics
/// reach the caller: a zero `interval`, or one whose first deadline
/// overflows the clock.
pub fn spawn_cleanup_task<V>(
    manager: Weak<CacheManager<V>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    assert!(!interval.is_zero(), "cleanup interval must be non-zero");
    let Some(first_tick) = Instant::now().checked_add(interval) else {
        panic!(
            "cleanup interval of {} seconds is too large to schedule",
            interval.as_secs()
        );
    };

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        let mut ticker = interval_at(first_tick, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    // Err means the scheduler handle is gone
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }

            let Some(manager) = manager.upgrade() else {
                debug!("Cache manager dropped, ending cleanup task");
                break;
            };
            manager.perform_full_cleanup().await;
        }

        info!("Cache cleanup task stopped");
    })
}

//! Process memory readings and the reclaim hint.

use parking_lot::Mutex;
use serde::Serialize;
use sysinfo::{Pid, System};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// == Memory Probe ==
/// Source of the current process memory usage in MB.
///
/// Implementations report `0.0` when the platform gives no reading.
pub trait MemoryProbe: Send + Sync {
    fn current_mb(&self) -> f64;
}

// == Process Memory ==
/// Reads memory figures of the current process.
///
/// One `System` is kept and refreshed for this process only, so a reading
/// does not rebuild the platform state on every call.
#[derive(Debug)]
pub struct ProcessMemory {
    pid: Option<Pid>,
    sys: Mutex<System>,
}

impl ProcessMemory {
    pub fn new() -> Self {
        Self {
            pid: sysinfo::get_current_pid().ok(),
            sys: Mutex::new(System::new()),
        }
    }

    /// Inspects the current process, or `None` if the platform refuses.
    pub fn info(&self) -> Option<ProcessMemoryInfo> {
        let pid = self.pid?;
        let mut sys = self.sys.lock();
        if !sys.refresh_process(pid) {
            return None;
        }

        let process = sys.process(pid)?;
        Some(ProcessMemoryInfo {
            rss_mb: process.memory() as f64 / BYTES_PER_MB,
            virtual_mb: process.virtual_memory() as f64 / BYTES_PER_MB,
            uptime_secs: process.run_time(),
        })
    }
}

impl Default for ProcessMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for ProcessMemory {
    fn current_mb(&self) -> f64 {
        self.info().map(|info| info.rss_mb).unwrap_or(0.0)
    }
}

// == Process Memory Info ==
/// Memory figures for the running process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMemoryInfo {
    pub rss_mb: f64,
    pub virtual_mb: f64,
    pub uptime_secs: u64,
}

// == Reclaim Hint ==
/// Best-effort request to release memory after entries are dropped.
///
/// Must never block for long or panic; callers fire and forget.
pub trait ReclaimHint: Send + Sync {
    fn reclaim(&self);
}

/// Hint that does nothing. Dropped entries are freed on drop already.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReclaim;

impl ReclaimHint for NoopReclaim {
    fn reclaim(&self) {}
}

/// Any `Fn()` closure can serve as a reclaim hint.
impl<F> ReclaimHint for F
where
    F: Fn() + Send + Sync,
{
    fn reclaim(&self) {
        self()
    }
}

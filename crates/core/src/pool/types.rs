//! Types for the worker pool.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the worker pool.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    /// The pool no longer admits work.
    #[error("worker pool is shut down")]
    ShutDown,
}

/// Snapshot of a pool's counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatus {
    /// Maximum concurrent tasks.
    pub size: usize,
    /// Tasks currently running.
    pub active: usize,
    /// Callers waiting for an admission slot.
    pub waiting: usize,
    /// Highest number of tasks observed running at once.
    pub peak_active: usize,
    /// Tasks admitted since the pool was created.
    pub submitted: u64,
    /// Tasks that ran to the end, including ones that panicked.
    pub completed: u64,
    /// Tasks whose join failed (panic or abort).
    pub failed: u64,
    /// Number of times the pool was shut down.
    pub shutdowns: u32,
}

/// Live counters shared between the pool and its tasks.
#[derive(Debug, Default)]
pub(crate) struct PoolStats {
    pub(crate) active: AtomicUsize,
    pub(crate) waiting: AtomicUsize,
    pub(crate) peak_active: AtomicUsize,
    pub(crate) submitted: AtomicU64,
    pub(crate) completed: AtomicU64,
    pub(crate) failed: AtomicU64,
    pub(crate) shutdowns: AtomicUsize,
}

impl PoolStats {
    pub(crate) fn to_status(&self, size: usize) -> PoolStatus {
        PoolStatus {
            size,
            active: self.active.load(Ordering::SeqCst),
            waiting: self.waiting.load(Ordering::SeqCst),
            peak_active: self.peak_active.load(Ordering::SeqCst),
            submitted: self.submitted.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            shutdowns: self.shutdowns.load(Ordering::SeqCst) as u32,
        }
    }
}

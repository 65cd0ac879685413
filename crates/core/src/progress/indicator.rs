//! Progress display and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

/// Receives progress updates for a running batch.
///
/// Implementations are called concurrently from upload tasks.
pub trait ProgressIndicator: Send + Sync {
    /// Text describing what is about to run.
    fn set_text(&self, text: &str);

    /// Completed fraction in `0.0..=1.0`.
    fn set_fraction(&self, fraction: f64);

    /// Whether the user asked to stop submitting work.
    fn is_cancelled(&self) -> bool;
}

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress indicator that logs through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LogProgress {
    cancel: CancelFlag,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an externally owned cancellation flag.
    pub fn with_cancel_flag(cancel: CancelFlag) -> Self {
        Self { cancel }
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }
}

impl ProgressIndicator for LogProgress {
    fn set_text(&self, text: &str) {
        info!(target: "docpush::progress", "{}", text);
    }

    fn set_fraction(&self, fraction: f64) {
        info!(target: "docpush::progress", "{:.0}% done", fraction * 100.0);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

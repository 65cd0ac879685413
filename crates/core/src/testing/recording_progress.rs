//! Progress indicator that records updates for assertions.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::progress::ProgressIndicator;

/// Progress indicator keeping every update in memory.
///
/// Cancellation can be requested directly or scheduled after a number of
/// `is_cancelled` checks, which lets tests stop a batch after an exact
/// number of submissions.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    texts: Mutex<Vec<String>>,
    fractions: Mutex<Vec<f64>>,
    cancelled: AtomicBool,
    /// Checks answered with `false` before reporting cancellation.
    cancel_after: Mutex<Option<usize>>,
    checks: AtomicUsize,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Report cancellation from the `(checks + 1)`-th check onwards.
    pub fn cancel_after_checks(&self, checks: usize) {
        *self.cancel_after.lock().unwrap() = Some(checks);
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    pub fn fractions(&self) -> Vec<f64> {
        self.fractions.lock().unwrap().clone()
    }

    pub fn last_fraction(&self) -> Option<f64> {
        self.fractions.lock().unwrap().last().copied()
    }
}

impl ProgressIndicator for RecordingProgress {
    fn set_text(&self, text: &str) {
        self.texts.lock().unwrap().push(text.to_string());
    }

    fn set_fraction(&self, fraction: f64) {
        self.fractions.lock().unwrap().push(fraction);
    }

    fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::SeqCst) {
            return true;
        }
        let checks = self.checks.fetch_add(1, Ordering::SeqCst);
        match *self.cancel_after.lock().unwrap() {
            Some(limit) if checks >= limit => {
                self.cancelled.store(true, Ordering::SeqCst);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_after_checks() {
        let progress = RecordingProgress::new();
        progress.cancel_after_checks(2);
        assert!(!progress.is_cancelled());
        assert!(!progress.is_cancelled());
        assert!(progress.is_cancelled());
        assert!(progress.is_cancelled());
    }
}

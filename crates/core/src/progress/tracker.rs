//! Lock-free progress counters shared by the tasks of one batch.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Thread-safe progress counters for one batch.
///
/// Each task takes one ordinal when it starts and advances the fraction once
/// when it finishes, whatever the outcome.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    step: f64,
    ordinal: AtomicUsize,
    /// `f64` bit pattern of the completed fraction.
    fraction: AtomicU64,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        let step = if total == 0 { 0.0 } else { 1.0 / total as f64 };
        Self {
            total,
            step,
            ordinal: AtomicUsize::new(0),
            fraction: AtomicU64::new(0f64.to_bits()),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Takes the next 1-based dispatch ordinal.
    pub fn next_ordinal(&self) -> usize {
        self.ordinal.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of ordinals handed out so far.
    pub fn started(&self) -> usize {
        self.ordinal.load(Ordering::SeqCst)
    }

    /// Adds `1 / total` to the completed fraction and returns the new value.
    ///
    /// With an empty batch there is nothing to complete and the fraction
    /// stays where it is.
    pub fn advance_fraction(&self) -> f64 {
        if self.total == 0 {
            return self.fraction();
        }
        let step = self.step;
        let previous = self
            .fraction
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |bits| {
                Some((f64::from_bits(bits) + step).to_bits())
            })
            .unwrap_or_else(|bits| bits);
        f64::from_bits(previous) + step
    }

    pub fn fraction(&self) -> f64 {
        f64::from_bits(self.fraction.load(Ordering::SeqCst))
    }
}

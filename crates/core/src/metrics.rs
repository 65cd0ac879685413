//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Upload batches (size, outcome)
//! - Individual uploads (result, duration)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Batch Metrics
// =============================================================================

/// Endpoints per upload batch.
pub static BATCH_SIZE: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("docpush_batch_size", "Number of endpoints per upload batch")
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
    )
    .unwrap()
});

/// Batches whose submission stopped because of cancellation.
pub static BATCHES_CANCELLED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "docpush_batches_cancelled_total",
        "Upload batches cancelled before every endpoint was submitted",
    )
    .unwrap()
});

// =============================================================================
// Upload Metrics
// =============================================================================

/// Uploads total by result.
pub static UPLOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("docpush_uploads_total", "Total endpoint uploads"),
        &["result"], // "success", "failed", "panicked"
    )
    .unwrap()
});

/// Upload duration in seconds.
pub static UPLOAD_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "docpush_upload_duration_seconds",
            "Duration of a single endpoint upload",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["uploader"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Batches
        Box::new(BATCH_SIZE.clone()),
        Box::new(BATCHES_CANCELLED.clone()),
        // Uploads
        Box::new(UPLOADS_TOTAL.clone()),
        Box::new(UPLOAD_DURATION.clone()),
    ]
}

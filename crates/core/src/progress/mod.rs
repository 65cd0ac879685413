//! Progress tracking for upload batches.

mod indicator;
mod tracker;

pub use indicator::{CancelFlag, LogProgress, ProgressIndicator};
pub use tracker::ProgressTracker;

//! Upload orchestrator for concurrent endpoint uploads.
//!
//! The orchestrator drives one batch of endpoints to completion:
//! - **Submission**: sequential, in input order, stopping on cancellation
//! - **Upload**: concurrent on the bounded worker pool
//! - **Report**: one consolidated [`UploadReport`] and at most one success notification

mod config;
mod runner;
mod types;

pub use config::OrchestratorConfig;
pub use runner::{UploadOrchestrator, UPLOAD_SUCCESS_TITLE};
pub use types::UploadReport;

//! Endpoint descriptions shared by extractors, uploaders and the orchestrator.

mod types;

pub use types::{Api, HttpMethod, UploadResult, UploadTask};

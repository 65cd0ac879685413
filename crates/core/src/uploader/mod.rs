//! Target platforms that receive endpoint descriptions.
//!
//! Each documentation platform implements [`ApiUploader`]; the orchestrator
//! only ever sees the trait.

mod http;

pub use http::HttpUploader;

use async_trait::async_trait;
use thiserror::Error;

use crate::api::{Api, UploadResult};

/// Errors that can occur while uploading one endpoint.
#[derive(Debug, Error)]
pub enum UploadError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform rejected the credentials.
    #[error("Unauthorized: check the target token")]
    Unauthorized,

    /// The platform is throttling requests.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimited,

    /// The platform returned an error status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The platform answered with something we could not read.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The endpoint description was refused before being sent.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Uploader is missing required settings.
    #[error("Uploader not configured: {0}")]
    NotConfigured(String),
}

impl UploadError {
    /// Whether retrying the same upload later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// A documentation platform that can store endpoint descriptions.
#[async_trait]
pub trait ApiUploader: Send + Sync {
    /// Returns the name of this uploader implementation.
    fn name(&self) -> &str;

    /// Creates or updates the document for one endpoint.
    async fn upload(&self, api: &Api) -> Result<UploadResult, UploadError>;
}

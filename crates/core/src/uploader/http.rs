//! Generic HTTP documentation platform client.
//!
//! Each endpoint is sent as JSON to `POST {url}/api/projects/{project}/docs`
//! and the platform answers with the links of the stored document.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{ApiUploader, UploadError};
use crate::api::{Api, UploadResult};
use crate::config::TargetConfig;

/// Uploader for platforms speaking the docpush HTTP API.
pub struct HttpUploader {
    client: Client,
    base_url: String,
    project: String,
    token: Option<String>,
}

impl HttpUploader {
    /// Create a new uploader for the given target.
    pub fn new(config: TargetConfig) -> Result<Self, UploadError> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(UploadError::NotConfigured(
                "target URL is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            project: config.project,
            token: config.token.filter(|t| !t.is_empty()),
        })
    }

    /// Endpoint receiving the documents of the configured project.
    pub fn docs_url(&self) -> String {
        format!("{}/api/projects/{}/docs", self.base_url, self.project)
    }
}

#[async_trait]
impl ApiUploader for HttpUploader {
    fn name(&self) -> &str {
        "http"
    }

    async fn upload(&self, api: &Api) -> Result<UploadResult, UploadError> {
        let url = self.docs_url();

        debug!("Uploading {} to {}", api.label(), url);

        let mut request = self.client.post(&url).json(api);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(UploadError::Unauthorized);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(UploadError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json::<UploadResult>().await.map_err(|e| {
            UploadError::InvalidResponse(format!("Failed to parse upload response: {}", e))
        })
    }
}

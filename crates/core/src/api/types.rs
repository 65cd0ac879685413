//! Types describing documented endpoints and upload outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP method of a documented endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Upper-case wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documented endpoint as produced by an extractor.
///
/// The core treats an `Api` as read-only: `payload` carries parameters and
/// request/response schema in whatever shape the extractor produced and is
/// forwarded to the uploader untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub method: HttpMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl Api {
    /// Creates an endpoint without summary or payload.
    pub fn new(method: HttpMethod, path: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            category: category.into(),
            payload: serde_json::Value::Null,
        }
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the opaque payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Whether a non-blank summary was declared.
    pub fn has_summary(&self) -> bool {
        self.summary.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// `METHOD PATH` label used in progress text and notifications.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Links returned by a target platform for one uploaded endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Link to the created or updated endpoint document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Link to the category (folder) containing the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_url: Option<String>,
}

impl UploadResult {
    pub fn new(api_url: impl Into<String>, category_url: impl Into<String>) -> Self {
        Self {
            api_url: Some(api_url.into()),
            category_url: Some(category_url.into()),
        }
    }
}

/// An endpoint being uploaded, with its position in the batch.
///
/// The ordinal is assigned when the upload starts executing, so it reflects
/// dispatch order rather than submission order.
#[derive(Debug, Clone, Copy)]
pub struct UploadTask<'a> {
    pub api: &'a Api,
    pub ordinal: usize,
    pub total: usize,
}

impl<'a> UploadTask<'a> {
    pub fn new(api: &'a Api, ordinal: usize, total: usize) -> Self {
        Self {
            api,
            ordinal,
            total,
        }
    }

    /// Progress text in the form `[i/total] METHOD PATH`.
    pub fn progress_text(&self) -> String {
        format!(
            "[{}/{}] {} {}",
            self.ordinal, self.total, self.api.method, self.api.path
        )
    }
}

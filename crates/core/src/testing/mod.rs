//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the collaborator traits
//! (uploader, notifier, progress indicator), allowing the orchestrator and
//! workflow to be exercised without a documentation platform or a UI.
//!
//! # Example
//!
//! ```rust,ignore
//! use docpush_core::testing::{fixtures, MockUploader, RecordingNotifier, RecordingProgress};
//!
//! let uploader = MockUploader::new();
//! uploader.fail_path("/pets/{id}", UploadError::RateLimited);
//!
//! let notifier = Arc::new(RecordingNotifier::new());
//! let progress = Arc::new(RecordingProgress::new());
//!
//! // Build an UploadOrchestrator with them and run fixtures::pet_store_apis()...
//! ```

mod mock_uploader;
mod recording_notifier;
mod recording_progress;

pub use mock_uploader::{MockUploader, RecordedUpload};
pub use recording_notifier::{Notification, NotificationLevel, RecordingNotifier};
pub use recording_progress::RecordingProgress;

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::json;

    use crate::api::{Api, HttpMethod};
    use crate::extract::{ControllerManifest, EndpointManifest};

    /// Create a test endpoint with a summary and a small payload.
    pub fn api(method: HttpMethod, path: &str, category: &str) -> Api {
        Api::new(method, path, category)
            .with_summary(format!("{} {}", method, path))
            .with_payload(json!({
                "parameters": [],
                "responses": { "200": { "description": "OK" } }
            }))
    }

    /// Create `count` endpoints in the same category.
    pub fn apis(count: usize, category: &str) -> Vec<Api> {
        (1..=count)
            .map(|i| api(HttpMethod::Get, &format!("/items/{}", i), category))
            .collect()
    }

    /// The endpoints of a small pet store controller.
    pub fn pet_store_apis() -> Vec<Api> {
        vec![
            api(HttpMethod::Get, "/pets", "Pets"),
            api(HttpMethod::Post, "/pets", "Pets"),
            api(HttpMethod::Get, "/pets/{id}", "Pets"),
            api(HttpMethod::Delete, "/pets/{id}", "Pets"),
        ]
    }

    /// A valid controller manifest with one endpoint per method name.
    pub fn controller(name: &str, category: Option<&str>, methods: &[&str]) -> ControllerManifest {
        let category_name = category.unwrap_or(name);
        ControllerManifest {
            name: name.to_string(),
            valid: true,
            declared_category: category.map(str::to_string),
            methods: methods
                .iter()
                .map(|m| EndpointManifest {
                    name: m.to_string(),
                    valid: true,
                    declared_summary: Some(format!("{} summary", m)),
                    apis: vec![api(
                        HttpMethod::Get,
                        &format!("/{}/{}", name.to_lowercase(), m),
                        category_name,
                    )],
                })
                .collect(),
        }
    }
}

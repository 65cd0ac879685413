//! Mock uploader for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{Api, UploadResult};
use crate::uploader::{ApiUploader, UploadError};

/// A recorded upload for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    /// The endpoint that was uploaded.
    pub api: Api,
    /// Whether the upload succeeded.
    pub success: bool,
}

/// Mock implementation of the ApiUploader trait.
///
/// Provides controllable behavior for testing:
/// - Track uploads for assertions
/// - Fail or panic on chosen paths
/// - Simulate latency
/// - Record the highest number of uploads running at once
///
/// # Example
///
/// ```rust,ignore
/// use docpush_core::testing::MockUploader;
///
/// let uploader = MockUploader::new();
/// uploader.fail_path("/pets", UploadError::RateLimited);
///
/// let result = uploader.upload(&api).await;
///
/// assert_eq!(uploader.upload_count(), 1);
/// assert_eq!(uploader.max_in_flight(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockUploader {
    /// Recorded uploads.
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    /// Errors returned (once) for specific paths.
    failures: Arc<Mutex<HashMap<String, UploadError>>>,
    /// Paths whose upload panics.
    panics: Arc<Mutex<HashSet<String>>>,
    /// Simulated upload duration.
    delay: Arc<Mutex<Duration>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl Default for MockUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUploader {
    /// Create a new mock uploader that succeeds immediately.
    pub fn new() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            panics: Arc::new(Mutex::new(HashSet::new())),
            delay: Arc::new(Mutex::new(Duration::ZERO)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make the next upload of `path` fail with `error`.
    pub fn fail_path(&self, path: &str, error: UploadError) {
        self.failures
            .lock()
            .unwrap()
            .insert(path.to_string(), error);
    }

    /// Make every upload of `path` panic.
    pub fn panic_on_path(&self, path: &str) {
        self.panics.lock().unwrap().insert(path.to_string());
    }

    /// Set the simulated upload duration.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Get all recorded uploads.
    pub fn recorded_uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    /// Get the number of uploads attempted (panicking ones excluded).
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// Highest number of uploads observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Links the mock returns for an endpoint.
    pub fn result_for(api: &Api) -> UploadResult {
        UploadResult::new(
            format!(
                "https://docs.test/api/{}{}",
                api.method.as_str().to_lowercase(),
                api.path
            ),
            format!("https://docs.test/category/{}", api.category),
        )
    }

    fn record(&self, api: &Api, success: bool) {
        self.uploads.lock().unwrap().push(RecordedUpload {
            api: api.clone(),
            success,
        });
    }
}

/// Keeps the in-flight counter right even when the upload panics.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ApiUploader for MockUploader {
    fn name(&self) -> &str {
        "mock"
    }

    async fn upload(&self, api: &Api) -> Result<UploadResult, UploadError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.panics.lock().unwrap().contains(&api.path) {
            panic!("mock uploader asked to panic on {}", api.path);
        }

        let failure = self.failures.lock().unwrap().remove(&api.path);
        if let Some(err) = failure {
            self.record(api, false);
            return Err(err);
        }

        self.record(api, true);
        Ok(Self::result_for(api))
    }
}

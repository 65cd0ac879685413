//! Upload orchestrator implementation.
//!
//! Drives one batch of endpoints through the bounded worker pool:
//! - Submission: sequential, in input order, gated by admission slots
//! - Upload: concurrent, at most `pool_size` at once (1 for a single endpoint)
//! - Aggregation: after every submitted upload has finished

use std::any::Any;
use std::error::Error;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::FutureExt;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::{Api, UploadResult, UploadTask};
use crate::metrics;
use crate::notify::Notifier;
use crate::pool::WorkerPool;
use crate::progress::{ProgressIndicator, ProgressTracker};
use crate::uploader::ApiUploader;

use super::config::OrchestratorConfig;
use super::types::UploadReport;

/// Title of the notification sent when at least one upload succeeded.
pub const UPLOAD_SUCCESS_TITLE: &str = "Upload successful";

/// Runs `on_complete` exactly once: explicitly, or when dropped.
struct CompletionGuard<F: FnOnce()> {
    callback: Option<F>,
}

impl<F: FnOnce()> CompletionGuard<F> {
    fn new(callback: F) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    fn complete(mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl<F: FnOnce()> Drop for CompletionGuard<F> {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

/// Advances the batch progress when an upload task ends, however it ends.
struct FinishGuard {
    tracker: Arc<ProgressTracker>,
    progress: Arc<dyn ProgressIndicator>,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        let fraction = self.tracker.advance_fraction();
        self.progress.set_fraction(fraction);
    }
}

/// Everything an upload task needs, cloned once per task.
#[derive(Clone)]
struct TaskContext {
    uploader: Arc<dyn ApiUploader>,
    notifier: Arc<dyn Notifier>,
    progress: Arc<dyn ProgressIndicator>,
    tracker: Arc<ProgressTracker>,
}

/// Uploads batches of endpoints concurrently and reports one consolidated
/// outcome per batch.
pub struct UploadOrchestrator {
    config: OrchestratorConfig,
    uploader: Arc<dyn ApiUploader>,
    notifier: Arc<dyn Notifier>,
    progress: Arc<dyn ProgressIndicator>,
}

impl UploadOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        config: OrchestratorConfig,
        uploader: Arc<dyn ApiUploader>,
        notifier: Arc<dyn Notifier>,
        progress: Arc<dyn ProgressIndicator>,
    ) -> Self {
        Self {
            config,
            uploader,
            notifier,
            progress,
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Uploads `apis` and returns the consolidated report.
    ///
    /// Upload failures never escape: each one is reported through the
    /// notifier and counted in the report. `on_complete` runs exactly once
    /// after the pool has been shut down, including when this future is
    /// dropped before finishing.
    pub async fn run<F>(&self, apis: Vec<Api>, on_complete: F) -> UploadReport
    where
        F: FnOnce() + Send,
    {
        let completion = CompletionGuard::new(on_complete);
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("upload_batch", run_id = %run_id, total = apis.len());

        let report = self.execute(run_id, apis).instrument(span).await;

        completion.complete();
        report
    }

    async fn execute(&self, run_id: String, apis: Vec<Api>) -> UploadReport {
        let started_at = Utc::now();
        let total = apis.len();
        metrics::BATCH_SIZE.observe(total as f64);

        let mut pool = WorkerPool::for_batch(total, self.config.pool_size);
        info!(
            "Uploading {} endpoint(s) with {} via {} worker(s)",
            total,
            self.uploader.name(),
            pool.size()
        );

        let ctx = TaskContext {
            uploader: Arc::clone(&self.uploader),
            notifier: Arc::clone(&self.notifier),
            progress: Arc::clone(&self.progress),
            tracker: Arc::new(ProgressTracker::new(total)),
        };

        let mut cancelled = false;
        for api in apis {
            if self.progress.is_cancelled() {
                info!("Upload cancelled, no further endpoints will be submitted");
                cancelled = true;
                metrics::BATCHES_CANCELLED.inc();
                break;
            }
            if let Err(e) = pool.submit(upload_one(api, ctx.clone())).await {
                warn!("Stopped submitting uploads: {}", e);
                break;
            }
        }

        let outcomes = pool.wait_all().await;
        let submitted = outcomes.len();
        let results: Vec<UploadResult> = outcomes.into_iter().flatten().flatten().collect();

        if let Some(body) = success_message(&results) {
            self.notifier.info(UPLOAD_SUCCESS_TITLE, &body);
        }

        let pool_status = pool.shutdown();
        let report = UploadReport {
            run_id,
            total,
            submitted,
            failed: submitted - results.len(),
            cancelled,
            results,
            pool: pool_status,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            "Batch finished: {} uploaded, {} failed, {} not submitted",
            report.succeeded(),
            report.failed,
            total - submitted
        );
        report
    }
}

/// Body of the success notification, if anything was uploaded.
fn success_message(results: &[UploadResult]) -> Option<String> {
    let first = results.first()?;
    let link = if results.len() == 1 {
        first.api_url.as_deref()
    } else {
        first.category_url.as_deref()
    };
    Some(match link {
        Some(url) => url.to_string(),
        None => format!("{} endpoint(s) uploaded", results.len()),
    })
}

/// Uploads one endpoint inside the pool.
///
/// Failures are reported here and turned into `None` so that they never reach
/// the pool or sibling tasks.
async fn upload_one(api: Api, ctx: TaskContext) -> Option<UploadResult> {
    let _finish = FinishGuard {
        tracker: Arc::clone(&ctx.tracker),
        progress: Arc::clone(&ctx.progress),
    };

    let task = UploadTask::new(&api, ctx.tracker.next_ordinal(), ctx.tracker.total());
    let text = task.progress_text();
    ctx.progress.set_text(&text);
    debug!("Starting upload {}", text);

    let start = Instant::now();
    let outcome = AssertUnwindSafe(ctx.uploader.upload(&api))
        .catch_unwind()
        .await;
    metrics::UPLOAD_DURATION
        .with_label_values(&[ctx.uploader.name()])
        .observe(start.elapsed().as_secs_f64());

    let title = format!("Upload failed: [{}]", api.label());
    match outcome {
        Ok(Ok(result)) => {
            metrics::UPLOADS_TOTAL.with_label_values(&["success"]).inc();
            Some(result)
        }
        Ok(Err(e)) => {
            metrics::UPLOADS_TOTAL.with_label_values(&["failed"]).inc();
            error!("{}: {}", title, e);
            ctx.notifier.error(&title, &error_chain(&e));
            None
        }
        Err(panic) => {
            metrics::UPLOADS_TOTAL.with_label_values(&["panicked"]).inc();
            let message = panic_message(panic.as_ref());
            error!("{}: uploader panicked: {}", title, message);
            ctx.notifier
                .error(&title, &format!("uploader panicked: {}", message));
            None
        }
    }
}

/// Renders an error with its chain of sources, one per line.
fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\ncaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

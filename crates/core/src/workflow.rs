//! One user action, from configuration to uploaded docs.
//!
//! A run goes through four steps, each of which may stop it:
//! 1. resolve the configuration
//! 2. let the target veto the run ([`UploadTarget::before`])
//! 3. extract the selected endpoints
//! 4. upload them through the [`UploadOrchestrator`]

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{resolve_config, Config};
use crate::extract::{resolve_apis, ApiExtractor, Selection};
use crate::notify::{Notifier, APP_NAME};
use crate::orchestrator::{UploadOrchestrator, UploadReport};
use crate::progress::ProgressIndicator;
use crate::step::Step;
use crate::uploader::{ApiUploader, HttpUploader, UploadError};

/// A destination platform as seen by the workflow.
pub trait UploadTarget: Send + Sync {
    /// Returns the name of this target.
    fn name(&self) -> &str;

    /// Last check before extraction; returning `Stop` cancels the run.
    ///
    /// Implementations tell the user why through `notifier`.
    fn before(&self, _config: &Config, _notifier: &dyn Notifier) -> Step<()> {
        Step::Continue(())
    }

    /// Builds the uploader for this run.
    fn uploader(&self, config: &Config) -> Result<Arc<dyn ApiUploader>, UploadError>;
}

/// Target uploading to the platform configured in `[target]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTarget;

impl UploadTarget for HttpTarget {
    fn name(&self) -> &str {
        "http"
    }

    fn before(&self, config: &Config, notifier: &dyn Notifier) -> Step<()> {
        if config.target.is_none() {
            notifier.warning(
                APP_NAME,
                "No upload target configured, add a [target] section to the config file",
            );
            return Step::Stop;
        }
        Step::Continue(())
    }

    fn uploader(&self, config: &Config) -> Result<Arc<dyn ApiUploader>, UploadError> {
        let target = config
            .target
            .clone()
            .ok_or_else(|| UploadError::NotConfigured("missing [target] section".to_string()))?;
        Ok(Arc::new(HttpUploader::new(target)?))
    }
}

/// Runs upload actions with injected collaborators.
pub struct Workflow {
    extractor: Arc<dyn ApiExtractor>,
    target: Arc<dyn UploadTarget>,
    notifier: Arc<dyn Notifier>,
    progress: Arc<dyn ProgressIndicator>,
    required_config_file: bool,
}

impl Workflow {
    /// Create a workflow that requires a config file.
    pub fn new(
        extractor: Arc<dyn ApiExtractor>,
        target: Arc<dyn UploadTarget>,
        notifier: Arc<dyn Notifier>,
        progress: Arc<dyn ProgressIndicator>,
    ) -> Self {
        Self {
            extractor,
            target,
            notifier,
            progress,
            required_config_file: true,
        }
    }

    /// Whether a missing config file stops the run or falls back to defaults.
    pub fn with_required_config_file(mut self, required: bool) -> Self {
        self.required_config_file = required;
        self
    }

    pub fn required_config_file(&self) -> bool {
        self.required_config_file
    }

    /// Runs one action.
    ///
    /// Returns `Stop` when a step ended the run before uploading; the user has
    /// already been notified. `on_complete` only runs once uploading started,
    /// and then exactly once.
    pub async fn run<F>(
        &self,
        config_path: Option<&Path>,
        selection: &Selection,
        on_complete: F,
    ) -> Step<UploadReport>
    where
        F: FnOnce() + Send,
    {
        let notifier = self.notifier.as_ref();

        let Step::Continue(config) =
            resolve_config(config_path, self.required_config_file, notifier)
        else {
            return Step::Stop;
        };

        if self.target.before(&config, notifier).is_stop() {
            info!("Upload vetoed by target {}", self.target.name());
            return Step::Stop;
        }

        let Step::Continue(apis) =
            resolve_apis(self.extractor.as_ref(), selection, &config, notifier)
        else {
            return Step::Stop;
        };

        let uploader = match self.target.uploader(&config) {
            Ok(uploader) => uploader,
            Err(e) => {
                warn!("Cannot create uploader for {}: {}", self.target.name(), e);
                notifier.error(APP_NAME, &format!("Upload target error: {}", e));
                return Step::Stop;
            }
        };

        info!(
            "Extracted {} endpoint(s) with {}",
            apis.len(),
            self.extractor.name()
        );

        let orchestrator = UploadOrchestrator::new(
            config.upload.clone(),
            uploader,
            Arc::clone(&self.notifier),
            Arc::clone(&self.progress),
        );
        Step::Continue(orchestrator.run(apis, on_complete).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ManifestExtractor;
    use crate::testing::{MockUploader, NotificationLevel, RecordingNotifier, RecordingProgress};
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::NamedTempFile;

    struct MockTarget {
        uploader: MockUploader,
        veto: bool,
    }

    impl UploadTarget for MockTarget {
        fn name(&self) -> &str {
            "mock"
        }

        fn before(&self, _config: &Config, notifier: &dyn Notifier) -> Step<()> {
            if self.veto {
                notifier.warning(APP_NAME, "vetoed");
                return Step::Stop;
            }
            Step::Continue(())
        }

        fn uploader(&self, _config: &Config) -> Result<Arc<dyn ApiUploader>, UploadError> {
            Ok(Arc::new(self.uploader.clone()))
        }
    }

    const MANIFEST: &str = r#"{
        "controllers": [{
            "name": "PetController",
            "declared_category": "Pets",
            "methods": [
                {"name": "list", "declared_summary": "List pets",
                 "apis": [{"method": "GET", "path": "/pets", "summary": "List pets", "category": "Pets"}]},
                {"name": "create",
                 "apis": [{"method": "POST", "path": "/pets", "category": "Pets"}]}
            ]
        }]
    }"#;

    fn manifest_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", MANIFEST).unwrap();
        file
    }

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    fn workflow(veto: bool) -> (Workflow, MockUploader, Arc<RecordingNotifier>) {
        let uploader = MockUploader::new();
        let notifier = Arc::new(RecordingNotifier::new());
        let workflow = Workflow::new(
            Arc::new(ManifestExtractor::new()),
            Arc::new(MockTarget {
                uploader: uploader.clone(),
                veto,
            }),
            Arc::clone(&notifier) as Arc<dyn Notifier>,
            Arc::new(RecordingProgress::new()),
        );
        (workflow, uploader, notifier)
    }

    #[tokio::test]
    async fn test_uploads_selected_files() {
        let manifest = manifest_file();
        let (workflow, uploader, notifier) = workflow(false);
        let completed = AtomicUsize::new(0);

        let report = workflow
            .with_required_config_file(false)
            .run(
                None,
                &Selection::Files(vec![manifest.path().to_path_buf()]),
                || {
                    completed.fetch_add(1, Ordering::SeqCst);
                },
            )
            .await
            .into_option()
            .unwrap();

        assert_eq!(report.succeeded(), 2);
        assert_eq!(uploader.upload_count(), 2);
        assert_eq!(completed.load(Ordering::SeqCst), 1);
        assert_eq!(
            report.representative_link(),
            Some("https://docs.test/category/Pets")
        );
        assert_eq!(notifier.count(NotificationLevel::Info), 1);
    }

    #[tokio::test]
    async fn test_strict_config_filters_endpoints() {
        let manifest = manifest_file();
        let config = config_file("strict = true");
        let (workflow, uploader, _notifier) = workflow(false);

        let report = workflow
            .run(
                Some(config.path()),
                &Selection::Files(vec![manifest.path().to_path_buf()]),
                || {},
            )
            .await
            .into_option()
            .unwrap();

        assert_eq!(report.total, 1);
        assert_eq!(uploader.recorded_uploads()[0].api.path, "/pets");
    }

    #[tokio::test]
    async fn test_missing_required_config_stops() {
        let manifest = manifest_file();
        let (workflow, uploader, notifier) = workflow(false);
        let completed = AtomicUsize::new(0);

        let step = workflow
            .run(
                None,
                &Selection::Files(vec![manifest.path().to_path_buf()]),
                || {
                    completed.fetch_add(1, Ordering::SeqCst);
                },
            )
            .await;

        assert!(step.is_stop());
        assert_eq!(uploader.upload_count(), 0);
        assert_eq!(completed.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.count(NotificationLevel::Warning), 1);
    }

    #[tokio::test]
    async fn test_target_veto_stops_before_extraction() {
        let (workflow, uploader, notifier) = workflow(true);

        let step = workflow
            .with_required_config_file(false)
            .run(
                None,
                &Selection::Files(vec!["/nonexistent/manifest.json".into()]),
                || {},
            )
            .await;

        assert!(step.is_stop());
        assert_eq!(uploader.upload_count(), 0);
        let warnings = notifier.with_level(NotificationLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].body, "vetoed");
    }

    #[test]
    fn test_http_target_requires_target_section() {
        let notifier = RecordingNotifier::new();
        assert!(HttpTarget.before(&Config::default(), &notifier).is_stop());
        assert_eq!(notifier.count(NotificationLevel::Warning), 1);
        assert!(matches!(
            HttpTarget.uploader(&Config::default()),
            Err(UploadError::NotConfigured(_))
        ));

        let config = crate::config::load_config_from_str(
            "[target]\nurl = \"https://docs.example.com\"",
        )
        .unwrap();
        assert!(HttpTarget.before(&config, &notifier).is_continue());
        assert!(HttpTarget.uploader(&config).is_ok());
    }
}

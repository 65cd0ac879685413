pub mod api;
pub mod config;
pub mod extract;
pub mod metrics;
pub mod notify;
pub mod orchestrator;
pub mod pool;
pub mod progress;
pub mod step;
pub mod testing;
pub mod uploader;
pub mod workflow;

pub use api::{Api, HttpMethod, UploadResult, UploadTask};
pub use config::{
    load_config, load_config_from_str, resolve_config, validate_config, Config, ConfigError,
    SanitizedConfig, TargetConfig, DEFAULT_CONFIG_FILE,
};
pub use extract::{
    resolve_apis, ApiExtractor, ControllerManifest, EndpointManifest, ExtractError,
    ManifestExtractor, ResourceCache, Selection, SourceManifest,
};
pub use notify::{Notifier, TracingNotifier, APP_NAME};
pub use orchestrator::{OrchestratorConfig, UploadOrchestrator, UploadReport, UPLOAD_SUCCESS_TITLE};
pub use pool::{PoolError, PoolStatus, WorkerPool, DEFAULT_POOL_SIZE};
pub use progress::{CancelFlag, LogProgress, ProgressIndicator, ProgressTracker};
pub use step::Step;
pub use uploader::{ApiUploader, HttpUploader, UploadError};
pub use workflow::{HttpTarget, UploadTarget, Workflow};

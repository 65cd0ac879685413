//! User-facing notifications.
//!
//! Every component that needs to tell the user something (a missing config
//! file, a failed upload, the link to the uploaded docs) goes through an
//! injected [`Notifier`]. Implementations are fire-and-forget and must never
//! fail or panic.

use std::sync::Arc;

use tracing::{error, info, warn};

/// Title used for notifications that are not tied to a specific operation.
pub const APP_NAME: &str = "docpush";

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn info(&self, title: &str, body: &str);

    fn warning(&self, title: &str, body: &str);

    fn error(&self, title: &str, detail: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn info(&self, title: &str, body: &str) {
        (**self).info(title, body)
    }

    fn warning(&self, title: &str, body: &str) {
        (**self).warning(title, body)
    }

    fn error(&self, title: &str, detail: &str) {
        (**self).error(title, detail)
    }
}

/// Notifier that writes every notification to the tracing log.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn info(&self, title: &str, body: &str) {
        info!(target: "docpush::notify", "{}: {}", title, body);
    }

    fn warning(&self, title: &str, body: &str) {
        warn!(target: "docpush::notify", "{}: {}", title, body);
    }

    fn error(&self, title: &str, detail: &str) {
        error!(target: "docpush::notify", "{}\n{}", title, detail);
    }
}

//! Types for the upload orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::UploadResult;
use crate::pool::PoolStatus;

/// Consolidated outcome of one upload batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReport {
    /// Identifier of the run, also recorded on the tracing span.
    pub run_id: String,
    /// Endpoints in the batch.
    pub total: usize,
    /// Endpoints handed to the pool before the run ended.
    pub submitted: usize,
    /// Submitted endpoints that did not produce a result.
    pub failed: usize,
    /// Whether submission stopped early because of cancellation.
    pub cancelled: bool,
    /// Results of the successful uploads, in submission order.
    pub results: Vec<UploadResult>,
    /// Pool counters taken at shutdown.
    pub pool: PoolStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl UploadReport {
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    /// Whether every endpoint of the batch was uploaded.
    pub fn is_complete_success(&self) -> bool {
        self.results.len() == self.total
    }

    /// The single link summarizing the batch.
    ///
    /// One result links to the endpoint itself. Several results are assumed to
    /// share a category, so the first one's category link stands for all.
    pub fn representative_link(&self) -> Option<&str> {
        match self.results.as_slice() {
            [] => None,
            [only] => only.api_url.as_deref(),
            [first, ..] => first.category_url.as_deref(),
        }
    }
}

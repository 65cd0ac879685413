//! Bounded worker pool.
//!
//! Uploads hit external HTTP services with their own rate limits, so the pool
//! caps how many run at once and makes the submitting side wait for a free
//! slot.

mod types;
mod worker_pool;

pub use types::{PoolError, PoolStatus};
pub use worker_pool::{WorkerPool, DEFAULT_POOL_SIZE};

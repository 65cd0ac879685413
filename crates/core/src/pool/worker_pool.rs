//! Bounded worker pool with semaphore admission control.

use std::future::Future;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::types::{PoolError, PoolStats, PoolStatus};

/// Concurrency used for batches of more than one item.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Fixed-size pool of tokio tasks gated by a counting semaphore.
///
/// [`submit`](WorkerPool::submit) waits for an admission slot before spawning,
/// so a caller producing work faster than the pool drains it is held back
/// instead of queuing without bound. The slot travels with the task and is
/// released when the task ends, panics included.
pub struct WorkerPool<T> {
    size: usize,
    semaphore: Arc<Semaphore>,
    handles: Vec<JoinHandle<T>>,
    stats: Arc<PoolStats>,
    shut_down: bool,
}

/// Holds an admission slot for the lifetime of a running task.
struct ActiveSlot {
    stats: Arc<PoolStats>,
    _permit: OwnedSemaphorePermit,
}

impl ActiveSlot {
    fn enter(stats: Arc<PoolStats>, permit: OwnedSemaphorePermit) -> Self {
        let active = stats.active.fetch_add(1, Ordering::SeqCst) + 1;
        stats.peak_active.fetch_max(active, Ordering::SeqCst);
        Self {
            stats,
            _permit: permit,
        }
    }
}

impl Drop for ActiveSlot {
    fn drop(&mut self) {
        self.stats.active.fetch_sub(1, Ordering::SeqCst);
        self.stats.completed.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T> WorkerPool<T> {
    /// Creates a pool running at most `size` tasks at once (at least one).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            semaphore: Arc::new(Semaphore::new(size)),
            handles: Vec::new(),
            stats: Arc::new(PoolStats::default()),
            shut_down: false,
        }
    }

    /// Creates a pool sized for a batch: a single item runs alone, anything
    /// larger gets `max_size` slots.
    pub fn for_batch(batch_len: usize, max_size: usize) -> Self {
        Self::new(Self::batch_pool_size(batch_len, max_size))
    }

    /// Pool size used for a batch of `batch_len` items.
    pub fn batch_pool_size(batch_len: usize, max_size: usize) -> usize {
        if batch_len == 1 {
            1
        } else {
            max_size.max(1)
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Admission slots currently free.
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Number of tasks submitted and not yet collected by `wait_all`.
    pub fn pending(&self) -> usize {
        self.handles.len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn status(&self) -> PoolStatus {
        self.stats.to_status(self.size)
    }

    /// Stops admitting work. Running tasks are left to finish.
    pub fn shutdown(mut self) -> PoolStatus {
        self.close();
        self.status()
    }

    fn close(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.semaphore.close();
        self.stats.shutdowns.fetch_add(1, Ordering::SeqCst);
        debug!(
            "Worker pool shut down ({} tasks still tracked)",
            self.handles.len()
        );
    }
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Waits for an admission slot, then spawns `task`.
    pub async fn submit<F>(&mut self, task: F) -> Result<(), PoolError>
    where
        F: Future<Output = T> + Send + 'static,
    {
        if self.shut_down {
            return Err(PoolError::ShutDown);
        }

        self.stats.waiting.fetch_add(1, Ordering::SeqCst);
        let permit = Arc::clone(&self.semaphore).acquire_owned().await;
        self.stats.waiting.fetch_sub(1, Ordering::SeqCst);
        let permit = permit.map_err(|_| PoolError::ShutDown)?;

        self.stats.submitted.fetch_add(1, Ordering::SeqCst);
        let stats = Arc::clone(&self.stats);
        let handle = tokio::spawn(async move {
            let _slot = ActiveSlot::enter(stats, permit);
            task.await
        });
        self.handles.push(handle);
        Ok(())
    }

    /// Waits for every submitted task, in submission order.
    ///
    /// A task that panicked or was aborted yields `None`; it never stops the
    /// wait for the others.
    pub async fn wait_all(&mut self) -> Vec<Option<T>> {
        let handles = std::mem::take(&mut self.handles);
        let mut outputs = Vec::with_capacity(handles.len());

        for (idx, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(output) => outputs.push(Some(output)),
                Err(e) => {
                    self.stats.failed.fetch_add(1, Ordering::SeqCst);
                    if e.is_panic() {
                        warn!("Pool task #{} panicked", idx + 1);
                    } else {
                        warn!("Pool task #{} did not complete: {}", idx + 1, e);
                    }
                    outputs.push(None);
                }
            }
        }

        outputs
    }
}

impl<T> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        self.close();
    }
}

//! Fixed-size worker pool and pending-task handles
//!
//! Work runs on the tokio runtime, gated by a semaphore holding one permit per
//! worker, so at most `size` fetch-and-extract operations are in flight at
//! once. Each submission yields a [`PendingTask`] that the scheduler keeps in a
//! FIFO and consumes exactly once.

use crate::config::validate_worker_count;
use crate::ConfigError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use url::Url;

/// Why a pending task produced no value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAbort {
    /// The pool shut down before the task obtained a worker, or it was aborted
    Cancelled,

    /// The task panicked
    Panicked(String),
}

impl fmt::Display for TaskAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "task cancelled"),
            Self::Panicked(msg) => write!(f, "task panicked: {}", msg),
        }
    }
}

/// Handle to a submitted task
pub struct PendingTask<T> {
    url: Url,
    handle: JoinHandle<Option<T>>,
}

impl<T> PendingTask<T> {
    /// URL the task was submitted for
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the task has finished and returns its value
    pub async fn wait(self) -> Result<T, TaskAbort> {
        match self.handle.await {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(TaskAbort::Cancelled),
            Err(e) if e.is_cancelled() => Err(TaskAbort::Cancelled),
            Err(e) => Err(TaskAbort::Panicked(e.to_string())),
        }
    }

    /// Drops the task without waiting for it
    pub fn abandon(self) {
        self.handle.abort();
    }
}

impl<T> fmt::Debug for PendingTask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTask")
            .field("url", &self.url.as_str())
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}

/// Bounded pool of workers
#[derive(Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
    shut_down: bool,
}

impl WorkerPool {
    /// Creates a pool of `size` workers
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when `size` is zero or above the
    /// supported maximum.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        validate_worker_count(size)?;

        Ok(Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
            shut_down: false,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Submits `work` for `url`
    ///
    /// The work starts once a worker is free. Returns `None` after shutdown.
    pub fn submit<F>(&self, url: Url, work: F) -> Option<PendingTask<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        if self.is_shut_down() {
            return None;
        }

        let permits = Arc::clone(&self.permits);
        let handle = tokio::spawn(async move {
            // Acquisition fails only once the pool has been closed
            let _permit = permits.acquire_owned().await.ok()?;
            Some(work.await)
        });

        Some(PendingTask { url, handle })
    }

    /// Stops accepting work and abandons `in_flight` without awaiting it
    ///
    /// Safe to call more than once and with tasks that already completed.
    pub fn shutdown<T>(&mut self, in_flight: impl IntoIterator<Item = PendingTask<T>>) {
        if !self.shut_down {
            self.shut_down = true;
            self.permits.close();
        }

        let mut abandoned = 0;
        for task in in_flight {
            if !task.is_finished() {
                abandoned += 1;
            }
            task.abandon();
        }

        if abandoned > 0 {
            tracing::debug!("Abandoned {} in-flight task(s) at shutdown", abandoned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn url(n: usize) -> Url {
        Url::parse(&format!("http://example.com/page_{}.html", n)).unwrap()
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            WorkerPool::new(0),
            Err(ConfigError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_and_wait() {
        let pool = WorkerPool::new(2).unwrap();
        let task = pool.submit(url(0), async { 41 + 1 }).unwrap();
        assert_eq!(task.url(), &url(0));
        assert_eq!(task.wait().await, Ok(42));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_bounded_by_size() {
        let pool = WorkerPool::new(2).unwrap();
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|n| {
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                pool.submit(url(n), async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                })
                .unwrap()
            })
            .collect();

        for task in tasks {
            task.wait().await.unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_submit_after_shutdown_refused() {
        let mut pool = WorkerPool::new(1).unwrap();
        pool.shutdown(Vec::<PendingTask<()>>::new());
        assert!(pool.is_shut_down());
        assert!(pool.submit(url(0), async {}).is_none());
    }

    #[tokio::test]
    async fn test_shutdown_abandons_in_flight_and_is_idempotent() {
        let mut pool = WorkerPool::new(1).unwrap();
        let finished = Arc::new(AtomicUsize::new(0));

        let slow = {
            let finished = Arc::clone(&finished);
            pool.submit(url(0), async move {
                tokio::time::sleep(Duration::from_secs(30)).await;
                finished.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap()
        };
        let done = pool.submit(url(1), async {}).unwrap();

        pool.shutdown(vec![slow, done]);
        pool.shutdown(Vec::<PendingTask<()>>::new());
        tokio::task::yield_now().await;

        assert!(pool.is_shut_down());
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_queued_task_cancelled_when_pool_closes() {
        let mut pool = WorkerPool::new(1).unwrap();

        let blocker = pool
            .submit(url(0), async {
                tokio::time::sleep(Duration::from_secs(30)).await;
            })
            .unwrap();
        let queued = pool.submit(url(1), async { 7 }).unwrap();

        tokio::task::yield_now().await;
        pool.shutdown(vec![blocker]);

        assert_eq!(queued.wait().await, Err(TaskAbort::Cancelled));
    }
}

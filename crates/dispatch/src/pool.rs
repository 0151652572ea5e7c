//! Worker pool contract and the two bundled pools.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, mpsc};

use crate::error::{DispatchError, TaskError};

/// Something that can run independent tasks and hand back their results.
///
/// Submission order defines identity: the caller keeps each handle and
/// decides in which order to join them, so completion order never matters.
pub trait WorkerPool {
    /// Handle for a task returning `R`.
    type Handle<R: Send + 'static>: TaskHandle<Output = R>;

    /// Starts `task` (now or later) and returns a handle to its result.
    fn submit<F, R>(&self, task: F) -> Self::Handle<R>
    where
        F: FnOnce() -> Result<R, TaskError> + Send + 'static,
        R: Send + 'static;
}

/// Blocking access to one task's outcome.
pub trait TaskHandle {
    /// Value produced on success.
    type Output;

    /// Waits for the task and returns its outcome.
    fn join(self) -> Result<Self::Output, TaskError>;
}

/// Runs every task on the calling thread at submit time.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlinePool;

/// Handle whose outcome is already known.
#[derive(Debug)]
pub struct ReadyHandle<R>(Result<R, TaskError>);

impl<R> TaskHandle for ReadyHandle<R> {
    type Output = R;

    fn join(self) -> Result<R, TaskError> {
        self.0
    }
}

impl WorkerPool for InlinePool {
    type Handle<R: Send + 'static> = ReadyHandle<R>;

    fn submit<F, R>(&self, task: F) -> ReadyHandle<R>
    where
        F: FnOnce() -> Result<R, TaskError> + Send + 'static,
        R: Send + 'static,
    {
        ReadyHandle(run_catching(task))
    }
}

/// Runs tasks on a rayon thread pool.
///
/// Joining blocks the calling thread, so do not call into a `RayonPool` from
/// one of its own worker threads.
#[derive(Clone, Debug)]
pub struct RayonPool {
    /// `None` means rayon's global pool.
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl RayonPool {
    /// Uses rayon's process-wide global pool.
    pub fn global() -> Self {
        Self { pool: None }
    }

    /// Builds a dedicated pool with `threads` workers (`0` lets rayon choose).
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`DispatchError::PoolBuild`] | rayon could not start the threads |
    pub fn with_threads(threads: usize) -> Result<Self, DispatchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("tempo-worker-{i}"))
            .build()
            .map_err(|e| DispatchError::PoolBuild(e.to_string()))?;
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Number of worker threads tasks may run on.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

/// Handle to a task running on a [`RayonPool`].
#[derive(Debug)]
pub struct RayonHandle<R> {
    rx: mpsc::Receiver<Result<R, TaskError>>,
}

impl<R> TaskHandle for RayonHandle<R> {
    type Output = R;

    fn join(self) -> Result<R, TaskError> {
        self.rx.recv().unwrap_or(Err(TaskError::Disconnected))
    }
}

impl WorkerPool for RayonPool {
    type Handle<R: Send + 'static> = RayonHandle<R>;

    fn submit<F, R>(&self, task: F) -> RayonHandle<R>
    where
        F: FnOnce() -> Result<R, TaskError> + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let job = move || {
            // The receiver may already be gone; nothing left to report to.
            let _ = tx.send(run_catching(task));
        };
        match &self.pool {
            Some(pool) => pool.spawn(job),
            None => rayon::spawn(job),
        }
        RayonHandle { rx }
    }
}

fn run_catching<F, R>(task: F) -> Result<R, TaskError>
where
    F: FnOnce() -> Result<R, TaskError>,
{
    panic::catch_unwind(AssertUnwindSafe(task))
        .unwrap_or_else(|payload| Err(TaskError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

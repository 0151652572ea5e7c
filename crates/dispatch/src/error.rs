//! Error types for the tempo-dispatch crate.

use tempo_wavelet::WaveletError;

/// Why a single submitted task produced no result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskError {
    /// The transform itself rejected its input.
    #[error("transform failed: {0}")]
    Transform(#[from] WaveletError),

    /// The task panicked; carries the panic message.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The pool could not run the task.
    #[error("worker error: {0}")]
    Worker(String),

    /// The task's result channel closed before a value arrived.
    #[error("worker disconnected before returning a result")]
    Disconnected,
}

/// Error type for all fallible operations in the tempo-dispatch crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    /// Configuration rejected before any task was submitted.
    #[error(transparent)]
    Wavelet(#[from] WaveletError),

    /// One or more channel tasks failed. Reported only after every task has
    /// resolved; no partial result is returned.
    #[error("channel {channel} failed ({} of the submitted channels failed)", .failed.len())]
    WorkerFailure {
        /// Lowest failing channel index.
        channel: usize,
        /// Every failing channel index, ascending.
        failed: Vec<usize>,
        /// Failure of `channel`.
        #[source]
        source: TaskError,
    },

    /// A dedicated thread pool could not be built.
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_task_transform() {
        let err = TaskError::from(WaveletError::EmptyFrequencies);
        assert_eq!(err.to_string(), "transform failed: frequency list is empty");
    }

    #[test]
    fn error_task_panicked() {
        let err = TaskError::Panicked("index out of bounds".into());
        assert_eq!(err.to_string(), "task panicked: index out of bounds");
    }

    #[test]
    fn error_worker_failure() {
        let err = DispatchError::WorkerFailure {
            channel: 2,
            failed: vec![2, 5],
            source: TaskError::Disconnected,
        };
        assert_eq!(
            err.to_string(),
            "channel 2 failed (2 of the submitted channels failed)"
        );
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("worker disconnected before returning a result")
        );
    }

    #[test]
    fn error_wavelet_transparent() {
        let err = DispatchError::from(WaveletError::EmptyFrequencies);
        assert_eq!(err.to_string(), "frequency list is empty");
    }

    #[test]
    fn error_pool_build() {
        let err = DispatchError::PoolBuild("out of threads".into());
        assert_eq!(err.to_string(), "failed to build worker pool: out of threads");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<TaskError>();
        assert_impl::<DispatchError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<TaskError>();
        assert_impl::<DispatchError>();
    }
}

//! # Parallel Errors
//!
//! Failures raised inside a worker are captured per worker and surfaced
//! on the calling thread only after every worker has been joined.

use std::convert::Infallible;
use thiserror::Error;

/// Errors reported by [`crate::Executor`].
///
/// `E` is the error type of the per-index task; infallible loops use the
/// default [`Infallible`].
#[derive(Debug, Error)]
pub enum ParallelError<E: std::error::Error + 'static = Infallible> {
    /// The per-index task returned an error. The worker stopped at `index`.
    #[error("worker {worker} failed at index {index}: {source}")]
    Task {
        /// Worker that owned the failing index
        worker: usize,
        /// First index that failed on that worker
        index: usize,
        /// Error returned by the task
        #[source]
        source: E,
    },

    /// A worker panicked. The panic was caught when the worker was joined.
    #[error("worker {worker} panicked: {message}")]
    WorkerPanicked {
        /// Worker that panicked
        worker: usize,
        /// Panic payload rendered as text
        message: String,
    },

    /// `prepare` did not return one context per worker thread.
    #[error("prepare returned {got} contexts for {expected} workers")]
    ContextCount {
        /// Number of contexts the executor asked for
        expected: usize,
        /// Number of contexts `prepare` returned
        got: usize,
    },
}

impl ParallelError<Infallible> {
    /// Converts an infallible-task error into one for any task error type.
    pub fn widen<E: std::error::Error + 'static>(self) -> ParallelError<E> {
        match self {
            ParallelError::Task { source, .. } => match source {},
            ParallelError::WorkerPanicked { worker, message } => {
                ParallelError::WorkerPanicked { worker, message }
            }
            ParallelError::ContextCount { expected, got } => {
                ParallelError::ContextCount { expected, got }
            }
        }
    }
}

/// Renders a panic payload caught by `join` or `catch_unwind`.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

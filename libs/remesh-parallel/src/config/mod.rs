//! # Executor Configuration
//!
//! The worker-thread count is resolved once, when the configuration is
//! built, and then carried by value into every [`crate::Executor`].
//! Precedence: explicit override, then the `VOXREMESH_NUM_THREADS`
//! environment variable, then the hardware-reported parallelism, then a
//! fixed fallback of 8.

use config::constants::{DEFAULT_MIN_PARALLEL, FALLBACK_THREAD_COUNT, THREAD_COUNT_ENV};
use log::debug;

/// Resolved executor settings.
///
/// # Examples
/// ```
/// use remesh_parallel::ExecutorConfig;
/// let cfg = ExecutorConfig::with_threads(3);
/// assert_eq!(cfg.threads(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    threads: usize,
    min_parallel: usize,
}

impl ExecutorConfig {
    /// Pure thread-count resolution.
    ///
    /// `explicit` of `Some(0)` counts as no override. `env` must parse as a
    /// positive integer to be honoured.
    ///
    /// # Examples
    /// ```
    /// use remesh_parallel::ExecutorConfig;
    /// assert_eq!(ExecutorConfig::resolve_thread_count(Some(3), Some("16"), Some(12)), 3);
    /// assert_eq!(ExecutorConfig::resolve_thread_count(None, Some("16"), Some(12)), 16);
    /// assert_eq!(ExecutorConfig::resolve_thread_count(None, Some("-2"), Some(12)), 12);
    /// assert_eq!(ExecutorConfig::resolve_thread_count(None, None, None), 8);
    /// ```
    pub fn resolve_thread_count(
        explicit: Option<usize>,
        env: Option<&str>,
        hardware: Option<usize>,
    ) -> usize {
        if let Some(threads) = explicit.filter(|&n| n > 0) {
            return threads;
        }
        if let Some(threads) = env.and_then(parse_thread_env) {
            return threads;
        }
        if let Some(threads) = hardware.filter(|&n| n > 0) {
            return threads;
        }
        FALLBACK_THREAD_COUNT
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads `VOXREMESH_NUM_THREADS` and the hardware parallelism exactly
    /// once; the result is fixed for the lifetime of the value.
    pub fn from_env(explicit: Option<usize>) -> Self {
        let env = std::env::var(THREAD_COUNT_ENV).ok();
        let hardware = std::thread::available_parallelism().ok().map(|n| n.get());
        let threads = Self::resolve_thread_count(explicit, env.as_deref(), hardware);
        debug!(
            "Executor threads resolved to {} (override {:?}, env {:?}, hardware {:?})",
            threads, explicit, env, hardware
        );
        Self {
            threads,
            min_parallel: DEFAULT_MIN_PARALLEL,
        }
    }

    /// Configuration with an explicit thread count.
    ///
    /// A count of zero falls back to the environment/hardware chain.
    pub fn with_threads(threads: usize) -> Self {
        if threads == 0 {
            return Self::from_env(None);
        }
        Self {
            threads,
            min_parallel: DEFAULT_MIN_PARALLEL,
        }
    }

    /// Single-threaded configuration.
    pub fn serial() -> Self {
        Self {
            threads: 1,
            min_parallel: DEFAULT_MIN_PARALLEL,
        }
    }

    /// Sets the loop size below which work stays on the calling thread.
    #[must_use]
    pub fn with_min_parallel(mut self, min_parallel: usize) -> Self {
        self.min_parallel = min_parallel;
        self
    }

    /// Resolved worker-thread count.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Serial threshold.
    #[inline]
    pub fn min_parallel(&self) -> usize {
        self.min_parallel
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::from_env(None)
    }
}

fn parse_thread_env(value: &str) -> Option<usize> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
}

#[cfg(test)]
mod tests;

//! # Executor
//!
//! Functional implementation of an open-mp style parallel `for` loop.
//!
//! ## Strategy
//!
//! - `n == 0`: nothing runs, returns `false`
//! - `n < min_parallel` or one thread: serial on the calling thread,
//!   `prepare(1)`, `perform(i, 0, ..)` for every `i`, `finish(0, ..)`
//! - otherwise: slices of `ceil((n + 1) / threads)` indices, one scoped
//!   worker per slice, all joined, then `finish` in worker-id order
//!
//! ## Failure Policy
//!
//! A worker stops at its first failing index. Every worker is joined
//! regardless; panics are caught at the join. The first failure in
//! worker-id order is returned and `finish` is not called.

use std::convert::Infallible;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use log::debug;

use crate::config::ExecutorConfig;
use crate::error::{panic_message, ParallelError};

/// Thread-per-call parallel loop runner.
///
/// Cheap to copy; carries only its resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    /// Creates an executor with a resolved configuration.
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Returns the executor configuration.
    #[inline]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Resolved worker-thread count.
    #[inline]
    pub fn thread_count(&self) -> usize {
        self.config.threads()
    }

    /// Returns true if a loop of `n` iterations takes the parallel path.
    pub fn is_parallel(&self, n: usize) -> bool {
        n > 0 && n >= self.config.min_parallel() && self.config.threads() > 1
    }

    /// Index ranges handed to each worker for a loop of `n` iterations.
    ///
    /// The serial path is a single range. Ranges are contiguous,
    /// increasing, non-overlapping and cover `[0, n)`.
    ///
    /// # Examples
    /// ```
    /// use remesh_parallel::{Executor, ExecutorConfig};
    /// let executor = Executor::new(ExecutorConfig::with_threads(4).with_min_parallel(0));
    /// let ranges = executor.partition(10_000);
    /// assert_eq!(ranges.len(), 4);
    /// assert_eq!(ranges[0], 0..2501);
    /// assert_eq!(ranges[3], 7503..10_000);
    /// ```
    pub fn partition(&self, n: usize) -> Vec<Range<usize>> {
        if n == 0 {
            return Vec::new();
        }
        if !self.is_parallel(n) {
            return vec![0..n];
        }
        let threads = self.config.threads();
        let slice = ((n + 1).div_ceil(threads)).max(1);
        let mut ranges = Vec::with_capacity(threads);
        let mut start = 0;
        while start < n && ranges.len() + 1 < threads {
            let end = (start + slice).min(n);
            ranges.push(start..end);
            start = end;
        }
        if start < n {
            ranges.push(start..n);
        }
        ranges
    }

    /// Runs `perform(i)` for every `i` in `[0, n)`.
    ///
    /// Returns `Ok(true)` if worker threads were used.
    pub fn for_each<F>(&self, n: usize, perform: F) -> Result<bool, ParallelError>
    where
        F: Fn(usize) + Sync,
    {
        self.for_each_with(
            n,
            |threads| vec![(); threads],
            |index, _worker, _ctx| {
                perform(index);
                Ok::<(), Infallible>(())
            },
            |_worker, _ctx| {},
        )
    }

    /// Runs a fallible `perform(i)` for every `i` in `[0, n)`.
    pub fn try_for_each<E, F>(&self, n: usize, perform: F) -> Result<bool, ParallelError<E>>
    where
        E: std::error::Error + Send + 'static,
        F: Fn(usize) -> Result<(), E> + Sync,
    {
        self.for_each_with(
            n,
            |threads| vec![(); threads],
            |index, _worker, _ctx| perform(index),
            |_worker, _ctx| {},
        )
    }

    /// Evaluates `f(i)` for every `i` in `[0, n)` and returns the results
    /// in index order.
    ///
    /// # Examples
    /// ```
    /// use remesh_parallel::{Executor, ExecutorConfig};
    /// let executor = Executor::new(ExecutorConfig::with_threads(3).with_min_parallel(0));
    /// let squares = executor.map(5, |i| i * i).unwrap();
    /// assert_eq!(squares, vec![0, 1, 4, 9, 16]);
    /// ```
    pub fn map<T, F>(&self, n: usize, f: F) -> Result<Vec<T>, ParallelError>
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        let mut out = Vec::with_capacity(n);
        self.for_each_with(
            n,
            |threads| (0..threads).map(|_| Vec::new()).collect(),
            |index, _worker, part: &mut Vec<T>| {
                part.push(f(index));
                Ok::<(), Infallible>(())
            },
            // Slices are contiguous and finished in order, so this is index order.
            |_worker, part| out.extend(part),
        )?;
        Ok(out)
    }

    /// Three-phase parallel loop with per-worker contexts.
    ///
    /// `prepare(thread_count)` must return exactly `thread_count`
    /// contexts; worker `t` owns context `t` exclusively while it runs.
    /// `finish` consumes every context in worker-id order, including the
    /// contexts of workers that received no indices.
    pub fn for_each_with<C, E, P, F, A>(
        &self,
        n: usize,
        prepare: P,
        perform: F,
        mut finish: A,
    ) -> Result<bool, ParallelError<E>>
    where
        C: Send,
        E: std::error::Error + Send + 'static,
        P: FnOnce(usize) -> Vec<C>,
        F: Fn(usize, usize, &mut C) -> Result<(), E> + Sync,
        A: FnMut(usize, C),
    {
        if n == 0 {
            return Ok(false);
        }

        if !self.is_parallel(n) {
            let mut contexts = prepare(1);
            if contexts.len() != 1 {
                return Err(ParallelError::ContextCount {
                    expected: 1,
                    got: contexts.len(),
                });
            }
            let mut ctx = contexts.remove(0);
            run_range(0..n, 0, &perform, &mut ctx)?;
            finish(0, ctx);
            return Ok(false);
        }

        let threads = self.config.threads();
        let contexts = prepare(threads);
        if contexts.len() != threads {
            return Err(ParallelError::ContextCount {
                expected: threads,
                got: contexts.len(),
            });
        }

        let ranges = self.partition(n);
        debug!(
            "Parallel loop of {} iterations on {} workers ({} threads)",
            n,
            ranges.len(),
            threads
        );

        let mut contexts = contexts.into_iter();
        let assigned: Vec<C> = contexts.by_ref().take(ranges.len()).collect();
        let idle: Vec<C> = contexts.collect();

        let perform = &perform;
        let outcomes: Vec<Result<C, ParallelError<E>>> = thread::scope(|scope| {
            let handles: Vec<_> = ranges
                .into_iter()
                .zip(assigned)
                .enumerate()
                .map(|(worker, (range, mut ctx))| {
                    scope.spawn(move || {
                        run_range(range, worker, perform, &mut ctx)?;
                        Ok(ctx)
                    })
                })
                .collect();

            // Join every worker before looking at any outcome.
            handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| match handle.join() {
                    Ok(outcome) => outcome,
                    Err(payload) => Err(ParallelError::WorkerPanicked {
                        worker,
                        message: panic_message(payload.as_ref()),
                    }),
                })
                .collect()
        });

        let mut finished = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            finished.push(outcome?);
        }

        let working = finished.len();
        for (worker, ctx) in finished.into_iter().enumerate() {
            finish(worker, ctx);
        }
        for (offset, ctx) in idle.into_iter().enumerate() {
            finish(working + offset, ctx);
        }
        Ok(true)
    }
}

/// Runs one worker's slice, converting a panic into a worker error.
fn run_range<C, E, F>(
    range: Range<usize>,
    worker: usize,
    perform: &F,
    ctx: &mut C,
) -> Result<(), ParallelError<E>>
where
    E: std::error::Error + 'static,
    F: Fn(usize, usize, &mut C) -> Result<(), E>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        for index in range {
            if let Err(source) = perform(index, worker, ctx) {
                return Err(ParallelError::Task {
                    worker,
                    index,
                    source,
                });
            }
        }
        Ok(())
    }));
    match outcome {
        Ok(result) => result,
        Err(payload) => Err(ParallelError::WorkerPanicked {
            worker,
            message: panic_message(payload.as_ref()),
        }),
    }
}

//! # Remesh Parallel
//!
//! A small, functional parallel `for` loop. Work over `[0, n)` is either
//! run serially on the calling thread or split into contiguous slices,
//! one per scoped worker thread. Threads are spawned per call and joined
//! before the call returns; there is no pool.
//!
//! ## Three-Phase Form
//!
//! ```text
//! prepare(thread_count) -> Vec<C>       once, before spawning
//! perform(index, worker, &mut C)        per index, on the owning worker
//! finish(worker, C)                     per context, in worker-id order
//! ```
//!
//! ## Example
//!
//! ```rust
//! use remesh_parallel::{Executor, ExecutorConfig};
//!
//! let executor = Executor::new(ExecutorConfig::with_threads(4).with_min_parallel(0));
//! let mut total = 0u64;
//! executor
//!     .for_each_with(
//!         1000,
//!         |threads| vec![0u64; threads],
//!         |i, _worker, sum| {
//!             *sum += i as u64;
//!             Ok::<(), std::convert::Infallible>(())
//!         },
//!         |_worker, sum| total += sum,
//!     )
//!     .unwrap();
//! assert_eq!(total, 499_500);
//! ```

pub mod config;
pub mod error;
pub mod executor;

pub use config::ExecutorConfig;
pub use error::ParallelError;
pub use executor::Executor;

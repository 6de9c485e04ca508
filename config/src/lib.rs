//! # Config Crate
//!
//! Centralized configuration constants for the voxremesh pipeline.
//! All magic numbers and tunable defaults are defined here so the
//! executor, the winding-number oracle, the volume grid and the
//! orchestrator agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_TARGET_LENGTH_PERCENT, INSIDE_WINDING_THRESHOLD};
//!
//! // Voxel size is a percentage of the bounding box diagonal
//! let diagonal = 10.0;
//! let voxel_size = DEFAULT_TARGET_LENGTH_PERCENT * diagonal / 100.0;
//! assert!((voxel_size - 0.12).abs() < 1e-12);
//!
//! // Inside/outside classification of a winding number
//! let winding: f64 = 0.97;
//! assert!(winding.abs() >= INSIDE_WINDING_THRESHOLD);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **CLI Compatible**: Defaults match the command-line remesher
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

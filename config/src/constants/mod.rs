//! # Configuration Constants
//!
//! Centralized constants for the voxremesh pipeline. Executor sizing,
//! winding-number evaluation, narrow-band widths and remeshing defaults
//! are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Executor**: Worker-thread resolution and serial thresholds
//! - **Winding Number**: Expansion order and far-field acceptance
//! - **Volume**: Narrow-band padding and sparse grid layout
//! - **Remeshing**: Defaults exposed by the orchestrator and the CLI

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance, in voxels, below which a sample is treated as lying on the
/// surface. Such samples are classified outside so coplanar voxel rows
/// do not flicker between signs.
///
/// # Example
///
/// ```rust
/// use config::constants::SURFACE_SNAP_VOXELS;
/// assert!(SURFACE_SNAP_VOXELS < 1e-3);
/// ```
pub const SURFACE_SNAP_VOXELS: f64 = 1e-6;

// =============================================================================
// EXECUTOR CONSTANTS
// =============================================================================

/// Environment variable overriding the executor's worker-thread count.
///
/// Only positive integers are honoured; anything else is ignored.
pub const THREAD_COUNT_ENV: &str = "VOXREMESH_NUM_THREADS";

/// Worker-thread count used when the platform cannot report its
/// available parallelism.
///
/// # Example
///
/// ```rust
/// use config::constants::FALLBACK_THREAD_COUNT;
/// assert_eq!(FALLBACK_THREAD_COUNT, 8);
/// ```
pub const FALLBACK_THREAD_COUNT: usize = 8;

/// Loops shorter than this run serially on the calling thread.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_MIN_PARALLEL;
///
/// let loop_size = 10;
/// assert!(loop_size < DEFAULT_MIN_PARALLEL);
/// ```
pub const DEFAULT_MIN_PARALLEL: usize = 1000;

// =============================================================================
// WINDING NUMBER CONSTANTS
// =============================================================================

/// Default multipole expansion order for the winding-number tree.
pub const DEFAULT_WINDING_ORDER: u32 = 2;

/// Highest supported expansion order.
pub const MAX_WINDING_ORDER: u32 = 2;

/// Default accuracy scale passed to winding-number queries.
///
/// Larger values accept the far-field approximation closer to a cluster.
pub const DEFAULT_ACCURACY_SCALE: f64 = 2.0;

/// Far-field acceptance ratio.
///
/// A cluster of radius `r` is approximated when the query point lies
/// farther than `FAR_FIELD_RATIO * r / accuracy_scale` from its center,
/// so the default scale of 2.0 accepts clusters at two radii.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_ACCURACY_SCALE, FAR_FIELD_RATIO};
/// assert_eq!(FAR_FIELD_RATIO / DEFAULT_ACCURACY_SCALE, 2.0);
/// ```
pub const FAR_FIELD_RATIO: f64 = 4.0;

/// Maximum number of triangles stored in a winding-number tree leaf.
pub const WINDING_LEAF_SIZE: usize = 8;

/// Magnitude at which a winding number classifies a point as inside.
pub const INSIDE_WINDING_THRESHOLD: f64 = 0.5;

// =============================================================================
// VOLUME CONSTANTS
// =============================================================================

/// Extra half-width, in voxels, added to `|isovalue / voxel_size|` for
/// level-set construction.
pub const LEVEL_SET_BAND_PADDING: f64 = 1.0;

/// Extra half-width, in voxels, added on each side of the crossing for
/// winding-number guided volumes.
pub const VOLUME_BAND_PADDING: f64 = 0.5;

/// Width, in voxels, of the inactive signed halo kept around the active
/// band so extraction can see sign changes at the band boundary.
pub const BAND_HALO_VOXELS: f64 = 1.0;

/// Log2 of the leaf block edge length of the sparse grid.
pub const LEAF_LOG2: u32 = 3;

/// Edge length, in voxels, of a sparse grid leaf block.
///
/// # Example
///
/// ```rust
/// use config::constants::{LEAF_DIM, LEAF_LOG2};
/// assert_eq!(LEAF_DIM, 1 << LEAF_LOG2);
/// ```
pub const LEAF_DIM: i32 = 1 << LEAF_LOG2;

/// Number of voxels in a sparse grid leaf block.
pub const LEAF_VOXELS: usize = (LEAF_DIM * LEAF_DIM * LEAF_DIM) as usize;

// =============================================================================
// REMESHING CONSTANTS
// =============================================================================

/// Default target edge length as a percentage of the bounding box diagonal.
pub const DEFAULT_TARGET_LENGTH_PERCENT: f64 = 1.2;

/// Default extraction isovalue.
pub const DEFAULT_ISOVALUE: f64 = 0.0;

/// Default extraction adaptivity (uniform triangulation).
pub const DEFAULT_ADAPTIVITY: f64 = 0.0;

/// Default number of Monte-Carlo samples for the winding-number self-test.
pub const DEFAULT_MONTE_CARLO_SAMPLES: usize = 10_000;

/// Offset of Monte-Carlo samples along +X, as a fraction of the bounding
/// box diagonal.
pub const MONTE_CARLO_OFFSET_FRACTION: f64 = 0.01;

/// Default output path of the command-line remesher.
pub const DEFAULT_OUTPUT_PATH: &str = "remesh.obj";

// =============================================================================
// VALIDATED CONFIGURATION
// =============================================================================

/// Immutable snapshot of the remeshing defaults that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.target_length_percent > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Target edge length as a percentage of the bounding box diagonal.
    pub target_length_percent: f64,
    /// Multipole order of the winding-number tree.
    pub winding_order: u32,
    /// Accuracy scale of winding-number queries.
    pub accuracy_scale: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(0.5, 1, 2.0).expect("valid config");
    /// assert_eq!(cfg.winding_order, 1);
    /// ```
    pub fn new(
        target_length_percent: f64,
        winding_order: u32,
        accuracy_scale: f64,
    ) -> Result<Self, ConfigError> {
        if !(target_length_percent > 0.0) || !target_length_percent.is_finite() {
            return Err(ConfigError::InvalidTargetLength(target_length_percent));
        }
        if winding_order > MAX_WINDING_ORDER {
            return Err(ConfigError::InvalidWindingOrder(winding_order));
        }
        if !accuracy_scale.is_finite() {
            return Err(ConfigError::InvalidAccuracyScale(accuracy_scale));
        }
        Ok(Self {
            target_length_percent,
            winding_order,
            accuracy_scale,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            target_length_percent: DEFAULT_TARGET_LENGTH_PERCENT,
            winding_order: DEFAULT_WINDING_ORDER,
            accuracy_scale: DEFAULT_ACCURACY_SCALE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the target length percentage is not a positive number.
    InvalidTargetLength(f64),
    /// Raised when the winding-number order exceeds [`MAX_WINDING_ORDER`].
    InvalidWindingOrder(u32),
    /// Raised when the accuracy scale is NaN or infinite.
    InvalidAccuracyScale(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTargetLength(value) => {
                write!(f, "target length percent must be positive: {value}")
            }
            ConfigError::InvalidWindingOrder(value) => {
                write!(f, "winding order must be <= {MAX_WINDING_ORDER}: {value}")
            }
            ConfigError::InvalidAccuracyScale(value) => {
                write!(f, "accuracy scale must be finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

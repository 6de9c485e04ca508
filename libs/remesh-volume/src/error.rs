//! # Volume Errors

use remesh_parallel::ParallelError;
use thiserror::Error;

/// Errors raised by grid construction and extraction.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// No points or no polygons to rasterize
    #[error("Volume input is empty ({points} points, {polygons} polygons)")]
    EmptyInput { points: usize, polygons: usize },

    /// Voxel size is zero, negative or not finite
    #[error("Voxel size must be positive and finite: {0}")]
    InvalidVoxelSize(f64),

    /// Band half-width is zero, negative or not finite
    #[error("Band width '{name}' must be positive and finite: {value}")]
    InvalidBandWidth { name: &'static str, value: f64 },

    /// A polygon references a point that does not exist
    #[error("Polygon {polygon} references point {index} but there are {point_count} points")]
    IndexOutOfBounds {
        polygon: usize,
        index: u32,
        point_count: usize,
    },

    /// A worker failed
    #[error("Parallel grid pass failed: {0}")]
    Parallel(#[from] ParallelError),
}

impl VolumeError {
    /// Validates a band half-width, in voxels.
    pub(crate) fn check_band(name: &'static str, value: f64) -> Result<(), Self> {
        if value > 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(Self::InvalidBandWidth { name, value })
        }
    }
}

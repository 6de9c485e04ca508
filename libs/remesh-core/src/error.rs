//! # Remesh Errors
//!
//! One error type for the whole pipeline. Lower-level errors are sorted
//! into three kinds:
//!
//! - **Precondition**: empty mesh, non-positive voxel size, missing grid
//! - **Input**: malformed mesh or parameters
//! - **Worker**: a parallel task failed or panicked

use config::constants::ConfigError;
use remesh_mesh::MeshError;
use remesh_parallel::ParallelError;
use remesh_volume::VolumeError;
use remesh_winding::WindingError;
use thiserror::Error;

/// Errors raised by the remeshing pipeline.
#[derive(Debug, Error)]
pub enum RemeshError {
    /// An operation was called in a state or with arguments it cannot
    /// accept
    #[error("Precondition violated: {message}")]
    Precondition { message: String },

    /// The input mesh or parameters are malformed
    #[error("Invalid input: {message}")]
    Input { message: String },

    /// A parallel worker failed
    #[error("Worker failed: {0}")]
    Worker(#[from] ParallelError),

    /// Winding-number oracle error
    #[error("Winding number error: {0}")]
    Winding(WindingError),

    /// Grid construction or extraction error
    #[error("Volume error: {0}")]
    Volume(VolumeError),

    /// Mesh error
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

impl RemeshError {
    /// Creates a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Creates an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Returns true for precondition violations.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }
}

impl From<WindingError> for RemeshError {
    fn from(err: WindingError) -> Self {
        match err {
            WindingError::EmptyMesh { .. } | WindingError::InvalidOrder(_) => {
                Self::precondition(err.to_string())
            }
            WindingError::Parallel(inner) => Self::Worker(inner),
            other => Self::Winding(other),
        }
    }
}

impl From<VolumeError> for RemeshError {
    fn from(err: VolumeError) -> Self {
        match err {
            VolumeError::EmptyInput { .. }
            | VolumeError::InvalidVoxelSize(_)
            | VolumeError::InvalidBandWidth { .. } => Self::precondition(err.to_string()),
            VolumeError::Parallel(inner) => Self::Worker(inner),
            other => Self::Volume(other),
        }
    }
}

impl From<ConfigError> for RemeshError {
    fn from(err: ConfigError) -> Self {
        Self::input(err.to_string())
    }
}

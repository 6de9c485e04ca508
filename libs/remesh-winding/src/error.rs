//! # Winding Number Errors

use config::constants::MAX_WINDING_ORDER;
use remesh_parallel::ParallelError;
use thiserror::Error;

/// Errors raised while building or batch-querying the oracle.
#[derive(Debug, Error)]
pub enum WindingError {
    /// The mesh has no vertices or no triangles
    #[error("Winding number needs a non-empty mesh (got {vertices} vertices, {faces} faces)")]
    EmptyMesh { vertices: usize, faces: usize },

    /// Expansion order outside the supported range
    #[error("Unsupported expansion order {0} (max {MAX_WINDING_ORDER})")]
    InvalidOrder(u32),

    /// A triangle references a vertex that does not exist
    #[error("Face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A worker failed during a batch query
    #[error("Parallel query failed: {0}")]
    Parallel(#[from] ParallelError),
}

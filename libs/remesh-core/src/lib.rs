//! # Remesh Core
//!
//! Rebuilds an arbitrary triangle mesh as a clean, closed surface by
//! sampling it into a narrow-band volume and extracting an isosurface.
//!
//! ## Architecture
//!
//! ```text
//! TriMesh ──> voxel size (bbox diagonal × percent)
//!         ──> VolumetricBuilder ── LevelSet:      pseudonormal-signed distance
//!                               └─ WindingNumber: distance signed by the oracle
//!         ──> volume_to_mesh (dual contouring, outward faces)
//!         ──> unreferenced-vertex cleanup ──> RemeshOutput
//! ```
//!
//! The winding-number mode tolerates open, self-intersecting and
//! non-manifold input; the level-set mode expects a closed, consistently
//! oriented surface.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use remesh_core::{RemeshParams, Remesher};
//! use remesh_mesh::TriMesh;
//! use remesh_parallel::{Executor, ExecutorConfig};
//!
//! let cube = TriMesh::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5));
//! let params = RemeshParams::default().with_target_length_percent(5.0);
//! let remesher = Remesher::new(params, Executor::new(ExecutorConfig::from_env(None)));
//!
//! let output = remesher.run(&cube).unwrap();
//! assert!(output.mesh.face_count() > 12);
//! ```

pub mod builder;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod sampler;

pub use builder::{MeshAdapter, OracleParams, VolumetricBuilder};
pub use error::RemeshError;
pub use extractor::volume_to_mesh;
pub use pipeline::{RemeshOutput, RemeshParams, RemeshReport, Remesher, VolumeMode};
pub use sampler::sample_inside_outside;

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, RemeshError>;

//! # Remesh Volume
//!
//! Narrow-band volumetric grids for mesh-to-volume-to-mesh round trips.
//!
//! ## Architecture
//!
//! ```text
//! triangle soup ──mesh_to_level_set──┐
//!                                    ├──> FloatGrid ──volume_to_mesh──> PolygonSoup
//! MeshDataAdapter ─mesh_to_volume────┘
//!       + InteriorTest
//! ```
//!
//! Grid values are signed distances in world units, negative inside.
//! Only voxels within the requested band are *active*; a one-voxel halo
//! of inactive but *defined* voxels keeps the sign visible to the
//! extractor at the band boundary.
//!
//! All per-polygon and per-voxel work runs through a
//! [`remesh_parallel::Executor`]; per-worker partial results are merged
//! in worker order so the output does not depend on the thread count.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use remesh_parallel::{Executor, ExecutorConfig};
//! use remesh_volume::{mesh_to_level_set, volume_to_mesh, Transform};
//!
//! let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
//! let triangles = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
//! let executor = Executor::new(ExecutorConfig::serial());
//! let transform = Transform::new(0.1).unwrap();
//!
//! let grid = mesh_to_level_set(&transform, &points, &triangles, 1.0, &executor).unwrap();
//! let soup = volume_to_mesh(&grid, 0.0, 0.0, &executor).unwrap();
//! assert!(!soup.triangles.is_empty());
//! ```

pub mod adapter;
pub mod coord;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod grid;
pub mod level_set;
mod rasterize;
pub mod transform;
pub mod volume;

#[cfg(test)]
mod test_support;

pub use adapter::{InteriorTest, MeshDataAdapter, TriangleSoup};
pub use coord::Coord;
pub use error::VolumeError;
pub use extract::{volume_to_mesh, PolygonSoup};
pub use grid::FloatGrid;
pub use level_set::mesh_to_level_set;
pub use transform::Transform;
pub use volume::mesh_to_volume;

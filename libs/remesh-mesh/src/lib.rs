//! # Remesh Mesh
//!
//! Indexed triangle meshes for the voxremesh pipeline.
//!
//! ## Architecture
//!
//! ```text
//! OBJ file → io::load_obj → TriMesh (MeshLike) → oracle / builder
//! extractor (MeshSink) → TriMesh → remove_unreferenced_vertices → io::save_obj
//! ```
//!
//! Generic stages are written against [`MeshLike`] and [`MeshSink`] so any
//! indexed triangle container can be plugged in; [`TriMesh`] is the one
//! the pipeline uses.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use remesh_mesh::{MeshLike, TriMesh};
//!
//! let mut mesh = TriMesh::new();
//! mesh.add_vertex(DVec3::ZERO);
//! mesh.add_vertex(DVec3::X);
//! mesh.add_vertex(DVec3::Y);
//! mesh.add_face([0, 1, 2]);
//! assert_eq!(mesh.face_count(), 1);
//! ```

pub mod cloud;
pub mod error;
pub mod io;
pub mod mesh;
pub mod topology;

pub use cloud::PointCloud;
pub use error::MeshError;
pub use mesh::{MeshLike, MeshSink, TriMesh};
pub use topology::{edge_manifold_report, EdgeReport};

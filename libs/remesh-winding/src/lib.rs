//! # Remesh Winding
//!
//! Generalized winding numbers for arbitrary triangle soups.
//!
//! The winding number of a point is the signed solid angle the surface
//! subtends at that point, divided by 4π. It is ≈1 inside a closed,
//! outward-oriented surface and ≈0 outside, and it degrades gracefully
//! for open, self-intersecting or non-manifold input.
//!
//! ## Algorithm
//!
//! ```text
//! init:  triangles → BVH (median split) → per-node moments (N, P, Q)
//! query: descend from the root
//!        far enough from a node  → multipole expansion of its moments
//!        otherwise               → children, or exact solid angles at leaves
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use remesh_mesh::TriMesh;
//! use remesh_winding::{ExpansionOrder, WindingNumber};
//!
//! let cube = TriMesh::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5));
//! let oracle = WindingNumber::init(&cube, ExpansionOrder::Second).unwrap();
//! assert!(oracle.is_inside(DVec3::ZERO, 2.0));
//! assert!(!oracle.is_inside(DVec3::splat(10.0), 2.0));
//! ```

pub mod error;
pub mod moments;
pub mod order;
pub mod solid_angle;
pub mod tree;

pub use error::WindingError;
pub use order::ExpansionOrder;
pub use solid_angle::triangle_solid_angle;
pub use tree::WindingNumber;

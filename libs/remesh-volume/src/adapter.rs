//! # Input Adapters
//!
//! The narrow interfaces grid construction is driven through.
//!
//! - [`MeshDataAdapter`]: polygon data already mapped into index space
//! - [`InteriorTest`]: inside/outside classification of world positions

use glam::DVec3;
use remesh_parallel::Executor;

use crate::error::VolumeError;

/// Polygon data presented in grid index space.
///
/// Polygons are triangles or quads; quads are split along `(0, 2)`.
pub trait MeshDataAdapter: Sync {
    /// Number of polygons.
    fn polygon_count(&self) -> usize;

    /// Number of distinct points.
    fn point_count(&self) -> usize;

    /// Corner count of `polygon`, 3 or 4.
    fn vertex_count(&self, polygon: usize) -> usize;

    /// Index-space position of corner `vertex` of `polygon`.
    fn index_space_point(&self, polygon: usize, vertex: usize) -> DVec3;
}

/// Inside/outside classification used to sign a volume.
///
/// Implemented for any `Fn(DVec3) -> bool + Sync`.
pub trait InteriorTest: Sync {
    /// Returns true if the world-space `point` is inside.
    fn is_inside(&self, point: DVec3) -> bool;

    /// Classifies every point through the executor, preserving order.
    fn classify_all(&self, points: &[DVec3], executor: &Executor) -> Result<Vec<bool>, VolumeError> {
        Ok(executor.map(points.len(), |i| self.is_inside(points[i]))?)
    }
}

impl<F> InteriorTest for F
where
    F: Fn(DVec3) -> bool + Sync,
{
    fn is_inside(&self, point: DVec3) -> bool {
        self(point)
    }
}

/// Triangle soup whose points are already in index space.
#[derive(Debug, Clone, Copy)]
pub struct TriangleSoup<'a> {
    points: &'a [DVec3],
    triangles: &'a [[u32; 3]],
}

impl<'a> TriangleSoup<'a> {
    /// Wraps index-space points and triangles, checking every index.
    pub fn new(points: &'a [DVec3], triangles: &'a [[u32; 3]]) -> Result<Self, VolumeError> {
        for (polygon, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= points.len()) {
                return Err(VolumeError::IndexOutOfBounds {
                    polygon,
                    index,
                    point_count: points.len(),
                });
            }
        }
        Ok(Self { points, triangles })
    }

    /// Index-space points.
    pub fn points(&self) -> &'a [DVec3] {
        self.points
    }

    /// Triangles.
    pub fn triangles(&self) -> &'a [[u32; 3]] {
        self.triangles
    }
}

impl MeshDataAdapter for TriangleSoup<'_> {
    fn polygon_count(&self) -> usize {
        self.triangles.len()
    }

    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn vertex_count(&self, _polygon: usize) -> usize {
        3
    }

    fn index_space_point(&self, polygon: usize, vertex: usize) -> DVec3 {
        self.points[self.triangles[polygon][vertex] as usize]
    }
}

//! # Index-to-World Transform
//!
//! Uniform linear scale: `world = index * voxel_size`.

use glam::DVec3;

use crate::coord::Coord;
use crate::error::VolumeError;

/// Linear transform between index space and world space.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use remesh_volume::Transform;
/// let t = Transform::new(0.5).unwrap();
/// assert_eq!(t.world_to_index(DVec3::new(1.0, 2.0, 3.0)), DVec3::new(2.0, 4.0, 6.0));
/// assert!(Transform::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    voxel_size: f64,
}

impl Transform {
    /// Creates a transform, rejecting non-positive or non-finite sizes.
    pub fn new(voxel_size: f64) -> Result<Self, VolumeError> {
        if voxel_size > 0.0 && voxel_size.is_finite() {
            Ok(Self { voxel_size })
        } else {
            Err(VolumeError::InvalidVoxelSize(voxel_size))
        }
    }

    /// Edge length of a voxel in world units.
    #[inline]
    pub fn voxel_size(&self) -> f64 {
        self.voxel_size
    }

    /// Maps a world position into continuous index space.
    #[inline]
    pub fn world_to_index(&self, world: DVec3) -> DVec3 {
        world / self.voxel_size
    }

    /// Maps a continuous index-space position to world space.
    #[inline]
    pub fn index_to_world(&self, index: DVec3) -> DVec3 {
        index * self.voxel_size
    }

    /// World position of a voxel.
    #[inline]
    pub fn coord_to_world(&self, coord: Coord) -> DVec3 {
        self.index_to_world(coord.as_dvec3())
    }
}

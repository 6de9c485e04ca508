//! # Narrow-Band Level Set
//!
//! Signed distance to a triangle soup, sampled at voxel centers within a
//! band around the surface. The sign comes from the angle-weighted
//! pseudonormal of the closest feature, which is exact for closed,
//! consistently oriented surfaces.

use config::constants::{BAND_HALO_VOXELS, SURFACE_SNAP_VOXELS};
use glam::DVec3;
use log::debug;
use remesh_parallel::Executor;

use crate::adapter::TriangleSoup;
use crate::error::VolumeError;
use crate::geometry::Pseudonormals;
use crate::grid::FloatGrid;
use crate::rasterize::closest_band;
use crate::transform::Transform;

/// Builds a narrow-band signed distance grid from world-space triangles.
///
/// `half_width` is in voxels. Voxels within it are active; voxels up to
/// one further voxel away are stored inactive so the sign of the band
/// boundary stays visible. Points closer to the surface than a tiny
/// fraction of a voxel count as outside.
///
/// # Errors
///
/// [`VolumeError::EmptyInput`] without points or triangles,
/// [`VolumeError::InvalidBandWidth`] for a non-positive width and
/// [`VolumeError::IndexOutOfBounds`] for a bad triangle index.
pub fn mesh_to_level_set(
    transform: &Transform,
    points: &[DVec3],
    triangles: &[[u32; 3]],
    half_width: f64,
    executor: &Executor,
) -> Result<FloatGrid, VolumeError> {
    if points.is_empty() || triangles.is_empty() {
        return Err(VolumeError::EmptyInput {
            points: points.len(),
            polygons: triangles.len(),
        });
    }
    VolumeError::check_band("half_width", half_width)?;

    let index_points: Vec<DVec3> = points.iter().map(|&p| transform.world_to_index(p)).collect();
    let soup = TriangleSoup::new(&index_points, triangles)?;
    let outer = half_width + BAND_HALO_VOXELS;
    let band = closest_band(&soup, outer, executor)?;
    let normals = Pseudonormals::new(&index_points, triangles);

    let voxel_size = transform.voxel_size();
    let mut grid = FloatGrid::new(*transform, (outer * voxel_size) as f32);
    for (coord, closest) in &band {
        let polygon = closest.polygon as usize;
        let outside = closest.distance < SURFACE_SNAP_VOXELS
            || normals.is_outside(
                coord.as_dvec3(),
                closest.point,
                polygon,
                triangles[polygon],
                closest.feature,
            );
        let signed = if outside { closest.distance } else { -closest.distance };
        grid.set_value(
            *coord,
            (signed * voxel_size) as f32,
            closest.distance <= half_width,
        );
    }

    debug!(
        "Level set: {} triangles, half-width {:.3} voxels, {} active of {} defined voxels",
        triangles.len(),
        half_width,
        grid.active_voxel_count(),
        grid.defined_voxel_count()
    );
    Ok(grid)
}

//! # Winding-Signed Volume
//!
//! Narrow-band distance grid whose sign comes from an [`InteriorTest`]
//! rather than from the surface orientation. Distances are unsigned
//! distances to the nearest polygon, so open, self-intersecting or
//! inconsistently oriented input still yields a usable volume.
//!
//! ## Band
//!
//! Exterior and interior half-widths are independent. Voxels up to one
//! voxel beyond their side's half-width are stored inactive.

use config::constants::{BAND_HALO_VOXELS, SURFACE_SNAP_VOXELS};
use glam::DVec3;
use log::debug;
use remesh_parallel::Executor;

use crate::adapter::{InteriorTest, MeshDataAdapter};
use crate::coord::Coord;
use crate::error::VolumeError;
use crate::grid::FloatGrid;
use crate::rasterize::closest_band;
use crate::transform::Transform;

/// Builds a distance grid signed by `interior_test`.
///
/// Polygon corners come from `adapter` in index space; `interior_test`
/// receives world-space voxel centers. Widths are in voxels. Voxels that
/// lie on the surface are outside and never reach the interior test.
///
/// # Errors
///
/// [`VolumeError::EmptyInput`] for an empty adapter,
/// [`VolumeError::InvalidBandWidth`] for a non-positive width and
/// [`VolumeError::Parallel`] if classification fails on a worker.
pub fn mesh_to_volume<A, T>(
    adapter: &A,
    transform: &Transform,
    exterior_width: f64,
    interior_width: f64,
    interior_test: &T,
    executor: &Executor,
) -> Result<FloatGrid, VolumeError>
where
    A: MeshDataAdapter,
    T: InteriorTest + ?Sized,
{
    if adapter.point_count() == 0 || adapter.polygon_count() == 0 {
        return Err(VolumeError::EmptyInput {
            points: adapter.point_count(),
            polygons: adapter.polygon_count(),
        });
    }
    VolumeError::check_band("exterior_width", exterior_width)?;
    VolumeError::check_band("interior_width", interior_width)?;

    let outer = exterior_width + BAND_HALO_VOXELS;
    let inner = interior_width + BAND_HALO_VOXELS;
    let band = closest_band(adapter, outer.max(inner), executor)?;

    let mut candidates: Vec<(Coord, f64)> = band
        .into_iter()
        .map(|(coord, closest)| (coord, closest.distance))
        .collect();
    candidates.sort_unstable_by_key(|&(coord, _)| coord);

    let queries: Vec<DVec3> = candidates
        .iter()
        .filter(|&&(_, distance)| distance >= SURFACE_SNAP_VOXELS)
        .map(|&(coord, _)| transform.coord_to_world(coord))
        .collect();
    let inside = interior_test.classify_all(&queries, executor)?;
    debug!(
        "Interior test: {} of {} band voxels inside",
        inside.iter().filter(|&&b| b).count(),
        queries.len()
    );

    let voxel_size = transform.voxel_size();
    let mut grid = FloatGrid::new(*transform, (outer * voxel_size) as f32);
    let mut classified = inside.into_iter();
    for (coord, distance) in candidates {
        let is_inside = distance >= SURFACE_SNAP_VOXELS && classified.next().unwrap_or(false);
        let (limit, width, signed) = if is_inside {
            (inner, interior_width, -distance)
        } else {
            (outer, exterior_width, distance)
        };
        if distance > limit {
            continue;
        }
        grid.set_value(coord, (signed * voxel_size) as f32, distance <= width);
    }

    debug!(
        "Volume: {} polygons, band {:.3}/{:.3} voxels, {} active of {} defined voxels",
        adapter.polygon_count(),
        exterior_width,
        interior_width,
        grid.active_voxel_count(),
        grid.defined_voxel_count()
    );
    Ok(grid)
}

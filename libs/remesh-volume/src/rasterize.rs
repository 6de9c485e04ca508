//! Brute-force narrow-band rasterization.
//!
//! Every polygon is visited once; all voxels inside its bounding box
//! grown by the band width are tested against it. The nearest polygon
//! per voxel wins, ties going to the lower polygon id so the result is
//! independent of how polygons were split among workers.

use std::collections::HashMap;
use std::convert::Infallible;

use glam::DVec3;
use remesh_parallel::Executor;

use crate::adapter::MeshDataAdapter;
use crate::coord::Coord;
use crate::error::VolumeError;
use crate::geometry::{closest_point_on_triangle, Feature};

/// Nearest surface sample of one voxel, in index space.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Closest {
    pub distance: f64,
    pub polygon: u32,
    /// Quad half the point lies on (0 for triangles).
    pub part: u8,
    pub point: DVec3,
    pub feature: Feature,
}

impl Closest {
    fn beats(&self, other: &Closest) -> bool {
        (self.distance, self.polygon, self.part) < (other.distance, other.polygon, other.part)
    }
}

pub(crate) type Band = HashMap<Coord, Closest>;

/// Nearest polygon for every voxel within `width` voxels of the surface.
pub(crate) fn closest_band<A: MeshDataAdapter>(
    adapter: &A,
    width: f64,
    executor: &Executor,
) -> Result<Band, VolumeError> {
    let mut band = Band::new();
    executor.for_each_with(
        adapter.polygon_count(),
        |threads| (0..threads).map(|_| Band::new()).collect(),
        |polygon, _worker, local: &mut Band| {
            rasterize_polygon(adapter, polygon, width, local);
            Ok::<(), Infallible>(())
        },
        |_worker, local| {
            for (coord, candidate) in local {
                keep_nearest(&mut band, coord, candidate);
            }
        },
    )?;
    Ok(band)
}

fn keep_nearest(band: &mut Band, coord: Coord, candidate: Closest) {
    band.entry(coord)
        .and_modify(|current| {
            if candidate.beats(current) {
                *current = candidate;
            }
        })
        .or_insert(candidate);
}

fn rasterize_polygon<A: MeshDataAdapter>(adapter: &A, polygon: usize, width: f64, band: &mut Band) {
    let corners: Vec<DVec3> = (0..adapter.vertex_count(polygon))
        .map(|v| adapter.index_space_point(polygon, v))
        .collect();
    let parts: &[[usize; 3]] = if corners.len() == 4 {
        &[[0, 1, 2], [0, 2, 3]]
    } else {
        &[[0, 1, 2]]
    };

    for (part, &[i, j, k]) in parts.iter().enumerate() {
        let (a, b, c) = (corners[i], corners[j], corners[k]);
        let lo = Coord::ceil(a.min(b).min(c) - DVec3::splat(width));
        let hi = Coord::floor(a.max(b).max(c) + DVec3::splat(width));
        let normal = (b - a).cross(c - a).normalize_or_zero();

        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    let coord = Coord::new(x, y, z);
                    let p = coord.as_dvec3();
                    if (p - a).dot(normal).abs() > width {
                        continue;
                    }
                    let (point, feature) = closest_point_on_triangle(p, a, b, c);
                    let distance = p.distance(point);
                    if distance > width {
                        continue;
                    }
                    keep_nearest(
                        band,
                        coord,
                        Closest {
                            distance,
                            polygon: polygon as u32,
                            part: part as u8,
                            point,
                            feature,
                        },
                    );
                }
            }
        }
    }
}

//! # Surface Extraction
//!
//! Dual contouring of a [`FloatGrid`] at an isovalue, one vertex per cell.
//!
//! ## Algorithm
//!
//! 1. Every grid edge between two defined voxels whose values straddle
//!    the isovalue is a crossing edge
//! 2. Each of the four cells around a crossing edge gets one vertex: the
//!    mean of the interpolated crossings on that cell's edges
//! 3. Each crossing edge emits a quad joining its four cell vertices
//!
//! Cell `c` spans voxel centers `c` to `c + (1, 1, 1)`. Quads wind so
//! their normals point toward lower values. With zero adaptivity every
//! quad is split on its shorter diagonal; otherwise quads whose halves
//! bend by no more than the adaptivity are kept whole.

use std::collections::{BTreeSet, HashMap};

use glam::DVec3;
use log::debug;
use remesh_parallel::Executor;

use crate::coord::Coord;
use crate::error::VolumeError;
use crate::grid::FloatGrid;

/// Mixed triangle/quad output of [`volume_to_mesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSoup {
    /// World-space vertex positions.
    pub points: Vec<DVec3>,
    pub triangles: Vec<[u32; 3]>,
    pub quads: Vec<[u32; 4]>,
}

impl PolygonSoup {
    /// Returns true if there are no polygons.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.quads.is_empty()
    }

    /// Number of triangles once quads are split.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() + 2 * self.quads.len()
    }
}

/// Crossing edge from voxel `start` along `axis`.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    start: Coord,
    axis: usize,
    start_below: bool,
}

/// Extracts the isosurface of `grid` at `isovalue` (world units).
///
/// `adaptivity` is clamped to `[0, 1]`.
///
/// # Errors
///
/// [`VolumeError::Parallel`] if a worker fails.
pub fn volume_to_mesh(
    grid: &FloatGrid,
    isovalue: f64,
    adaptivity: f64,
    executor: &Executor,
) -> Result<PolygonSoup, VolumeError> {
    let adaptivity = if adaptivity.is_finite() {
        adaptivity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let voxels = grid.voxels();
    let below = |value: f32| f64::from(value) < isovalue;

    let per_voxel = executor.map(voxels.len(), |i| {
        let (start, value, _) = voxels[i];
        let mut found = Vec::new();
        for axis in 0..3 {
            if let Some(other) = grid.probe(start + Coord::unit(axis)) {
                if below(value) != below(other) {
                    found.push(Crossing {
                        start,
                        axis,
                        start_below: below(value),
                    });
                }
            }
        }
        found
    })?;
    let crossings: Vec<Crossing> = per_voxel.into_iter().flatten().collect();
    if crossings.is_empty() {
        debug!("Extraction: no crossings at isovalue {}", isovalue);
        return Ok(PolygonSoup::default());
    }

    let cells: Vec<Coord> = crossings
        .iter()
        .flat_map(|c| adjacent_cells(c.start, c.axis))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let cell_index: HashMap<Coord, u32> = cells
        .iter()
        .enumerate()
        .map(|(i, &cell)| (cell, i as u32))
        .collect();

    let transform = grid.transform();
    let points = executor.map(cells.len(), |i| {
        transform.index_to_world(cell_point(grid, cells[i], isovalue))
    })?;

    let mut soup = PolygonSoup {
        points,
        triangles: Vec::new(),
        quads: Vec::with_capacity(if adaptivity > 0.0 { crossings.len() } else { 0 }),
    };
    soup.triangles.reserve(2 * crossings.len());

    for crossing in &crossings {
        let [q0, q1, q2, q3] = adjacent_cells(crossing.start, crossing.axis).map(|c| cell_index[&c]);
        let quad = if crossing.start_below {
            [q0, q3, q2, q1]
        } else {
            [q0, q1, q2, q3]
        };
        emit_quad(&mut soup, quad, adaptivity);
    }

    debug!(
        "Extraction: {} crossings, {} vertices, {} triangles, {} quads",
        crossings.len(),
        soup.points.len(),
        soup.triangles.len(),
        soup.quads.len()
    );
    Ok(soup)
}

/// The four cells sharing the edge from `start` along `axis`, in
/// counter-clockwise order about the axis.
fn adjacent_cells(start: Coord, axis: usize) -> [Coord; 4] {
    let b = Coord::unit((axis + 1) % 3);
    let c = Coord::unit((axis + 2) % 3);
    [start - b - c, start - c, start, start - b]
}

/// Mean of the crossings on the twelve edges of `cell`, in index space.
fn cell_point(grid: &FloatGrid, cell: Coord, isovalue: f64) -> DVec3 {
    let mut sum = DVec3::ZERO;
    let mut count = 0u32;
    for axis in 0..3 {
        let b = Coord::unit((axis + 1) % 3);
        let c = Coord::unit((axis + 2) % 3);
        for offset in [Coord::default(), b, c, b + c] {
            let p = cell + offset;
            let q = p + Coord::unit(axis);
            let (Some(vp), Some(vq)) = (grid.probe(p), grid.probe(q)) else {
                continue;
            };
            let (vp, vq) = (f64::from(vp), f64::from(vq));
            if (vp < isovalue) == (vq < isovalue) {
                continue;
            }
            let t = ((isovalue - vp) / (vq - vp)).clamp(0.0, 1.0);
            sum += p.as_dvec3() + (q - p).as_dvec3() * t;
            count += 1;
        }
    }
    if count == 0 {
        cell.as_dvec3() + DVec3::splat(0.5)
    } else {
        sum / f64::from(count)
    }
}

fn emit_quad(soup: &mut PolygonSoup, quad: [u32; 4], adaptivity: f64) {
    let [p0, p1, p2, p3] = quad.map(|i| soup.points[i as usize]);
    if adaptivity > 0.0 {
        let n1 = (p1 - p0).cross(p2 - p0).normalize_or_zero();
        let n2 = (p2 - p0).cross(p3 - p0).normalize_or_zero();
        if 1.0 - n1.dot(n2) <= adaptivity {
            soup.quads.push(quad);
            return;
        }
    }

    let [a, b, c, d] = quad;
    if p0.distance_squared(p2) <= p1.distance_squared(p3) {
        soup.triangles.push([a, b, c]);
        soup.triangles.push([a, c, d]);
    } else {
        soup.triangles.push([a, b, d]);
        soup.triangles.push([b, c, d]);
    }
}

//! # Inside/Outside Sampling
//!
//! Monte-Carlo check of the winding-number oracle: points are drawn
//! uniformly over the surface, pushed off it along +X and classified.
//! Rendered as a coloured point cloud this shows where the oracle
//! considers the surface closed.

use config::constants::{DEFAULT_ACCURACY_SCALE, INSIDE_WINDING_THRESHOLD};
use glam::DVec3;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use remesh_mesh::{PointCloud, TriMesh};
use remesh_parallel::Executor;
use remesh_winding::WindingNumber;

use crate::error::RemeshError;

/// Draws `samples` area-weighted surface points, offsets each by
/// `offset` along +X and classifies it with `oracle`.
///
/// The same `seed` always yields the same points.
///
/// # Errors
///
/// [`RemeshError::Precondition`] if the mesh has no area to sample from.
pub fn sample_inside_outside(
    mesh: &TriMesh,
    oracle: &WindingNumber,
    samples: usize,
    offset: f64,
    seed: u64,
    executor: &Executor,
) -> Result<PointCloud, RemeshError> {
    let mut cumulative = Vec::with_capacity(mesh.face_count());
    let mut total = 0.0;
    for face in 0..mesh.face_count() {
        total += mesh.triangle_area(face);
        cumulative.push(total);
    }
    if !(total > 0.0) {
        return Err(RemeshError::precondition(format!(
            "cannot sample a mesh with surface area {total}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let shift = DVec3::new(offset, 0.0, 0.0);
    let points: Vec<DVec3> = (0..samples)
        .map(|_| {
            let target = rng.random_range(0.0..total);
            let face = cumulative
                .partition_point(|&c| c <= target)
                .min(cumulative.len() - 1);
            let [a, b, c] = mesh.triangle(face);
            let s = rng.random::<f64>().sqrt();
            let t = rng.random::<f64>();
            a * (1.0 - s) + b * (s * (1.0 - t)) + c * (s * t) + shift
        })
        .collect();

    let winding = oracle.query_batch(&points, DEFAULT_ACCURACY_SCALE, executor)?;
    let mut cloud = PointCloud::with_capacity(samples);
    for (point, w) in points.into_iter().zip(winding) {
        cloud.push(point, w.abs() >= INSIDE_WINDING_THRESHOLD);
    }
    debug!(
        "Sampled {} points, {} inside",
        cloud.len(),
        cloud.inside_count()
    );
    Ok(cloud)
}

//! # Surface Extractor
//!
//! Extracts the isosurface of a built grid into any [`MeshSink`] as
//! outward-facing triangles.
//!
//! The grid crate winds polygons toward lower values, i.e. inward. Every
//! polygon is reversed on the way out:
//!
//! ```text
//! triangle (a, b, c)    → (c, b, a)
//! quad     (a, b, c, d) → (c, b, a), (d, c, a)
//! ```

use log::debug;
use remesh_mesh::MeshSink;
use remesh_parallel::Executor;
use remesh_volume::FloatGrid;

use crate::error::RemeshError;

/// Clears `out` and fills it with the isosurface of `grid`.
///
/// `adaptivity` is clamped to `[0, 1]`. At 0 the output is a uniform
/// triangulation; higher values keep more nearly planar quads before
/// they are split for the sink.
///
/// # Errors
///
/// [`RemeshError::Precondition`] if no grid has been built.
pub fn volume_to_mesh(
    grid: Option<&FloatGrid>,
    isovalue: f64,
    adaptivity: f64,
    executor: &Executor,
    out: &mut impl MeshSink,
) -> Result<(), RemeshError> {
    let grid = grid.ok_or_else(|| RemeshError::precondition("no grid built"))?;
    out.clear();

    let soup = remesh_volume::volume_to_mesh(grid, isovalue, adaptivity, executor)?;
    let ids: Vec<u32> = soup.points.iter().map(|&p| out.push_vertex(p)).collect();
    for &[a, b, c] in &soup.triangles {
        out.push_face([ids[c as usize], ids[b as usize], ids[a as usize]]);
    }
    for &[a, b, c, d] in &soup.quads {
        let [a, b, c, d] = [a, b, c, d].map(|i| ids[i as usize]);
        out.push_face([c, b, a]);
        out.push_face([d, c, a]);
    }

    debug!(
        "Extracted {} points, {} triangles and {} quads at isovalue {}",
        soup.points.len(),
        soup.triangles.len(),
        soup.quads.len(),
        isovalue
    );
    Ok(())
}

//! Shared fixtures for unit tests.

use glam::DVec3;

/// Axis-aligned box with outward-facing triangles.
pub(crate) fn cuboid(min: DVec3, max: DVec3) -> (Vec<DVec3>, Vec<[u32; 3]>) {
    let points = vec![
        DVec3::new(min.x, min.y, min.z),
        DVec3::new(max.x, min.y, min.z),
        DVec3::new(max.x, max.y, min.z),
        DVec3::new(min.x, max.y, min.z),
        DVec3::new(min.x, min.y, max.z),
        DVec3::new(max.x, min.y, max.z),
        DVec3::new(max.x, max.y, max.z),
        DVec3::new(min.x, max.y, max.z),
    ];
    let triangles = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
        [1, 2, 6],
        [1, 6, 5],
    ];
    (points, triangles)
}

/// Unit cube centred at the origin.
pub(crate) fn unit_cube() -> (Vec<DVec3>, Vec<[u32; 3]>) {
    cuboid(DVec3::splat(-0.5), DVec3::splat(0.5))
}

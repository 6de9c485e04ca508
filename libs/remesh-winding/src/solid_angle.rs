//! # Exact Solid Angle
//!
//! Van Oosterom–Strackee formula for the signed solid angle of a single
//! triangle seen from a query point.

use glam::DVec3;

/// Signed solid angle subtended by triangle `(v0, v1, v2)` at `query`.
///
/// Positive when the query lies on the side the counter-clockwise normal
/// points away from. Returns 0 when the query coincides with a corner.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use remesh_winding::triangle_solid_angle;
///
/// // One octant of the unit sphere's solid angle
/// let omega = triangle_solid_angle(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z);
/// assert!((omega - std::f64::consts::PI / 2.0).abs() < 1e-12);
/// ```
pub fn triangle_solid_angle(query: DVec3, v0: DVec3, v1: DVec3, v2: DVec3) -> f64 {
    let a = v0 - query;
    let b = v1 - query;
    let c = v2 - query;
    let (la, lb, lc) = (a.length(), b.length(), c.length());

    let numerator = a.dot(b.cross(c));
    let denominator = la * lb * lc + a.dot(b) * lc + a.dot(c) * lb + b.dot(c) * la;
    if numerator == 0.0 && denominator <= 0.0 {
        // Query on a corner or inside the triangle itself.
        return 0.0;
    }
    2.0 * numerator.atan2(denominator)
}

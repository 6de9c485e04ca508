//! # Triangle Geometry
//!
//! Point-to-triangle closest points and angle-weighted pseudonormals for
//! signing distances against a triangle soup.

use std::collections::HashMap;

use glam::DVec3;

/// Part of a triangle a closest point lies on.
///
/// Edge `k` runs from corner `k` to corner `(k + 1) % 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Vertex(u8),
    Edge(u8),
    Face,
}

/// Closest point on triangle `(a, b, c)` to `p`, with the feature it
/// lies on.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use remesh_volume::geometry::{closest_point_on_triangle, Feature};
///
/// let (q, feature) = closest_point_on_triangle(
///     DVec3::new(0.2, 0.2, 1.0),
///     DVec3::ZERO,
///     DVec3::X,
///     DVec3::Y,
/// );
/// assert!(q.distance(DVec3::new(0.2, 0.2, 0.0)) < 1e-12);
/// assert_eq!(feature, Feature::Face);
/// ```
pub fn closest_point_on_triangle(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> (DVec3, Feature) {
    let ab = b - a;
    let ac = c - a;
    if ab.cross(ac).length_squared() <= f64::MIN_POSITIVE {
        return closest_point_on_degenerate(p, [a, b, c]);
    }

    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return (a, Feature::Vertex(0));
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return (b, Feature::Vertex(1));
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return (a + ab * v, Feature::Edge(0));
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return (c, Feature::Vertex(2));
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return (a + ac * w, Feature::Edge(2));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return (b + (c - b) * w, Feature::Edge(1));
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    (a + ab * v + ac * w, Feature::Face)
}

/// Closest point on the three edges of a zero-area triangle.
fn closest_point_on_degenerate(p: DVec3, corners: [DVec3; 3]) -> (DVec3, Feature) {
    (0..3)
        .map(|k| {
            let (s, e) = (corners[k], corners[(k + 1) % 3]);
            let d = e - s;
            let len2 = d.length_squared();
            let t = if len2 > 0.0 {
                ((p - s).dot(d) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let feature = if t <= 0.0 {
                Feature::Vertex(k as u8)
            } else if t >= 1.0 {
                Feature::Vertex(((k + 1) % 3) as u8)
            } else {
                Feature::Edge(k as u8)
            };
            (s + d * t, feature)
        })
        .min_by(|x, y| p.distance_squared(x.0).total_cmp(&p.distance_squared(y.0)))
        .unwrap_or((corners[0], Feature::Vertex(0)))
}

/// Angle-weighted pseudonormals of a triangle soup.
///
/// A point is outside when its offset from the closest surface point has
/// a non-negative dot product with the pseudonormal of the closest
/// feature.
#[derive(Debug, Clone)]
pub struct Pseudonormals {
    faces: Vec<DVec3>,
    vertices: Vec<DVec3>,
    edges: HashMap<(u32, u32), DVec3>,
}

impl Pseudonormals {
    /// Accumulates face, edge and vertex normals.
    pub fn new(points: &[DVec3], triangles: &[[u32; 3]]) -> Self {
        let mut faces = Vec::with_capacity(triangles.len());
        let mut vertices = vec![DVec3::ZERO; points.len()];
        let mut edges: HashMap<(u32, u32), DVec3> = HashMap::with_capacity(triangles.len() * 2);

        for tri in triangles {
            let corners = tri.map(|i| points[i as usize]);
            let normal = (corners[1] - corners[0])
                .cross(corners[2] - corners[0])
                .normalize_or_zero();
            faces.push(normal);

            for k in 0..3 {
                let prev = corners[(k + 2) % 3] - corners[k];
                let next = corners[(k + 1) % 3] - corners[k];
                let angle = prev.angle_between(next);
                if angle.is_finite() {
                    vertices[tri[k] as usize] += normal * angle;
                }
                let (s, e) = (tri[k], tri[(k + 1) % 3]);
                *edges.entry((s.min(e), s.max(e))).or_insert(DVec3::ZERO) += normal;
            }
        }

        Self {
            faces,
            vertices,
            edges,
        }
    }

    /// Pseudonormal of `feature` on triangle `triangle`.
    pub fn normal(&self, triangle: usize, corners: [u32; 3], feature: Feature) -> DVec3 {
        match feature {
            Feature::Face => self.faces[triangle],
            Feature::Vertex(k) => self.vertices[corners[k as usize] as usize],
            Feature::Edge(k) => {
                let (s, e) = (corners[k as usize], corners[(k as usize + 1) % 3]);
                self.edges
                    .get(&(s.min(e), s.max(e)))
                    .copied()
                    .unwrap_or(self.faces[triangle])
            }
        }
    }

    /// Returns true if `p`, whose closest surface point is `closest`, lies
    /// outside.
    pub fn is_outside(
        &self,
        p: DVec3,
        closest: DVec3,
        triangle: usize,
        corners: [u32; 3],
        feature: Feature,
    ) -> bool {
        (p - closest).dot(self.normal(triangle, corners, feature)) >= 0.0
    }
}

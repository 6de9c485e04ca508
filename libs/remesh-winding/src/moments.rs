//! # Multipole Moments
//!
//! Far-field expansion of the winding-number integrand
//! `∇φ · n` with `φ(x) = -1 / |x - q|` about a cluster center `p̃`.
//!
//! ## Moments
//!
//! For each triangle `t` with area-weighted normal `N_t` (half the cross
//! product), centroid offset `d_t = c_t - p̃` and second moment `C_t`
//! about its centroid:
//!
//! ```text
//! N      = Σ N_t
//! P_ij   = Σ N_ti d_tj
//! Q_ijk  = Σ N_ti (d_tj d_tk + C_tjk)
//! ```
//!
//! ## Evaluation
//!
//! With `r = p̃ - q`:
//!
//! ```text
//! Ω ≈ N·∇φ + Σ H_ij P_ij + ½ Σ T_ijk Q_ijk
//! ```
//!
//! where `H` and `T` are the second and third derivatives of `φ`.

use glam::{DMat3, DVec3};

use crate::order::ExpansionOrder;

/// Triangle data needed to accumulate moments.
#[derive(Debug, Clone, Copy)]
pub struct TriangleTerms {
    /// Half the cross product of two edges.
    pub area_normal: DVec3,
    /// Centroid.
    pub centroid: DVec3,
    /// Second moment about the centroid, per unit area.
    pub covariance: DMat3,
}

impl TriangleTerms {
    /// Derives the terms of triangle `(a, b, c)`.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        let centroid = (a + b + c) / 3.0;
        let covariance =
            (outer(a - centroid, a - centroid) + outer(b - centroid, b - centroid)
                + outer(c - centroid, c - centroid))
                * (1.0 / 12.0);
        Self {
            area_normal: 0.5 * (b - a).cross(c - a),
            centroid,
            covariance,
        }
    }

    /// Triangle area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area_normal.length()
    }
}

/// Moments of a cluster of triangles about its expansion center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Sum of area-weighted normals.
    pub normal: DVec3,
    /// First-order moment, `P_ij` at row `i`, column `j`.
    pub first: DMat3,
    /// Second-order moment, `second[i]` holds the symmetric `Q_i··`.
    pub second: [DMat3; 3],
}

impl Moments {
    /// Accumulates the moments of `triangles` about `center`.
    ///
    /// Terms above `order` are left at zero.
    pub fn accumulate<'a>(
        triangles: impl IntoIterator<Item = &'a TriangleTerms>,
        center: DVec3,
        order: ExpansionOrder,
    ) -> Self {
        let mut moments = Moments {
            normal: DVec3::ZERO,
            first: DMat3::ZERO,
            second: [DMat3::ZERO; 3],
        };
        for tri in triangles {
            let n = tri.area_normal;
            moments.normal += n;
            if order == ExpansionOrder::Dipole {
                continue;
            }
            let d = tri.centroid - center;
            moments.first += outer(n, d);
            if order == ExpansionOrder::Second {
                let spread = outer(d, d) + tri.covariance;
                for (i, q) in moments.second.iter_mut().enumerate() {
                    *q += spread * n[i];
                }
            }
        }
        moments
    }

    /// Solid angle of the cluster at `query`, expanded about `center`.
    pub fn solid_angle(&self, center: DVec3, query: DVec3, order: ExpansionOrder) -> f64 {
        let r = center - query;
        let r2 = r.length_squared();
        if r2 == 0.0 {
            return 0.0;
        }
        let inv_r = r2.sqrt().recip();
        let inv_r3 = inv_r * inv_r * inv_r;

        // N · ∇φ
        let mut omega = self.normal.dot(r) * inv_r3;
        if order == ExpansionOrder::Dipole {
            return omega;
        }

        // Σ H_ij P_ij = tr(P) / |r|³ - 3 rᵀPr / |r|⁵
        let inv_r5 = inv_r3 * inv_r * inv_r;
        omega += trace(&self.first) * inv_r3 - 3.0 * r.dot(self.first * r) * inv_r5;
        if order == ExpansionOrder::First {
            return omega;
        }

        // ½ Σ T_ijk Q_ijk
        let inv_r7 = inv_r5 * inv_r * inv_r;
        let mut contracted_pair = 0.0;
        let mut contracted_trace = 0.0;
        let mut contracted_full = 0.0;
        for (i, q) in self.second.iter().enumerate() {
            let qr = *q * r;
            contracted_pair += qr[i];
            contracted_trace += r[i] * trace(q);
            contracted_full += r[i] * r.dot(qr);
        }
        omega += 0.5
            * (-3.0 * (2.0 * contracted_pair + contracted_trace) * inv_r5
                + 15.0 * contracted_full * inv_r7);
        omega
    }
}

/// Outer product `a bᵀ`.
#[inline]
fn outer(a: DVec3, b: DVec3) -> DMat3 {
    DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

#[inline]
fn trace(m: &DMat3) -> f64 {
    m.x_axis.x + m.y_axis.y + m.z_axis.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solid_angle::triangle_solid_angle;

    fn patch() -> Vec<[DVec3; 3]> {
        vec![
            [DVec3::new(0.0, 0.0, 0.0), DVec3::new(0.3, 0.0, 0.05), DVec3::new(0.0, 0.3, 0.0)],
            [DVec3::new(0.3, 0.0, 0.05), DVec3::new(0.3, 0.3, 0.1), DVec3::new(0.0, 0.3, 0.0)],
            [DVec3::new(0.0, 0.0, 0.0), DVec3::new(0.0, 0.3, 0.0), DVec3::new(-0.1, 0.1, 0.2)],
        ]
    }

    fn exact(tris: &[[DVec3; 3]], q: DVec3) -> f64 {
        tris.iter().map(|t| triangle_solid_angle(q, t[0], t[1], t[2])).sum()
    }

    fn approx(tris: &[[DVec3; 3]], q: DVec3, order: ExpansionOrder) -> f64 {
        let terms: Vec<TriangleTerms> = tris.iter().map(|t| TriangleTerms::new(t[0], t[1], t[2])).collect();
        let center = terms.iter().map(|t| t.centroid).sum::<DVec3>() / terms.len() as f64;
        Moments::accumulate(&terms, center, order).solid_angle(center, q, order)
    }

    #[test]
    fn test_higher_orders_converge() {
        let tris = patch();
        let q = DVec3::new(1.2, -0.7, 0.9);
        let reference = exact(&tris, q);
        let e0 = (approx(&tris, q, ExpansionOrder::Dipole) - reference).abs();
        let e2 = (approx(&tris, q, ExpansionOrder::Second) - reference).abs();
        assert!(e2 < e0, "second order {e2} not better than dipole {e0}");
        assert!(e2 < 1e-2 * reference.abs());
    }

    #[test]
    fn test_orders_agree_far_away() {
        let tris = patch();
        let q = DVec3::new(40.0, 25.0, -30.0);
        let reference = exact(&tris, q);
        for order in [ExpansionOrder::Dipole, ExpansionOrder::First, ExpansionOrder::Second] {
            let value = approx(&tris, q, order);
            assert!((value - reference).abs() < 1e-2 * reference.abs(), "order {order}");
        }
    }

    #[test]
    fn test_error_shrinks_with_distance() {
        let tris = patch();
        let near = DVec3::new(0.8, 0.8, 0.8);
        let far = near * 4.0;
        let err = |q| (approx(&tris, q, ExpansionOrder::Second) - exact(&tris, q)).abs();
        assert!(err(far) < err(near));
    }

    #[test]
    fn test_triangle_covariance_of_right_triangle() {
        let terms = TriangleTerms::new(DVec3::ZERO, DVec3::X, DVec3::Y);
        // Second moment about the centroid of the unit right triangle
        assert!((terms.covariance.x_axis.x - 1.0 / 18.0).abs() < 1e-12);
        assert!((terms.covariance.y_axis.x + 1.0 / 36.0).abs() < 1e-12);
        assert!((terms.area() - 0.5).abs() < 1e-12);
    }
}

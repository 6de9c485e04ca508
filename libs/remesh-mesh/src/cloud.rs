//! # Point Cloud
//!
//! Classified sample points, as produced by the winding-number
//! self-test and written by [`crate::io::save_point_cloud_ply`].

use glam::DVec3;

/// Points with a per-point inside/outside flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    /// Sample positions.
    pub points: Vec<DVec3>,
    /// `inside[i]` classifies `points[i]`.
    pub inside: Vec<bool>,
}

impl PointCloud {
    /// Creates an empty cloud with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            inside: Vec::with_capacity(capacity),
        }
    }

    /// Appends a classified point.
    pub fn push(&mut self, point: DVec3, inside: bool) {
        self.points.push(point);
        self.inside.push(inside);
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the cloud has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points classified inside.
    pub fn inside_count(&self) -> usize {
        self.inside.iter().filter(|&&inside| inside).count()
    }
}

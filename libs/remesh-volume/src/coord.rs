//! # Grid Coordinates
//!
//! Integer voxel coordinates in index space.

use std::ops::{Add, Sub};

use config::constants::LEAF_DIM;
use glam::DVec3;

/// Integer voxel coordinate.
///
/// Ordered lexicographically by `(x, y, z)`, which is the iteration order
/// every grid pass uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    /// Creates a coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Unit step along `axis` (0, 1 or 2).
    #[inline]
    pub fn unit(axis: usize) -> Self {
        match axis {
            0 => Self::new(1, 0, 0),
            1 => Self::new(0, 1, 0),
            _ => Self::new(0, 0, 1),
        }
    }

    /// Component along `axis` (0, 1 or 2).
    #[inline]
    pub fn axis(&self, axis: usize) -> i32 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Largest coordinate not greater than `p` component-wise.
    #[inline]
    pub fn floor(p: DVec3) -> Self {
        let f = p.floor();
        Self::new(f.x as i32, f.y as i32, f.z as i32)
    }

    /// Smallest coordinate not less than `p` component-wise.
    #[inline]
    pub fn ceil(p: DVec3) -> Self {
        let c = p.ceil();
        Self::new(c.x as i32, c.y as i32, c.z as i32)
    }

    /// Index-space position of the voxel.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Origin of the leaf block containing this voxel.
    #[inline]
    pub fn leaf_origin(&self) -> Self {
        let mask = !(LEAF_DIM - 1);
        Self::new(self.x & mask, self.y & mask, self.z & mask)
    }

    /// Offset of this voxel inside its leaf block.
    #[inline]
    pub(crate) fn leaf_offset(&self) -> usize {
        let m = LEAF_DIM - 1;
        (((self.x & m) * LEAF_DIM + (self.y & m)) * LEAF_DIM + (self.z & m)) as usize
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

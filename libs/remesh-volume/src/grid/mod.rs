//! # Sparse Float Grid
//!
//! Voxels are stored in 8³ leaf blocks keyed by their origin. Each leaf
//! carries a value array plus two bit masks:
//!
//! - **defined**: the voxel holds a computed value
//! - **active**: the voxel lies inside the requested narrow band
//!
//! Active implies defined. Undefined voxels read as the background value.

use std::collections::HashMap;

use config::constants::{LEAF_DIM, LEAF_VOXELS};

use crate::coord::Coord;
use crate::transform::Transform;

const MASK_WORDS: usize = LEAF_VOXELS / 64;

#[derive(Debug, Clone)]
struct Leaf {
    values: Box<[f32; LEAF_VOXELS]>,
    active: [u64; MASK_WORDS],
    defined: [u64; MASK_WORDS],
}

impl Leaf {
    fn new(background: f32) -> Self {
        Self {
            values: Box::new([background; LEAF_VOXELS]),
            active: [0; MASK_WORDS],
            defined: [0; MASK_WORDS],
        }
    }

    #[inline]
    fn bit(mask: &[u64; MASK_WORDS], offset: usize) -> bool {
        mask[offset / 64] & (1 << (offset % 64)) != 0
    }

    #[inline]
    fn assign(mask: &mut [u64; MASK_WORDS], offset: usize, on: bool) {
        if on {
            mask[offset / 64] |= 1 << (offset % 64);
        } else {
            mask[offset / 64] &= !(1 << (offset % 64));
        }
    }
}

/// Sparse grid of `f32` values with a uniform index-to-world transform.
///
/// # Example
///
/// ```rust
/// use remesh_volume::{Coord, FloatGrid, Transform};
///
/// let mut grid = FloatGrid::new(Transform::new(0.1).unwrap(), 0.3);
/// grid.set_value(Coord::new(-3, 4, 5), -0.05, true);
/// assert_eq!(grid.probe(Coord::new(-3, 4, 5)), Some(-0.05));
/// assert_eq!(grid.value(Coord::new(0, 0, 0)), 0.3);
/// assert_eq!(grid.active_voxel_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FloatGrid {
    transform: Transform,
    background: f32,
    leaves: HashMap<Coord, Leaf>,
}

impl FloatGrid {
    /// Creates an empty grid.
    pub fn new(transform: Transform, background: f32) -> Self {
        Self {
            transform,
            background,
            leaves: HashMap::new(),
        }
    }

    /// Index-to-world transform.
    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Voxel edge length in world units.
    #[inline]
    pub fn voxel_size(&self) -> f64 {
        self.transform.voxel_size()
    }

    /// Value reported for undefined voxels.
    #[inline]
    pub fn background(&self) -> f32 {
        self.background
    }

    /// Returns true if no voxel is defined.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Value at `coord`, or the background if undefined.
    pub fn value(&self, coord: Coord) -> f32 {
        self.probe(coord).unwrap_or(self.background)
    }

    /// Value at `coord` if defined.
    pub fn probe(&self, coord: Coord) -> Option<f32> {
        let leaf = self.leaves.get(&coord.leaf_origin())?;
        let offset = coord.leaf_offset();
        Leaf::bit(&leaf.defined, offset).then(|| leaf.values[offset])
    }

    /// Returns true if `coord` lies in the active band.
    pub fn is_active(&self, coord: Coord) -> bool {
        self.leaves
            .get(&coord.leaf_origin())
            .is_some_and(|leaf| Leaf::bit(&leaf.active, coord.leaf_offset()))
    }

    /// Defines the voxel at `coord`, replacing any previous value.
    pub fn set_value(&mut self, coord: Coord, value: f32, active: bool) {
        let background = self.background;
        let leaf = self
            .leaves
            .entry(coord.leaf_origin())
            .or_insert_with(|| Leaf::new(background));
        let offset = coord.leaf_offset();
        leaf.values[offset] = value;
        Leaf::assign(&mut leaf.defined, offset, true);
        Leaf::assign(&mut leaf.active, offset, active);
    }

    /// Number of allocated leaf blocks.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of voxels in the active band.
    pub fn active_voxel_count(&self) -> usize {
        self.leaves
            .values()
            .map(|leaf| leaf.active.iter().map(|w| w.count_ones() as usize).sum::<usize>())
            .sum()
    }

    /// Number of defined voxels, active or not.
    pub fn defined_voxel_count(&self) -> usize {
        self.leaves
            .values()
            .map(|leaf| leaf.defined.iter().map(|w| w.count_ones() as usize).sum::<usize>())
            .sum()
    }

    /// Inclusive bounds of the active voxels.
    pub fn active_bounds(&self) -> Option<(Coord, Coord)> {
        self.voxels()
            .into_iter()
            .filter(|&(_, _, active)| active)
            .map(|(coord, _, _)| coord)
            .fold(None, |bounds, c| match bounds {
                None => Some((c, c)),
                Some((lo, hi)) => Some((lo.min(c), hi.max(c))),
            })
    }

    /// Extent of the active bounds in voxels, zero for an empty band.
    pub fn dimensions(&self) -> [u32; 3] {
        match self.active_bounds() {
            Some((lo, hi)) => {
                let d = hi - lo;
                [d.x as u32 + 1, d.y as u32 + 1, d.z as u32 + 1]
            }
            None => [0; 3],
        }
    }

    /// Every defined voxel as `(coord, value, active)`, sorted by coord.
    pub fn voxels(&self) -> Vec<(Coord, f32, bool)> {
        let mut out = Vec::with_capacity(self.defined_voxel_count());
        for (origin, leaf) in &self.leaves {
            for offset in 0..LEAF_VOXELS {
                if !Leaf::bit(&leaf.defined, offset) {
                    continue;
                }
                let local = local_coord(offset);
                out.push((
                    *origin + local,
                    leaf.values[offset],
                    Leaf::bit(&leaf.active, offset),
                ));
            }
        }
        out.sort_unstable_by_key(|&(coord, _, _)| coord);
        out
    }
}

/// Inverse of [`Coord::leaf_offset`].
fn local_coord(offset: usize) -> Coord {
    let dim = LEAF_DIM as usize;
    Coord::new(
        (offset / (dim * dim)) as i32,
        ((offset / dim) % dim) as i32,
        (offset % dim) as i32,
    )
}

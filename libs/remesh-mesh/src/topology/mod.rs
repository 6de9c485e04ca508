//! # Edge Topology
//!
//! Edge-incidence diagnostics for extracted surfaces.
//!
//! An undirected edge is *boundary* when one face uses it, *manifold*
//! when exactly two faces use it, and *non-manifold* beyond that. A
//! manifold edge is *misoriented* when both faces traverse it in the same
//! direction.

use std::collections::HashMap;

use serde::Serialize;

use crate::mesh::MeshLike;

/// Edge-incidence counts of a triangle mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EdgeReport {
    /// Edges used by a single face.
    pub boundary: usize,
    /// Edges shared by exactly two faces.
    pub manifold: usize,
    /// Edges shared by more than two faces.
    pub non_manifold: usize,
    /// Manifold edges traversed in the same direction by both faces.
    pub misoriented: usize,
}

impl EdgeReport {
    /// Total number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.boundary + self.manifold + self.non_manifold
    }

    /// Every edge shared by exactly two faces.
    pub fn is_closed_manifold(&self) -> bool {
        self.boundary == 0 && self.non_manifold == 0 && self.manifold > 0
    }

    /// Closed manifold with consistently oriented faces.
    pub fn is_oriented_closed_manifold(&self) -> bool {
        self.is_closed_manifold() && self.misoriented == 0
    }
}

#[derive(Default)]
struct EdgeUse {
    forward: usize,
    backward: usize,
}

/// Counts boundary, manifold and non-manifold edges.
///
/// Degenerate edges (both ends on the same vertex) are ignored.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use remesh_mesh::{edge_manifold_report, TriMesh};
///
/// let cube = TriMesh::cuboid(DVec3::ZERO, DVec3::ONE);
/// let report = edge_manifold_report(&cube);
/// assert_eq!(report.manifold, 18);
/// assert!(report.is_oriented_closed_manifold());
/// ```
pub fn edge_manifold_report(mesh: &impl MeshLike) -> EdgeReport {
    let mut edges: HashMap<(u32, u32), EdgeUse> = HashMap::with_capacity(mesh.face_count() * 2);

    for face in 0..mesh.face_count() {
        let tri = mesh.face(face);
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            if a == b {
                continue;
            }
            let usage = edges.entry((a.min(b), a.max(b))).or_default();
            if a < b {
                usage.forward += 1;
            } else {
                usage.backward += 1;
            }
        }
    }

    let mut report = EdgeReport::default();
    for usage in edges.values() {
        match usage.forward + usage.backward {
            1 => report.boundary += 1,
            2 => {
                report.manifold += 1;
                if usage.forward != 1 {
                    report.misoriented += 1;
                }
            }
            _ => report.non_manifold += 1,
        }
    }
    report
}

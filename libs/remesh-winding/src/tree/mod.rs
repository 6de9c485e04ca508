//! # Winding Number Tree
//!
//! Bounding volume hierarchy over the input triangles with multipole
//! moments at every node.
//!
//! ## Construction
//!
//! Triangles are split recursively at the median centroid along the
//! longest axis of their centroid bounds until a node holds at most
//! [`WINDING_LEAF_SIZE`] triangles. Each node stores its expansion
//! center (area-weighted centroid), the radius of the sphere around that
//! center containing every triangle corner, and its [`Moments`].
//!
//! ## Query
//!
//! A node is replaced by its expansion when the query is outside its
//! bounding sphere and farther than `FAR_FIELD_RATIO * radius /
//! accuracy_scale` from its center. Leaves that fail the test are summed
//! exactly.

use std::f64::consts::PI;

use config::constants::{
    approx_zero, FAR_FIELD_RATIO, INSIDE_WINDING_THRESHOLD, WINDING_LEAF_SIZE,
};
use glam::DVec3;
use log::debug;
use remesh_mesh::MeshLike;
use remesh_parallel::Executor;

use crate::error::WindingError;
use crate::moments::{Moments, TriangleTerms};
use crate::order::ExpansionOrder;
use crate::solid_angle::triangle_solid_angle;

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    /// Range into the permuted triangle list.
    Leaf { start: usize, end: usize },
    Branch { left: usize, right: usize },
}

#[derive(Debug, Clone)]
struct Node {
    center: DVec3,
    radius: f64,
    moments: Moments,
    kind: NodeKind,
}

/// Generalized winding number oracle over a snapshot of a triangle mesh.
///
/// Only [`WindingNumber::init`] creates one, so every value is ready to
/// query. Queries take `&self` and the type is `Send + Sync`, so one
/// oracle can serve many worker threads at once.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use remesh_mesh::TriMesh;
/// use remesh_winding::{ExpansionOrder, WindingNumber};
///
/// let cube = TriMesh::cuboid(DVec3::ZERO, DVec3::ONE);
/// let oracle = WindingNumber::init(&cube, ExpansionOrder::default()).unwrap();
/// let w = oracle.query(DVec3::splat(0.5), 2.0);
/// assert!((w - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct WindingNumber {
    positions: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    /// Triangle ids in leaf order.
    items: Vec<usize>,
    nodes: Vec<Node>,
    order: ExpansionOrder,
}

impl WindingNumber {
    /// Copies the mesh and builds the tree and its moments.
    ///
    /// # Errors
    ///
    /// [`WindingError::EmptyMesh`] if the mesh has no vertices or no faces,
    /// [`WindingError::IndexOutOfBounds`] for a bad triangle index.
    pub fn init(mesh: &impl MeshLike, order: ExpansionOrder) -> Result<Self, WindingError> {
        let vertex_count = mesh.vertex_count();
        let face_count = mesh.face_count();
        if vertex_count == 0 || face_count == 0 {
            return Err(WindingError::EmptyMesh {
                vertices: vertex_count,
                faces: face_count,
            });
        }

        let positions: Vec<DVec3> = (0..vertex_count).map(|i| mesh.position(i)).collect();
        let mut triangles = Vec::with_capacity(face_count);
        for face in 0..face_count {
            let tri = mesh.face(face);
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(WindingError::IndexOutOfBounds {
                    face,
                    index,
                    vertex_count,
                });
            }
            triangles.push(tri);
        }

        let terms: Vec<TriangleTerms> = triangles
            .iter()
            .map(|&[a, b, c]| {
                TriangleTerms::new(
                    positions[a as usize],
                    positions[b as usize],
                    positions[c as usize],
                )
            })
            .collect();

        let mut items: Vec<usize> = (0..face_count).collect();
        let mut builder = TreeBuilder {
            positions: &positions,
            triangles: &triangles,
            terms: &terms,
            order,
            nodes: Vec::with_capacity(2 * face_count / WINDING_LEAF_SIZE + 1),
        };
        builder.build(&mut items, 0);
        let nodes = builder.nodes;

        debug!(
            "Winding tree over {} triangles: {} nodes, order {}",
            face_count,
            nodes.len(),
            order
        );

        Ok(Self {
            positions,
            triangles,
            items,
            nodes,
            order,
        })
    }

    /// Approximate generalized winding number at `point`.
    ///
    /// `accuracy_scale <= 0` evaluates every triangle exactly; larger
    /// values accept the far-field expansion closer to each cluster.
    pub fn query(&self, point: DVec3, accuracy_scale: f64) -> f64 {
        self.node_solid_angle(0, point, accuracy_scale) / (4.0 * PI)
    }

    /// `|query(point)| >= 0.5`.
    pub fn is_inside(&self, point: DVec3, accuracy_scale: f64) -> bool {
        self.query(point, accuracy_scale).abs() >= INSIDE_WINDING_THRESHOLD
    }

    /// Queries every point through the executor, preserving input order.
    pub fn query_batch(
        &self,
        points: &[DVec3],
        accuracy_scale: f64,
        executor: &Executor,
    ) -> Result<Vec<f64>, WindingError> {
        Ok(executor.map(points.len(), |i| self.query(points[i], accuracy_scale))?)
    }

    /// Expansion order the moments were built with.
    #[inline]
    pub fn order(&self) -> ExpansionOrder {
        self.order
    }

    /// Number of triangles in the snapshot.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of tree nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_solid_angle(&self, index: usize, query: DVec3, accuracy_scale: f64) -> f64 {
        let node = &self.nodes[index];
        if accuracy_scale > 0.0 {
            let distance = node.center.distance(query);
            if distance > node.radius && distance * accuracy_scale > FAR_FIELD_RATIO * node.radius {
                return node.moments.solid_angle(node.center, query, self.order);
            }
        }

        match node.kind {
            NodeKind::Leaf { start, end } => self.items[start..end]
                .iter()
                .map(|&t| {
                    let [a, b, c] = self.triangles[t];
                    triangle_solid_angle(
                        query,
                        self.positions[a as usize],
                        self.positions[b as usize],
                        self.positions[c as usize],
                    )
                })
                .sum(),
            NodeKind::Branch { left, right } => {
                self.node_solid_angle(left, query, accuracy_scale)
                    + self.node_solid_angle(right, query, accuracy_scale)
            }
        }
    }
}

struct TreeBuilder<'a> {
    positions: &'a [DVec3],
    triangles: &'a [[u32; 3]],
    terms: &'a [TriangleTerms],
    order: ExpansionOrder,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    /// Builds the subtree over `items`, which start at `offset` in the
    /// permuted list, and returns its node index.
    fn build(&mut self, items: &mut [usize], offset: usize) -> usize {
        let center = self.expansion_center(items);
        let radius = items
            .iter()
            .flat_map(|&t| self.triangles[t])
            .map(|v| self.positions[v as usize].distance(center))
            .fold(0.0, f64::max);
        let moments = Moments::accumulate(items.iter().map(|&t| &self.terms[t]), center, self.order);

        let index = self.nodes.len();
        self.nodes.push(Node {
            center,
            radius,
            moments,
            kind: NodeKind::Leaf {
                start: offset,
                end: offset + items.len(),
            },
        });
        if items.len() <= WINDING_LEAF_SIZE {
            return index;
        }

        let (lo, hi) = items.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(lo, hi), &t| (lo.min(self.terms[t].centroid), hi.max(self.terms[t].centroid)),
        );
        let extent = hi - lo;
        let axis = if extent.x >= extent.y && extent.x >= extent.z {
            0
        } else if extent.y >= extent.z {
            1
        } else {
            2
        };

        let mid = items.len() / 2;
        items.select_nth_unstable_by(mid, |&a, &b| {
            self.terms[a].centroid[axis].total_cmp(&self.terms[b].centroid[axis])
        });
        let (left_items, right_items) = items.split_at_mut(mid);
        let left = self.build(left_items, offset);
        let right = self.build(right_items, offset + mid);
        self.nodes[index].kind = NodeKind::Branch { left, right };
        index
    }

    /// Area-weighted centroid, or the plain centroid mean when every
    /// triangle is degenerate.
    fn expansion_center(&self, items: &[usize]) -> DVec3 {
        let (weighted, area) = items.iter().fold((DVec3::ZERO, 0.0), |(sum, area), &t| {
            let a = self.terms[t].area();
            (sum + self.terms[t].centroid * a, area + a)
        });
        if approx_zero(area) {
            items.iter().map(|&t| self.terms[t].centroid).sum::<DVec3>() / items.len() as f64
        } else {
            weighted / area
        }
    }
}

#[cfg(test)]
mod tests;

//! # Mesh Data Structure
//!
//! Indexed triangle mesh plus the structural traits the pipeline is
//! written against.
//!
//! ## Traits
//!
//! - [`MeshLike`]: read-only access to positions and triangle indices
//! - [`MeshSink`]: the mutation surface the surface extractor fills

use config::constants::approx_zero;
use glam::DVec3;

use crate::error::MeshError;

// =============================================================================
// STRUCTURAL TRAITS
// =============================================================================

/// Read-only view of an indexed triangle mesh.
///
/// Implementations must keep `position` and `face` consistent with the
/// reported counts; callers index `0..vertex_count()` and
/// `0..face_count()`.
pub trait MeshLike {
    /// Number of vertex positions.
    fn vertex_count(&self) -> usize;

    /// Number of triangles.
    fn face_count(&self) -> usize;

    /// Position of vertex `index`.
    fn position(&self, index: usize) -> DVec3;

    /// Vertex indices of triangle `index`.
    fn face(&self, index: usize) -> [u32; 3];

    /// Returns true if the mesh has no vertices or no faces.
    fn is_degenerate_input(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }
}

/// Mutation surface used to populate an output mesh.
pub trait MeshSink {
    /// Removes every vertex and face.
    fn clear(&mut self);

    /// Appends a vertex and returns its index.
    fn push_vertex(&mut self, position: DVec3) -> u32;

    /// Appends a triangle.
    fn push_face(&mut self, face: [u32; 3]);
}

// =============================================================================
// TRIANGLE MESH
// =============================================================================

/// A triangle mesh with f64 positions and `u32` indices.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use remesh_mesh::TriMesh;
///
/// let mesh = TriMesh::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5));
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 12);
/// assert!((mesh.signed_volume() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Builds a mesh from raw buffers, rejecting out-of-range indices.
    pub fn from_parts(vertices: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Axis-aligned box with outward-facing triangles.
    ///
    /// Produces 8 vertices and 12 triangles, two per side.
    pub fn cuboid(min: DVec3, max: DVec3) -> Self {
        let mut mesh = Self::with_capacity(8, 12);

        // Bottom ring (z = min.z), then top ring (z = max.z)
        let v0 = mesh.add_vertex(DVec3::new(min.x, min.y, min.z));
        let v1 = mesh.add_vertex(DVec3::new(max.x, min.y, min.z));
        let v2 = mesh.add_vertex(DVec3::new(max.x, max.y, min.z));
        let v3 = mesh.add_vertex(DVec3::new(min.x, max.y, min.z));
        let v4 = mesh.add_vertex(DVec3::new(min.x, min.y, max.z));
        let v5 = mesh.add_vertex(DVec3::new(max.x, min.y, max.z));
        let v6 = mesh.add_vertex(DVec3::new(max.x, max.y, max.z));
        let v7 = mesh.add_vertex(DVec3::new(min.x, max.y, max.z));

        mesh.add_face([v0, v2, v1]);
        mesh.add_face([v0, v3, v2]);
        mesh.add_face([v4, v5, v6]);
        mesh.add_face([v4, v6, v7]);
        mesh.add_face([v0, v1, v5]);
        mesh.add_face([v0, v5, v4]);
        mesh.add_face([v2, v3, v7]);
        mesh.add_face([v2, v7, v6]);
        mesh.add_face([v3, v0, v4]);
        mesh.add_face([v3, v4, v7]);
        mesh.add_face([v1, v2, v6]);
        mesh.add_face([v1, v6, v5]);

        mesh
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_face(&mut self, face: [u32; 3]) {
        self.faces.push(face);
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns the triangles.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the corner positions of triangle `index`.
    #[inline]
    pub fn triangle(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.faces[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Area of triangle `index`.
    pub fn triangle_area(&self, index: usize) -> f64 {
        let [a, b, c] = self.triangle(index);
        0.5 * (b - a).cross(c - a).length()
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        (0..self.faces.len()).map(|i| self.triangle_area(i)).sum()
    }

    /// Number of triangles whose area is numerically zero.
    pub fn degenerate_face_count(&self) -> usize {
        (0..self.faces.len())
            .filter(|&i| approx_zero(self.triangle_area(i)))
            .count()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners; an empty mesh yields two zero vectors.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        self.vertices[1..]
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Length of the bounding box diagonal.
    pub fn bbox_diagonal(&self) -> f64 {
        let (min, max) = self.bounding_box();
        (max - min).length()
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Positive for closed meshes whose triangles face outward.
    pub fn signed_volume(&self) -> f64 {
        (0..self.faces.len())
            .map(|i| {
                let [a, b, c] = self.triangle(i);
                a.dot(b.cross(c))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Checks that every face index is in bounds.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfBounds {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Drops vertices no face references, compacting and remapping faces.
    ///
    /// Returns the number of vertices removed. Relative vertex order is
    /// preserved.
    ///
    /// # Panics
    ///
    /// Panics if a face index is out of bounds; see [`TriMesh::validate`].
    pub fn remove_unreferenced_vertices(&mut self) -> usize {
        let mut used = vec![false; self.vertices.len()];
        for tri in &self.faces {
            for &i in tri {
                used[i as usize] = true;
            }
        }

        let mut remap = vec![u32::MAX; self.vertices.len()];
        let mut next = 0u32;
        for (old, keep) in used.iter().enumerate() {
            if *keep {
                remap[old] = next;
                next += 1;
            }
        }

        let removed = self.vertices.len() - next as usize;
        if removed == 0 {
            return 0;
        }

        let mut index = 0;
        self.vertices.retain(|_| {
            let keep = used[index];
            index += 1;
            keep
        });
        for tri in &mut self.faces {
            for i in tri.iter_mut() {
                *i = remap[*i as usize];
            }
        }
        removed
    }
}

impl MeshLike for TriMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    fn position(&self, index: usize) -> DVec3 {
        self.vertices[index]
    }

    #[inline]
    fn face(&self, index: usize) -> [u32; 3] {
        self.faces[index]
    }
}

impl MeshSink for TriMesh {
    fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
    }

    fn push_vertex(&mut self, position: DVec3) -> u32 {
        self.add_vertex(position)
    }

    fn push_face(&mut self, face: [u32; 3]) {
        self.add_face(face);
    }
}

#[cfg(test)]
mod tests;

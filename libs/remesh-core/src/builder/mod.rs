//! # Volumetric Builder
//!
//! Turns a triangle mesh into a narrow-band [`FloatGrid`] in one of two
//! ways:
//!
//! - [`VolumetricBuilder::mesh_to_level_set`]: signed distance with the
//!   sign taken from the surface orientation
//! - [`VolumetricBuilder::mesh_to_volume`]: distance in a thin band with
//!   the sign taken from the winding-number oracle
//!
//! Every build replaces the previous grid.

use config::constants::{LEVEL_SET_BAND_PADDING, VOLUME_BAND_PADDING};
use glam::DVec3;
use log::debug;
use remesh_mesh::MeshLike;
use remesh_parallel::Executor;
use remesh_volume::{FloatGrid, InteriorTest, MeshDataAdapter, Transform};
use remesh_winding::WindingNumber;

use crate::error::RemeshError;

// =============================================================================
// ADAPTERS
// =============================================================================

/// Presents a [`MeshLike`] to the grid in index space.
#[derive(Debug)]
pub struct MeshAdapter<'a, M> {
    mesh: &'a M,
    transform: Transform,
}

impl<'a, M: MeshLike> MeshAdapter<'a, M> {
    /// Wraps `mesh`; positions are mapped through `transform` on access.
    pub fn new(mesh: &'a M, transform: Transform) -> Self {
        Self { mesh, transform }
    }
}

impl<M: MeshLike + Sync> MeshDataAdapter for MeshAdapter<'_, M> {
    fn polygon_count(&self) -> usize {
        self.mesh.face_count()
    }

    fn point_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    fn vertex_count(&self, _polygon: usize) -> usize {
        3
    }

    fn index_space_point(&self, polygon: usize, vertex: usize) -> DVec3 {
        let index = self.mesh.face(polygon)[vertex] as usize;
        self.transform.world_to_index(self.mesh.position(index))
    }
}

/// Winding-number oracle used as an interior test.
#[derive(Debug, Clone, Copy)]
pub struct OracleParams<'a> {
    pub oracle: &'a WindingNumber,
    pub accuracy_scale: f64,
}

impl InteriorTest for OracleParams<'_> {
    fn is_inside(&self, point: DVec3) -> bool {
        self.oracle.is_inside(point, self.accuracy_scale)
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builds and holds one volumetric grid.
#[derive(Debug)]
pub struct VolumetricBuilder<'e> {
    executor: &'e Executor,
    grid: Option<FloatGrid>,
}

impl<'e> VolumetricBuilder<'e> {
    /// Creates a builder with no grid.
    pub fn new(executor: &'e Executor) -> Self {
        Self {
            executor,
            grid: None,
        }
    }

    /// The most recently built grid.
    pub fn grid(&self) -> Option<&FloatGrid> {
        self.grid.as_ref()
    }

    /// Takes the grid out of the builder.
    pub fn into_grid(self) -> Option<FloatGrid> {
        self.grid
    }

    /// Builds a signed distance level set around the mesh.
    ///
    /// The band half-width is `|isovalue / voxel_size| + 1` voxels so the
    /// requested isosurface always lies inside it.
    ///
    /// # Errors
    ///
    /// [`RemeshError::Precondition`] for an empty mesh or a non-positive
    /// voxel size, [`RemeshError::Input`] for an out-of-range face index.
    pub fn mesh_to_level_set(
        &mut self,
        mesh: &impl MeshLike,
        voxel_size: f64,
        isovalue: f64,
    ) -> Result<&FloatGrid, RemeshError> {
        self.grid = None;
        let transform = check_inputs(mesh, voxel_size)?;

        let points: Vec<DVec3> = (0..mesh.vertex_count()).map(|i| mesh.position(i)).collect();
        let triangles: Vec<[u32; 3]> = (0..mesh.face_count()).map(|f| mesh.face(f)).collect();
        let half_width = (isovalue / voxel_size).abs() + LEVEL_SET_BAND_PADDING;
        debug!(
            "Level-set build: voxel {:.6}, isovalue {}, half-width {:.3} voxels",
            voxel_size, isovalue, half_width
        );

        let grid = remesh_volume::mesh_to_level_set(
            &transform,
            &points,
            &triangles,
            half_width,
            self.executor,
        )?;
        Ok(self.grid.insert(grid))
    }

    /// Builds a distance volume signed by the winding-number oracle.
    ///
    /// The band extends half a voxel to each side of the surface, widened
    /// on the side the isovalue moves the surface toward.
    ///
    /// # Errors
    ///
    /// As [`VolumetricBuilder::mesh_to_level_set`].
    pub fn mesh_to_volume<M: MeshLike + Sync>(
        &mut self,
        mesh: &M,
        voxel_size: f64,
        isovalue: f64,
        oracle_params: OracleParams<'_>,
    ) -> Result<&FloatGrid, RemeshError> {
        self.grid = None;
        let transform = check_inputs(mesh, voxel_size)?;

        let shift = isovalue / voxel_size;
        let exterior = shift.max(0.0) + VOLUME_BAND_PADDING;
        let interior = (-shift).max(0.0) + VOLUME_BAND_PADDING;
        debug!(
            "Oracle-guided build: voxel {:.6}, isovalue {}, band {:.3}/{:.3} voxels",
            voxel_size, isovalue, exterior, interior
        );

        let adapter = MeshAdapter::new(mesh, transform);
        let grid = remesh_volume::mesh_to_volume(
            &adapter,
            &transform,
            exterior,
            interior,
            &oracle_params,
            self.executor,
        )?;
        Ok(self.grid.insert(grid))
    }
}

/// Checks the mesh and voxel size before any grid work.
fn check_inputs(mesh: &impl MeshLike, voxel_size: f64) -> Result<Transform, RemeshError> {
    if mesh.is_degenerate_input() {
        return Err(RemeshError::precondition(format!(
            "mesh is empty ({} vertices, {} faces)",
            mesh.vertex_count(),
            mesh.face_count()
        )));
    }
    if !(voxel_size > 0.0) || !voxel_size.is_finite() {
        return Err(RemeshError::precondition(format!(
            "voxel size must be positive and finite, got {voxel_size}"
        )));
    }
    for face in 0..mesh.face_count() {
        let tri = mesh.face(face);
        if let Some(&index) = tri.iter().find(|&&i| i as usize >= mesh.vertex_count()) {
            return Err(RemeshError::input(format!(
                "face {face} references vertex {index} but the mesh has {} vertices",
                mesh.vertex_count()
            )));
        }
    }
    Ok(Transform::new(voxel_size)?)
}

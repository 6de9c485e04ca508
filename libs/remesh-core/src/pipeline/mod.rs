//! # Pipeline Orchestrator
//!
//! One-shot remeshing of a complete mesh snapshot:
//!
//! ```text
//! validate params ──> drop unreferenced input vertices
//!                 ──> voxel size = percent × bbox diagonal / 100
//!                 ──> (WindingNumber) build oracle
//!                 ──> build grid ──> extract ──> drop unreferenced vertices
//! ```

use config::constants::{
    GlobalConfig, DEFAULT_ACCURACY_SCALE, DEFAULT_ADAPTIVITY, DEFAULT_ISOVALUE,
    DEFAULT_TARGET_LENGTH_PERCENT,
};
use log::{info, warn};
use remesh_mesh::{MeshLike, TriMesh};
use remesh_parallel::Executor;
use remesh_winding::{ExpansionOrder, WindingNumber};
use serde::{Deserialize, Serialize};

use crate::builder::{OracleParams, VolumetricBuilder};
use crate::error::RemeshError;
use crate::extractor::volume_to_mesh;

// =============================================================================
// PARAMETERS
// =============================================================================

/// How the volume is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMode {
    /// Inside/outside from the generalized winding number.
    #[default]
    WindingNumber,
    /// Inside/outside from surface orientation.
    LevelSet,
}

/// Remeshing parameters.
///
/// # Example
///
/// ```rust
/// use remesh_core::{RemeshParams, VolumeMode};
///
/// let params = RemeshParams::default()
///     .with_isovalue(0.01)
///     .with_mode(VolumeMode::LevelSet);
/// assert_eq!(params.target_length_percent, 1.2);
/// assert_eq!(params.mode, VolumeMode::LevelSet);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemeshParams {
    /// Voxel size as a percentage of the bounding box diagonal.
    pub target_length_percent: f64,
    /// Extraction isovalue in world units; positive dilates.
    pub isovalue: f64,
    /// Quad-merging tolerance in `[0, 1]`.
    pub adaptivity: f64,
    pub mode: VolumeMode,
    pub winding_order: ExpansionOrder,
    /// Far-field admissibility of winding-number queries.
    pub accuracy_scale: f64,
}

impl Default for RemeshParams {
    fn default() -> Self {
        Self {
            target_length_percent: DEFAULT_TARGET_LENGTH_PERCENT,
            isovalue: DEFAULT_ISOVALUE,
            adaptivity: DEFAULT_ADAPTIVITY,
            mode: VolumeMode::default(),
            winding_order: ExpansionOrder::default(),
            accuracy_scale: DEFAULT_ACCURACY_SCALE,
        }
    }
}

impl RemeshParams {
    pub fn with_target_length_percent(mut self, percent: f64) -> Self {
        self.target_length_percent = percent;
        self
    }

    pub fn with_isovalue(mut self, isovalue: f64) -> Self {
        self.isovalue = isovalue;
        self
    }

    pub fn with_adaptivity(mut self, adaptivity: f64) -> Self {
        self.adaptivity = adaptivity;
        self
    }

    pub fn with_mode(mut self, mode: VolumeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_winding_order(mut self, order: ExpansionOrder) -> Self {
        self.winding_order = order;
        self
    }

    pub fn with_accuracy_scale(mut self, scale: f64) -> Self {
        self.accuracy_scale = scale;
        self
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// [`RemeshError::Input`] for a non-positive target length, a
    /// non-finite accuracy scale or a non-finite isovalue/adaptivity.
    pub fn validate(&self) -> Result<GlobalConfig, RemeshError> {
        let config = GlobalConfig::new(
            self.target_length_percent,
            self.winding_order.as_u32(),
            self.accuracy_scale,
        )?;
        if !self.isovalue.is_finite() {
            return Err(RemeshError::input(format!(
                "isovalue must be finite: {}",
                self.isovalue
            )));
        }
        if !self.adaptivity.is_finite() {
            return Err(RemeshError::input(format!(
                "adaptivity must be finite: {}",
                self.adaptivity
            )));
        }
        Ok(config)
    }

    /// Voxel size for a mesh with the given bounding box diagonal.
    pub fn voxel_size(&self, bbox_diagonal: f64) -> f64 {
        self.target_length_percent * bbox_diagonal / 100.0
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemeshReport {
    pub mode: VolumeMode,
    pub voxel_size: f64,
    /// Extent of the active voxels, in voxels.
    pub grid_dimensions: [u32; 3],
    pub active_voxels: usize,
    pub input_vertices: usize,
    pub input_faces: usize,
    /// Input vertices no face referenced; excluded from the bounding box.
    pub unreferenced_input_vertices: usize,
    pub degenerate_input_faces: usize,
    pub vertices_before_cleanup: usize,
    pub vertices_after_cleanup: usize,
    pub faces: usize,
}

/// Remeshed surface and its report.
#[derive(Debug, Clone)]
pub struct RemeshOutput {
    pub mesh: TriMesh,
    pub report: RemeshReport,
}

// =============================================================================
// REMESHER
// =============================================================================

/// Runs the full mesh to volume to mesh conversion.
#[derive(Debug, Clone)]
pub struct Remesher {
    params: RemeshParams,
    executor: Executor,
}

impl Remesher {
    pub fn new(params: RemeshParams, executor: Executor) -> Self {
        Self { params, executor }
    }

    pub fn params(&self) -> &RemeshParams {
        &self.params
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Remeshes `mesh`.
    ///
    /// The voxel size is measured on the referenced vertices only, so
    /// stray points in the input do not coarsen the result.
    ///
    /// # Errors
    ///
    /// - [`RemeshError::Input`] for invalid parameters or face indices
    /// - [`RemeshError::Precondition`] for an empty mesh or a zero-size
    ///   bounding box
    /// - [`RemeshError::Worker`] if a parallel pass fails
    pub fn run(&self, mesh: &TriMesh) -> Result<RemeshOutput, RemeshError> {
        let params = &self.params;
        let config = params.validate()?;
        if mesh.is_degenerate_input() {
            return Err(RemeshError::precondition(format!(
                "input mesh is empty ({} vertices, {} faces)",
                mesh.vertex_count(),
                mesh.face_count()
            )));
        }
        mesh.validate()
            .map_err(|err| RemeshError::input(err.to_string()))?;
        let input_vertices = mesh.vertex_count();

        let mut input = mesh.clone();
        let unreferenced_input_vertices = input.remove_unreferenced_vertices();
        if unreferenced_input_vertices > 0 {
            info!("Removed {unreferenced_input_vertices} unreferenced input vertices");
        }
        let mesh = &input;
        let degenerate_input_faces = mesh.degenerate_face_count();
        if degenerate_input_faces > 0 {
            warn!("Input has {degenerate_input_faces} zero-area faces");
        }

        let voxel_size = params.voxel_size(mesh.bbox_diagonal());
        info!(
            "Remeshing {} vertices / {} faces (area {:.6}): voxel size {:.6} ({}% of diagonal), {:?} mode",
            mesh.vertex_count(),
            mesh.face_count(),
            mesh.surface_area(),
            voxel_size,
            config.target_length_percent,
            params.mode
        );

        let mut builder = VolumetricBuilder::new(&self.executor);
        match params.mode {
            VolumeMode::LevelSet => {
                builder.mesh_to_level_set(mesh, voxel_size, params.isovalue)?;
            }
            VolumeMode::WindingNumber => {
                let oracle = WindingNumber::init(mesh, params.winding_order)?;
                info!(
                    "Winding-number oracle ready: {} nodes, order {}",
                    oracle.node_count(),
                    oracle.order()
                );
                let oracle_params = OracleParams {
                    oracle: &oracle,
                    accuracy_scale: config.accuracy_scale,
                };
                builder.mesh_to_volume(mesh, voxel_size, params.isovalue, oracle_params)?;
            }
        }

        let (grid_dimensions, active_voxels) = builder
            .grid()
            .map(|grid| (grid.dimensions(), grid.active_voxel_count()))
            .unwrap_or_default();
        info!(
            "Grid: {} active voxels, {:?} voxels",
            active_voxels, grid_dimensions
        );

        let mut out = TriMesh::new();
        volume_to_mesh(
            builder.grid(),
            params.isovalue,
            params.adaptivity,
            &self.executor,
            &mut out,
        )?;
        let vertices_before_cleanup = out.vertex_count();
        let removed = out.remove_unreferenced_vertices();
        info!(
            "Extracted {} faces, {} vertices ({} unreferenced removed)",
            out.face_count(),
            out.vertex_count(),
            removed
        );

        let report = RemeshReport {
            mode: params.mode,
            voxel_size,
            grid_dimensions,
            active_voxels,
            input_vertices,
            input_faces: mesh.face_count(),
            unreferenced_input_vertices,
            degenerate_input_faces,
            vertices_before_cleanup,
            vertices_after_cleanup: out.vertex_count(),
            faces: out.face_count(),
        };
        Ok(RemeshOutput { mesh: out, report })
    }
}

#[cfg(test)]
mod tests;

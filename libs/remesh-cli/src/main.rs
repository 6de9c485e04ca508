//! voxremesh - rebuild a triangle mesh through a winding-number volume
//!
//! ```text
//! voxremesh input.obj --output remesh.obj --target-length-percent 1.2
//! voxremesh input.obj --level-set --isovalue 0.01 --report run.json
//! voxremesh input.obj --winding-test samples.ply
//! ```
//!
//! Log output is controlled with `RUST_LOG` (default `info`); the worker
//! count with `--threads` or `VOXREMESH_NUM_THREADS`.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use config::constants::{
    DEFAULT_ACCURACY_SCALE, DEFAULT_ADAPTIVITY, DEFAULT_ISOVALUE, DEFAULT_MONTE_CARLO_SAMPLES,
    DEFAULT_OUTPUT_PATH, DEFAULT_TARGET_LENGTH_PERCENT, DEFAULT_WINDING_ORDER,
    MONTE_CARLO_OFFSET_FRACTION,
};
use log::info;
use remesh_core::{sample_inside_outside, RemeshParams, RemeshReport, Remesher, VolumeMode};
use remesh_mesh::{edge_manifold_report, io, EdgeReport, TriMesh};
use remesh_parallel::{Executor, ExecutorConfig};
use remesh_winding::{ExpansionOrder, WindingNumber};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "voxremesh")]
#[command(about = "Remesh a triangle mesh through a narrow-band volume", long_about = None)]
struct Cli {
    /// Input Wavefront OBJ mesh
    input: PathBuf,

    /// Output OBJ path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Voxel size as a percentage of the bounding box diagonal
    #[arg(long, default_value_t = DEFAULT_TARGET_LENGTH_PERCENT)]
    target_length_percent: f64,

    /// Isovalue in world units (positive dilates, negative erodes)
    #[arg(long, default_value_t = DEFAULT_ISOVALUE, allow_negative_numbers = true)]
    isovalue: f64,

    /// Quad-merging tolerance in [0, 1]
    #[arg(long, default_value_t = DEFAULT_ADAPTIVITY)]
    adaptivity: f64,

    /// Sign the volume from surface orientation instead of winding numbers
    #[arg(long)]
    level_set: bool,

    /// Multipole order of the winding-number tree (0-2)
    #[arg(long, default_value_t = DEFAULT_WINDING_ORDER)]
    winding_order: u32,

    /// Far-field accuracy scale of winding-number queries (<= 0 is exact)
    #[arg(long, default_value_t = DEFAULT_ACCURACY_SCALE, allow_negative_numbers = true)]
    accuracy_scale: f64,

    /// Worker threads (overrides VOXREMESH_NUM_THREADS)
    #[arg(long)]
    threads: Option<usize>,

    /// Write a PLY point cloud of inside/outside samples
    #[arg(long, value_name = "PLY")]
    winding_test: Option<PathBuf>,

    /// Number of winding-test samples
    #[arg(long, default_value_t = DEFAULT_MONTE_CARLO_SAMPLES)]
    samples: usize,

    /// Random seed of the winding test
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write a JSON run report
    #[arg(long, value_name = "JSON")]
    report: Option<PathBuf>,
}

impl Cli {
    fn params(&self) -> Result<RemeshParams> {
        let order = ExpansionOrder::try_from(self.winding_order)?;
        let mode = if self.level_set {
            VolumeMode::LevelSet
        } else {
            VolumeMode::WindingNumber
        };
        Ok(RemeshParams::default()
            .with_target_length_percent(self.target_length_percent)
            .with_isovalue(self.isovalue)
            .with_adaptivity(self.adaptivity)
            .with_mode(mode)
            .with_winding_order(order)
            .with_accuracy_scale(self.accuracy_scale))
    }
}

/// Contents of `--report`.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    input: &'a Path,
    output: &'a Path,
    params: &'a RemeshParams,
    threads: usize,
    input_edges: EdgeReport,
    output_edges: EdgeReport,
    remesh: &'a RemeshReport,
}

fn winding_test(
    mesh: &TriMesh,
    params: &RemeshParams,
    cli: &Cli,
    path: &Path,
    executor: &Executor,
) -> Result<()> {
    let oracle = WindingNumber::init(mesh, params.winding_order)
        .context("Failed to build winding-number oracle")?;
    let offset = MONTE_CARLO_OFFSET_FRACTION * mesh.bbox_diagonal();
    let cloud = sample_inside_outside(mesh, &oracle, cli.samples, offset, cli.seed, executor)?;
    io::save_point_cloud_ply(&cloud, path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(
        "Winding test: {} of {} samples inside, written to {}",
        cloud.inside_count(),
        cloud.len(),
        path.display()
    );
    Ok(())
}

fn run(cli: &Cli) -> Result<RemeshReport> {
    let params = cli.params()?;
    let mesh = io::load_obj(&cli.input)
        .with_context(|| format!("Failed to load input mesh {}", cli.input.display()))?;
    let input_edges = edge_manifold_report(&mesh);
    info!(
        "Loaded {}: {} vertices, {} faces, {} boundary / {} non-manifold edges",
        cli.input.display(),
        mesh.vertex_count(),
        mesh.face_count(),
        input_edges.boundary,
        input_edges.non_manifold
    );

    let executor = Executor::new(ExecutorConfig::from_env(cli.threads));
    info!("Using {} worker threads", executor.thread_count());

    if let Some(path) = &cli.winding_test {
        winding_test(&mesh, &params, cli, path, &executor)?;
    }

    let output = Remesher::new(params.clone(), executor).run(&mesh)?;
    io::save_obj(&output.mesh, &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    let output_edges = edge_manifold_report(&output.mesh);
    info!(
        "Wrote {}: {} vertices, {} faces, closed manifold: {}",
        cli.output.display(),
        output.mesh.vertex_count(),
        output.mesh.face_count(),
        output_edges.is_oriented_closed_manifold()
    );

    if let Some(path) = &cli.report {
        let summary = RunSummary {
            input: &cli.input,
            output: &cli.output,
            params: &params,
            threads: executor.thread_count(),
            input_edges,
            output_edges,
            remesh: &output.report,
        };
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(output.report)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    run(&cli)?;
    Ok(())
}

//! End-to-end remeshing of unit cubes, clean and damaged.

use approx::assert_relative_eq;
use glam::DVec3;
use remesh_core::{RemeshParams, Remesher, VolumeMode};
use remesh_mesh::{edge_manifold_report, TriMesh};
use remesh_parallel::{Executor, ExecutorConfig};

/// Unit cube with every side split into `n × n` quads, two triangles
/// each. Sides do not share vertices.
fn tessellated_cube(n: u32) -> TriMesh {
    let mut mesh = TriMesh::new();
    let step = 1.0 / f64::from(n);
    for axis in 0..3 {
        let (b, c) = ((axis + 1) % 3, (axis + 2) % 3);
        for side in [-0.5, 0.5] {
            let base = mesh.vertex_count() as u32;
            for j in 0..=n {
                for i in 0..=n {
                    let mut p = DVec3::ZERO;
                    p[axis] = side;
                    p[b] = -0.5 + f64::from(i) * step;
                    p[c] = -0.5 + f64::from(j) * step;
                    mesh.add_vertex(p);
                }
            }
            let at = |i: u32, j: u32| base + j * (n + 1) + i;
            for j in 0..n {
                for i in 0..n {
                    let (p00, p10, p11, p01) = (at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1));
                    if side > 0.0 {
                        mesh.add_face([p00, p10, p11]);
                        mesh.add_face([p00, p11, p01]);
                    } else {
                        mesh.add_face([p00, p11, p10]);
                        mesh.add_face([p00, p01, p11]);
                    }
                }
            }
        }
    }
    mesh
}

/// Target length percent giving `voxel_size` on a unit cube.
fn percent_for_voxel(voxel_size: f64) -> f64 {
    voxel_size * 100.0 / 3f64.sqrt()
}

fn parallel() -> Executor {
    Executor::new(ExecutorConfig::with_threads(4))
}

#[test]
fn test_level_set_cube_round_trip_is_closed_with_unit_volume() {
    let cube = TriMesh::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5));
    let params = RemeshParams::default()
        .with_target_length_percent(percent_for_voxel(0.01))
        .with_mode(VolumeMode::LevelSet);
    let output = Remesher::new(params, parallel()).run(&cube).unwrap();

    assert_relative_eq!(output.report.voxel_size, 0.01, epsilon = 1e-12);
    assert!(edge_manifold_report(&output.mesh).is_oriented_closed_manifold());
    assert_relative_eq!(output.mesh.signed_volume(), 1.0, max_relative = 0.02);
}

#[test]
fn test_winding_mode_closes_a_small_hole() {
    // Drop one corner triangle from the -X side
    let cube = tessellated_cube(10);
    let faces: Vec<[u32; 3]> = cube.faces()[1..].to_vec();
    let cube = TriMesh::from_parts(cube.vertices().to_vec(), faces).unwrap();

    let params = RemeshParams::default().with_target_length_percent(percent_for_voxel(0.04));
    let output = Remesher::new(params, parallel()).run(&cube).unwrap();

    assert!(edge_manifold_report(&output.mesh).is_oriented_closed_manifold());
    assert_relative_eq!(output.mesh.signed_volume(), 1.0, max_relative = 0.03);
}

#[test]
fn test_winding_mode_ignores_duplicated_and_flipped_faces() {
    let cube = TriMesh::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5));
    let mut doubled = cube.faces().to_vec();
    doubled.extend_from_slice(cube.faces());
    let doubled = TriMesh::from_parts(cube.vertices().to_vec(), doubled).unwrap();
    let flipped: Vec<[u32; 3]> = cube.faces().iter().map(|&[a, b, c]| [a, c, b]).collect();
    let flipped = TriMesh::from_parts(cube.vertices().to_vec(), flipped).unwrap();

    let remesher = Remesher::new(
        RemeshParams::default().with_target_length_percent(percent_for_voxel(0.05)),
        parallel(),
    );
    let reference = remesher.run(&cube).unwrap().mesh;
    assert_relative_eq!(reference.signed_volume(), 1.0, max_relative = 0.04);
    assert_eq!(remesher.run(&doubled).unwrap().mesh, reference);
    assert_eq!(remesher.run(&flipped).unwrap().mesh, reference);
}

#[test]
fn test_thread_count_does_not_change_output() {
    let cube = tessellated_cube(4);
    let params = RemeshParams::default()
        .with_target_length_percent(percent_for_voxel(0.05))
        .with_adaptivity(0.1);

    let serial = Remesher::new(params.clone(), Executor::new(ExecutorConfig::serial()))
        .run(&cube)
        .unwrap();
    let threaded = Remesher::new(
        params,
        Executor::new(ExecutorConfig::with_threads(4).with_min_parallel(0)),
    )
    .run(&cube)
    .unwrap();
    assert_eq!(serial.mesh, threaded.mesh);
    assert_eq!(serial.report, threaded.report);
}

#[test]
fn test_zero_size_mesh_fails_before_grid_work() {
    let mesh = TriMesh::from_parts(vec![DVec3::ONE; 3], vec![[0, 1, 2]]).unwrap();
    let err = Remesher::new(RemeshParams::default(), parallel())
        .run(&mesh)
        .unwrap_err();
    assert!(err.is_precondition());
}

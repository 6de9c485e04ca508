use super::*;
use approx::assert_relative_eq;
use glam::DVec3;
use remesh_mesh::edge_manifold_report;
use remesh_parallel::ExecutorConfig;

fn unit_cube() -> TriMesh {
    TriMesh::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5))
}

fn remesher(params: RemeshParams) -> Remesher {
    Remesher::new(params, Executor::new(ExecutorConfig::with_threads(2)))
}

#[test]
fn test_default_params() {
    let params = RemeshParams::default();
    assert_eq!(params.target_length_percent, 1.2);
    assert_eq!(params.isovalue, 0.0);
    assert_eq!(params.adaptivity, 0.0);
    assert_eq!(params.mode, VolumeMode::WindingNumber);
    assert_eq!(params.winding_order, ExpansionOrder::Second);
    assert_eq!(params.accuracy_scale, 2.0);
}

#[test]
fn test_params_from_partial_json() {
    let params: RemeshParams =
        serde_json::from_str(r#"{ "isovalue": 0.5, "mode": "level_set", "winding_order": 1 }"#)
            .unwrap();
    assert_eq!(params.isovalue, 0.5);
    assert_eq!(params.mode, VolumeMode::LevelSet);
    assert_eq!(params.winding_order, ExpansionOrder::First);
    assert_eq!(params.target_length_percent, 1.2);

    let bad = serde_json::from_str::<RemeshParams>(r#"{ "winding_order": 5 }"#);
    assert!(bad.is_err());
}

#[test]
fn test_voxel_size_from_diagonal() {
    let params = RemeshParams::default().with_target_length_percent(2.0);
    assert_relative_eq!(params.voxel_size(50.0), 1.0);
}

#[test]
fn test_invalid_params_are_input_errors() {
    for params in [
        RemeshParams::default().with_target_length_percent(0.0),
        RemeshParams::default().with_target_length_percent(f64::INFINITY),
        RemeshParams::default().with_accuracy_scale(f64::NAN),
        RemeshParams::default().with_isovalue(f64::NAN),
    ] {
        let err = remesher(params).run(&unit_cube()).unwrap_err();
        assert!(matches!(err, RemeshError::Input { .. }), "{err}");
    }
}

#[test]
fn test_empty_mesh_is_precondition() {
    let err = remesher(RemeshParams::default())
        .run(&TriMesh::new())
        .unwrap_err();
    assert!(err.is_precondition());
}

#[test]
fn test_collapsed_mesh_is_precondition() {
    let point = DVec3::new(1.0, 2.0, 3.0);
    let mesh = TriMesh::from_parts(vec![point; 3], vec![[0, 1, 2]]).unwrap();
    for mode in [VolumeMode::WindingNumber, VolumeMode::LevelSet] {
        let err = remesher(RemeshParams::default().with_mode(mode))
            .run(&mesh)
            .unwrap_err();
        assert!(err.is_precondition(), "{err}");
    }
}

#[test]
fn test_level_set_run_reports() {
    let params = RemeshParams::default()
        .with_target_length_percent(5.0)
        .with_mode(VolumeMode::LevelSet);
    let output = remesher(params).run(&unit_cube()).unwrap();
    let report = &output.report;

    assert_eq!(report.mode, VolumeMode::LevelSet);
    assert_relative_eq!(report.voxel_size, 0.05 * 3f64.sqrt());
    assert_eq!(report.input_faces, 12);
    assert!(report.active_voxels > 0);
    assert!(report.grid_dimensions.iter().all(|&d| d > 10));
    assert_eq!(report.faces, output.mesh.face_count());
    assert_eq!(report.vertices_after_cleanup, output.mesh.vertex_count());
    assert!(report.vertices_after_cleanup <= report.vertices_before_cleanup);

    assert!(edge_manifold_report(&output.mesh).is_oriented_closed_manifold());
    assert!(output.mesh.signed_volume() > 0.9);
}

#[test]
fn test_winding_run_matches_level_set_on_closed_input() {
    let params = RemeshParams::default().with_target_length_percent(5.0);
    let winding = remesher(params.clone()).run(&unit_cube()).unwrap();
    let level_set = remesher(params.with_mode(VolumeMode::LevelSet))
        .run(&unit_cube())
        .unwrap();

    assert_eq!(winding.mesh.face_count(), level_set.mesh.face_count());
    assert_relative_eq!(
        winding.mesh.signed_volume(),
        level_set.mesh.signed_volume(),
        epsilon = 1e-9
    );
}

#[test]
fn test_report_serializes() {
    let params = RemeshParams::default().with_target_length_percent(10.0);
    let output = remesher(params).run(&unit_cube()).unwrap();
    let json = serde_json::to_value(&output.report).unwrap();
    assert_eq!(json["mode"], "winding_number");
    assert_eq!(json["faces"], output.mesh.face_count());
}

#[test]
fn test_unreferenced_input_vertex_does_not_change_voxel_size() {
    let cube = unit_cube();
    let mut stray = cube.clone();
    stray.add_vertex(DVec3::splat(100.0));

    let params = RemeshParams::default().with_target_length_percent(5.0);
    let clean = remesher(params.clone()).run(&cube).unwrap();
    let output = remesher(params).run(&stray).unwrap();

    assert_relative_eq!(output.report.voxel_size, 0.05 * 3f64.sqrt());
    assert_eq!(output.report.input_vertices, 9);
    assert_eq!(output.report.unreferenced_input_vertices, 1);
    assert_eq!(clean.report.unreferenced_input_vertices, 0);
    assert_eq!(output.mesh, clean.mesh);
}

#[test]
fn test_report_counts_zero_area_faces() {
    let cube = unit_cube();
    let mut faces = cube.faces().to_vec();
    faces.push([0, 1, 1]);
    let mesh = TriMesh::from_parts(cube.vertices().to_vec(), faces).unwrap();

    let params = RemeshParams::default().with_target_length_percent(10.0);
    let output = remesher(params).run(&mesh).unwrap();
    assert_eq!(output.report.degenerate_input_faces, 1);
    assert_eq!(output.report.input_faces, 13);
}

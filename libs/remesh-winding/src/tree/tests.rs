use super::*;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use remesh_mesh::TriMesh;
use remesh_parallel::ExecutorConfig;

/// Unit cube centred at the origin with every side split into `n × n`
/// quads.
fn tessellated_cube(n: usize) -> TriMesh {
    let mut mesh = TriMesh::new();
    let step = 1.0 / n as f64;
    // (normal, u, v) with u × v == normal
    let sides = [
        (DVec3::X, DVec3::Y, DVec3::Z),
        (-DVec3::X, DVec3::Z, DVec3::Y),
        (DVec3::Y, DVec3::Z, DVec3::X),
        (-DVec3::Y, DVec3::X, DVec3::Z),
        (DVec3::Z, DVec3::X, DVec3::Y),
        (-DVec3::Z, DVec3::Y, DVec3::X),
    ];
    for (normal, u, v) in sides {
        let base = mesh.vertex_count() as u32;
        for j in 0..=n {
            for i in 0..=n {
                let s = -0.5 + i as f64 * step;
                let t = -0.5 + j as f64 * step;
                mesh.add_vertex(normal * 0.5 + u * s + v * t);
            }
        }
        let row = (n + 1) as u32;
        for j in 0..n as u32 {
            for i in 0..n as u32 {
                let a = base + j * row + i;
                let b = a + 1;
                let c = a + row + 1;
                let d = a + row;
                mesh.add_face([a, b, c]);
                mesh.add_face([a, c, d]);
            }
        }
    }
    mesh
}

fn unit_cube() -> TriMesh {
    TriMesh::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5))
}

#[test]
fn test_tessellated_cube_faces_outward() {
    let mesh = tessellated_cube(4);
    assert_relative_eq!(mesh.signed_volume(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_cube_centroid_and_far_point() {
    for order in [ExpansionOrder::Dipole, ExpansionOrder::First, ExpansionOrder::Second] {
        let oracle = WindingNumber::init(&unit_cube(), order).unwrap();
        assert_relative_eq!(oracle.query(DVec3::ZERO, 2.0), 1.0, epsilon = 1e-3);
        assert!(oracle.query(DVec3::new(10.0, 0.0, 0.0), 2.0).abs() < 1e-3);
        assert!(oracle.is_inside(DVec3::ZERO, 2.0));
        assert!(!oracle.is_inside(DVec3::new(10.0, 0.0, 0.0), 2.0));
    }
}

#[test]
fn test_exact_evaluation() {
    let oracle = WindingNumber::init(&tessellated_cube(6), ExpansionOrder::Second).unwrap();
    assert_relative_eq!(oracle.query(DVec3::new(0.1, -0.2, 0.3), 0.0), 1.0, epsilon = 1e-10);
    assert!(oracle.query(DVec3::new(0.1, -0.2, 1.3), 0.0).abs() < 1e-10);
    assert!(oracle.query(DVec3::new(0.1, -0.2, 1.3), -1.0).abs() < 1e-10);
}

#[test]
fn test_far_field_matches_exact() {
    let oracle = WindingNumber::init(&tessellated_cube(10), ExpansionOrder::Second).unwrap();
    assert!(oracle.node_count() > 1);

    let mut rng = StdRng::seed_from_u64(7);
    let mut checked = 0;
    while checked < 200 {
        let p = DVec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        // Keep clear of the surface, where the exact value jumps
        let surface_gap = (p.abs() - DVec3::splat(0.5)).abs().min_element();
        if surface_gap < 0.05 {
            continue;
        }
        let exact = oracle.query(p, 0.0);
        let fast = oracle.query(p, 2.0);
        assert!((exact - fast).abs() < 0.05, "at {p}: exact {exact}, fast {fast}");
        assert_eq!(oracle.is_inside(p, 0.0), oracle.is_inside(p, 2.0));
        checked += 1;
    }
}

#[test]
fn test_open_cube_is_still_inside() {
    let cube = unit_cube();
    let faces = cube.faces()[2..].to_vec();
    let open = TriMesh::from_parts(cube.vertices().to_vec(), faces).unwrap();
    let oracle = WindingNumber::init(&open, ExpansionOrder::Second).unwrap();

    // Five of six sides visible from the centre
    assert_relative_eq!(oracle.query(DVec3::ZERO, 0.0), 5.0 / 6.0, epsilon = 1e-10);
    assert!(oracle.is_inside(DVec3::ZERO, 2.0));
}

#[test]
fn test_inverted_cube_is_inside_by_magnitude() {
    let cube = unit_cube();
    let faces = cube.faces().iter().map(|&[a, b, c]| [a, c, b]).collect();
    let inverted = TriMesh::from_parts(cube.vertices().to_vec(), faces).unwrap();
    let oracle = WindingNumber::init(&inverted, ExpansionOrder::Second).unwrap();

    assert_relative_eq!(oracle.query(DVec3::ZERO, 2.0), -1.0, epsilon = 1e-9);
    assert!(oracle.is_inside(DVec3::ZERO, 2.0));
}

#[test]
fn test_empty_mesh_is_rejected() {
    let err = WindingNumber::init(&TriMesh::new(), ExpansionOrder::Second).unwrap_err();
    assert!(matches!(err, WindingError::EmptyMesh { vertices: 0, faces: 0 }));

    let mut points_only = TriMesh::new();
    points_only.add_vertex(DVec3::ZERO);
    let err = WindingNumber::init(&points_only, ExpansionOrder::Second).unwrap_err();
    assert!(matches!(err, WindingError::EmptyMesh { vertices: 1, faces: 0 }));
}

#[test]
fn test_bad_index_is_rejected() {
    let mut mesh = TriMesh::new();
    mesh.add_vertex(DVec3::ZERO);
    mesh.add_vertex(DVec3::X);
    mesh.add_face([0, 1, 2]);
    let err = WindingNumber::init(&mesh, ExpansionOrder::Second).unwrap_err();
    assert!(matches!(err, WindingError::IndexOutOfBounds { face: 0, index: 2, .. }));
}

#[test]
fn test_batch_matches_serial_queries() {
    let oracle = WindingNumber::init(&tessellated_cube(5), ExpansionOrder::Second).unwrap();
    let points: Vec<DVec3> = (0..3000)
        .map(|i| {
            let t = i as f64 / 3000.0;
            DVec3::new(t * 2.0 - 1.0, (t * 13.0).sin() * 0.8, (t * 7.0).cos() * 0.8)
        })
        .collect();

    let serial: Vec<f64> = points.iter().map(|&p| oracle.query(p, 2.0)).collect();
    let executor = Executor::new(ExecutorConfig::with_threads(4).with_min_parallel(0));
    let batched = oracle.query_batch(&points, 2.0, &executor).unwrap();
    assert_eq!(serial, batched);

    let single = Executor::new(ExecutorConfig::serial());
    assert_eq!(oracle.query_batch(&points, 2.0, &single).unwrap(), serial);
}

#[test]
fn test_oracle_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WindingNumber>();
}

#[test]
fn test_order_is_recorded() {
    let oracle = WindingNumber::init(&unit_cube(), ExpansionOrder::First).unwrap();
    assert_eq!(oracle.order(), ExpansionOrder::First);
    assert_eq!(oracle.face_count(), 12);
}

//! Winding numbers of the unit cube through the public API.

use glam::DVec3;
use remesh_mesh::TriMesh;
use remesh_parallel::{Executor, ExecutorConfig};
use remesh_winding::{ExpansionOrder, WindingError, WindingNumber};

#[test]
fn test_unit_cube_inside_and_outside() {
    let cube = TriMesh::cuboid(DVec3::ZERO, DVec3::ONE);
    let oracle = WindingNumber::init(&cube, ExpansionOrder::try_from(2).unwrap()).unwrap();

    let centroid = DVec3::splat(0.5);
    assert!((oracle.query(centroid, 2.0).abs() - 1.0).abs() < 1e-6);
    assert!(oracle.query(centroid + DVec3::new(10.0, 0.0, 0.0), 2.0).abs() < 1e-6);
}

#[test]
fn test_distributed_queries_match_serial() {
    let cube = TriMesh::cuboid(DVec3::ZERO, DVec3::ONE);
    let oracle = WindingNumber::init(&cube, ExpansionOrder::Second).unwrap();
    let points: Vec<DVec3> = (0..5000)
        .map(|i| DVec3::new(i as f64 * 3e-4 - 0.25, 0.5, 0.5 + (i % 7) as f64 * 0.1))
        .collect();

    let executor = Executor::new(ExecutorConfig::with_threads(3).with_min_parallel(100));
    let parallel = oracle.query_batch(&points, 2.0, &executor).unwrap();
    for (p, w) in points.iter().zip(&parallel) {
        assert_eq!(*w, oracle.query(*p, 2.0));
    }
}

#[test]
fn test_invalid_order_is_rejected() {
    assert!(matches!(
        ExpansionOrder::try_from(3),
        Err(WindingError::InvalidOrder(3))
    ));
}

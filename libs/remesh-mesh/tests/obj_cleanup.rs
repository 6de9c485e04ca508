//! Integration tests for loading, cleaning and re-saving meshes.

use glam::DVec3;
use remesh_mesh::io::{load_obj, save_obj};
use remesh_mesh::{edge_manifold_report, TriMesh};

#[test]
fn test_cleanup_then_roundtrip() {
    let cube = TriMesh::cuboid(DVec3::ZERO, DVec3::ONE);
    let mut vertices = vec![DVec3::splat(42.0)];
    vertices.extend_from_slice(cube.vertices());
    vertices.push(DVec3::splat(-42.0));
    let faces = cube
        .faces()
        .iter()
        .map(|&[a, b, c]| [a + 1, b + 1, c + 1])
        .collect();
    let mut padded = TriMesh::from_parts(vertices, faces).unwrap();

    assert_eq!(padded.remove_unreferenced_vertices(), 2);
    assert_eq!(padded, cube);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.obj");
    save_obj(&padded, &path).unwrap();
    let loaded = load_obj(&path).unwrap();

    assert_eq!(loaded.vertex_count(), 8);
    assert!(edge_manifold_report(&loaded).is_oriented_closed_manifold());
    assert!((loaded.signed_volume() - 1.0).abs() < 1e-12);
}

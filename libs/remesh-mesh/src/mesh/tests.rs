use super::*;
use approx::assert_relative_eq;

fn triangle() -> TriMesh {
    let mut mesh = TriMesh::new();
    mesh.add_vertex(DVec3::ZERO);
    mesh.add_vertex(DVec3::X);
    mesh.add_vertex(DVec3::Y);
    mesh.add_face([0, 1, 2]);
    mesh
}

#[test]
fn test_mesh_new() {
    let mesh = TriMesh::new();
    assert!(mesh.is_empty());
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.face_count(), 0);
    assert!(mesh.is_degenerate_input());
}

#[test]
fn test_mesh_add_vertex_and_face() {
    let mesh = triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.face(0), [0, 1, 2]);
    assert_eq!(mesh.vertex(1), DVec3::X);
    assert_relative_eq!(mesh.triangle_area(0), 0.5);
}

#[test]
fn test_from_parts_rejects_bad_index() {
    let err = TriMesh::from_parts(vec![DVec3::ZERO, DVec3::X], vec![[0, 1, 5]]).unwrap_err();
    match err {
        MeshError::IndexOutOfBounds {
            face,
            index,
            vertex_count,
        } => {
            assert_eq!(face, 0);
            assert_eq!(index, 5);
            assert_eq!(vertex_count, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_cuboid_geometry() {
    let mesh = TriMesh::cuboid(DVec3::ZERO, DVec3::new(2.0, 3.0, 4.0));
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 12);
    assert_relative_eq!(mesh.signed_volume(), 24.0, epsilon = 1e-12);
    assert_relative_eq!(mesh.surface_area(), 52.0, epsilon = 1e-12);
    assert_eq!(mesh.degenerate_face_count(), 0);
}

#[test]
fn test_reversed_cuboid_has_negative_volume() {
    let cube = TriMesh::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5));
    let faces = cube.faces().iter().map(|&[a, b, c]| [c, b, a]).collect();
    let flipped = TriMesh::from_parts(cube.vertices().to_vec(), faces).unwrap();
    assert_relative_eq!(flipped.signed_volume(), -1.0, epsilon = 1e-12);
}

#[test]
fn test_bounding_box_and_diagonal() {
    let mesh = TriMesh::cuboid(DVec3::splat(-1.0), DVec3::splat(1.0));
    let (min, max) = mesh.bounding_box();
    assert_eq!(min, DVec3::splat(-1.0));
    assert_eq!(max, DVec3::splat(1.0));
    assert_relative_eq!(mesh.bbox_diagonal(), 12.0f64.sqrt());
    assert_eq!(TriMesh::new().bounding_box(), (DVec3::ZERO, DVec3::ZERO));
}

#[test]
fn test_degenerate_face_is_counted() {
    let mut mesh = triangle();
    mesh.add_vertex(DVec3::new(2.0, 0.0, 0.0));
    mesh.add_face([0, 1, 3]);
    assert_eq!(mesh.degenerate_face_count(), 1);
}

#[test]
fn test_remove_unreferenced_vertices() {
    let mut mesh = TriMesh::new();
    mesh.add_vertex(DVec3::splat(9.0)); // unused
    mesh.add_vertex(DVec3::ZERO);
    mesh.add_vertex(DVec3::splat(7.0)); // unused
    mesh.add_vertex(DVec3::X);
    mesh.add_vertex(DVec3::Y);
    mesh.add_face([1, 3, 4]);

    assert_eq!(mesh.remove_unreferenced_vertices(), 2);
    assert_eq!(mesh.vertices(), &[DVec3::ZERO, DVec3::X, DVec3::Y]);
    assert_eq!(mesh.faces(), &[[0, 1, 2]]);
    assert_eq!(mesh.remove_unreferenced_vertices(), 0);
}

#[test]
fn test_sink_clear_and_fill() {
    let mut mesh = TriMesh::cuboid(DVec3::ZERO, DVec3::ONE);
    MeshSink::clear(&mut mesh);
    assert!(mesh.is_empty());
    assert_eq!(mesh.face_count(), 0);

    let a = mesh.push_vertex(DVec3::ZERO);
    let b = mesh.push_vertex(DVec3::X);
    let c = mesh.push_vertex(DVec3::Z);
    mesh.push_face([a, b, c]);
    assert_eq!(mesh.faces(), &[[0, 1, 2]]);
}

//! Mesh to grid to mesh round trips on an octahedron.

use std::collections::HashMap;

use glam::DVec3;
use remesh_parallel::{Executor, ExecutorConfig};
use remesh_volume::{mesh_to_level_set, mesh_to_volume, volume_to_mesh, Transform, TriangleSoup};

fn octahedron() -> (Vec<DVec3>, Vec<[u32; 3]>) {
    let points = vec![
        DVec3::X,
        DVec3::NEG_X,
        DVec3::Y,
        DVec3::NEG_Y,
        DVec3::Z,
        DVec3::NEG_Z,
    ];
    let mut triangles = Vec::new();
    for sx in [1.0, -1.0] {
        for sy in [1.0, -1.0] {
            for sz in [1.0_f64, -1.0] {
                let pick = |s: f64, base: u32| if s > 0.0 { base } else { base + 1 };
                let (a, b, c) = (pick(sx, 0), pick(sy, 2), pick(sz, 4));
                if sx * sy * sz > 0.0 {
                    triangles.push([a, b, c]);
                } else {
                    triangles.push([a, c, b]);
                }
            }
        }
    }
    (points, triangles)
}

fn inside_octahedron(p: DVec3) -> bool {
    p.abs().element_sum() < 1.0
}

#[test]
fn test_level_set_round_trip_preserves_volume() {
    let (points, triangles) = octahedron();
    let transform = Transform::new(0.05).unwrap();
    let executor = Executor::new(ExecutorConfig::with_threads(4));

    let grid = mesh_to_level_set(&transform, &points, &triangles, 1.0, &executor).unwrap();
    let soup = volume_to_mesh(&grid, 0.0, 0.0, &executor).unwrap();

    let volume: f64 = soup
        .triangles
        .iter()
        .map(|t| {
            let [a, b, c] = t.map(|i| soup.points[i as usize]);
            a.dot(b.cross(c)) / 6.0
        })
        .sum();
    let expected = 4.0 / 3.0;
    assert!(
        (volume.abs() - expected).abs() / expected < 0.05,
        "volume {volume}"
    );

    let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
    for t in &soup.triangles {
        for k in 0..3 {
            let (a, b) = (t[k], t[(k + 1) % 3]);
            *edges.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }
    assert!(edges.values().all(|&n| n == 2));
}

#[test]
fn test_winding_signed_volume_matches_level_set_on_closed_input() {
    let (points, triangles) = octahedron();
    let transform = Transform::new(0.05).unwrap();
    let executor = Executor::new(ExecutorConfig::serial());

    let level_set = mesh_to_level_set(&transform, &points, &triangles, 1.0, &executor).unwrap();

    let index_points: Vec<DVec3> = points.iter().map(|&p| transform.world_to_index(p)).collect();
    let soup = TriangleSoup::new(&index_points, &triangles).unwrap();
    let volume = mesh_to_volume(
        &soup,
        &transform,
        1.0,
        1.0,
        &inside_octahedron,
        &executor,
    )
    .unwrap();

    assert_eq!(level_set.active_voxel_count(), volume.active_voxel_count());
    for (coord, value, active) in level_set.voxels() {
        if active {
            assert_eq!(volume.probe(coord), Some(value), "voxel {coord:?}");
        }
    }
}

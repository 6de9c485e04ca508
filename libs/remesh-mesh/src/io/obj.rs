//! Wavefront OBJ reading and writing.
//!
//! Only `v` and `f` records are interpreted. Face corners may use the
//! `v`, `v/vt`, `v//vn` or `v/vt/vn` forms and negative (relative)
//! indices; polygons are fan-triangulated.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use glam::DVec3;
use log::debug;

use super::open;
use crate::error::MeshError;
use crate::mesh::{MeshLike, TriMesh};

/// Load a triangle mesh from an OBJ file.
///
/// # Errors
///
/// Returns [`MeshError::FileNotFound`] if the path does not exist,
/// [`MeshError::Parse`] for malformed records and
/// [`MeshError::IndexOutOfBounds`] if a face references a missing vertex.
///
/// # Example
///
/// ```no_run
/// use remesh_mesh::io::load_obj;
///
/// let mesh = load_obj("bunny.obj").unwrap();
/// println!("Loaded {} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<TriMesh, MeshError> {
    let path = path.as_ref();
    let mesh = read_obj(BufReader::new(open(path)?))?;
    debug!(
        "Loaded {} vertices, {} faces from {}",
        mesh.vertex_count(),
        mesh.face_count(),
        path.display()
    );
    Ok(mesh)
}

/// Parses OBJ text from any buffered reader.
pub fn read_obj<R: BufRead>(reader: R) -> Result<TriMesh, MeshError> {
    let mut vertices: Vec<DVec3> = Vec::new();
    let mut faces: Vec<[u32; 3]> = Vec::new();
    let mut corners: Vec<u32> = Vec::with_capacity(8);

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = number + 1;
        let content = line.split('#').next().unwrap_or_default();
        let mut tokens = content.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let mut coords = [0.0f64; 3];
                for coord in &mut coords {
                    let token = tokens
                        .next()
                        .ok_or_else(|| MeshError::parse(line_no, "vertex needs three coordinates"))?;
                    *coord = token.parse().map_err(|_| {
                        MeshError::parse(line_no, format!("invalid coordinate '{token}'"))
                    })?;
                }
                vertices.push(DVec3::from_array(coords));
            }
            Some("f") => {
                corners.clear();
                for token in tokens {
                    corners.push(parse_corner(token, vertices.len(), line_no)?);
                }
                if corners.len() < 3 {
                    return Err(MeshError::parse(line_no, "face needs at least three vertices"));
                }
                for k in 1..corners.len() - 1 {
                    faces.push([corners[0], corners[k], corners[k + 1]]);
                }
            }
            _ => {}
        }
    }

    TriMesh::from_parts(vertices, faces)
}

/// Resolves one face corner to a 0-based vertex index.
fn parse_corner(token: &str, vertex_count: usize, line_no: usize) -> Result<u32, MeshError> {
    let raw = token.split('/').next().unwrap_or_default();
    let index: i64 = raw
        .parse()
        .map_err(|_| MeshError::parse(line_no, format!("invalid face index '{token}'")))?;

    let resolved = match index {
        0 => return Err(MeshError::parse(line_no, "face index 0 is not valid")),
        i if i > 0 => i - 1,
        i => vertex_count as i64 + i,
    };
    u32::try_from(resolved)
        .map_err(|_| MeshError::parse(line_no, format!("face index '{token}' out of range")))
}

/// Writes a mesh as OBJ text.
pub fn write_obj<W: Write>(mesh: &impl MeshLike, writer: &mut W) -> Result<(), MeshError> {
    for i in 0..mesh.vertex_count() {
        let p = mesh.position(i);
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for i in 0..mesh.face_count() {
        let [a, b, c] = mesh.face(i);
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

/// Save a mesh as an OBJ file, replacing any existing file.
pub fn save_obj<P: AsRef<Path>>(mesh: &impl MeshLike, path: P) -> Result<(), MeshError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    debug!(
        "Saved {} vertices, {} faces to {}",
        mesh.vertex_count(),
        mesh.face_count(),
        path.display()
    );
    Ok(())
}

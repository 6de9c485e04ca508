//! Coloured PLY point-cloud export.
//!
//! Inside points are written green, outside points red.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;

use crate::cloud::PointCloud;
use crate::error::MeshError;

const INSIDE_COLOR: [u8; 3] = [0, 255, 0];
const OUTSIDE_COLOR: [u8; 3] = [255, 0, 0];

/// Save a classified point cloud as ASCII PLY.
///
/// # Example
///
/// ```no_run
/// use glam::DVec3;
/// use remesh_mesh::{io::save_point_cloud_ply, PointCloud};
///
/// let mut cloud = PointCloud::default();
/// cloud.push(DVec3::ZERO, true);
/// save_point_cloud_ply(&cloud, "montecarlo.ply").unwrap();
/// ```
pub fn save_point_cloud_ply<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> Result<(), MeshError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_point_cloud_ply(cloud, &mut writer)?;
    writer.flush()?;
    debug!(
        "Saved {} points ({} inside) to {}",
        cloud.len(),
        cloud.inside_count(),
        path.display()
    );
    Ok(())
}

/// Writes a classified point cloud as ASCII PLY to any writer.
pub fn write_point_cloud_ply<W: Write>(cloud: &PointCloud, writer: &mut W) -> Result<(), MeshError> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header
        .comments
        .push("winding number inside/outside samples".to_string());

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for axis in ["x", "y", "z"] {
        vertex_def.properties.add(PropertyDef::new(
            axis.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    for channel in ["red", "green", "blue"] {
        vertex_def.properties.add(PropertyDef::new(
            channel.to_string(),
            PropertyType::Scalar(ScalarType::UChar),
        ));
    }
    vertex_def.count = cloud.len();
    ply.header.elements.add(vertex_def);

    let mut vertex_elements = Vec::with_capacity(cloud.len());
    for (point, &inside) in cloud.points.iter().zip(&cloud.inside) {
        let [r, g, b] = if inside { INSIDE_COLOR } else { OUTSIDE_COLOR };
        let mut element = DefaultElement::new();
        element.insert("x".to_string(), Property::Float(point.x as f32));
        element.insert("y".to_string(), Property::Float(point.y as f32));
        element.insert("z".to_string(), Property::Float(point.z as f32));
        element.insert("red".to_string(), Property::UChar(r));
        element.insert("green".to_string(), Property::UChar(g));
        element.insert("blue".to_string(), Property::UChar(b));
        vertex_elements.push(element);
    }
    ply.payload.insert("vertex".to_string(), vertex_elements);

    Writer::new()
        .write_ply(writer, &mut ply)
        .map_err(|e| MeshError::write(format!("failed to write PLY: {e}")))?;
    Ok(())
}

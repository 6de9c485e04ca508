//! # Mesh I/O
//!
//! File formats at the pipeline boundary.
//!
//! | Format | Read | Write |
//! |--------|------|-------|
//! | Wavefront OBJ | [`load_obj`] | [`save_obj`] |
//! | PLY point cloud (ASCII, coloured) | - | [`save_point_cloud_ply`] |

mod obj;
mod ply;

use std::fs::File;
use std::path::Path;

pub use obj::{load_obj, read_obj, save_obj, write_obj};
pub use ply::{save_point_cloud_ply, write_point_cloud_ply};

use crate::error::MeshError;

/// Opens `path` for reading, mapping a missing file to
/// [`MeshError::FileNotFound`].
fn open(path: &Path) -> Result<File, MeshError> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MeshError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshError::Io(e)
        }
    })
}

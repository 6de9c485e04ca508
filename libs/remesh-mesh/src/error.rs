//! # Mesh Errors
//!
//! Error types for mesh validation and file I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while validating, reading or writing meshes.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A face references a vertex that does not exist
    #[error("Face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Input file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Malformed record in a mesh file
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Encoder failure while writing a file
    #[error("Write failed: {message}")]
    Write { message: String },

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Creates a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Creates a write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

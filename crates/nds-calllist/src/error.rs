use std::path::PathBuf;

/// Errors that can occur while exporting meshes.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode or encode a texture image.
    #[error("Image error for {path}: {message}")]
    Image { path: PathBuf, message: String },

    /// Failed to parse an OBJ mesh file.
    #[error("OBJ parse error for {path}: {message}")]
    ObjParse { path: PathBuf, message: String },

    /// Input validation failed (no meshes, unknown mesh name, etc.).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Two different meshes produce the same C identifier.
    #[error("Identifier collision: {identifier} is produced by both '{mesh_a}' and '{mesh_b}'")]
    IdentifierCollision {
        identifier: String,
        mesh_a: String,
        mesh_b: String,
    },
}

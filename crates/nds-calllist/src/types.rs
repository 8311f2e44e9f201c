use std::fmt;
use std::path::PathBuf;

/// Output representation of a compiled call list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// C header declaring a `u32` array (`.h`).
    #[default]
    Text,
    /// Raw little-endian blob (`.bin`).
    Binary,
}

impl OutputFormat {
    /// File extension, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => ".h",
            OutputFormat::Binary => ".bin",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Binary => f.write_str("binary"),
        }
    }
}

/// User-facing export settings shared by every mesh of one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output directory for `.h`/`.bin`/`.pcx` files.
    pub dir_path: PathBuf,
    pub format: OutputFormat,
    /// Emit NORMAL commands.
    pub normals: bool,
    /// Allow TEXCOORD commands when the mesh has a UV layer.
    pub uvs: bool,
    /// Allow COLOR commands when the mesh has a vertex color layer.
    pub colors: bool,
    /// Write the companion `.pcx` texture when one is bound.
    pub texture: bool,
    /// Normalise positions by the largest bounding extent.
    pub rescale: bool,
    /// Names of meshes to export; empty means all.
    pub meshes: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir_path: PathBuf::new(),
            format: OutputFormat::Text,
            normals: true,
            uvs: true,
            colors: true,
            texture: false,
            rescale: false,
            meshes: Vec::new(),
        }
    }
}

/// Attributes of one face corner, ready to become commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Bottom-up UV as authored (V is flipped when encoded).
    pub uv: Option<[f32; 2]>,
    /// 8-bit RGB as authored (scaled to 5 bits when encoded).
    pub color: Option<[u8; 3]>,
}

/// Files written for one exported mesh.
#[derive(Debug, Clone)]
pub struct ExportedMesh {
    /// C identifier of the mesh.
    pub identifier: String,
    /// Name of the mesh in the source file.
    pub source_name: String,
    pub mesh_path: PathBuf,
    /// Companion texture, when one was written.
    pub texture_path: Option<PathBuf>,
    pub parameter_count: u32,
    /// Human readable one-line summary.
    pub summary: String,
}

/// Listing entry for a mesh found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshInfo {
    pub name: String,
    pub vertex_count: usize,
    pub face_count: usize,
    pub has_uv_layer: bool,
    pub has_color_layer: bool,
}

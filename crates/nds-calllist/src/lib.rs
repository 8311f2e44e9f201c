/// Error types for mesh export.
pub mod error;

/// Core type definitions: formats, configuration, per-vertex bundles.
pub mod types;

/// Read-only source mesh model.
pub mod mesh;

/// OBJ to source mesh loading.
pub mod obj_loader;

/// Identifier generation and sanitization.
pub mod identifier;

/// Float to fixed-point conversion and operand packing.
pub mod fixed;

/// Geometry engine FIFO commands.
pub mod command;

/// Four-command packets and packet lists.
pub mod packet;

/// Text and binary call list encoders.
pub mod encode;

/// Per-mesh export option resolution.
pub mod options;

/// Mesh to call list compilation.
pub mod compiler;

/// Companion texture conversion.
pub mod texture;

/// PCX image encoding.
pub mod pcx;

/// Output file writing.
pub mod output;

pub use compiler::{compile, CompiledMesh};
pub use error::ExportError;
pub use mesh::SourceMesh;
pub use options::MeshOptions;
pub use types::{ExportConfig, ExportedMesh, MeshInfo, OutputFormat};

use std::fs;
use std::path::Path;

/// Export every selected mesh of an OBJ file into `config.dir_path`.
///
/// Each mesh is compiled on its own: options, packet list and output buffer
/// are created fresh per mesh. Fails before writing anything if a requested
/// mesh does not exist or two meshes map to the same identifier.
pub fn export_file(input: &Path, config: &ExportConfig) -> Result<Vec<ExportedMesh>, ExportError> {
    let meshes = obj_loader::load_meshes(input)?;
    let selected = select_meshes(&meshes, &config.meshes)?;

    let names: Vec<&str> = selected.iter().map(|m| m.name.as_str()).collect();
    identifier::check_collisions(&names)?;

    if !config.dir_path.as_os_str().is_empty() {
        fs::create_dir_all(&config.dir_path)?;
    }

    let mut exported = Vec::with_capacity(selected.len());
    for mesh in selected {
        log::info!("Building export of mesh '{}'", mesh.name);
        exported.push(export_mesh(mesh, config)?);
    }
    Ok(exported)
}

/// Compile one mesh and write its call list (and texture, if enabled).
pub fn export_mesh(mesh: &SourceMesh, config: &ExportConfig) -> Result<ExportedMesh, ExportError> {
    let options = MeshOptions::resolve(mesh, config);
    log::info!("  {}", options);

    let compiled = compile(mesh, &options);
    let mesh_path = output::write_mesh_output(&compiled, &options)?;
    let texture_path = output::write_texture_output(&options);

    Ok(ExportedMesh {
        identifier: options.mesh_name.clone(),
        source_name: mesh.name.clone(),
        mesh_path,
        texture_path,
        parameter_count: compiled.parameter_count,
        summary: compiled.to_string(),
    })
}

/// List the meshes contained in an OBJ file.
pub fn list_meshes(input: &Path) -> Result<Vec<MeshInfo>, ExportError> {
    let meshes = obj_loader::load_meshes(input)?;
    Ok(meshes
        .iter()
        .map(|m| MeshInfo {
            name: m.name.clone(),
            vertex_count: m.vertices.len(),
            face_count: m.faces.len(),
            has_uv_layer: m.has_uv_layer,
            has_color_layer: m.has_color_layer,
        })
        .collect())
}

/// Pick the meshes named in `filter`, or all of them when it is empty.
fn select_meshes<'a>(
    meshes: &'a [SourceMesh],
    filter: &[String],
) -> Result<Vec<&'a SourceMesh>, ExportError> {
    if filter.is_empty() {
        return Ok(meshes.iter().collect());
    }

    filter
        .iter()
        .map(|name| {
            meshes.iter().find(|m| &m.name == name).ok_or_else(|| {
                let available: Vec<&str> = meshes.iter().map(|m| m.name.as_str()).collect();
                ExportError::Validation(format!(
                    "No mesh named '{}' (available: {})",
                    name,
                    available.join(", ")
                ))
            })
        })
        .collect()
}

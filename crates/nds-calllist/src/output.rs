use crate::compiler::CompiledMesh;
use crate::error::ExportError;
use crate::options::MeshOptions;
use crate::texture;
use std::fs;
use std::path::PathBuf;

/// Write the compiled call list to its resolved path.
pub fn write_mesh_output(mesh: &CompiledMesh, options: &MeshOptions) -> Result<PathBuf, ExportError> {
    let path = options.mesh_path();
    log::info!("Saving {} in path {}", mesh, path.display());
    fs::write(&path, &mesh.data)?;
    log::debug!(
        "  {} bytes, {} parameter words, {} packets",
        mesh.data.len(),
        mesh.parameter_count,
        mesh.packet_count
    );
    Ok(path)
}

/// Write the companion texture if the options ask for one.
///
/// Texture problems are logged and reported as `None`; they never fail the
/// mesh export.
pub fn write_texture_output(options: &MeshOptions) -> Option<PathBuf> {
    if !options.texture_export {
        return None;
    }
    let bound = options.texture.as_ref()?;
    let path = options.texture_path();

    match texture::export_texture(bound, &path) {
        Ok(_) => Some(path),
        Err(e) => {
            log::error!(
                "Texture export for '{}' failed, mesh exported without it: {}",
                options.mesh_name,
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler;
    use crate::mesh::{Face, SourceMesh, SourceVertex};
    use crate::options::BoundTexture;
    use crate::types::{ExportConfig, OutputFormat};

    fn triangle() -> SourceMesh {
        SourceMesh {
            name: "Tri".to_string(),
            vertices: vec![
                SourceVertex {
                    position: [0.0, 0.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                },
                SourceVertex {
                    position: [1.0, 0.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                },
                SourceVertex {
                    position: [0.0, 1.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                },
            ],
            faces: vec![Face {
                vertices: vec![0, 1, 2],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_write_text_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            dir_path: dir.path().to_path_buf(),
            ..Default::default()
        };
        let mesh = triangle();
        let options = MeshOptions::resolve(&mesh, &config);
        let compiled = compiler::compile(&mesh, &options);

        let path = write_mesh_output(&compiled, &options).unwrap();
        assert_eq!(path, dir.path().join("Tri.h"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("u32 Tri[] = {\n"));
        assert!(content.ends_with("\n};\n"));
        assert!(content.contains("GL_TRIANGLES"));
    }

    #[test]
    fn test_write_binary_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            dir_path: dir.path().to_path_buf(),
            format: OutputFormat::Binary,
            ..Default::default()
        };
        let mesh = triangle();
        let options = MeshOptions::resolve(&mesh, &config);
        let compiled = compiler::compile(&mesh, &options);

        let path = write_mesh_output(&compiled, &options).unwrap();
        assert_eq!(path, dir.path().join("Tri.bin"));
        let data = fs::read(&path).unwrap();
        assert_eq!(data, compiled.data);
        let count = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        assert_eq!(count as u32, compiled.parameter_count);
    }

    #[test]
    fn test_write_mesh_output_missing_dir() {
        let config = ExportConfig {
            dir_path: PathBuf::from("/nonexistent/output/dir"),
            ..Default::default()
        };
        let mesh = triangle();
        let options = MeshOptions::resolve(&mesh, &config);
        let compiled = compiler::compile(&mesh, &options);
        assert!(matches!(
            write_mesh_output(&compiled, &options),
            Err(ExportError::Io(_))
        ));
    }

    #[test]
    fn test_texture_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            dir_path: dir.path().to_path_buf(),
            texture: true,
            ..Default::default()
        };
        let mut options = MeshOptions::resolve(&triangle(), &config);
        // Bound to an image that has since disappeared.
        options.texture = Some(BoundTexture {
            source: dir.path().join("deleted.png"),
            original_width: 64,
            original_height: 64,
            width: 64,
            height: 64,
        });
        options.texture_export = true;

        assert!(write_texture_output(&options).is_none());
        assert!(!dir.path().join("Tri.pcx").exists());
    }

    #[test]
    fn test_texture_disabled() {
        let options = MeshOptions::resolve(&triangle(), &ExportConfig::default());
        assert!(write_texture_output(&options).is_none());
    }
}

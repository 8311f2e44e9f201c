use crate::error::ExportError;
use crate::mesh::{compute_vertex_normals, Face, Material, SourceMesh, SourceVertex, TextureSlot};
use std::path::Path;

/// Load an OBJ file and return one `SourceMesh` per object/group.
///
/// Polygons are kept as authored (no triangulation) so the compiler can tell
/// quads from triangles. Texture paths in the MTL file are resolved against
/// the OBJ file's directory.
pub fn load_meshes(path: &Path) -> Result<Vec<SourceMesh>, ExportError> {
    let load_options = tobj::LoadOptions {
        triangulate: false,
        single_index: true,
        ..Default::default()
    };

    let (models, materials) =
        tobj::load_obj(path, &load_options).map_err(|e| ExportError::ObjParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let materials = materials.unwrap_or_else(|e| {
        log::warn!("No materials loaded for {}: {}", path.display(), e);
        Vec::new()
    });

    if models.is_empty() {
        return Err(ExportError::Validation(format!(
            "OBJ file has no geometry: {}",
            path.display()
        )));
    }

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(models
        .iter()
        .map(|model| convert_model(model, &materials, base_dir))
        .collect())
}

/// Convert one tobj model into the exporter's mesh representation.
pub fn convert_model(model: &tobj::Model, materials: &[tobj::Material], base_dir: &Path) -> SourceMesh {
    let mesh = &model.mesh;
    let vert_count = mesh.positions.len() / 3;

    let positions: Vec<[f32; 3]> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();

    let face_indices = split_faces(&mesh.indices, &mesh.face_arities);

    let has_normals = mesh.normals.len() >= vert_count * 3 && vert_count > 0;
    let normals: Vec<[f32; 3]> = if has_normals {
        mesh.normals
            .chunks_exact(3)
            .map(|n| [n[0], n[1], n[2]])
            .collect()
    } else {
        log::warn!(
            "Mesh '{}' has no normals, computing smooth vertex normals",
            model.name
        );
        compute_vertex_normals(&positions, &face_indices)
    };

    let has_uv_layer = mesh.texcoords.len() >= vert_count * 2 && !mesh.texcoords.is_empty();
    let has_color_layer =
        mesh.vertex_color.len() >= vert_count * 3 && !mesh.vertex_color.is_empty();

    let vertices = positions
        .iter()
        .zip(&normals)
        .map(|(&position, &normal)| SourceVertex { position, normal })
        .collect();

    let faces = face_indices
        .into_iter()
        .map(|indices| {
            let uvs = has_uv_layer.then(|| {
                indices
                    .iter()
                    .map(|&i| {
                        let i = i as usize;
                        [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
                    })
                    .collect()
            });
            let colors = has_color_layer.then(|| {
                indices
                    .iter()
                    .map(|&i| {
                        let i = i as usize;
                        [
                            unit_to_u8(mesh.vertex_color[i * 3]),
                            unit_to_u8(mesh.vertex_color[i * 3 + 1]),
                            unit_to_u8(mesh.vertex_color[i * 3 + 2]),
                        ]
                    })
                    .collect()
            });
            Face {
                vertices: indices,
                uvs,
                colors,
            }
        })
        .collect();

    let materials = mesh
        .material_id
        .and_then(|id| materials.get(id))
        .map(|m| vec![convert_material(m, base_dir)])
        .unwrap_or_default();

    SourceMesh {
        name: model.name.clone(),
        vertices,
        faces,
        materials,
        has_uv_layer,
        has_color_layer,
    }
}

/// Split the flat index list into faces using the per-face arities.
///
/// tobj leaves `face_arities` empty when every face is a triangle.
fn split_faces(indices: &[u32], arities: &[u32]) -> Vec<Vec<u32>> {
    if arities.is_empty() {
        return indices.chunks_exact(3).map(<[u32]>::to_vec).collect();
    }

    let mut faces = Vec::with_capacity(arities.len());
    let mut start = 0;
    for &arity in arities {
        let end = start + arity as usize;
        if end > indices.len() {
            log::warn!("Face arity list runs past the index list, truncating");
            break;
        }
        faces.push(indices[start..end].to_vec());
        start = end;
    }
    faces
}

/// Texture slots in the order the exporter looks at them.
fn convert_material(material: &tobj::Material, base_dir: &Path) -> Material {
    let slots = [
        ("diffuse", &material.diffuse_texture),
        ("ambient", &material.ambient_texture),
        ("specular", &material.specular_texture),
    ];

    let textures = slots
        .into_iter()
        .filter_map(|(name, texture)| {
            texture.as_ref().map(|file| TextureSlot {
                name: name.to_string(),
                image: (!file.is_empty()).then(|| base_dir.join(file)),
            })
        })
        .collect();

    Material {
        name: material.name.clone(),
        textures,
    }
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

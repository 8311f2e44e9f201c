//! Read-only source mesh handed to the exporter.
//!
//! This is the boundary with whatever produced the geometry (the OBJ loader
//! in this crate). The compiler only ever reads from it.

use glam::Vec3;
use std::path::PathBuf;

/// A vertex shared between faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// A polygon: ordered vertex indices plus optional per-corner attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Face {
    pub vertices: Vec<u32>,
    /// One UV per corner when the mesh has a UV layer.
    pub uvs: Option<Vec<[f32; 2]>>,
    /// One 8-bit RGB color per corner when the mesh has a color layer.
    pub colors: Option<Vec<[u8; 3]>>,
}

impl Face {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// A texture slot of a material. `image` is `None` for slots that are not
/// bound to an image file.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSlot {
    pub name: String,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub name: String,
    pub textures: Vec<TextureSlot>,
}

/// One named mesh with its faces, vertices and materials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
    pub name: String,
    pub vertices: Vec<SourceVertex>,
    pub faces: Vec<Face>,
    pub materials: Vec<Material>,
    pub has_uv_layer: bool,
    pub has_color_layer: bool,
}

impl SourceMesh {
    /// Axis-aligned bounds of all vertex positions, or `None` for a mesh
    /// without vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Largest extent of the bounding box along any axis.
    pub fn max_extent(&self) -> f32 {
        self.bounds()
            .map(|(min, max)| (max - min).max_element())
            .unwrap_or(0.0)
    }
}

/// Smooth per-vertex normals: the normalised sum of the normals of every
/// face using the vertex. Vertices that belong to no face, or only to
/// degenerate faces, get a zero normal.
pub fn compute_vertex_normals(positions: &[[f32; 3]], faces: &[Vec<u32>]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for face in faces {
        if face.len() < 3 || face.iter().any(|&i| i as usize >= positions.len()) {
            continue;
        }
        let p0 = Vec3::from_array(positions[face[0] as usize]);
        let p1 = Vec3::from_array(positions[face[1] as usize]);
        let p2 = Vec3::from_array(positions[face[2] as usize]);
        let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
        for &idx in face {
            sums[idx as usize] += normal;
        }
    }

    sums.into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}

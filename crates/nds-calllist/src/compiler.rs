//! Mesh to call list compilation.
//!
//! Faces are split by arity into a quad list and a triangle list. Each list
//! becomes one BEGIN/END block; inside it every corner emits its optional
//! COLOR, TEXCOORD and NORMAL commands followed by VERTEX16. Faces with any
//! other number of corners are dropped.

use std::fmt;

use crate::command::{Command, Topology};
use crate::encode;
use crate::mesh::{Face, SourceMesh};
use crate::options::MeshOptions;
use crate::packet::PacketList;
use crate::types::{MeshVertex, OutputFormat};

/// How the faces of a mesh were classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceStats {
    pub quads: usize,
    pub triangles: usize,
    /// Faces with neither 3 nor 4 corners.
    pub skipped: usize,
}

impl FaceStats {
    pub fn exported(&self) -> usize {
        self.quads + self.triangles
    }
}

/// A serialized call list and the numbers describing it.
#[derive(Debug, Clone)]
pub struct CompiledMesh {
    pub name: String,
    pub format: OutputFormat,
    /// Header value: number of 32-bit words following it.
    pub parameter_count: u32,
    pub packet_count: usize,
    pub faces: FaceStats,
    /// Encoded `.h` source or `.bin` blob.
    pub data: Vec<u8>,
    /// Texture that goes with the mesh: path and export size.
    pub texture: Option<(String, u32, u32)>,
}

impl fmt::Display for CompiledMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NDS Mesh [{}], Faces = {} (Quads={}, Triangles={}), Texture=",
            self.name,
            self.faces.exported(),
            self.faces.quads,
            self.faces.triangles
        )?;
        match &self.texture {
            Some((path, w, h)) => write!(f, "({}, {}, {})", path, w, h),
            None => f.write_str("None"),
        }
    }
}

/// Compiles one mesh. A compiler is built per mesh and consumed by
/// [`MeshCompiler::finish`], so nothing carries over between meshes.
pub struct MeshCompiler<'a> {
    options: &'a MeshOptions,
    quads: Vec<MeshVertex>,
    triangles: Vec<MeshVertex>,
    stats: FaceStats,
}

impl<'a> MeshCompiler<'a> {
    pub fn new(options: &'a MeshOptions) -> Self {
        Self {
            options,
            quads: Vec::new(),
            triangles: Vec::new(),
            stats: FaceStats::default(),
        }
    }

    /// Collect the corners of every quad and triangle of `mesh`.
    pub fn add_mesh(&mut self, mesh: &SourceMesh) {
        for face in &mesh.faces {
            match face.len() {
                4 => {
                    if self.push_face(mesh, face, Topology::Quads) {
                        self.stats.quads += 1;
                    }
                }
                3 => {
                    if self.push_face(mesh, face, Topology::Triangles) {
                        self.stats.triangles += 1;
                    }
                }
                _ => self.stats.skipped += 1,
            }
        }

        if self.stats.skipped > 0 {
            log::debug!(
                "  Skipped {} faces of mesh '{}' that are neither quads nor triangles",
                self.stats.skipped,
                mesh.name
            );
        }
    }

    fn push_face(&mut self, mesh: &SourceMesh, face: &Face, topology: Topology) -> bool {
        let mut corners = Vec::with_capacity(face.len());
        for (n, &idx) in face.vertices.iter().enumerate() {
            let Some(source) = mesh.vertices.get(idx as usize) else {
                log::warn!(
                    "Face of mesh '{}' references missing vertex {}, face dropped",
                    mesh.name,
                    idx
                );
                self.stats.skipped += 1;
                return false;
            };

            let scale = self.options.scale;
            let uv = if self.options.uv_export {
                face.uvs.as_ref().and_then(|uvs| uvs.get(n)).copied()
            } else {
                None
            };
            let color = if self.options.color_export {
                face.colors.as_ref().and_then(|colors| colors.get(n)).copied()
            } else {
                None
            };

            corners.push(MeshVertex {
                position: source.position.map(|c| c * scale),
                normal: source.normal,
                uv,
                color,
            });
        }

        match topology {
            Topology::Quads => self.quads.extend(corners),
            _ => self.triangles.extend(corners),
        }
        true
    }

    /// Emit both BEGIN/END blocks into a terminated packet list.
    pub fn packet_list(&self) -> PacketList {
        let mut list = PacketList::new();
        self.emit_block(&mut list, Topology::Quads, &self.quads);
        self.emit_block(&mut list, Topology::Triangles, &self.triangles);
        list.terminate();
        list
    }

    fn emit_block(&self, list: &mut PacketList, topology: Topology, vertices: &[MeshVertex]) {
        if vertices.is_empty() {
            return;
        }

        list.add(Command::Begin(topology));
        for v in vertices {
            if let Some(color) = v.color.filter(|_| self.options.color_export) {
                list.add(Command::color_from_rgb8(color));
            }
            if let Some(uv) = v.uv.filter(|_| self.options.uv_export) {
                list.add(Command::tex_coord_from_uv(uv));
            }
            if self.options.normals_export {
                list.add(Command::Normal(v.normal));
            }
            list.add(Command::Vertex(v.position));
        }
        list.add(Command::End);
    }

    /// Build, terminate and encode the call list.
    pub fn finish(self) -> CompiledMesh {
        let list = self.packet_list();
        let data = encode::encode(&list, &self.options.mesh_name, self.options.format);

        CompiledMesh {
            name: self.options.mesh_name.clone(),
            format: self.options.format,
            parameter_count: list.parameter_count(),
            packet_count: list.len(),
            faces: self.stats,
            data,
            texture: self.options.texture.as_ref().map(|t| {
                (
                    self.options.texture_path().display().to_string(),
                    t.width,
                    t.height,
                )
            }),
        }
    }
}

/// Compile `mesh` with already resolved options.
pub fn compile(mesh: &SourceMesh, options: &MeshOptions) -> CompiledMesh {
    let mut compiler = MeshCompiler::new(options);
    compiler.add_mesh(mesh);
    compiler.finish()
}

//! Per-mesh export options.
//!
//! [`MeshOptions::resolve`] inspects a [`SourceMesh`] once, before
//! compilation, and freezes every decision the compiler needs: which optional
//! attributes exist, which texture goes with the mesh and where the outputs
//! are written. Nothing here fails; missing data only turns features off.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::identifier::sanitize_c_identifier;
use crate::mesh::{Material, SourceMesh};
use crate::types::{ExportConfig, OutputFormat};

/// Smallest texture edge the exporter produces.
pub const MIN_TEXTURE_SIZE: u32 = 8;
/// Largest texture edge the exporter produces.
pub const MAX_TEXTURE_SIZE: u32 = 128;

/// The image bound to a mesh and the size it will be exported at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundTexture {
    pub source: PathBuf,
    pub original_width: u32,
    pub original_height: u32,
    pub width: u32,
    pub height: u32,
}

/// Immutable export decisions for one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshOptions {
    /// C identifier used for the array name and the output file stem.
    pub mesh_name: String,
    pub format: OutputFormat,
    pub uv_export: bool,
    pub normals_export: bool,
    pub color_export: bool,
    /// Write the companion `.pcx`; only ever true when `texture` is set.
    pub texture_export: bool,
    pub texture: Option<BoundTexture>,
    /// Factor applied to every position before quantization.
    pub scale: f32,
    pub dir_path: PathBuf,
}

impl MeshOptions {
    /// Resolve options for `mesh` under the run-wide `config`.
    pub fn resolve(mesh: &SourceMesh, config: &ExportConfig) -> Self {
        log::debug!("Resolving export options for mesh '{}'", mesh.name);

        let texture = find_texture(&mesh.materials);
        if texture.is_none() {
            log::warn!(
                "Cannot find any texture bound to mesh '{}', no texture file will be exported",
                mesh.name
            );
        }

        let scale = if config.rescale {
            let extent = mesh.max_extent();
            if extent > 0.0 {
                log::info!("  Rescaling '{}' by 1/{}", mesh.name, extent);
                1.0 / extent
            } else {
                1.0
            }
        } else {
            1.0
        };

        Self {
            mesh_name: sanitize_c_identifier(&mesh.name),
            format: config.format,
            uv_export: config.uvs && mesh.has_uv_layer,
            normals_export: config.normals,
            color_export: config.colors && mesh.has_color_layer,
            texture_export: config.texture && texture.is_some(),
            texture,
            scale,
            dir_path: config.dir_path.clone(),
        }
    }

    /// `<dir>/<name>.h` or `<dir>/<name>.bin`.
    pub fn mesh_path(&self) -> PathBuf {
        self.dir_path
            .join(format!("{}{}", self.mesh_name, self.format.extension()))
    }

    /// `<dir>/<name>.pcx`.
    pub fn texture_path(&self) -> PathBuf {
        self.dir_path.join(format!("{}.pcx", self.mesh_name))
    }
}

impl fmt::Display for MeshOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File Format:{} , Exporting Texture:{} , Exporting Normals:{} , Exporting Colors:{}",
            self.format, self.uv_export, self.normals_export, self.color_export
        )
    }
}

/// First image texture of the first material that can actually be read.
fn find_texture(materials: &[Material]) -> Option<BoundTexture> {
    let material = materials.first()?;
    log::debug!("Listing textures of material '{}'", material.name);

    material.textures.iter().find_map(|slot| {
        let source = slot.image.as_deref()?;
        match image_size(source) {
            Ok((w, h)) => {
                let (width, height) = target_texture_size(w, h);
                log::info!(
                    "  Texture {} {}x{} -> {}x{}",
                    source.display(),
                    w,
                    h,
                    width,
                    height
                );
                Some(BoundTexture {
                    source: source.to_path_buf(),
                    original_width: w,
                    original_height: h,
                    width,
                    height,
                })
            }
            Err(e) => {
                log::warn!("Skipping texture slot '{}': {}", slot.name, e);
                None
            }
        }
    })
}

fn image_size(path: &Path) -> Result<(u32, u32), image::ImageError> {
    image::image_dimensions(path)
}

/// Export size for an image of `width`×`height`.
///
/// The longer edge is clamped into `[8, 128]`. The shorter edge is the
/// longer one divided by the rounded integer aspect ratio, clamped the same
/// way. Both are then rounded down to a power of two, which the texture
/// hardware requires.
pub fn target_texture_size(width: u32, height: u32) -> (u32, u32) {
    let (major, minor) = if width >= height {
        (width, height)
    } else {
        (height, width)
    };

    let ratio = ((major as f32 / minor.max(1) as f32).round() as u32).max(1);
    let major_size = floor_power_of_two(major.clamp(MIN_TEXTURE_SIZE, MAX_TEXTURE_SIZE));
    let minor_size =
        floor_power_of_two((major_size / ratio).clamp(MIN_TEXTURE_SIZE, MAX_TEXTURE_SIZE));

    if width >= height {
        (major_size, minor_size)
    } else {
        (minor_size, major_size)
    }
}

fn floor_power_of_two(n: u32) -> u32 {
    if n == 0 {
        0
    } else {
        1 << (31 - n.leading_zeros())
    }
}

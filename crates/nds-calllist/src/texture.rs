use crate::error::ExportError;
use crate::options::BoundTexture;
use crate::pcx;
use image::imageops::FilterType;
use image::RgbImage;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Maximum palette size of an 8-bit indexed texture.
pub const MAX_PALETTE_COLORS: usize = 256;

/// An indexed-color image ready to be written as PCX.
#[derive(Debug, Clone, PartialEq)]
pub struct PalettedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major palette indices.
    pub indices: Vec<u8>,
    pub palette: Vec<[u8; 3]>,
}

/// Load the bound image, convert it to RGB, resize it to its export size,
/// reduce it to a 256-color palette and write it as PCX to `out_path`.
pub fn export_texture(texture: &BoundTexture, out_path: &Path) -> Result<PalettedImage, ExportError> {
    let img = image::open(&texture.source).map_err(|e| ExportError::Image {
        path: texture.source.clone(),
        message: e.to_string(),
    })?;

    let rgb = img.to_rgb8();
    let resized = image::imageops::resize(&rgb, texture.width, texture.height, FilterType::Triangle);
    let paletted = reduce_palette(&resized);

    let data = pcx::encode(
        paletted.width as u16,
        paletted.height as u16,
        &paletted.indices,
        &paletted.palette,
    )?;
    fs::write(out_path, data)?;

    log::info!(
        "  Texture: {} -> {} ({}×{}, {} colors)",
        texture.source.display(),
        out_path.display(),
        paletted.width,
        paletted.height,
        paletted.palette.len()
    );

    Ok(paletted)
}

/// Reduce an RGB image to at most 256 colors.
///
/// Pixels are bucketed by their RGB15 value (the DS's native color depth).
/// The most populated buckets become the palette, each entry being the mean
/// of its pixels; pixels of the remaining buckets map to the nearest entry.
pub fn reduce_palette(img: &RgbImage) -> PalettedImage {
    let mut buckets: HashMap<u16, Bucket> = HashMap::new();
    for pixel in img.pixels() {
        buckets.entry(rgb15_key(pixel.0)).or_default().add(pixel.0);
    }

    // Most used first; ties broken by key for reproducible output.
    let mut ranked: Vec<(u16, Bucket)> = buckets.into_iter().collect();
    ranked.sort_by(|(ka, a), (kb, b)| b.count.cmp(&a.count).then(ka.cmp(kb)));

    let palette: Vec<[u8; 3]> = ranked
        .iter()
        .take(MAX_PALETTE_COLORS)
        .map(|(_, bucket)| bucket.mean())
        .collect();

    let mut lookup: HashMap<u16, u8> = HashMap::with_capacity(ranked.len());
    for (i, (key, bucket)) in ranked.iter().enumerate() {
        let index = if i < MAX_PALETTE_COLORS {
            i
        } else {
            nearest(&palette, bucket.mean())
        };
        lookup.insert(*key, index as u8);
    }

    let indices = img
        .pixels()
        .map(|p| lookup.get(&rgb15_key(p.0)).copied().unwrap_or(0))
        .collect();

    PalettedImage {
        width: img.width(),
        height: img.height(),
        indices,
        palette,
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    count: u32,
    sum: [u64; 3],
}

impl Bucket {
    fn add(&mut self, rgb: [u8; 3]) {
        self.count += 1;
        for (s, c) in self.sum.iter_mut().zip(rgb) {
            *s += c as u64;
        }
    }

    fn mean(&self) -> [u8; 3] {
        let n = self.count.max(1) as u64;
        self.sum.map(|s| ((s + n / 2) / n) as u8)
    }
}

fn rgb15_key([r, g, b]: [u8; 3]) -> u16 {
    ((r as u16 >> 3) << 10) | ((g as u16 >> 3) << 5) | (b as u16 >> 3)
}

fn nearest(palette: &[[u8; 3]], color: [u8; 3]) -> usize {
    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| {
            p.iter()
                .zip(color)
                .map(|(&a, b)| {
                    let d = a as i32 - b as i32;
                    (d * d) as u32
                })
                .sum::<u32>()
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

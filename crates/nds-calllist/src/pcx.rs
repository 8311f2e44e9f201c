//! 8-bit paletted PCX writer.
//!
//! Version 5 ZSoft PCX, one plane, RLE encoded, with the 256-entry VGA
//! palette appended after the image data. This is the format the DS texture
//! conversion tools read.

use std::io::{self, Write};

const HEADER_SIZE: usize = 128;
const PALETTE_MARKER: u8 = 0x0C;
const RLE_FLAG: u8 = 0xC0;
const MAX_RUN: usize = 63;

/// Encode an indexed image. `indices` is row-major, `width * height` long;
/// `palette` holds up to 256 RGB entries (missing entries are written black).
pub fn encode(
    width: u16,
    height: u16,
    indices: &[u8],
    palette: &[[u8; 3]],
) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_SIZE + indices.len() + 769);
    write(&mut out, width, height, indices, palette)?;
    Ok(out)
}

/// Write an indexed image as PCX to `w`.
pub fn write<W: Write>(
    w: &mut W,
    width: u16,
    height: u16,
    indices: &[u8],
    palette: &[[u8; 3]],
) -> io::Result<()> {
    let row_len = width as usize;
    if indices.len() != row_len * height as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "expected {} pixel indices for {}x{}, got {}",
                row_len * height as usize,
                width,
                height,
                indices.len()
            ),
        ));
    }

    // Scanlines are padded to an even number of bytes.
    let bytes_per_line = (row_len + 1) & !1;
    w.write_all(&header(width, height, bytes_per_line as u16))?;

    let mut line = vec![0u8; bytes_per_line];
    if row_len > 0 {
        for row in indices.chunks_exact(row_len) {
            line[..row_len].copy_from_slice(row);
            w.write_all(&rle_encode(&line))?;
        }
    }

    w.write_all(&[PALETTE_MARKER])?;
    for i in 0..256 {
        w.write_all(&palette.get(i).copied().unwrap_or([0, 0, 0]))?;
    }
    Ok(())
}

fn header(width: u16, height: u16, bytes_per_line: u16) -> [u8; HEADER_SIZE] {
    let mut h = [0u8; HEADER_SIZE];
    h[0] = 0x0A; // manufacturer: ZSoft
    h[1] = 5; // version 3.0+ with VGA palette
    h[2] = 1; // RLE encoding
    h[3] = 8; // bits per pixel per plane
    // xmin, ymin stay 0
    h[8..10].copy_from_slice(&width.saturating_sub(1).to_le_bytes());
    h[10..12].copy_from_slice(&height.saturating_sub(1).to_le_bytes());
    h[12..14].copy_from_slice(&72u16.to_le_bytes());
    h[14..16].copy_from_slice(&72u16.to_le_bytes());
    // 16..64: 16-color EGA palette, unused
    h[65] = 1; // color planes
    h[66..68].copy_from_slice(&bytes_per_line.to_le_bytes());
    h[68..70].copy_from_slice(&1u16.to_le_bytes()); // palette info: color
    h
}

/// RLE-encode one scanline. Runs never cross scanline boundaries.
fn rle_encode(line: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    let mut i = 0;
    while i < line.len() {
        let value = line[i];
        let mut run = 1;
        while i + run < line.len() && line[i + run] == value && run < MAX_RUN {
            run += 1;
        }
        if run > 1 || value >= RLE_FLAG {
            out.push(RLE_FLAG | run as u8);
        }
        out.push(value);
        i += run;
    }
    out
}

//! Geometry engine FIFO commands.
//!
//! Each [`Command`] is one hardware opcode together with its already
//! quantized parameter words. Commands know how to render themselves both as
//! raw words and as the libnds macro expressions used in the C output.

use std::fmt;

use crate::fixed;

/// FIFO opcode bytes (GXFIFO command numbers).
pub const FIFO_NOP: u8 = 0x00;
pub const FIFO_COLOR: u8 = 0x20;
pub const FIFO_NORMAL: u8 = 0x21;
pub const FIFO_TEX_COORD: u8 = 0x22;
pub const FIFO_VERTEX16: u8 = 0x23;
pub const FIFO_BEGIN: u8 = 0x40;
pub const FIFO_END: u8 = 0x41;

/// Primitive topology passed to BEGIN_VTXS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Quads,
    TriangleStrip,
    QuadStrip,
}

impl Topology {
    /// Hardware code written as the BEGIN parameter.
    pub fn code(self) -> u32 {
        match self {
            Topology::Triangles => 0,
            Topology::Quads => 1,
            Topology::TriangleStrip => 2,
            Topology::QuadStrip => 3,
        }
    }

    /// libnds `GL_GLBEGIN_ENUM` name.
    pub fn gl_name(self) -> &'static str {
        match self {
            Topology::Triangles => "GL_TRIANGLES",
            Topology::Quads => "GL_QUADS",
            Topology::TriangleStrip => "GL_TRIANGLE_STRIP",
            Topology::QuadStrip => "GL_QUAD_STRIP",
        }
    }
}

/// A single geometry engine command with its source attribute values.
///
/// The float sources are kept so the C output can print the exact
/// `floattov16(...)` expressions; the binary words are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Nop,
    Begin(Topology),
    End,
    Vertex([f32; 3]),
    Normal([f32; 3]),
    /// Color with channels already scaled to 5 bits.
    Color([u8; 3]),
    /// Texture coordinate with V already flipped (`1 - v`).
    TexCoord([f32; 2]),
}

impl Command {
    /// Build a COLOR command from 8-bit channels.
    pub fn color_from_rgb8(rgb: [u8; 3]) -> Self {
        Command::Color(rgb.map(fixed::channel_to_5bit))
    }

    /// Build a TEXCOORD command from a bottom-up UV, flipping V for the DS.
    pub fn tex_coord_from_uv(uv: [f32; 2]) -> Self {
        Command::TexCoord([uv[0], 1.0 - uv[1]])
    }

    /// Opcode byte.
    pub fn opcode(&self) -> u8 {
        match self {
            Command::Nop => FIFO_NOP,
            Command::Begin(_) => FIFO_BEGIN,
            Command::End => FIFO_END,
            Command::Vertex(_) => FIFO_VERTEX16,
            Command::Normal(_) => FIFO_NORMAL,
            Command::Color(_) => FIFO_COLOR,
            Command::TexCoord(_) => FIFO_TEX_COORD,
        }
    }

    /// libnds symbol for the opcode.
    pub fn opcode_name(&self) -> &'static str {
        match self {
            Command::Nop => "FIFO_NOP",
            Command::Begin(_) => "FIFO_BEGIN",
            Command::End => "FIFO_END",
            Command::Vertex(_) => "FIFO_VERTEX16",
            Command::Normal(_) => "FIFO_NORMAL",
            Command::Color(_) => "FIFO_COLOR",
            Command::TexCoord(_) => "FIFO_TEX_COORD",
        }
    }

    /// Number of 32-bit parameter words this command adds to the stream.
    pub fn value_count(&self) -> u32 {
        match self {
            Command::Nop | Command::End => 0,
            Command::Vertex(_) => 2,
            Command::Begin(_) | Command::Normal(_) | Command::Color(_) | Command::TexCoord(_) => 1,
        }
    }

    /// Packed parameter words, in stream order.
    pub fn operand_words(&self) -> Vec<u32> {
        match *self {
            Command::Nop | Command::End => Vec::new(),
            Command::Begin(topology) => vec![topology.code()],
            Command::Vertex([x, y, z]) => vec![
                fixed::vertex_pack(fixed::float_to_v16(x), fixed::float_to_v16(y)),
                fixed::vertex_pack(fixed::float_to_v16(z), 0),
            ],
            Command::Normal([x, y, z]) => vec![fixed::normal_pack(
                fixed::float_to_v10(x),
                fixed::float_to_v10(y),
                fixed::float_to_v10(z),
            )],
            Command::Color([r, g, b]) => vec![fixed::rgb15(r, g, b)],
            Command::TexCoord([u, v]) => vec![fixed::texture_pack(
                fixed::float_to_t16(u),
                fixed::float_to_t16(v),
            )],
        }
    }

    /// C expression for the parameters, or `None` when there are none.
    pub fn operand_text(&self) -> Option<String> {
        match *self {
            Command::Nop | Command::End => None,
            Command::Begin(topology) => Some(topology.gl_name().to_string()),
            Command::Vertex([x, y, z]) => Some(format!(
                "VERTEX_PACK(floattov16({:.6}),floattov16({:.6})) , VERTEX_PACK(floattov16({:.6}),0)",
                x, y, z
            )),
            Command::Normal([x, y, z]) => Some(format!(
                "NORMAL_PACK(floattov10({:.6}),floattov10({:.6}),floattov10({:.6}))",
                x, y, z
            )),
            Command::Color([r, g, b]) => Some(format!("RGB15({},{},{})", r, g, b)),
            Command::TexCoord([u, v]) => Some(format!(
                "TEXTURE_PACK(floattot16({:.6}),floattot16({:.6}))",
                u, v
            )),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operand_text() {
            Some(text) => write!(f, "{} , {}", self.opcode_name(), text),
            None => write!(f, "{}", self.opcode_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_counts() {
        assert_eq!(Command::Nop.value_count(), 0);
        assert_eq!(Command::End.value_count(), 0);
        assert_eq!(Command::Begin(Topology::Quads).value_count(), 1);
        assert_eq!(Command::Vertex([0.0; 3]).value_count(), 2);
        assert_eq!(Command::Normal([0.0; 3]).value_count(), 1);
        assert_eq!(Command::Color([0; 3]).value_count(), 1);
        assert_eq!(Command::TexCoord([0.0; 2]).value_count(), 1);
    }

    #[test]
    fn value_count_matches_operand_words() {
        let commands = [
            Command::Nop,
            Command::End,
            Command::Begin(Topology::Triangles),
            Command::Vertex([1.0, 2.0, 3.0]),
            Command::Normal([0.0, 1.0, 0.0]),
            Command::Color([1, 2, 3]),
            Command::TexCoord([0.5, 0.5]),
        ];
        for cmd in commands {
            assert_eq!(cmd.operand_words().len() as u32, cmd.value_count(), "{cmd}");
        }
    }

    #[test]
    fn vertex_words() {
        let words = Command::Vertex([1.0, 0.5, -1.0]).operand_words();
        assert_eq!(words, vec![fixed::vertex_pack(4096, 2048), fixed::vertex_pack(-4096, 0)]);
    }

    #[test]
    fn begin_codes() {
        assert_eq!(Command::Begin(Topology::Triangles).operand_words(), vec![0]);
        assert_eq!(Command::Begin(Topology::Quads).operand_words(), vec![1]);
        assert_eq!(Command::Begin(Topology::TriangleStrip).operand_words(), vec![2]);
        assert_eq!(Command::Begin(Topology::QuadStrip).operand_words(), vec![3]);
    }

    #[test]
    fn begin_text_is_symbolic() {
        assert_eq!(
            Command::Begin(Topology::Quads).operand_text().as_deref(),
            Some("GL_QUADS")
        );
    }

    #[test]
    fn nop_and_end_have_no_operands() {
        assert!(Command::Nop.operand_text().is_none());
        assert!(Command::End.operand_text().is_none());
        assert!(Command::Nop.operand_words().is_empty());
        assert!(Command::End.operand_words().is_empty());
    }

    #[test]
    fn vertex_text() {
        let text = Command::Vertex([1.0, 0.5, -1.0]).operand_text().unwrap();
        assert_eq!(
            text,
            "VERTEX_PACK(floattov16(1.000000),floattov16(0.500000)) , VERTEX_PACK(floattov16(-1.000000),0)"
        );
    }

    #[test]
    fn tex_coord_flips_v() {
        let cmd = Command::tex_coord_from_uv([0.25, 0.25]);
        assert_eq!(cmd, Command::TexCoord([0.25, 0.75]));
        assert_eq!(cmd.operand_words(), vec![fixed::texture_pack(4, 12)]);
        assert_eq!(
            cmd.operand_text().unwrap(),
            "TEXTURE_PACK(floattot16(0.250000),floattot16(0.750000))"
        );
    }

    #[test]
    fn color_scales_channels() {
        let cmd = Command::color_from_rgb8([255, 128, 0]);
        assert_eq!(cmd, Command::Color([31, 16, 0]));
        assert_eq!(cmd.operand_words(), vec![fixed::rgb15(31, 16, 0)]);
        assert_eq!(cmd.operand_text().unwrap(), "RGB15(31,16,0)");
    }

    #[test]
    fn normal_text_and_word() {
        let cmd = Command::Normal([0.0, 1.0, 0.0]);
        assert_eq!(cmd.operand_words(), vec![511 << 10]);
        assert_eq!(
            cmd.operand_text().unwrap(),
            "NORMAL_PACK(floattov10(0.000000),floattov10(1.000000),floattov10(0.000000))"
        );
    }

    #[test]
    fn opcodes() {
        assert_eq!(Command::Vertex([0.0; 3]).opcode(), 0x23);
        assert_eq!(Command::Begin(Topology::Quads).opcode(), 0x40);
        assert_eq!(Command::End.opcode(), 0x41);
        assert_eq!(Command::Nop.opcode(), 0x00);
    }
}

//! Call list serialization.
//!
//! An [`Encoder`] turns a finished [`PacketList`] into the output artifact.
//! The encoder is picked once per export from [`OutputFormat`]; packets and
//! commands never branch on the format themselves.

use crate::packet::{CommandPacket, PacketList};
use crate::types::OutputFormat;

/// Serializes packets into one output representation.
pub trait Encoder {
    /// Append one packet: its packed opcodes, then its parameters.
    fn packet(&mut self, packet: &CommandPacket);

    /// Wrap everything written so far with the header and return the bytes.
    fn finish(self: Box<Self>, name: &str, parameter_count: u32) -> Vec<u8>;
}

/// Pick the encoder for a format.
pub fn encoder_for(format: OutputFormat) -> Box<dyn Encoder> {
    match format {
        OutputFormat::Text => Box::new(TextEncoder::default()),
        OutputFormat::Binary => Box::new(BinaryEncoder::default()),
    }
}

/// Encode a whole packet list with the encoder for `format`.
pub fn encode(list: &PacketList, name: &str, format: OutputFormat) -> Vec<u8> {
    let mut encoder = encoder_for(format);
    for packet in list.packets() {
        encoder.packet(packet);
    }
    encoder.finish(name, list.parameter_count())
}

/// C source output: a `u32` array of libnds macro expressions.
#[derive(Debug, Default)]
pub struct TextEncoder {
    body: String,
}

impl Encoder for TextEncoder {
    fn packet(&mut self, packet: &CommandPacket) {
        let names: Vec<&str> = packet.commands().iter().map(|c| c.opcode_name()).collect();
        self.body.push_str("FIFO_COMMAND_PACK( ");
        self.body.push_str(&names.join(" , "));
        self.body.push_str(" ),\n");

        for operand in packet.commands().iter().filter_map(|c| c.operand_text()) {
            self.body.push_str(&operand);
            self.body.push_str(",\n");
        }
    }

    fn finish(self: Box<Self>, name: &str, parameter_count: u32) -> Vec<u8> {
        let mut source = format!("u32 {}[] = {{\n{},\n{}", name, parameter_count, self.body);
        // The last element must not carry a separator.
        if source.ends_with(",\n") {
            source.truncate(source.len() - 2);
        }
        source.push_str("\n};\n");
        source.into_bytes()
    }
}

/// Raw little-endian words, ready to be DMA'd to the geometry FIFO.
#[derive(Debug, Default)]
pub struct BinaryEncoder {
    body: Vec<u8>,
}

impl Encoder for BinaryEncoder {
    fn packet(&mut self, packet: &CommandPacket) {
        self.body.extend_from_slice(&packet.opcodes());
        for word in packet.commands().iter().flat_map(|c| c.operand_words()) {
            self.body.extend_from_slice(&word.to_le_bytes());
        }
    }

    fn finish(self: Box<Self>, _name: &str, parameter_count: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity(4 + self.body.len());
        data.extend_from_slice(&(parameter_count as i32).to_le_bytes());
        data.extend_from_slice(&self.body);
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, Topology};

    fn triangle_list() -> PacketList {
        let mut list = PacketList::new();
        list.add(Command::Begin(Topology::Triangles));
        list.add(Command::Vertex([1.0, 0.5, -1.0]));
        list.add(Command::End);
        list.terminate();
        list
    }

    #[test]
    fn text_output() {
        let text = String::from_utf8(encode(&triangle_list(), "tri", OutputFormat::Text)).unwrap();
        assert_eq!(
            text,
            "u32 tri[] = {\n\
             4,\n\
             FIFO_COMMAND_PACK( FIFO_BEGIN , FIFO_VERTEX16 , FIFO_END , FIFO_NOP ),\n\
             GL_TRIANGLES,\n\
             VERTEX_PACK(floattov16(1.000000),floattov16(0.500000)) , VERTEX_PACK(floattov16(-1.000000),0)\n\
             };\n"
        );
    }

    #[test]
    fn binary_output() {
        let data = encode(&triangle_list(), "tri", OutputFormat::Binary);
        let mut expected = Vec::new();
        expected.extend_from_slice(&4i32.to_le_bytes());
        expected.extend_from_slice(&[0x40, 0x23, 0x41, 0x00]);
        expected.extend_from_slice(&0u32.to_le_bytes());
        expected.extend_from_slice(&0x0800_1000u32.to_le_bytes());
        expected.extend_from_slice(&0x0000_F000u32.to_le_bytes());
        assert_eq!(data, expected);
    }

    #[test]
    fn binary_length_matches_parameter_count() {
        let list = triangle_list();
        let data = encode(&list, "tri", OutputFormat::Binary);
        // Header word plus one word per declared parameter.
        assert_eq!(data.len(), 4 * (1 + list.parameter_count() as usize));
    }

    #[test]
    fn empty_text_output() {
        let text = String::from_utf8(encode(&PacketList::new(), "empty", OutputFormat::Text)).unwrap();
        assert_eq!(text, "u32 empty[] = {\n0\n};\n");
    }

    #[test]
    fn empty_binary_output() {
        let data = encode(&PacketList::new(), "empty", OutputFormat::Binary);
        assert_eq!(data, vec![0, 0, 0, 0]);
    }

    #[test]
    fn nop_only_packet_trims_command_line() {
        let mut list = PacketList::new();
        list.add(Command::End);
        list.terminate();
        let text = String::from_utf8(encode(&list, "e", OutputFormat::Text)).unwrap();
        assert!(text.ends_with("FIFO_COMMAND_PACK( FIFO_END , FIFO_NOP , FIFO_NOP , FIFO_NOP )\n};\n"));
    }
}

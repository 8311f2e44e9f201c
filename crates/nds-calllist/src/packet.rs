//! Packed command grouping.
//!
//! The geometry FIFO accepts commands four at a time: one word holding four
//! opcode bytes, followed by the parameter words of those four commands.

use crate::command::Command;

/// Number of opcodes in one packed FIFO command word.
pub const COMMANDS_PER_PACKET: usize = 4;

/// Up to four commands sharing one packed opcode word.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandPacket {
    commands: Vec<Command>,
}

impl CommandPacket {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(COMMANDS_PER_PACKET),
        }
    }

    /// Append a command. Returns `false` without modifying the packet when it
    /// already holds four commands.
    pub fn add(&mut self, cmd: Command) -> bool {
        if self.is_full() {
            return false;
        }
        self.commands.push(cmd);
        true
    }

    /// Pad with NOPs up to four commands.
    pub fn terminate(&mut self) {
        while !self.is_full() {
            self.commands.push(Command::Nop);
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.commands.len() == COMMANDS_PER_PACKET
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Words this packet occupies in the stream: the packed opcode word plus
    /// every parameter word. An empty packet occupies nothing.
    pub fn parameter_count(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        1 + self.commands.iter().map(Command::value_count).sum::<u32>()
    }

    /// The four opcode bytes, with NOP in any unfilled slot.
    pub fn opcodes(&self) -> [u8; COMMANDS_PER_PACKET] {
        let mut opcodes = [Command::Nop.opcode(); COMMANDS_PER_PACKET];
        for (slot, cmd) in opcodes.iter_mut().zip(&self.commands) {
            *slot = cmd.opcode();
        }
        opcodes
    }
}

/// Ordered list of packets built by appending commands one at a time.
///
/// Every packet but the last is always full. The first packet is opened on
/// the first `add`, so a list that never received a command holds no packets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PacketList {
    packets: Vec<CommandPacket>,
}

impl PacketList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command to the last packet, opening a new one when it is full.
    pub fn add(&mut self, cmd: Command) {
        if let Some(last) = self.packets.last_mut() {
            if last.add(cmd) {
                return;
            }
        }
        let mut packet = CommandPacket::new();
        packet.add(cmd);
        self.packets.push(packet);
    }

    /// Pad the last packet with NOPs. Earlier packets are already full.
    pub fn terminate(&mut self) {
        if let Some(last) = self.packets.last_mut() {
            last.terminate();
        }
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn packets(&self) -> &[CommandPacket] {
        &self.packets
    }

    /// Total parameter words across all packets.
    pub fn parameter_count(&self) -> u32 {
        self.packets.iter().map(CommandPacket::parameter_count).sum()
    }

    /// Iterate over every command in stream order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.packets.iter().flat_map(|p| p.commands().iter())
    }
}

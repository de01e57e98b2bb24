//! Extended (0xCB-prefixed) instruction handlers: rotates, shifts, SWAP,
//! and the BIT/RES/SET families.

use super::{Bus, Cpu, Flag, Flags, Operand};

impl Cpu {
    /// RLC/RRC/RL/RR/SLA/SRA/SWAP/SRL r over 0x00..=0x3F.
    pub(super) fn exec_cb_shift(&mut self, bus: &mut dyn Bus, cb: u8) -> u32 {
        debug_assert!(cb < 0x40);
        let operand = Operand::decode(cb);
        let value = self.read_operand(bus, operand);
        let carry_in = self.get_flag(Flag::C);

        let (result, carry) = match (cb >> 3) & 0x07 {
            // RLC: circular, bit 7 to Carry.
            0 => (value.rotate_left(1), value & 0x80 != 0),
            // RRC: circular, bit 0 to Carry.
            1 => (value.rotate_right(1), value & 0x01 != 0),
            // RL: through Carry.
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            // RR: through Carry.
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            // SLA
            4 => (value << 1, value & 0x80 != 0),
            // SRA keeps the sign bit.
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            // SWAP
            6 => (value.rotate_left(4), false),
            // SRL
            _ => (value >> 1, value & 0x01 != 0),
        };

        self.regs.f = Flags {
            zero: result == 0,
            carry,
            ..Flags::default()
        };
        self.write_operand(bus, operand, result);
        if operand.is_memory() { 16 } else { 8 }
    }

    /// BIT b,r: Z is the inverse of the tested bit, H=1, N=0, C preserved.
    pub(super) fn exec_cb_bit(&mut self, bus: &mut dyn Bus, cb: u8) -> u32 {
        debug_assert!((0x40..=0x7F).contains(&cb));
        let operand = Operand::decode(cb);
        let bit = (cb >> 3) & 0x07;
        let value = self.read_operand(bus, operand);

        self.set_flag(Flag::Z, value & (1 << bit) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
        if operand.is_memory() { 12 } else { 8 }
    }

    pub(super) fn exec_cb_res(&mut self, bus: &mut dyn Bus, cb: u8) -> u32 {
        debug_assert!((0x80..=0xBF).contains(&cb));
        let operand = Operand::decode(cb);
        let bit = (cb >> 3) & 0x07;
        let value = self.read_operand(bus, operand) & !(1 << bit);
        self.write_operand(bus, operand, value);
        if operand.is_memory() { 16 } else { 8 }
    }

    pub(super) fn exec_cb_set(&mut self, bus: &mut dyn Bus, cb: u8) -> u32 {
        debug_assert!(cb >= 0xC0);
        let operand = Operand::decode(cb);
        let bit = (cb >> 3) & 0x07;
        let value = self.read_operand(bus, operand) | (1 << bit);
        self.write_operand(bus, operand, value);
        if operand.is_memory() { 16 } else { 8 }
    }
}

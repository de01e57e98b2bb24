use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    /// PUSH rr. AF is packed as A plus the flags in bits 7-4 of the low byte.
    pub(in crate::cpu) fn exec_push(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));
        let value = self.regs.get16(Reg16::from_rp2(opcode >> 4));
        self.push_u16(bus, value);
        16
    }

    /// POP rr. POP AF drops the low nibble of the flag byte.
    pub(in crate::cpu) fn exec_pop(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));
        let value = self.pop_u16(bus);
        self.regs.set16(Reg16::from_rp2(opcode >> 4), value);
        12
    }
}

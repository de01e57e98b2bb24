use crate::cpu::{Bus, Cpu, Operand, Reg16};

impl Cpu {
    pub(in crate::cpu) fn exec_inc8(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0x04, "unexpected INC r opcode {opcode:#04x}");
        let operand = Operand::decode(opcode >> 3);
        let value = self.read_operand(bus, operand);
        let result = self.alu_inc8(value);
        self.write_operand(bus, operand, result);
        if operand.is_memory() { 12 } else { 4 }
    }

    pub(in crate::cpu) fn exec_dec8(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0x05, "unexpected DEC r opcode {opcode:#04x}");
        let operand = Operand::decode(opcode >> 3);
        let value = self.read_operand(bus, operand);
        let result = self.alu_dec8(value);
        self.write_operand(bus, operand, result);
        if operand.is_memory() { 12 } else { 4 }
    }

    /// INC rr. No flags are affected.
    pub(in crate::cpu) fn exec_inc16(&mut self, _bus: &mut dyn Bus, opcode: u8) -> u32 {
        let reg = Reg16::from_rp(opcode >> 4);
        let value = self.regs.get16(reg).wrapping_add(1);
        self.regs.set16(reg, value);
        8
    }

    /// DEC rr. No flags are affected.
    pub(in crate::cpu) fn exec_dec16(&mut self, _bus: &mut dyn Bus, opcode: u8) -> u32 {
        let reg = Reg16::from_rp(opcode >> 4);
        let value = self.regs.get16(reg).wrapping_sub(1);
        self.regs.set16(reg, value);
        8
    }
}

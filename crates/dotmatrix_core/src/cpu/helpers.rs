use super::{Bus, Cpu, Flag, Operand};

impl Cpu {
    /// Read an 8-bit operand: a register, or memory at (HL).
    #[inline]
    pub(super) fn read_operand(&mut self, bus: &mut dyn Bus, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(reg) => self.regs.get(reg),
            Operand::IndirectHl => bus.read8(self.regs.hl()),
        }
    }

    #[inline]
    pub(super) fn write_operand(&mut self, bus: &mut dyn Bus, operand: Operand, value: u8) {
        match operand {
            Operand::Reg(reg) => self.regs.set(reg, value),
            Operand::IndirectHl => bus.write8(self.regs.hl(), value),
        }
    }

    #[inline]
    pub(super) fn fetch8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            // The fetch right after a HALT bug does not advance PC.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Push a 16-bit value: SP -= 2, then memory[SP] = low, memory[SP+1] = high.
    #[inline]
    pub(super) fn push_u16(&mut self, bus: &mut dyn Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16(&mut self, bus: &mut dyn Bus) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// Branch condition from bits 4-3 of JR/JP/CALL/RET cc opcodes.
    #[inline]
    pub(super) fn cc_condition(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x03 {
            0 => !self.get_flag(Flag::Z), // NZ
            1 => self.get_flag(Flag::Z),  // Z
            2 => !self.get_flag(Flag::C), // NC
            _ => self.get_flag(Flag::C),  // C
        }
    }

    /// Relative jump used by JR/JR cc.
    ///
    /// The displacement is a signed 8-bit offset relative to the address
    /// following the operand.
    pub(super) fn jr(&mut self, bus: &mut dyn Bus, cond: bool) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
            12
        } else {
            8
        }
    }

    pub(super) fn jp_cond(&mut self, bus: &mut dyn Bus, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            self.regs.pc = addr;
            16
        } else {
            12
        }
    }

    pub(super) fn call_cond(&mut self, bus: &mut dyn Bus, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            24
        } else {
            12
        }
    }

    pub(super) fn ret_cond(&mut self, bus: &mut dyn Bus, cond: bool) -> u32 {
        if cond {
            self.regs.pc = self.pop_u16(bus);
            20
        } else {
            8
        }
    }
}

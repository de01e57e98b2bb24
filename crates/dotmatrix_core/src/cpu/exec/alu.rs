use crate::cpu::{Bus, Cpu, Flag, Flags, Operand, Reg16};

impl Cpu {
    /// Dispatch the 3-bit ALU operation field shared by the register and
    /// immediate forms: ADD, ADC, SUB, SBC, AND, XOR, OR, CP.
    fn alu_op(&mut self, operation: u8, value: u8) {
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// ALU A,r and ALU A,(HL) over 0x80..=0xBF.
    pub(in crate::cpu) fn exec_alu_reg(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let src = Operand::decode(opcode);
        let value = self.read_operand(bus, src);
        self.alu_op(opcode >> 3, value);
        if src.is_memory() { 8 } else { 4 }
    }

    /// ALU A,d8 (0xC6, 0xCE, ... 0xFE).
    pub(in crate::cpu) fn exec_alu_imm(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0xC6);
        let value = self.fetch8(bus);
        self.alu_op(opcode >> 3, value);
        8
    }

    /// RLCA / RRCA / RLA / RRA. Z is always cleared, unlike the CB forms.
    pub(in crate::cpu) fn exec_rotate_a(&mut self, _bus: &mut dyn Bus, opcode: u8) -> u32 {
        let a = self.regs.a;
        let carry_in = self.get_flag(Flag::C);
        let (result, carry_out) = match opcode {
            // RLCA: bit 7 to Carry and to bit 0.
            0x07 => (a.rotate_left(1), a & 0x80 != 0),
            // RRCA: bit 0 to Carry and to bit 7.
            0x0F => (a.rotate_right(1), a & 0x01 != 0),
            // RLA: through Carry.
            0x17 => ((a << 1) | u8::from(carry_in), a & 0x80 != 0),
            // RRA: through Carry.
            _ => ((a >> 1) | (u8::from(carry_in) << 7), a & 0x01 != 0),
        };
        self.regs.a = result;
        self.regs.f = Flags {
            carry: carry_out,
            ..Flags::default()
        };
        4
    }

    pub(in crate::cpu) fn exec_add_hl_rr(&mut self, _bus: &mut dyn Bus, opcode: u8) -> u32 {
        let value = self.regs.get16(Reg16::from_rp(opcode >> 4));
        self.alu_add16_hl(value);
        8
    }

    pub(in crate::cpu) fn exec_add_sp_r8(&mut self, bus: &mut dyn Bus, _opcode: u8) -> u32 {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        16
    }

    pub(in crate::cpu) fn exec_daa(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.alu_daa();
        4
    }

    pub(in crate::cpu) fn exec_cpl(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        4
    }

    pub(in crate::cpu) fn exec_scf(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.set_flag(Flag::C, true);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        4
    }

    pub(in crate::cpu) fn exec_ccf(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::C, !carry);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        4
    }
}

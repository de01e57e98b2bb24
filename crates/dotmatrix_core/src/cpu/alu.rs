use super::{Cpu, Flag, Flags};

impl Cpu {
    /// 8-bit ADD/ADC against A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.get_flag(Flag::C));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = u16::from(a) + u16::from(value) + u16::from(carry_in);
        let result = full as u8;

        self.regs.a = result;
        self.regs.f = Flags {
            zero: result == 0,
            subtract: false,
            half_carry: half > 0x0F,
            carry: full > 0xFF,
        };
    }

    /// 8-bit SUB/SBC against A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let carry_in = use_carry && self.get_flag(Flag::C);
        let (result, flags) = sub_flags(self.regs.a, value, carry_in);
        self.regs.a = result;
        self.regs.f = flags;
    }

    /// Compare A with `value`: flags as for `A - value`, A untouched.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        let (_, flags) = sub_flags(self.regs.a, value, false);
        self.regs.f = flags;
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.regs.f = Flags {
            zero: self.regs.a == 0,
            half_carry: true,
            ..Flags::default()
        };
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.regs.f = Flags {
            zero: self.regs.a == 0,
            ..Flags::default()
        };
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.regs.f = Flags {
            zero: self.regs.a == 0,
            ..Flags::default()
        };
    }

    /// Decimal adjust A after a BCD addition or subtraction.
    ///
    /// The correction is chosen from C, H, N and A itself. Updates Z, H, C
    /// and leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if self.get_flag(Flag::N) {
            a = a.wrapping_sub(adjust);
        } else {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// INC on an 8-bit value. Updates Z, N, H; C is preserved.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (value & 0x0F) == 0x0F);
        result
    }

    /// DEC on an 8-bit value. Updates Z, N, H; C is preserved.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (value & 0x0F) == 0);
        result
    }

    /// `ADD HL,rr`: Z preserved, N cleared, H from bit 11, C from bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, carry);

        self.regs.set_hl(result);
    }

    /// Signed 8-bit immediate added to a 16-bit base, shared by `ADD SP,r8`
    /// and `LD HL,SP+r8`. Z and N are cleared; H and C come from the low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.regs.f = Flags {
            zero: false,
            subtract: false,
            half_carry: (base & 0x000F) + (offset & 0x000F) > 0x000F,
            carry: (base & 0x00FF) + (offset & 0x00FF) > 0x00FF,
        };
        base.wrapping_add(offset)
    }
}

/// Shared subtract path for SUB, SBC and CP.
#[inline]
fn sub_flags(a: u8, value: u8, carry_in: bool) -> (u8, Flags) {
    let borrow = i16::from(carry_in);
    let half = i16::from(a & 0x0F) - i16::from(value & 0x0F) - borrow;
    let full = i16::from(a) - i16::from(value) - borrow;
    let result = full as u8;
    (
        result,
        Flags {
            zero: result == 0,
            subtract: true,
            half_carry: half < 0,
            carry: full < 0,
        },
    )
}

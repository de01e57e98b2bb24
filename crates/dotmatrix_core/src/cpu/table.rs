//! Opcode dispatch tables.
//!
//! Both tables hold plain function pointers, filled in by opcode pattern
//! once on first use. Nothing is executed while a table is built; handlers
//! only ever run through `Cpu::step`.

use lazy_static::lazy_static;

use super::{Bus, Cpu};

/// An instruction handler. It receives the opcode byte that selected it and
/// returns the instruction's cost in clock ticks.
pub(super) type Handler = fn(&mut Cpu, &mut dyn Bus, u8) -> u32;

/// Prefix byte selecting the extended table.
pub(super) const PREFIX_CB: u8 = 0xCB;

pub(super) struct OpcodeTable {
    handlers: [Option<Handler>; 256],
}

/// `base` with the 3-bit field in bits 5-3 set to 0..8 (register or
/// condition selectors, RST vectors, ALU operations).
fn y_column(base: u8) -> impl Iterator<Item = u8> {
    (0..8u8).map(move |y| base | (y << 3))
}

/// `base` with the 2-bit register-pair field in bits 5-4 set to 0..4.
fn rp_column(base: u8) -> impl Iterator<Item = u8> {
    (0..4u8).map(move |p| base | (p << 4))
}

/// `base` with the 2-bit condition field in bits 4-3 set to NZ, Z, NC, C.
fn cc_column(base: u8) -> impl Iterator<Item = u8> {
    (0..4u8).map(move |cc| base | (cc << 3))
}

impl OpcodeTable {
    fn empty() -> Self {
        Self {
            handlers: [None; 256],
        }
    }

    fn assign(&mut self, opcodes: impl IntoIterator<Item = u8>, handler: Handler) {
        for opcode in opcodes {
            self.handlers[opcode as usize] = Some(handler);
        }
    }

    #[inline]
    pub(super) fn get(&self, opcode: u8) -> Option<Handler> {
        self.handlers[opcode as usize]
    }

    /// The unprefixed table. The eleven opcode holes (D3, DB, DD, E3, E4,
    /// EB, EC, ED, F4, FC, FD) and the 0xCB prefix stay empty.
    fn primary() -> Self {
        let mut t = Self::empty();

        t.assign([0x00], Cpu::exec_nop);
        t.assign([0x08], Cpu::exec_ld_a16_sp);
        t.assign([0x10], Cpu::exec_stop);
        t.assign([0x18], Cpu::exec_jr);

        t.assign(rp_column(0x01), Cpu::exec_ld_rr_d16);
        t.assign(rp_column(0x02), Cpu::exec_ld_indirect_a);
        t.assign(rp_column(0x03), Cpu::exec_inc16);
        t.assign(rp_column(0x09), Cpu::exec_add_hl_rr);
        t.assign(rp_column(0x0A), Cpu::exec_ld_a_indirect);
        t.assign(rp_column(0x0B), Cpu::exec_dec16);

        t.assign(y_column(0x04), Cpu::exec_inc8);
        t.assign(y_column(0x05), Cpu::exec_dec8);
        t.assign(y_column(0x06), Cpu::exec_ld_r_d8);

        t.assign([0x07, 0x0F, 0x17, 0x1F], Cpu::exec_rotate_a);
        t.assign(cc_column(0x20), Cpu::exec_jr_cc);
        t.assign([0x27], Cpu::exec_daa);
        t.assign([0x2F], Cpu::exec_cpl);
        t.assign([0x37], Cpu::exec_scf);
        t.assign([0x3F], Cpu::exec_ccf);

        t.assign(0x40..=0x7F, Cpu::exec_ld_r_r);
        t.assign([0x76], Cpu::exec_halt);
        t.assign(0x80..=0xBF, Cpu::exec_alu_reg);

        t.assign(cc_column(0xC0), Cpu::exec_ret_cc);
        t.assign(rp_column(0xC1), Cpu::exec_pop);
        t.assign(cc_column(0xC2), Cpu::exec_jp_cc);
        t.assign([0xC3], Cpu::exec_jp_a16);
        t.assign(cc_column(0xC4), Cpu::exec_call_cc);
        t.assign(rp_column(0xC5), Cpu::exec_push);
        t.assign(y_column(0xC6), Cpu::exec_alu_imm);
        t.assign(y_column(0xC7), Cpu::exec_rst);
        t.assign([0xC9], Cpu::exec_ret);
        t.assign([0xCD], Cpu::exec_call_a16);
        t.assign([0xD9], Cpu::exec_reti);

        t.assign([0xE0, 0xF0], Cpu::exec_ldh_a8);
        t.assign([0xE2, 0xF2], Cpu::exec_ldh_c);
        t.assign([0xE8], Cpu::exec_add_sp_r8);
        t.assign([0xE9], Cpu::exec_jp_hl);
        t.assign([0xEA, 0xFA], Cpu::exec_ld_a16_a);
        t.assign([0xF3], Cpu::exec_di);
        t.assign([0xF8], Cpu::exec_ld_hl_sp_r8);
        t.assign([0xF9], Cpu::exec_ld_sp_hl);
        t.assign([0xFB], Cpu::exec_ei);

        t
    }

    /// The 0xCB-prefixed table. Every entry is defined.
    fn extended() -> Self {
        let mut t = Self::empty();
        t.assign(0x00..=0x3F, Cpu::exec_cb_shift);
        t.assign(0x40..=0x7F, Cpu::exec_cb_bit);
        t.assign(0x80..=0xBF, Cpu::exec_cb_res);
        t.assign(0xC0..=0xFF, Cpu::exec_cb_set);
        t
    }
}

lazy_static! {
    pub(super) static ref PRIMARY: OpcodeTable = OpcodeTable::primary();
    pub(super) static ref EXTENDED: OpcodeTable = OpcodeTable::extended();
}

/// Whether `opcode` has a handler, in the extended table when `prefixed`.
pub fn is_defined(opcode: u8, prefixed: bool) -> bool {
    if prefixed {
        EXTENDED.get(opcode).is_some()
    } else {
        PRIMARY.get(opcode).is_some()
    }
}

use super::*;
use crate::CoreError;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl TestBus {
    fn load(&mut self, addr: u16, program: &[u8]) {
        let start = addr as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

/// A zeroed CPU with `program` placed at 0x0000.
fn cpu_with_program(program: &[u8]) -> (Cpu, TestBus) {
    let cpu = Cpu::new_cold();
    let mut bus = TestBus::default();
    bus.load(0x0000, program);
    (cpu, bus)
}

fn step(cpu: &mut Cpu, bus: &mut TestBus) -> u32 {
    cpu.step(bus).unwrap()
}

#[test]
fn scenario_add_a_b_without_carries() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x80]); // ADD A,B
    cpu.regs.a = 0x00;
    cpu.regs.b = 0x0F;

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.a, 0x0F);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));
    assert!(!cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn scenario_inc_a_wraps_to_zero() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x3C]); // INC A
    cpu.regs.a = 0xFF;
    cpu.set_flag(Flag::C, true);

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::N));
    // INC never touches Carry.
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn scenario_jp_absolute_sets_pc() {
    let mut cpu = Cpu::new_cold();
    let mut bus = TestBus::default();
    bus.load(0x0100, &[0xC3, 0x50, 0x01]); // JP 0x0150
    cpu.regs.pc = 0x0100;

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(cycles, 16);
}

#[test]
fn scenario_call_then_ret_roundtrip() {
    let mut cpu = Cpu::new_cold();
    let mut bus = TestBus::default();
    bus.load(0x0100, &[0xCD, 0x50, 0x01]); // CALL 0x0150
    bus.load(0x0150, &[0xC9]); // RET
    cpu.regs.pc = 0x0100;
    cpu.regs.sp = 0xFFFE;

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cycles, 24);
    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    // Return address 0x0103, little-endian.
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x01);

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cycles, 16);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn nop_advances_pc() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x00]);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0001);
}

#[test]
fn post_boot_register_state() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.f.bits(), 0xB0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);
}

#[test]
fn register_pairs_are_views_over_halves() {
    let mut regs = Registers::default();
    regs.set_bc(0x1234);
    assert_eq!((regs.b, regs.c), (0x12, 0x34));
    regs.set(Reg8::E, 0xCD);
    regs.set(Reg8::D, 0xAB);
    assert_eq!(regs.get16(Reg16::DE), 0xABCD);
    regs.set16(Reg16::HL, 0xBEEF);
    assert_eq!(regs.get(Reg8::H), 0xBE);
    assert_eq!(regs.get(Reg8::L), 0xEF);
}

#[test]
fn ld_16bit_and_indirect_forms() {
    // LD BC,0x1234 ; LD A,0x42 ; LD (BC),A ; LD HL,0xC000 ; LD (HL+),A ; LD A,(HL-)
    let (mut cpu, mut bus) = cpu_with_program(&[
        0x01, 0x34, 0x12, 0x3E, 0x42, 0x02, 0x21, 0x00, 0xC0, 0x22, 0x3A,
    ]);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.bc(), 0x1234);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0x1234], 0x42);

    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC000], 0x42);
    assert_eq!(cpu.regs.hl(), 0xC001);

    bus.memory[0xC001] = 0x99;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x99);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn ld_r_r_and_hl_operand_costs() {
    // LD B,A ; LD (HL),B ; LD C,(HL) ; LD (HL),0x77
    let (mut cpu, mut bus) = cpu_with_program(&[0x47, 0x70, 0x4E, 0x36, 0x77]);
    cpu.regs.a = 0x5A;
    cpu.regs.set_hl(0xC100);
    cpu.regs.f = Flags::from_bits(0xF0);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.b, 0x5A);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC100], 0x5A);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.c, 0x5A);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC100], 0x77);
    // Loads never touch flags.
    assert_eq!(cpu.regs.f.bits(), 0xF0);
}

#[test]
fn inc_dec_8bit_flags_and_hl_memory() {
    // DEC B ; INC (HL) ; DEC (HL)
    let (mut cpu, mut bus) = cpu_with_program(&[0x05, 0x34, 0x35]);
    cpu.regs.b = 0x10;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x0F;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.b, 0x0F);
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::Z));

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x10);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::N));

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x0F);
}

#[test]
fn inc_dec_16bit_affect_no_flags() {
    // INC SP ; DEC BC
    let (mut cpu, mut bus) = cpu_with_program(&[0x33, 0x0B]);
    cpu.regs.sp = 0xFFFF;
    cpu.regs.set_bc(0x0000);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.bc(), 0xFFFF);
    assert_eq!(cpu.regs.f.bits(), 0x00);
}

#[test]
fn add_hl_rr_carries_from_bits_11_and_15() {
    // ADD HL,BC ; ADD HL,HL
    let (mut cpu, mut bus) = cpu_with_program(&[0x09, 0x29]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.set_flag(Flag::Z, true);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::Z), "Z is preserved");

    cpu.regs.set_hl(0x8000);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::H));
}

#[test]
fn adc_and_sbc_consume_incoming_carry() {
    // ADC A,0x0F ; SBC A,0x01
    let (mut cpu, mut bus) = cpu_with_program(&[0xCE, 0x0F, 0xDE, 0x01]);
    cpu.regs.a = 0xF0;
    cpu.set_flag(Flag::C, true);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xFE);
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn logic_ops_and_compare() {
    // AND B ; OR C ; XOR A ; CP (HL)
    let (mut cpu, mut bus) = cpu_with_program(&[0xA0, 0xB1, 0xAF, 0xBE]);
    cpu.regs.a = 0xF0;
    cpu.regs.b = 0x3C;
    cpu.regs.c = 0x01;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x01;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x30);
    assert_eq!(cpu.regs.f.bits(), 0x20);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x31);
    assert_eq!(cpu.regs.f.bits(), 0x00);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f.bits(), 0x80);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x00, "CP leaves A untouched");
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::Z));
}

#[test]
fn daa_cpl_scf_ccf_behaviour() {
    // ADD A,0x15 ; DAA ; CPL ; SCF ; CCF
    let (mut cpu, mut bus) = cpu_with_program(&[0xC6, 0x15, 0x27, 0x2F, 0x37, 0x3F]);
    cpu.regs.a = 0x27;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x3C);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x42);
    assert!(!cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xBD);
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));

    step(&mut cpu, &mut bus);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::N));
    assert!(!cpu.get_flag(Flag::H));

    step(&mut cpu, &mut bus);
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn daa_after_subtraction() {
    // SUB 0x09 ; DAA  (0x10 - 0x09 in BCD is 01)
    let (mut cpu, mut bus) = cpu_with_program(&[0xD6, 0x09, 0x27]);
    cpu.regs.a = 0x10;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x07);
    assert!(cpu.get_flag(Flag::H));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x01);
    assert!(cpu.get_flag(Flag::N));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn accumulator_rotates_always_clear_zero() {
    // RLCA ; RRCA ; RLA ; RRA
    let (mut cpu, mut bus) = cpu_with_program(&[0x07, 0x0F, 0x17, 0x1F]);
    cpu.regs.a = 0x80;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x01);
    assert!(cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x80);
    assert!(cpu.get_flag(Flag::C));

    // RLA: bit 7 out, old carry in; A becomes 0x01 and is never flagged zero.
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x01);
    assert!(cpu.get_flag(Flag::C));

    cpu.regs.a = 0x01;
    cpu.set_flag(Flag::C, false);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));
}

#[test]
fn cb_shift_family() {
    // RLC B ; SRA C ; SWAP D ; SRL E ; RR (HL)
    let (mut cpu, mut bus) = cpu_with_program(&[
        0xCB, 0x00, 0xCB, 0x29, 0xCB, 0x32, 0xCB, 0x3B, 0xCB, 0x1E,
    ]);
    cpu.regs.b = 0x85;
    cpu.regs.c = 0x81;
    cpu.regs.d = 0xF0;
    cpu.regs.e = 0x01;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x02;

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.b, 0x0B);
    assert!(cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.c, 0xC0);
    assert!(cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.d, 0x0F);
    assert!(!cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.e, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));

    // RR pulls the carry from SRL into bit 7.
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x81);
    assert!(!cpu.get_flag(Flag::C));
    assert_eq!(cpu.regs.pc, 10);
}

#[test]
fn cb_bit_res_set_on_hl() {
    // BIT 7,(HL) ; RES 7,(HL) ; BIT 7,(HL) ; SET 0,A
    let (mut cpu, mut bus) = cpu_with_program(&[
        0xCB, 0x7E, 0xCB, 0xBE, 0xCB, 0x7E, 0xCB, 0xC7,
    ]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;
    cpu.set_flag(Flag::C, true);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C), "BIT preserves carry");

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x00);

    step(&mut cpu, &mut bus);
    assert!(cpu.get_flag(Flag::Z));

    let flags = cpu.regs.f;
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.f, flags, "SET affects no flags");
}

#[test]
fn jr_relative_forward_and_backward() {
    let mut cpu = Cpu::new_cold();
    let mut bus = TestBus::default();
    bus.load(0x0100, &[0x18, 0x02]); // JR +2
    bus.load(0x0104, &[0x18, 0xFA]); // JR -6
    cpu.regs.pc = 0x0100;

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0104);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn conditional_branches_cost_more_when_taken() {
    // JR NZ ; JP Z ; CALL NC ; RET C  (each run once taken, once not)
    let cases: [(&[u8], u32, u32); 4] = [
        (&[0x20, 0x05], 12, 8),
        (&[0xCA, 0x00, 0x20], 16, 12),
        (&[0xD4, 0x00, 0x20], 24, 12),
        (&[0xD8], 20, 8),
    ];

    for (program, taken, not_taken) in cases {
        let opcode = program[0];
        let (mut cpu, mut bus) = cpu_with_program(program);
        cpu.regs.sp = 0xFFFE;
        bus.memory[0xFFFE] = 0x00;
        bus.memory[0xFFFF] = 0x00;

        // NZ and NC hold with flags clear; Z and C need them set.
        let wants_set = matches!(opcode, 0xCA | 0xD8);
        cpu.set_flag(Flag::Z, wants_set);
        cpu.set_flag(Flag::C, wants_set);
        assert_eq!(step(&mut cpu, &mut bus), taken, "opcode {opcode:#04x} taken");

        let (mut cpu, mut bus) = cpu_with_program(program);
        cpu.regs.sp = 0xFFFE;
        cpu.set_flag(Flag::Z, !wants_set);
        cpu.set_flag(Flag::C, !wants_set);
        assert_eq!(
            step(&mut cpu, &mut bus),
            not_taken,
            "opcode {opcode:#04x} not taken"
        );
        assert_eq!(cpu.regs.pc, program.len() as u16);
    }
}

#[test]
fn rst_pushes_return_and_jumps_to_vector() {
    let mut cpu = Cpu::new_cold();
    let mut bus = TestBus::default();
    bus.load(0x0200, &[0xEF]); // RST 28h
    cpu.regs.pc = 0x0200;
    cpu.regs.sp = 0xD000;

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0x01);
    assert_eq!(bus.memory[0xCFFF], 0x02);
}

#[test]
fn push_and_pop_af_masks_low_flag_nibble() {
    // PUSH BC ; POP AF ; PUSH AF ; POP DE
    let (mut cpu, mut bus) = cpu_with_program(&[0xC5, 0xF1, 0xF5, 0xD1]);
    cpu.regs.sp = 0xD000;
    cpu.regs.set_bc(0x12FF);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f.bits(), 0xF0);
    assert!(cpu.get_flag(Flag::Z) && cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H) && cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.de(), 0x12F0);
    assert_eq!(cpu.regs.sp, 0xD000);
}

#[test]
fn add_sp_and_ld_hl_sp_offset_flags() {
    // ADD SP,-1 ; LD HL,SP+1 ; LD SP,HL
    let (mut cpu, mut bus) = cpu_with_program(&[0xE8, 0xFF, 0xF8, 0x01, 0xF9]);
    cpu.regs.sp = 0x0001;

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0x0001);
    assert!(!cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));

    cpu.regs.set_hl(0xDFF0);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.sp, 0xDFF0);
}

#[test]
fn ld_a16_sp_and_high_page_loads() {
    // LD (0xC000),SP ; LDH (0x80),A ; LD A,(C) ; LD (0xC010),A ; LD A,(0xC011)
    let (mut cpu, mut bus) = cpu_with_program(&[
        0x08, 0x00, 0xC0, 0xE0, 0x80, 0xF2, 0xEA, 0x10, 0xC0, 0xFA, 0x11, 0xC0,
    ]);
    cpu.regs.sp = 0xABCD;
    cpu.regs.a = 0x5E;
    cpu.regs.c = 0x80;
    bus.memory[0xC011] = 0x3D;

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(bus.memory[0xC000], 0xCD);
    assert_eq!(bus.memory[0xC001], 0xAB);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xFF80], 0x5E);

    cpu.regs.a = 0;
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x5E);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC010], 0x5E);
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.a, 0x3D);
}

#[test]
fn ei_sets_ime_after_next_instruction() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xFB, 0x00]); // EI ; NOP

    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
    assert!(cpu.ime_pending());

    step(&mut cpu, &mut bus);
    assert!(cpu.ime);
    assert!(!cpu.ime_pending());
}

#[test]
fn di_cancels_a_pending_ei() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xFB, 0xF3, 0x00]); // EI ; DI ; NOP

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
    assert!(!cpu.ime_pending());
}

#[test]
fn interrupt_waits_for_ei_latency() {
    // EI ; INC A ; INC A
    let (mut cpu, mut bus) = cpu_with_program(&[0xFB, 0x3C, 0x3C]);
    cpu.regs.sp = 0xD000;
    bus.memory[0xFFFF] = 0x04; // IE: timer
    bus.memory[0xFF0F] = 0x04; // IF: timer

    step(&mut cpu, &mut bus); // EI
    step(&mut cpu, &mut bus); // INC A still runs
    assert_eq!(cpu.regs.a, 1);

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 20);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[0xFF0F], 0x00);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0002);
}

#[test]
fn interrupt_priority_prefers_lowest_bit() {
    let mut cpu = Cpu::new_cold();
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.sp = 0xD000;
    bus.memory[0xFFFF] = 0x1F;
    bus.memory[0xFF0F] = 0x12; // LCD STAT and joypad

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0048);
    assert_eq!(bus.memory[0xFF0F], 0x10);
}

#[test]
fn reti_enables_ime_immediately() {
    let mut cpu = Cpu::new_cold();
    let mut bus = TestBus::default();
    bus.load(0x0040, &[0xD9]); // RETI
    cpu.regs.pc = 0x0040;
    cpu.regs.sp = 0xCFFE;
    bus.memory[0xCFFE] = 0x34;
    bus.memory[0xCFFF] = 0x12;

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert!(cpu.ime);
}

#[test]
fn halt_idles_until_interrupt_then_services_it() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0x00]); // HALT ; NOP
    cpu.ime = true;
    cpu.regs.sp = 0xD000;
    bus.memory[0xFFFF] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(cpu.halted);
    for _ in 0..3 {
        assert_eq!(step(&mut cpu, &mut bus), 4);
        assert_eq!(cpu.regs.pc, 0x0001);
    }

    bus.memory[0xFF0F] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0001);
}

#[test]
fn halt_with_ime_clear_wakes_without_servicing() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0x3C]); // HALT ; INC A
    bus.memory[0xFFFF] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(cpu.halted);

    bus.memory[0xFF0F] = 0x01;
    step(&mut cpu, &mut bus);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.a, 1);
    assert_eq!(cpu.regs.pc, 0x0002);
    assert_eq!(bus.memory[0xFF0F], 0x01, "IF stays pending");
}

#[test]
fn halt_bug_repeats_next_opcode_byte() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0x3C]); // HALT ; INC A
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0001);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 1);
    assert_eq!(cpu.regs.pc, 0x0001);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 2);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn stop_waits_for_button_press() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x10, 0x00, 0x3C]); // STOP ; INC A
    bus.memory[0xFF00] = 0xFF; // no buttons down

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0002);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0);

    bus.memory[0xFF00] = 0xEE; // a button line is low
    step(&mut cpu, &mut bus);
    assert!(!cpu.is_stopped());
    assert_eq!(cpu.regs.a, 1);
}

#[test]
fn illegal_opcode_reports_and_rewinds() {
    let mut cpu = Cpu::new_cold();
    let mut bus = TestBus::default();
    bus.load(0x0150, &[0xDD]);
    cpu.regs.pc = 0x0150;

    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(
        err,
        CoreError::IllegalOpcode {
            pc: 0x0150,
            opcode: 0xDD,
            prefixed: false,
        }
    );
    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(err.to_string(), "illegal opcode 0xDD at 0x0150");

    // Stepping again hits the same byte.
    assert!(cpu.step(&mut bus).is_err());
    assert_eq!(cpu.regs.pc, 0x0150);
}

#[test]
fn opcode_tables_cover_the_instruction_set() {
    const HOLES: [u8; 11] = [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];

    let primary = (0..=255u8).filter(|&op| is_defined(op, false)).count();
    let extended = (0..=255u8).filter(|&op| is_defined(op, true)).count();
    assert_eq!(primary, 256 - HOLES.len() - 1);
    assert_eq!(extended, 256);

    for hole in HOLES {
        assert!(!is_defined(hole, false), "{hole:#04x} should be illegal");
    }
    assert!(!is_defined(0xCB, false), "the prefix has no handler of its own");
    assert!(is_defined(0x76, false));
}

/// Primary opcode costs in clock ticks, with conditionals not taken. Holes
/// and the 0xCB prefix are 0.
#[rustfmt::skip]
const PRIMARY_CYCLES: [[u32; 16]; 16] = [
    [ 4, 12,  8,  8,  4,  4,  8,  4, 20,  8,  8,  8,  4,  4,  8,  4], // 0x00
    [ 4, 12,  8,  8,  4,  4,  8,  4, 12,  8,  8,  8,  4,  4,  8,  4], // 0x10
    [ 8, 12,  8,  8,  4,  4,  8,  4,  8,  8,  8,  8,  4,  4,  8,  4], // 0x20
    [ 8, 12,  8,  8, 12, 12, 12,  4,  8,  8,  8,  8,  4,  4,  8,  4], // 0x30
    [ 4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4], // 0x40
    [ 4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4], // 0x50
    [ 4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4], // 0x60
    [ 8,  8,  8,  8,  8,  8,  4,  8,  4,  4,  4,  4,  4,  4,  8,  4], // 0x70
    [ 4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4], // 0x80
    [ 4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4], // 0x90
    [ 4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4], // 0xA0
    [ 4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4], // 0xB0
    [ 8, 12, 12, 16, 12, 16,  8, 16,  8, 16, 12,  0, 12, 24,  8, 16], // 0xC0
    [ 8, 12, 12,  0, 12, 16,  8, 16,  8, 16, 12,  0, 12,  0,  8, 16], // 0xD0
    [12, 12,  8,  0,  0, 16,  8, 16, 16,  4, 16,  0,  0,  0,  8, 16], // 0xE0
    [12, 12,  8,  4,  0, 16,  8, 16, 12,  8, 16,  4,  0,  0,  8, 16], // 0xF0
];

/// (opcode, cost when the condition holds) for every conditional branch.
#[rustfmt::skip]
const TAKEN_CYCLES: [(u8, u32); 16] = [
    (0x20, 12), (0x28, 12), (0x30, 12), (0x38, 12),
    (0xC0, 20), (0xC8, 20), (0xD0, 20), (0xD8, 20),
    (0xC2, 16), (0xCA, 16), (0xD2, 16), (0xDA, 16),
    (0xC4, 24), (0xCC, 24), (0xD4, 24), (0xDC, 24),
];

const CB_SHIFT_ROW: [u32; 16] = [8, 8, 8, 8, 8, 8, 16, 8, 8, 8, 8, 8, 8, 8, 16, 8];
const CB_BIT_ROW: [u32; 16] = [8, 8, 8, 8, 8, 8, 12, 8, 8, 8, 8, 8, 8, 8, 12, 8];

/// Extended opcode costs, prefix fetch included.
#[rustfmt::skip]
const EXTENDED_CYCLES: [[u32; 16]; 16] = [
    CB_SHIFT_ROW, CB_SHIFT_ROW, CB_SHIFT_ROW, CB_SHIFT_ROW,
    CB_BIT_ROW, CB_BIT_ROW, CB_BIT_ROW, CB_BIT_ROW,
    CB_SHIFT_ROW, CB_SHIFT_ROW, CB_SHIFT_ROW, CB_SHIFT_ROW,
    CB_SHIFT_ROW, CB_SHIFT_ROW, CB_SHIFT_ROW, CB_SHIFT_ROW,
];

fn is_conditional(opcode: u8) -> bool {
    TAKEN_CYCLES.iter().any(|&(op, _)| op == opcode)
}

/// Set Z and C so that the condition encoded in bits 4-3 of `opcode` holds
/// (or not).
fn force_condition(cpu: &mut Cpu, opcode: u8, holds: bool) {
    match (opcode >> 3) & 0x03 {
        0 => cpu.set_flag(Flag::Z, !holds),
        1 => cpu.set_flag(Flag::Z, holds),
        2 => cpu.set_flag(Flag::C, !holds),
        _ => cpu.set_flag(Flag::C, holds),
    }
}

/// Run one instruction from 0xC000 with zero operands and return its cost.
fn cost_of(program: &[u8], prepare: impl FnOnce(&mut Cpu)) -> u32 {
    let mut cpu = Cpu::new_cold();
    let mut bus = TestBus::default();
    cpu.regs.pc = 0xC000;
    cpu.regs.sp = 0xD000;
    bus.load(0xC000, program);
    prepare(&mut cpu);
    cpu.step(&mut bus).unwrap()
}

#[test]
fn primary_opcodes_cost_their_documented_cycles() {
    for opcode in 0..=255u8 {
        let expected = PRIMARY_CYCLES[usize::from(opcode >> 4)][usize::from(opcode & 0x0F)];
        assert_eq!(
            is_defined(opcode, false),
            expected != 0,
            "opcode {opcode:#04x} table entry"
        );
        if expected == 0 {
            continue;
        }

        let cycles = cost_of(&[opcode, 0x00, 0x00], |cpu| {
            if is_conditional(opcode) {
                force_condition(cpu, opcode, false);
            }
        });
        assert_eq!(cycles, expected, "opcode {opcode:#04x}");
    }
}

#[test]
fn every_conditional_branch_costs_its_taken_cycles() {
    for (opcode, taken) in TAKEN_CYCLES {
        let cycles = cost_of(&[opcode, 0x00, 0x00], |cpu| force_condition(cpu, opcode, true));
        assert_eq!(cycles, taken, "opcode {opcode:#04x} taken");

        let not_taken = PRIMARY_CYCLES[usize::from(opcode >> 4)][usize::from(opcode & 0x0F)];
        assert!(not_taken < taken, "opcode {opcode:#04x} not taken");
    }
}

#[test]
fn extended_opcodes_cost_their_documented_cycles() {
    for opcode in 0..=255u8 {
        let expected = EXTENDED_CYCLES[usize::from(opcode >> 4)][usize::from(opcode & 0x0F)];
        let cycles = cost_of(&[0xCB, opcode], |_| {});
        assert_eq!(cycles, expected, "opcode CB {opcode:#04x}");
    }
}

use super::{Cpu, Flags, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A CPU in the state the boot ROM leaves behind, ready to run the
    /// cartridge from 0x0100.
    pub fn new() -> Self {
        let mut cpu = Self::new_cold();
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// A CPU at power-on: every register zero, PC=0. Used when a boot ROM
    /// is mapped, or when running synthetic programs.
    pub fn new_cold() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            halt_bug: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Registers as the DMG boot ROM hands them to cartridge code.
    fn apply_dmg_boot_state(&mut self) {
        self.regs = Registers {
            a: 0x01,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            // F = 0xB0.
            f: Flags {
                zero: true,
                subtract: false,
                half_carry: true,
                carry: true,
            },
            sp: 0xFFFE,
            pc: 0x0100,
        };
        // IME is clear at 0x0100; the game enables interrupts itself.
        self.ime = false;
    }
}

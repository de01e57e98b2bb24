use super::{Bus, Cpu};

const IF_ADDR: u16 = 0xFF0F;
const IE_ADDR: u16 = 0xFFFF;

/// Base of the interrupt vector table; source `n` jumps to `0x40 + 8n`.
const VECTOR_BASE: u16 = 0x0040;

impl Cpu {
    /// `IE & IF` restricted to the five implemented sources.
    #[inline]
    pub(super) fn pending_interrupts(bus: &mut dyn Bus) -> u8 {
        bus.read8(IE_ADDR) & bus.read8(IF_ADDR) & 0x1F
    }

    /// Take the highest-priority pending interrupt if IME allows it.
    ///
    /// A pending interrupt always ends HALT, even with IME clear; it is only
    /// serviced when IME is set. Returns the cost of the entry sequence.
    pub(super) fn service_interrupt(&mut self, bus: &mut dyn Bus) -> Option<u32> {
        let pending = Self::pending_interrupts(bus);
        if pending == 0 {
            return None;
        }

        self.halted = false;
        if !self.ime {
            return None;
        }

        // Lowest bit wins: VBlank > LCD STAT > Timer > Serial > Joypad.
        let index = pending.trailing_zeros() as u8;
        self.ime = false;
        let iflags = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, iflags & !(1 << index));

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = VECTOR_BASE + u16::from(index) * 8;

        log::debug!(
            "interrupt {index} taken: PC 0x{pc:04X} -> 0x{vector:04X}",
            vector = self.regs.pc
        );
        Some(20)
    }

    /// Advance EI's one-instruction latency. Called after every executed
    /// instruction.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            // Second step after EI: actually enable IME.
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            // First step after EI (EI itself): arm the delayed enable.
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}

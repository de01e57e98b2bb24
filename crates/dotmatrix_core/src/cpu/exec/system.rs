use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_nop(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        4
    }

    pub(in crate::cpu) fn exec_halt(&mut self, bus: &mut dyn Bus, _opcode: u8) -> u32 {
        // With IME clear and an interrupt already pending the CPU does not
        // halt; instead the next opcode fetch fails to increment PC.
        if !self.ime && Self::pending_interrupts(bus) != 0 {
            self.halt_bug = true;
            return 4;
        }
        self.halted = true;
        4
    }

    pub(in crate::cpu) fn exec_stop(&mut self, bus: &mut dyn Bus, _opcode: u8) -> u32 {
        // STOP is a 2-byte instruction; the padding byte is discarded.
        let _padding = self.fetch8(bus);
        self.stopped = true;
        self.halted = false;
        4
    }

    pub(in crate::cpu) fn exec_di(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        4
    }

    pub(in crate::cpu) fn exec_ei(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        // IME becomes 1 only after the *next* instruction completes.
        self.ime_enable_pending = true;
        4
    }
}

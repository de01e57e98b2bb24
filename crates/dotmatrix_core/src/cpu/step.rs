use crate::{CoreError, Result};

use super::table::{EXTENDED, PREFIX_CB, PRIMARY};
use super::{Bus, Cpu};

impl Cpu {
    /// Execute one instruction (or one interrupt entry) and return the
    /// number of clock ticks it took.
    ///
    /// The whole instruction runs before this returns; callers never see a
    /// half-executed instruction. A byte with no handler rewinds PC to the
    /// opcode and reports `CoreError::IllegalOpcode`.
    pub fn step(&mut self, bus: &mut dyn Bus) -> Result<u32> {
        if self.stopped {
            if !bus.input_pending() {
                return Ok(4);
            }
            self.stopped = false;
        }

        if let Some(cycles) = self.service_interrupt(bus) {
            return Ok(cycles);
        }

        if self.halted {
            return Ok(4);
        }

        let pc = self.regs.pc;
        let opcode = self.fetch8(bus);
        let (table, opcode, prefixed) = if opcode == PREFIX_CB {
            (&*EXTENDED, self.fetch8(bus), true)
        } else {
            (&*PRIMARY, opcode, false)
        };

        let Some(handler) = table.get(opcode) else {
            log::error!(
                "illegal opcode 0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                sp = self.regs.sp,
                af = self.regs.af(),
                bc = self.regs.bc(),
                de = self.regs.de(),
                hl = self.regs.hl(),
            );
            self.regs.pc = pc;
            return Err(CoreError::IllegalOpcode {
                pc,
                opcode,
                prefixed,
            });
        };

        let cycles = handler(self, bus, opcode);
        self.apply_ime_delay();
        Ok(cycles)
    }
}

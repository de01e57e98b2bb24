mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;
mod table;

pub use bus::Bus;
pub use regs::{Flag, Flags, Reg16, Reg8, Registers};
pub use table::is_defined;

pub(crate) use regs::Operand;

/// Sharp LR35902 core.
///
/// Holds the register file and the control latches (`ime`, `halted`,
/// `stopped`). Execution is instruction-atomic: `step` runs one whole
/// instruction (or one interrupt entry) and reports its cost in clock ticks.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state, left when a joypad line goes low.
    stopped: bool,
    /// Set by HALT when IME=0 and an interrupt is already pending: the next
    /// opcode fetch does not advance PC.
    halt_bug: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        let f = &self.regs.f;
        match flag {
            Flag::Z => f.zero,
            Flag::N => f.subtract,
            Flag::H => f.half_carry,
            Flag::C => f.carry,
        }
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let f = &mut self.regs.f;
        match flag {
            Flag::Z => f.zero = value,
            Flag::N => f.subtract = value,
            Flag::H => f.half_carry = value,
            Flag::C => f.carry = value,
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = Flags::default();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// True while an EI is waiting for its one-instruction latency to elapse.
    pub fn ime_pending(&self) -> bool {
        self.ime_enable_pending || self.ime_enable_delay
    }
}

#[cfg(test)]
mod tests;

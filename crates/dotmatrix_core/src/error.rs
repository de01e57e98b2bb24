use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failures surfaced by the core to the driving loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The decoder fetched a byte with no handler in its table.
    ///
    /// `pc` is the address of the opcode byte itself (the 0xCB prefix, for
    /// extended opcodes); the CPU is left with PC pointing there so the
    /// failure can be inspected or reproduced.
    #[error("illegal opcode {}0x{opcode:02X} at 0x{pc:04X}", prefix_note(.prefixed))]
    IllegalOpcode { pc: u16, opcode: u8, prefixed: bool },

    #[error("address range 0x{start:04X}+{len} runs past the end of the address space")]
    OutOfRangeAddress { start: u16, len: usize },

    /// Cartridge images are made of whole 16 KiB banks, no more than the
    /// bank controller can map.
    #[error("ROM image of {len} bytes does not fit the cartridge's 16 KiB banks")]
    RomLoad { len: usize },

    #[error("boot ROM must be exactly 256 bytes, got {len}")]
    BootRom { len: usize },
}

fn prefix_note(prefixed: &bool) -> &'static str {
    if *prefixed {
        "CB "
    } else {
        ""
    }
}

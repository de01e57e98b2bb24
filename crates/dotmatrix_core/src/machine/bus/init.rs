use super::map::IO_START;
use super::MemoryBus;

/// Sound register contents at PC=0x0100 on a DMG.
const DMG_SOUND_REGS: [(u16, u8); 21] = [
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF13, 0xFF),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF18, 0xFF),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1D, 0xFF),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
];

impl MemoryBus {
    /// Put the I/O registers in the state the boot ROM leaves them in.
    pub(crate) fn apply_dmg_boot_state(&mut self) {
        for (addr, value) in DMG_SOUND_REGS {
            self.io[usize::from(addr - IO_START)] = value;
        }
        self.ppu.apply_dmg_boot_state();
        // 0xE1 as read back: a V-blank request is already pending.
        self.if_reg = 0x01;
        self.ie_reg = 0x00;
        // Boot ROM disable register, already written.
        self.io[usize::from(super::map::BOOT_OFF_ADDR - IO_START)] = 0x01;
    }
}

use super::super::map::*;
use super::super::MemoryBus;

impl MemoryBus {
    /// Region dispatch for writes, highest ranges first.
    pub(in super::super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            IE_ADDR => self.ie_reg = value,
            HRAM_START..=HRAM_END => self.hram[usize::from(addr - HRAM_START)] = value,
            IO_START..=IO_END => self.write_io(addr, value),
            NOT_USABLE_START..=NOT_USABLE_END => {
                log::trace!("ignored write 0x{value:02X} to unusable 0x{addr:04X}");
            }
            OAM_START..=OAM_END => self.ppu.oam_write(addr - OAM_START, value),
            ECHO_RAM_START..=ECHO_RAM_END => {
                self.wram[usize::from(addr - ECHO_RAM_START)] = value;
            }
            WRAM_START..=WRAM_END => self.wram[usize::from(addr - WRAM_START)] = value,
            EXT_RAM_START..=EXT_RAM_END => self.eram[usize::from(addr - EXT_RAM_START)] = value,
            VRAM_START..=VRAM_END => self.ppu.vram_write(addr - VRAM_START, value),
            // ROM is never written; the bank controller may treat the write
            // as a register access.
            0x0000..=ROM_BANK_N_END => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.write_control(addr, value);
                }
            }
        }
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            JOYP_ADDR => self.joypad.write(value),
            SB_ADDR => self.serial.write_sb(value),
            SC_ADDR => {
                if self.serial.write_sc(value) {
                    self.request_interrupt(crate::machine::Interrupts::SERIAL);
                }
            }
            IF_ADDR => self.if_reg = value & 0x1F,
            DMA_ADDR => self.oam_dma(value),
            LCD_REGS_START..=LCD_REGS_END => self.ppu.write_register(addr, value),
            BOOT_OFF_ADDR => {
                if value != 0 && self.boot_rom.take().is_some() {
                    log::debug!("boot ROM unmapped");
                }
                self.io[usize::from(addr - IO_START)] = value;
            }
            _ => self.io[usize::from(addr - IO_START)] = value,
        }
    }
}

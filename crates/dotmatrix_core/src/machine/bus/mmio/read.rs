use super::super::map::*;
use super::super::MemoryBus;

impl MemoryBus {
    /// Region dispatch for reads, highest ranges first.
    pub(in super::super) fn read8_mmio(&self, addr: u16) -> u8 {
        match addr {
            IE_ADDR => self.ie_reg,
            HRAM_START..=HRAM_END => self.hram[usize::from(addr - HRAM_START)],
            IO_START..=IO_END => self.read_io(addr),
            NOT_USABLE_START..=NOT_USABLE_END => 0,
            OAM_START..=OAM_END => self.ppu.oam_read(addr - OAM_START),
            // Same storage as 0xC000-0xDDFF.
            ECHO_RAM_START..=ECHO_RAM_END => self.wram[usize::from(addr - ECHO_RAM_START)],
            WRAM_START..=WRAM_END => self.wram[usize::from(addr - WRAM_START)],
            EXT_RAM_START..=EXT_RAM_END => self.eram[usize::from(addr - EXT_RAM_START)],
            VRAM_START..=VRAM_END => self.ppu.vram_read(addr - VRAM_START),
            ROM_BANK_N_START..=ROM_BANK_N_END => self
                .cartridge
                .as_ref()
                .map_or(0, |cart| cart.read_switchable(addr)),
            0x0000..=ROM_BANK_0_END => self.read_bank0(addr),
        }
    }

    fn read_bank0(&self, addr: u16) -> u8 {
        if let Some(boot) = &self.boot_rom {
            if usize::from(addr) < BOOT_ROM_SIZE {
                return boot[usize::from(addr)];
            }
        }
        self.cartridge
            .as_ref()
            .map_or(0, |cart| cart.read_bank0(addr))
    }

    fn read_io(&self, addr: u16) -> u8 {
        match addr {
            JOYP_ADDR => self.joypad.read(),
            SB_ADDR => self.serial.sb,
            SC_ADDR => self.serial.sc,
            // Upper three bits are unused and read as 1.
            IF_ADDR => self.if_reg | 0xE0,
            DMA_ADDR => self.dma,
            LCD_REGS_START..=LCD_REGS_END => self.ppu.read_register(addr),
            _ => self.io[usize::from(addr - IO_START)],
        }
    }
}

//! Address map of the DMG.

pub(crate) const ROM_BANK_0_END: u16 = 0x3FFF;
pub(crate) const ROM_BANK_N_START: u16 = 0x4000;
pub(crate) const ROM_BANK_N_END: u16 = 0x7FFF;

pub(crate) const VRAM_START: u16 = 0x8000;
pub(crate) const VRAM_END: u16 = 0x9FFF;

pub(crate) const EXT_RAM_START: u16 = 0xA000;
pub(crate) const EXT_RAM_END: u16 = 0xBFFF;
pub(crate) const EXT_RAM_SIZE: usize = (EXT_RAM_END - EXT_RAM_START + 1) as usize;

pub(crate) const WRAM_START: u16 = 0xC000;
pub(crate) const WRAM_END: u16 = 0xDFFF;
pub(crate) const WRAM_SIZE: usize = (WRAM_END - WRAM_START + 1) as usize;

// Mirrors 0xC000-0xDDFF.
pub(crate) const ECHO_RAM_START: u16 = 0xE000;
pub(crate) const ECHO_RAM_END: u16 = 0xFDFF;

pub(crate) const OAM_START: u16 = 0xFE00;
pub(crate) const OAM_END: u16 = 0xFE9F;

pub(crate) const NOT_USABLE_START: u16 = 0xFEA0;
pub(crate) const NOT_USABLE_END: u16 = 0xFEFF;

pub(crate) const IO_START: u16 = 0xFF00;
pub(crate) const IO_END: u16 = 0xFF7F;
pub(crate) const IO_SIZE: usize = (IO_END - IO_START + 1) as usize;

pub(crate) const HRAM_START: u16 = 0xFF80;
pub(crate) const HRAM_END: u16 = 0xFFFE;
pub(crate) const HRAM_SIZE: usize = (HRAM_END - HRAM_START + 1) as usize;

pub(crate) const IE_ADDR: u16 = 0xFFFF;

// I/O registers with behaviour beyond plain storage.
pub(crate) const JOYP_ADDR: u16 = 0xFF00;
pub(crate) const SB_ADDR: u16 = 0xFF01;
pub(crate) const SC_ADDR: u16 = 0xFF02;
pub(crate) const IF_ADDR: u16 = 0xFF0F;
pub(crate) const LCD_REGS_START: u16 = 0xFF40;
pub(crate) const DMA_ADDR: u16 = 0xFF46;
pub(crate) const LCD_REGS_END: u16 = 0xFF4B;
pub(crate) const BOOT_OFF_ADDR: u16 = 0xFF50;

pub(crate) const BOOT_ROM_SIZE: usize = 0x100;

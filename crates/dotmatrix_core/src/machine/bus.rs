use crate::cpu::Bus;
use crate::{CoreError, Result};

use super::cartridge::Cartridge;
use super::interrupts::Interrupts;
use super::ppu::{Ppu, Transitions};
use super::serial::Serial;

mod dma;
mod init;
mod joypad;
pub(crate) mod map;
mod mmio;

pub use joypad::Button;
pub(crate) use joypad::Joypad;

use map::{BOOT_ROM_SIZE, EXT_RAM_SIZE, HRAM_SIZE, IO_SIZE, WRAM_SIZE};

/// The 64 KiB address space seen by the CPU.
///
/// Each region has its own backing store. Echo RAM has none: it is an
/// alternate address range for the work RAM bytes.
pub struct MemoryBus {
    cartridge: Option<Cartridge>,
    /// Mapped over 0x0000-0x00FF until a non-zero write to 0xFF50.
    boot_rom: Option<Box<[u8; BOOT_ROM_SIZE]>>,
    pub(crate) ppu: Ppu,
    eram: Box<[u8; EXT_RAM_SIZE]>,
    wram: Box<[u8; WRAM_SIZE]>,
    /// Backing store for I/O registers without dedicated state.
    io: [u8; IO_SIZE],
    hram: [u8; HRAM_SIZE],
    /// IF, low five bits.
    if_reg: u8,
    ie_reg: u8,
    dma: u8,
    pub(crate) serial: Serial,
    joypad: Joypad,
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self {
            cartridge: None,
            boot_rom: None,
            ppu: Ppu::default(),
            eram: Box::new([0; EXT_RAM_SIZE]),
            wram: Box::new([0; WRAM_SIZE]),
            io: [0; IO_SIZE],
            hram: [0; HRAM_SIZE],
            if_reg: 0,
            ie_reg: 0,
            dma: 0,
            serial: Serial::default(),
            joypad: Joypad::default(),
        }
    }
}

impl std::fmt::Debug for MemoryBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBus")
            .field("cartridge", &self.cartridge)
            .field("boot_rom_mapped", &self.boot_rom.is_some())
            .field("ppu", &self.ppu)
            .field("if", &format_args!("0x{:02X}", self.if_reg))
            .field("ie", &format_args!("0x{:02X}", self.ie_reg))
            .finish_non_exhaustive()
    }
}

impl MemoryBus {
    /// A bus with every region zeroed, as at power-on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a 256-byte boot ROM over the start of the cartridge.
    pub fn map_boot_rom(&mut self, image: &[u8]) -> Result<()> {
        let rom: Box<[u8; BOOT_ROM_SIZE]> = image
            .to_vec()
            .into_boxed_slice()
            .try_into()
            .map_err(|_| CoreError::BootRom { len: image.len() })?;
        self.boot_rom = Some(rom);
        Ok(())
    }

    pub fn boot_rom_mapped(&self) -> bool {
        self.boot_rom.is_some()
    }

    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub(crate) fn take_cartridge(&mut self) -> Option<Cartridge> {
        self.cartridge.take()
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn serial_output(&self) -> &[u8] {
        &self.serial.output
    }

    /// Pending interrupt requests (IF).
    pub fn interrupt_flags(&self) -> Interrupts {
        Interrupts::from_bits_truncate(self.if_reg)
    }

    pub fn request_interrupt(&mut self, source: Interrupts) {
        self.if_reg |= source.bits();
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if self.joypad.set(button, pressed) {
            self.request_interrupt(Interrupts::JOYPAD);
        }
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value);
    }

    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read_byte(addr), self.read_byte(addr.wrapping_add(1))])
    }

    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_byte(addr, lo);
        self.write_byte(addr.wrapping_add(1), hi);
    }

    /// `len` consecutive bytes starting at `start`, without wrapping past
    /// 0xFFFF.
    pub fn read_block(&self, start: u16, len: usize) -> Result<Vec<u8>> {
        if usize::from(start) + len > 0x1_0000 {
            return Err(CoreError::OutOfRangeAddress { start, len });
        }
        Ok((0..len)
            .map(|i| self.read_byte(start.wrapping_add(i as u16)))
            .collect())
    }

    /// Feed `cycles` ticks to the LCD controller and latch the interrupts
    /// it raised.
    pub(crate) fn tick(&mut self, cycles: u32) -> Transitions {
        let (transitions, requests) = self.ppu.advance(cycles);
        self.request_interrupt(requests);
        transitions
    }
}

impl Bus for MemoryBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read_byte(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write_byte(addr, value);
    }

    fn input_pending(&mut self) -> bool {
        self.joypad.any_held()
    }
}

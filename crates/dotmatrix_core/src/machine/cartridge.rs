//! Cartridge image and the bank-controller seam.
//!
//! The image is kept whole. Bank 0 is always visible at 0x0000-0x3FFF; what
//! appears in the switchable window at 0x4000-0x7FFF, and what writes into
//! ROM space mean, is up to the `BankController` chosen from header byte
//! 0x0147.

use crate::{CoreError, Result};

pub(crate) const ROM_BANK_SIZE: usize = 0x4000;

const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0143;
const CARTRIDGE_TYPE: usize = 0x0147;
const ROM_SIZE: usize = 0x0148;

/// Strategy for the switchable ROM window and ROM-space control writes.
pub trait BankController {
    fn name(&self) -> &'static str;

    /// Number of 16 KiB banks this controller can bring into view. Images
    /// with more banks are rejected at load time.
    fn bank_capacity(&self) -> usize;

    /// Read from the switchable window. `offset` is relative to 0x4000.
    fn read_switchable(&self, rom: &[u8], offset: u16) -> u8;

    /// A CPU write anywhere in 0x0000-0x7FFF.
    fn write_control(&mut self, addr: u16, value: u8);
}

/// No bank switching: the switchable window reads 0 and control writes are
/// dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBanking;

impl BankController for NoBanking {
    fn name(&self) -> &'static str {
        "none"
    }

    fn bank_capacity(&self) -> usize {
        1
    }

    fn read_switchable(&self, _rom: &[u8], _offset: u16) -> u8 {
        0
    }

    fn write_control(&mut self, addr: u16, value: u8) {
        log::trace!("ignored ROM write 0x{value:02X} to 0x{addr:04X}");
    }
}

/// Human-readable name for a cartridge type byte.
fn kind_name(kind: u8) -> &'static str {
    match kind {
        0x00 => "ROM ONLY",
        0x01..=0x03 => "MBC1",
        0x05 | 0x06 => "MBC2",
        0x08 | 0x09 => "ROM+RAM",
        0x0B..=0x0D => "MMM01",
        0x0F..=0x13 => "MBC3",
        0x19..=0x1E => "MBC5",
        0x20 => "MBC6",
        0x22 => "MBC7",
        0xFC => "POCKET CAMERA",
        0xFD => "BANDAI TAMA5",
        0xFE => "HuC3",
        0xFF => "HuC1",
        _ => "unknown",
    }
}

/// Pick the bank controller for header byte 0x0147.
pub fn bank_controller_for(kind: u8) -> Box<dyn BankController> {
    match kind {
        0x00 | 0x08 | 0x09 => Box::new(NoBanking),
        _ => {
            log::warn!(
                "cartridge type 0x{kind:02X} ({}) has no bank controller; the switchable ROM window will read 0",
                kind_name(kind)
            );
            Box::new(NoBanking)
        }
    }
}

/// Fields decoded from the cartridge header (0x0100-0x014F).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub kind: u8,
    /// ROM size declared by byte 0x0148, in bytes. `None` for codes the
    /// header format does not define.
    pub declared_rom_size: Option<usize>,
}

impl CartridgeHeader {
    fn parse(image: &[u8]) -> Self {
        let title = image[TITLE_START..=TITLE_END]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect::<String>()
            .trim_end()
            .to_string();
        let size_code = image[ROM_SIZE];
        let declared_rom_size = (size_code <= 8).then(|| (2 * ROM_BANK_SIZE) << size_code);

        Self {
            title,
            kind: image[CARTRIDGE_TYPE],
            declared_rom_size,
        }
    }
}

pub struct Cartridge {
    rom: Vec<u8>,
    header: CartridgeHeader,
    controller: Box<dyn BankController>,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("len", &self.rom.len())
            .field("header", &self.header)
            .field("controller", &self.controller.name())
            .finish()
    }
}

impl Cartridge {
    /// Validate and take ownership of a ROM image.
    ///
    /// The image must be a non-empty whole number of 16 KiB banks, and no
    /// more banks than the selected controller can map. Anything else is
    /// rejected rather than truncated or padded.
    pub fn from_image(image: Vec<u8>) -> Result<Self> {
        if image.is_empty() || image.len() % ROM_BANK_SIZE != 0 {
            return Err(CoreError::RomLoad { len: image.len() });
        }

        let header = CartridgeHeader::parse(&image);
        if let Some(declared) = header.declared_rom_size {
            if declared != image.len() {
                log::warn!(
                    "header declares {declared} bytes of ROM but the image has {}",
                    image.len()
                );
            }
        }

        let controller = bank_controller_for(header.kind);
        let banks = image.len() / ROM_BANK_SIZE;
        if banks > controller.bank_capacity() {
            log::error!(
                "cartridge type 0x{:02X} ({}) has {banks} banks but controller {} maps only {}",
                header.kind,
                kind_name(header.kind),
                controller.name(),
                controller.bank_capacity()
            );
            return Err(CoreError::RomLoad { len: image.len() });
        }

        log::info!(
            "loaded cartridge \"{}\": type 0x{:02X} ({}), {} banks, controller {}",
            header.title,
            header.kind,
            kind_name(header.kind),
            banks,
            controller.name()
        );

        Ok(Self {
            rom: image,
            header,
            controller,
        })
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn bank_count(&self) -> usize {
        self.rom.len() / ROM_BANK_SIZE
    }

    pub(crate) fn read_bank0(&self, addr: u16) -> u8 {
        self.rom[addr as usize & (ROM_BANK_SIZE - 1)]
    }

    pub(crate) fn read_switchable(&self, addr: u16) -> u8 {
        self.controller
            .read_switchable(&self.rom, addr.wrapping_sub(0x4000))
    }

    pub(crate) fn write_control(&mut self, addr: u16, value: u8) {
        self.controller.write_control(addr, value);
    }
}

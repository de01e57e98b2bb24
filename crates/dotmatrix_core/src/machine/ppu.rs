mod timing;

pub use timing::{LcdTiming, Mode};
pub(crate) use timing::Transitions;

use super::Interrupts;

pub(crate) const VRAM_SIZE: usize = 0x2000;
pub(crate) const OAM_SIZE: usize = 0xA0;

const LCDC: u16 = 0xFF40;
const STAT: u16 = 0xFF41;
const SCY: u16 = 0xFF42;
const SCX: u16 = 0xFF43;
const LY: u16 = 0xFF44;
const LYC: u16 = 0xFF45;
const BGP: u16 = 0xFF47;
const OBP0: u16 = 0xFF48;
const OBP1: u16 = 0xFF49;
const WY: u16 = 0xFF4A;
const WX: u16 = 0xFF4B;

/// STAT interrupt selects, the only writable STAT bits.
const STAT_SELECT_MASK: u8 = 0b0111_1000;
const STAT_SELECT_HBLANK: u8 = 1 << 3;
const STAT_SELECT_VBLANK: u8 = 1 << 4;
const STAT_SELECT_OAM: u8 = 1 << 5;
const STAT_SELECT_LYC: u8 = 1 << 6;
const STAT_COINCIDENCE: u8 = 1 << 2;

/// Video memory, LCD registers and the scanline clock.
///
/// Rendering is left to whoever observes finished frames; this type only
/// keeps the state a renderer would read.
#[derive(Clone)]
pub struct Ppu {
    vram: Box<[u8; VRAM_SIZE]>,
    oam: [u8; OAM_SIZE],
    timing: LcdTiming,
    lcdc: u8,
    stat_select: u8,
    scy: u8,
    scx: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,
}

impl Default for Ppu {
    fn default() -> Self {
        Self {
            vram: Box::new([0; VRAM_SIZE]),
            oam: [0; OAM_SIZE],
            timing: LcdTiming::new(),
            lcdc: 0,
            stat_select: 0,
            scy: 0,
            scx: 0,
            lyc: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
        }
    }
}

impl std::fmt::Debug for Ppu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ppu")
            .field("timing", &self.timing)
            .field("lcdc", &format_args!("0x{:02X}", self.lcdc))
            .field("stat", &format_args!("0x{:02X}", self.stat()))
            .finish_non_exhaustive()
    }
}

impl Ppu {
    /// Register values left behind by the DMG boot ROM.
    pub(crate) fn apply_dmg_boot_state(&mut self) {
        self.lcdc = 0x91;
        self.bgp = 0xFC;
        self.obp0 = 0xFF;
        self.obp1 = 0xFF;
    }

    pub fn vram(&self) -> &[u8] {
        &self.vram[..]
    }

    pub fn oam(&self) -> &[u8] {
        &self.oam
    }

    pub fn timing(&self) -> &LcdTiming {
        &self.timing
    }

    pub fn lcdc(&self) -> u8 {
        self.lcdc
    }

    /// (SCY, SCX)
    pub fn scroll(&self) -> (u8, u8) {
        (self.scy, self.scx)
    }

    /// (WY, WX)
    pub fn window(&self) -> (u8, u8) {
        (self.wy, self.wx)
    }

    /// (BGP, OBP0, OBP1)
    pub fn palettes(&self) -> (u8, u8, u8) {
        (self.bgp, self.obp0, self.obp1)
    }

    pub(crate) fn vram_read(&self, offset: u16) -> u8 {
        self.vram[offset as usize & (VRAM_SIZE - 1)]
    }

    pub(crate) fn vram_write(&mut self, offset: u16, value: u8) {
        self.vram[offset as usize & (VRAM_SIZE - 1)] = value;
    }

    pub(crate) fn oam_read(&self, offset: u16) -> u8 {
        self.oam.get(offset as usize).copied().unwrap_or(0)
    }

    pub(crate) fn oam_write(&mut self, offset: u16, value: u8) {
        if let Some(slot) = self.oam.get_mut(offset as usize) {
            *slot = value;
        }
    }

    fn stat(&self) -> u8 {
        let coincidence = if self.timing.scanline() == self.lyc {
            STAT_COINCIDENCE
        } else {
            0
        };
        0x80 | self.stat_select | coincidence | self.timing.mode().stat_bits()
    }

    /// LCD register read for 0xFF40..=0xFF4B (DMA excluded).
    pub(crate) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            LCDC => self.lcdc,
            STAT => self.stat(),
            SCY => self.scy,
            SCX => self.scx,
            LY => self.timing.scanline(),
            LYC => self.lyc,
            BGP => self.bgp,
            OBP0 => self.obp0,
            OBP1 => self.obp1,
            WY => self.wy,
            WX => self.wx,
            _ => 0xFF,
        }
    }

    pub(crate) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            LCDC => self.lcdc = value,
            STAT => self.stat_select = value & STAT_SELECT_MASK,
            SCY => self.scy = value,
            SCX => self.scx = value,
            // LY is driven by the scanline clock.
            LY => log::trace!("ignored write 0x{value:02X} to LY"),
            LYC => self.lyc = value,
            BGP => self.bgp = value,
            OBP0 => self.obp0 = value,
            OBP1 => self.obp1 = value,
            WY => self.wy = value,
            WX => self.wx = value,
            _ => {}
        }
    }

    /// Advance the scanline clock and report the interrupts it raised.
    pub(crate) fn advance(&mut self, cycles: u32) -> (Transitions, Interrupts) {
        let transitions = self.timing.advance(cycles);
        let mut requests = Interrupts::empty();

        if transitions.contains(Transitions::ENTERED_VBLANK) {
            requests |= Interrupts::VBLANK;
        }

        let select = self.stat_select;
        let stat_hit = (transitions.contains(Transitions::ENTERED_HBLANK)
            && select & STAT_SELECT_HBLANK != 0)
            || (transitions.contains(Transitions::ENTERED_VBLANK)
                && select & STAT_SELECT_VBLANK != 0)
            || (transitions.contains(Transitions::ENTERED_OAM_SCAN)
                && select & STAT_SELECT_OAM != 0)
            || (transitions.contains(Transitions::LINE_CHANGED)
                && select & STAT_SELECT_LYC != 0
                && self.timing.scanline() == self.lyc);
        if stat_hit {
            requests |= Interrupts::LCD_STAT;
        }

        (transitions, requests)
    }
}

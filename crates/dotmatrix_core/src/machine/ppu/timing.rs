//! Scanline clock of the LCD controller.
//!
//! Four modes, entered in order on every drawing line:
//! OAM scan (80) -> VRAM read (172) -> H-blank (204), which together make a
//! 456-tick line. After the H-blank that brings the line index to 143 the
//! controller sits in V-blank for 456 ticks per line until line 153 wraps
//! back to 0. A whole frame is 154 lines, 70224 ticks.

use bitflags::bitflags;

pub(crate) const OAM_SCAN_CYCLES: u32 = 80;
pub(crate) const VRAM_READ_CYCLES: u32 = 172;
pub(crate) const HBLANK_CYCLES: u32 = 204;
pub(crate) const LINE_CYCLES: u32 = 456;
const FRAME_CYCLES: u32 = LINE_CYCLES * (LAST_LINE as u32 + 1);

/// Line index at which the H-blank transition enters V-blank.
pub(crate) const VBLANK_START_LINE: u8 = 143;
pub(crate) const LAST_LINE: u8 = 153;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    OamScan,
    VramRead,
    HBlank,
    VBlank,
}

impl Mode {
    /// Ticks spent in this mode before the next transition.
    pub fn duration(self) -> u32 {
        match self {
            Mode::OamScan => OAM_SCAN_CYCLES,
            Mode::VramRead => VRAM_READ_CYCLES,
            Mode::HBlank => HBLANK_CYCLES,
            Mode::VBlank => LINE_CYCLES,
        }
    }

    /// Mode number as reported in STAT bits 1-0.
    pub fn stat_bits(self) -> u8 {
        match self {
            Mode::HBlank => 0,
            Mode::VBlank => 1,
            Mode::OamScan => 2,
            Mode::VramRead => 3,
        }
    }
}

bitflags! {
    /// What happened during one `LcdTiming::advance` call.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Transitions: u8 {
        const ENTERED_OAM_SCAN = 1 << 0;
        const ENTERED_HBLANK = 1 << 1;
        /// V-blank was entered from the last drawing line: a frame is ready.
        const ENTERED_VBLANK = 1 << 2;
        /// The scanline index changed (including the 153 -> 0 wrap).
        const LINE_CHANGED = 1 << 3;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdTiming {
    mode: Mode,
    /// Ticks spent in the current mode.
    counter: u32,
    scanline: u8,
}

impl Default for LcdTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl LcdTiming {
    pub fn new() -> Self {
        Self {
            mode: Mode::OamScan,
            counter: 0,
            scanline: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn scanline(&self) -> u8 {
        self.scanline
    }

    /// Run the clock forward by `cycles` ticks.
    ///
    /// Any number of transitions may happen in one call. Ticks past a
    /// transition carry into the next mode, so the counter is 0 only when a
    /// call lands exactly on a boundary.
    pub fn advance(&mut self, cycles: u32) -> Transitions {
        let mut transitions = Transitions::empty();
        let mut remaining = cycles;

        // Whole frames leave the state unchanged but pass every transition.
        if remaining >= FRAME_CYCLES {
            remaining %= FRAME_CYCLES;
            transitions = Transitions::all();
        }

        loop {
            let left_in_mode = self.mode.duration() - self.counter;
            if remaining < left_in_mode {
                self.counter += remaining;
                return transitions;
            }
            remaining -= left_in_mode;
            self.counter = 0;
            transitions |= self.next_mode();
        }
    }

    fn next_mode(&mut self) -> Transitions {
        match self.mode {
            Mode::OamScan => {
                self.mode = Mode::VramRead;
                Transitions::empty()
            }
            Mode::VramRead => {
                self.mode = Mode::HBlank;
                Transitions::ENTERED_HBLANK
            }
            Mode::HBlank => {
                self.scanline += 1;
                if self.scanline == VBLANK_START_LINE {
                    self.mode = Mode::VBlank;
                    Transitions::LINE_CHANGED | Transitions::ENTERED_VBLANK
                } else {
                    self.mode = Mode::OamScan;
                    Transitions::LINE_CHANGED | Transitions::ENTERED_OAM_SCAN
                }
            }
            Mode::VBlank => {
                if self.scanline >= LAST_LINE {
                    self.scanline = 0;
                    self.mode = Mode::OamScan;
                    Transitions::LINE_CHANGED | Transitions::ENTERED_OAM_SCAN
                } else {
                    self.scanline += 1;
                    Transitions::LINE_CHANGED
                }
            }
        }
    }
}

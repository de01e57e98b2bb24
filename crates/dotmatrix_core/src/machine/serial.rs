/// Serial port reduced to what test ROMs need: bytes shifted out with the
/// internal clock are captured into `output`.
#[derive(Debug, Clone)]
pub(crate) struct Serial {
    pub(crate) sb: u8,
    pub(crate) sc: u8,
    pub(crate) output: Vec<u8>,
}

impl Default for Serial {
    fn default() -> Self {
        Self {
            sb: 0x00,
            // Unused SC bits read back as 1.
            sc: 0x7E,
            output: Vec::new(),
        }
    }
}

impl Serial {
    pub(super) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    /// Returns `true` when the write completed a transfer, which raises the
    /// serial interrupt.
    pub(super) fn write_sc(&mut self, value: u8) -> bool {
        self.sc = value | 0x7E;
        // Start bit plus internal clock.
        if value & 0x81 == 0x81 {
            self.output.push(self.sb);
            log::trace!("serial out 0x{:02X}", self.sb);
            self.sc &= !0x80;
            return true;
        }
        false
    }
}

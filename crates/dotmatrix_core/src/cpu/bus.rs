/// The CPU's view of the 64 KiB address space.
///
/// Every fetch, operand access, and stack operation goes through this
/// trait. The machine's `MemoryBus` implements it; tests use a flat array.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read composed of two byte reads.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian 16-bit write composed of two byte writes, low byte first.
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    /// Whether a joypad input line is currently low, which ends STOP.
    ///
    /// The default polls P1 ($FF00). Buses that know the raw button state
    /// can answer independently of the P1 group selection.
    fn input_pending(&mut self) -> bool {
        (self.read8(0xFF00) & 0x0F) != 0x0F
    }
}

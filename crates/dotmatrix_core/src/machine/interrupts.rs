use bitflags::bitflags;

bitflags! {
    /// Interrupt sources as laid out in IF (0xFF0F) and IE (0xFFFF).
    ///
    /// Bit order is also service priority: V-blank first, joypad last.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Interrupts: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

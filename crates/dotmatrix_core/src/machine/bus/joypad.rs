use bitflags::bitflags;

bitflags! {
    /// Buttons currently held. Low nibble is the d-pad, high nibble the
    /// action buttons, each in P1 line order.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct Held: u8 {
        const RIGHT = 1 << 0;
        const LEFT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const SELECT = 1 << 6;
        const START = 1 << 7;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    fn flag(self) -> Held {
        match self {
            Button::Right => Held::RIGHT,
            Button::Left => Held::LEFT,
            Button::Up => Held::UP,
            Button::Down => Held::DOWN,
            Button::A => Held::A,
            Button::B => Held::B,
            Button::Select => Held::SELECT,
            Button::Start => Held::START,
        }
    }
}

/// P1/JOYP (0xFF00).
#[derive(Debug, Clone)]
pub(crate) struct Joypad {
    /// Bits 5 (buttons) and 4 (d-pad); 0 selects the group.
    select: u8,
    held: Held,
}

impl Default for Joypad {
    fn default() -> Self {
        Self {
            select: 0x30,
            held: Held::empty(),
        }
    }
}

impl Joypad {
    pub(crate) fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.held.bits() & 0x0F;
        }
        if self.select & 0x20 == 0 {
            low &= !(self.held.bits() >> 4) & 0x0F;
        }
        // Bits 7-6 are unused and read as 1.
        0xC0 | self.select | low
    }

    pub(crate) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    /// Update one button. Returns `true` on a new press, which raises the
    /// joypad interrupt.
    pub(crate) fn set(&mut self, button: Button, pressed: bool) -> bool {
        let flag = button.flag();
        let newly_pressed = pressed && !self.held.contains(flag);
        self.held.set(flag, pressed);
        newly_pressed
    }

    /// Any button held, regardless of group selection.
    pub(crate) fn any_held(&self) -> bool {
        !self.held.is_empty()
    }
}

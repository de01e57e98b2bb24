pub mod cpu;
mod error;
pub mod machine;

pub use error::{CoreError, Result};
pub use machine::{Button, FrameObserver, Machine, MachineConfig};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;

/// Clock ticks in one complete LCD frame (154 lines of 456 ticks).
pub const CYCLES_PER_FRAME: u32 = 70_224;

mod bus;
mod cartridge;
mod console;
mod interrupts;
mod ppu;
mod serial;

pub use bus::{Button, MemoryBus};
pub use cartridge::{bank_controller_for, BankController, Cartridge, CartridgeHeader, NoBanking};
pub use console::{FrameObserver, Machine, MachineConfig};
pub use interrupts::Interrupts;
pub use ppu::{LcdTiming, Mode, Ppu};

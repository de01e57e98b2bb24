use typed_builder::TypedBuilder;

use crate::cpu::Cpu;
use crate::{Result, CYCLES_PER_FRAME};

use super::bus::{Button, MemoryBus};
use super::cartridge::Cartridge;
use super::ppu::{LcdTiming, Ppu, Transitions};

/// Receives each finished frame, once per V-blank entry.
pub trait FrameObserver {
    /// `frame` counts from 1. `ppu` gives read access to video memory and
    /// the LCD registers as they stand at the start of V-blank.
    fn frame_ready(&mut self, frame: u64, ppu: &Ppu);
}

impl<F> FrameObserver for F
where
    F: FnMut(u64, &Ppu),
{
    fn frame_ready(&mut self, frame: u64, ppu: &Ppu) {
        self(frame, ppu)
    }
}

#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct MachineConfig {
    /// 256-byte DMG boot ROM. When present the machine starts at PC=0 with
    /// the boot ROM mapped over the cartridge header area.
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<Vec<u8>>,
    /// Without a boot ROM, start from zeroed registers and I/O at PC=0
    /// instead of the post-boot state.
    #[builder(default)]
    pub skip_boot_state: bool,
}

/// One emulated console: CPU, bus and everything behind the bus.
///
/// The driving loop is `step`: one CPU instruction, then exactly that many
/// ticks of LCD time.
pub struct Machine {
    cpu: Cpu,
    bus: MemoryBus,
    config: MachineConfig,
    observer: Option<Box<dyn FrameObserver>>,
    frames: u64,
    cycles: u64,
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("cpu", &self.cpu)
            .field("bus", &self.bus)
            .field("frames", &self.frames)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}

impl Machine {
    pub fn new(config: MachineConfig) -> Result<Self> {
        let (cpu, bus) = Self::power_on(&config)?;
        Ok(Self {
            cpu,
            bus,
            config,
            observer: None,
            frames: 0,
            cycles: 0,
        })
    }

    fn power_on(config: &MachineConfig) -> Result<(Cpu, MemoryBus)> {
        let mut bus = MemoryBus::new();
        let cpu = match &config.boot_rom {
            Some(boot) => {
                bus.map_boot_rom(boot)?;
                Cpu::new_cold()
            }
            None if config.skip_boot_state => Cpu::new_cold(),
            None => {
                bus.apply_dmg_boot_state();
                Cpu::new()
            }
        };
        Ok((cpu, bus))
    }

    /// Validate `image` and insert it as the cartridge.
    ///
    /// A rejected image leaves the current cartridge in place.
    pub fn load_rom(&mut self, image: Vec<u8>) -> Result<()> {
        let cartridge = Cartridge::from_image(image)?;
        self.bus.insert_cartridge(cartridge);
        Ok(())
    }

    /// Power-cycle: everything but the cartridge returns to its initial
    /// state.
    pub fn reset(&mut self) -> Result<()> {
        let cartridge = self.bus.take_cartridge();
        let (cpu, mut bus) = Self::power_on(&self.config)?;
        if let Some(cartridge) = cartridge {
            bus.insert_cartridge(cartridge);
        }
        self.cpu = cpu;
        self.bus = bus;
        self.frames = 0;
        self.cycles = 0;
        Ok(())
    }

    pub fn set_frame_observer(&mut self, observer: impl FrameObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus.set_button(button, pressed);
    }

    /// Execute one instruction and advance the LCD clock in lockstep.
    /// Returns the ticks consumed.
    pub fn step(&mut self) -> Result<u32> {
        self.step_inner().map(|(cycles, _)| cycles)
    }

    fn step_inner(&mut self) -> Result<(u32, bool)> {
        let cycles = self.cpu.step(&mut self.bus)?;
        self.cycles += u64::from(cycles);

        let transitions = self.bus.tick(cycles);
        let frame_ready = transitions.contains(Transitions::ENTERED_VBLANK);
        if frame_ready {
            self.frames += 1;
            log::debug!(
                "frame {} ready at cycle {} (PC=0x{:04X})",
                self.frames,
                self.cycles,
                self.cpu.regs.pc
            );
            if let Some(observer) = self.observer.as_mut() {
                observer.frame_ready(self.frames, &self.bus.ppu);
            }
        }
        Ok((cycles, frame_ready))
    }

    /// Step until the next V-blank entry, or until a whole frame's worth of
    /// ticks has passed. Returns the ticks consumed.
    pub fn step_frame(&mut self) -> Result<u32> {
        let mut elapsed = 0u32;
        while elapsed < CYCLES_PER_FRAME {
            let (cycles, frame_ready) = self.step_inner()?;
            elapsed += cycles;
            if frame_ready {
                break;
            }
        }
        Ok(elapsed)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &MemoryBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut MemoryBus {
        &mut self.bus
    }

    pub fn timing(&self) -> &LcdTiming {
        self.bus.ppu.timing()
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.bus.cartridge()
    }

    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial_output()
    }

    /// Frames completed since power-on.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Ticks executed since power-on.
    pub fn total_cycles(&self) -> u64 {
        self.cycles
    }
}

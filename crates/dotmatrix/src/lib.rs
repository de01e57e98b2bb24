use std::path::PathBuf;

use anyhow::{Context, Result};
use dotmatrix_core::{CoreError, Machine, MachineConfig};
use typed_builder::TypedBuilder;

/// Bytes shown on each side of PC when an illegal opcode stops the run.
const DUMP_RADIUS: u16 = 8;

#[derive(Debug, Clone, TypedBuilder)]
pub struct RunOptions {
    pub rom_path: PathBuf,
    #[builder(default = 60)]
    pub frames: u32,
    #[builder(default)]
    pub boot_rom_path: Option<PathBuf>,
}

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub frames: u64,
    pub cycles: u64,
    pub serial: Vec<u8>,
}

pub fn run(options: &RunOptions) -> Result<RunReport> {
    let rom = std::fs::read(&options.rom_path)
        .with_context(|| format!("failed to read ROM {}", options.rom_path.display()))?;

    let boot_rom = options
        .boot_rom_path
        .as_ref()
        .map(|path| {
            std::fs::read(path)
                .with_context(|| format!("failed to read boot ROM {}", path.display()))
        })
        .transpose()?;

    let config = match boot_rom {
        Some(boot_rom) => MachineConfig::builder().boot_rom(boot_rom).build(),
        None => MachineConfig::builder().build(),
    };
    let mut machine = Machine::new(config).context("failed to power on")?;
    machine
        .load_rom(rom)
        .with_context(|| format!("rejected ROM {}", options.rom_path.display()))?;

    for _ in 0..options.frames {
        if let Err(err) = machine.step_frame() {
            if let CoreError::IllegalOpcode { pc, .. } = err {
                dump_around(&machine, pc);
            }
            return Err(err).context(format!(
                "emulation stopped after {} frames",
                machine.frame_count()
            ));
        }
    }

    let cpu = machine.cpu();
    log::info!(
        "ran {} frames ({} cycles): PC=0x{:04X} SP=0x{:04X} AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X}",
        machine.frame_count(),
        machine.total_cycles(),
        cpu.regs.pc,
        cpu.regs.sp,
        cpu.regs.af(),
        cpu.regs.bc(),
        cpu.regs.de(),
        cpu.regs.hl(),
    );

    Ok(RunReport {
        frames: machine.frame_count(),
        cycles: machine.total_cycles(),
        serial: machine.serial_output().to_vec(),
    })
}

fn dump_around(machine: &Machine, pc: u16) {
    let start = pc.saturating_sub(DUMP_RADIUS);
    let len = usize::from(pc.saturating_add(DUMP_RADIUS) - start) + 1;
    match machine.bus().read_block(start, len) {
        Ok(bytes) => {
            let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
            log::error!("memory at 0x{start:04X}: {}", hex.join(" "));
        }
        Err(err) => log::error!("could not dump memory around PC: {err}"),
    }
}

use std::path::PathBuf;

use dotmatrix::RunOptions;

fn usage() -> ! {
    eprintln!("usage: dotmatrix <rom.gb> [frames] [--boot <boot.bin>]");
    std::process::exit(2);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut rom_path = None;
    let mut frames = None;
    let mut boot_rom_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--boot" | "-b" => match args.next() {
                Some(path) => boot_rom_path = Some(PathBuf::from(path)),
                None => usage(),
            },
            "--help" | "-h" => usage(),
            _ if rom_path.is_none() => rom_path = Some(PathBuf::from(&arg)),
            _ if frames.is_none() => match arg.parse::<u32>() {
                Ok(n) => frames = Some(n),
                Err(_) => {
                    eprintln!("frame count must be a number, got '{arg}'");
                    usage();
                }
            },
            other => {
                eprintln!("unexpected argument '{other}'");
                usage();
            }
        }
    }

    let Some(rom_path) = rom_path else { usage() };
    log::info!("running ROM '{}'", rom_path.display());

    let options = RunOptions::builder()
        .rom_path(rom_path)
        .frames(frames.unwrap_or(60))
        .boot_rom_path(boot_rom_path)
        .build();

    let report = dotmatrix::run(&options)?;
    if !report.serial.is_empty() {
        println!("{}", String::from_utf8_lossy(&report.serial));
    }
    println!("{} frames, {} cycles", report.frames, report.cycles);
    Ok(())
}

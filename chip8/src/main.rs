use std::path::PathBuf;

use clap::Parser;

use chip8_core::{Config, EdgePolicy, CPU_HZ};

mod keymap;
mod run;

#[derive(Parser)]
#[command(name = "chip8")]
#[command(about = "A Chip-8 interpreter")]
struct Args {
    /// ROM file to load
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CPU_HZ)]
    hz: u32,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Clip sprites at the screen edge instead of wrapping them
    #[arg(long)]
    clip: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config {
        edges: if args.clip {
            EdgePolicy::Clip
        } else {
            EdgePolicy::Wrap
        },
    };
    run::run(&args.rom, config, args.hz, args.scale)
}

//! CSR Register Bridge Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, configuration loading, and the two modes of operation.
//!
//! # Usage
//!
//! 1. **Map Mode**: Exports the generated register map as JSON or as a C
//!    header for host driver code.
//! 2. **Run Mode**: Steps the register bridge under a video timing stimulus
//!    while a host loop polls `video.vsync_status`, optionally issuing a
//!    bridge read from a slot file first.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::fs;
use std::path::PathBuf;

use pocket_csr::common::constants::BRIDGE_MAX_LENGTH;
use pocket_csr::config::Config;
use pocket_csr::sim::loader;
use pocket_csr::sim::Simulator;
use pocket_csr::soc::System;

/// Command-line arguments for the register bridge simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "CSR Register Bridge Simulator")]
struct Args {
    /// TOML configuration; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the register map.
    Map {
        #[arg(short, long, value_enum, default_value_t = MapFormat::Json)]
        format: MapFormat,

        /// Output file; stdout when omitted.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Simulate frames with a polling host loop.
    Run {
        #[arg(long, default_value_t = 60)]
        frames: u64,

        /// Steps between two host polls of `video.vsync_status`.
        #[arg(long, default_value_t = 1)]
        poll_interval: u64,

        /// Asset slot contents as `ID=PATH`; repeatable.
        #[arg(long = "slot")]
        slots: Vec<String>,

        /// Issue a bridge read from this slot before the first frame.
        #[arg(long)]
        read: Option<u16>,

        /// Bridge transfer length; defaults to the whole file.
        #[arg(long, default_value_t = BRIDGE_MAX_LENGTH)]
        length: u32,

        /// Destination address in CPU RAM.
        #[arg(long, default_value_t = 0x4000_0000)]
        address: u32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MapFormat {
    Json,
    Header,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    match args.command {
        Command::Map { format, out } => export_map(&config, format, out),
        Command::Run {
            frames,
            poll_interval,
            slots,
            read,
            length,
            address,
        } => run(&config, frames, poll_interval, &slots, read, length, address),
    }
}

fn export_map(config: &Config, format: MapFormat, out: Option<PathBuf>) -> Result<()> {
    let system = System::new(config).context("building register bridge")?;
    let map = system.bus.register_map();
    let text = match format {
        MapFormat::Json => map.to_json().context("serializing register map")?,
        MapFormat::Header => map.to_c_header(),
    };

    match out {
        Some(path) => {
            fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} registers to {}", map.len(), path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn run(
    config: &Config,
    frames: u64,
    poll_interval: u64,
    slots: &[String],
    read: Option<u16>,
    length: u32,
    address: u32,
) -> Result<()> {
    let mut sim = Simulator::new(config)
        .context("building register bridge")?
        .with_video_timing(config);

    for arg in slots {
        let (slot_id, path) = loader::parse_slot_arg(arg)?;
        loader::load_slot(sim.engine_mut(), slot_id, path)?;
    }

    if let Some(slot_id) = read {
        println!(
            "[*] Bridge read: slot {} -> {:#010x} ({:?})",
            slot_id,
            address,
            sim.engine.policy()
        );
        sim.write("bridge.slot_id", slot_id as u64)?;
        sim.write("bridge.data_offset", 0)?;
        sim.write("bridge.transfer_length", length as u64)?;
        sim.write("bridge.ram_data_address", address as u64)?;
        sim.write("bridge.request_read", 1)?;
    }

    let total = total_steps(frames, config.video.v_total())?;
    let poll_interval = poll_interval.max(1);

    for step in 0..total {
        sim.step();
        if step % poll_interval != 0 {
            continue;
        }
        sim.poll_vsync()?;
        if read.is_some() && sim.read("bridge.status")? != 0 {
            let current = sim.read("bridge.current_address")?;
            let size = sim.read("bridge.file_size")?;
            println!(
                "[*] Bridge transfer complete at step {} (file size {}, end {:#010x})",
                step, size, current
            );
        }
    }

    let frame_counter = sim.read("video.frame_counter")?;
    sim.bus().stats.print(frame_counter);
    Ok(())
}

/// Steps needed to simulate `frames` frames of `v_total` lines each.
fn total_steps(frames: u64, v_total: u32) -> Result<u64> {
    let lines = v_total.max(1) as u64;
    frames
        .checked_mul(lines)
        .with_context(|| format!("{} frames of {} lines overflow the step count", frames, lines))
}

//! Modulated Light Transceiver Client - Entry Point

use clap::Parser;
use mltc::transmit::{FrameRate, OutputMode};
use std::path::PathBuf;
use tracing::info;

/// Modulated Light Transceiver Client - type messages, send them as light
#[derive(Parser, Debug)]
#[command(name = "mltc")]
#[command(version)]
#[command(about = "Terminal client that compresses short messages and strobes them as light pulses")]
pub struct Args {
    /// Verbose logging, and a missing device is not fatal in serial mode
    #[arg(short, long)]
    pub debug: bool,

    /// Strobe frame rate in frames per second (1-1000)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=1000))]
    pub fps: Option<i64>,

    /// Where messages are sent
    #[arg(long, value_enum)]
    pub output: Option<OutputMode>,

    /// Run each strobe to completion before reading more input
    #[arg(long)]
    pub blocking: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = mltc::config::load_config_with_precedence(args.config.clone())?;
        let merged = mltc::config::merge_config(config_file)?;
        let with_env = mltc::config::apply_env_overrides(merged);

        let fps_override = args.fps.map(FrameRate::new).transpose()?;
        mltc::config::apply_cli_overrides(with_env, fps_override, args.output, args.blocking)
    };

    mltc::logging::init(&config.log_file_path, args.debug)?;

    info!(
        config = ?config,
        debug = args.debug,
        "Configuration loaded and resolved"
    );

    mltc::view::run_with_config(&config, args.debug)?;

    Ok(())
}

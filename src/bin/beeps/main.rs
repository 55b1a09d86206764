//! beeps - play musical notes as sine beeps
//!
//! Run with: cargo run --bin beeps -- song.txt
//!       or: echo "A:1" | cargo run --bin beeps

mod args;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use args::Args;
use musical_beeps::{runtime, Console, TonePlayer};

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.player_config();

    let input: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut player = TonePlayer::open(config, Console::stdio())
        .wrap_err("failed to start the player")?;
    let summary = runtime::play_lines(input, &mut player)?;
    player.close()?;

    tracing::info!(
        tones = summary.tones,
        pauses = summary.pauses,
        skipped = summary.skipped,
        "finished"
    );
    Ok(())
}

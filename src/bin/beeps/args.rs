use std::path::PathBuf;

use clap::Parser;
use musical_beeps::config::{PlayerConfig, DEFAULT_VOLUME};

const NOTE_FORMAT_HELP: &str = "\
how to play notes:
    Notes are read from a file passed as argument, or directly from the
    standard input. Each note must be on a new line.

note format:
    Each note must be formatted like so: 'A5#:1.5' (without quotes)
    Where:
        - 'A' is the note (between A and G, can be lowercase)
        - '5' is the octave (between 0 and 8, default=4)
        - '#' (or 'b') is optional and used to play a sharp or flat note
        - ':1.5' is the duration of the note (1.5 seconds here, default=0.5)

pause:
    Replace the note by the word 'pause' to stay silent.
    For example, 'pause:5' pauses the player for 5 seconds.";

/// Play sound beeps corresponding to musical notes.
#[derive(Debug, Parser)]
#[command(name = "beeps", version, after_help = NOTE_FORMAT_HELP)]
pub struct Args {
    /// A file containing musical notes (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Disable player output (errors are still shown)
    #[arg(long)]
    pub silent: bool,

    /// Volume between 0 and 1
    #[arg(long, default_value_t = DEFAULT_VOLUME)]
    pub volume: f32,

    /// Let the audio backend print its own warnings while the device opens
    #[arg(long)]
    pub show_device_warnings: bool,
}

impl Args {
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig::default()
            .with_volume(self.volume)
            .with_silent(self.silent)
            .with_hide_device_warnings(!self.show_device_warnings)
    }
}

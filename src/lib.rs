pub mod config;
pub mod dsp; // Sine synthesis, fades, quantization
pub mod error;
pub mod notes; // Note tokens → frequencies
pub mod output; // Audio sinks (cpal device, in-memory)
pub mod player;
pub mod runtime; // Line-by-line playback loop
pub mod sequencing; // `note:duration` lines → playback requests

pub use config::PlayerConfig;
pub use error::{LineError, NoteError, OutputError, PlayerError};
pub use notes::{parse_note, Pitch};
pub use player::{Console, TonePlayer};
pub use sequencing::{parse_line, PlaybackRequest};

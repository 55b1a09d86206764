//! Error types shared across the crate.
//!
//! Per-line errors ([`NoteError`], [`LineError`]) are recoverable: the runner
//! reports them and moves on to the next line. [`PlayerError`] covers the
//! fatal cases (bad volume at startup, a dead device, unreadable input).

use thiserror::Error;

/// Appends ` in '<token>'` when the offending fragment is only part of the token.
fn in_token(fragment: &str, token: &str) -> String {
    if fragment == token {
        String::new()
    } else {
        format!(" in '{token}'")
    }
}

/// Why a note token could not be turned into a frequency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    /// First character is not one of A-G.
    #[error("invalid note: '{letter}'{}", in_token(.letter, .token))]
    InvalidNoteLetter { letter: String, token: String },

    /// Octave position holds something other than a digit 0-8.
    #[error("invalid octave: '{octave}'{}", in_token(.octave, .token))]
    InvalidOctave { octave: String, token: String },

    /// Accidental position holds something other than `#` or `b`.
    #[error("invalid symbol: '{symbol}'{}", in_token(.symbol, .token))]
    InvalidAccidental { symbol: String, token: String },

    /// Token is empty or longer than letter + octave + accidental.
    #[error("invalid note: '{token}'")]
    InvalidNoteFormat { token: String },
}

/// Why an input line was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error(transparent)]
    Note(#[from] NoteError),

    /// Duration token is not a number in the accepted range.
    #[error("invalid duration: '{0}'")]
    InvalidDuration(String),

    /// Line bytes are not UTF-8; carries a lossy rendering of the line.
    #[error("invalid text: '{0}'")]
    InvalidText(String),
}

/// Failures of the audio output layer.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("no default output device available")]
    NoOutputDevice,

    #[error("output device does not support {rate} Hz")]
    UnsupportedSampleRate { rate: u32 },

    #[error("unsupported device sample format: {0}")]
    UnsupportedSampleFormat(String),

    #[error("failed to query output configs: {0}")]
    Devices(#[from] cpal::SupportedStreamConfigsError),

    #[error("failed to build output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("output stream failed: {0}")]
    StreamFailed(String),
}

/// Errors surfaced by [`TonePlayer`](crate::player::TonePlayer) and the runner.
///
/// Only `Line` is recoverable; the runner never lets it escape.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("invalid volume: '{volume}' (must be between 0 and 1)")]
    InvalidVolume { volume: f32 },

    #[error(transparent)]
    Line(#[from] LineError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_equal_to_token_is_not_repeated() {
        let err = NoteError::InvalidNoteLetter {
            letter: "H".into(),
            token: "H".into(),
        };
        assert_eq!(err.to_string(), "invalid note: 'H'");
    }

    #[test]
    fn partial_fragment_names_the_token() {
        let err = NoteError::InvalidOctave {
            octave: "9".into(),
            token: "A9".into(),
        };
        assert_eq!(err.to_string(), "invalid octave: '9' in 'A9'");
    }

    #[test]
    fn line_error_is_transparent_over_note_error() {
        let err: LineError = NoteError::InvalidNoteFormat {
            token: "badnote".into(),
        }
        .into();
        assert_eq!(err.to_string(), "invalid note: 'badnote'");
        assert_eq!(
            LineError::InvalidDuration("abc".into()).to_string(),
            "invalid duration: 'abc'"
        );
    }
}

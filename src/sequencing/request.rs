use std::time::Duration;

use crate::error::LineError;
use crate::notes::Pitch;

/// Longest tone or pause a single line may ask for, in seconds.
///
/// A tone is rendered into memory up front; ten minutes at 44.1kHz is
/// about 26 million samples.
pub const MAX_DURATION: f64 = 600.0;

/// What a single input line asks the player to do.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    /// The note token as written, used when reporting.
    token: String,
    pitch: Pitch,
    /// Always finite and non-negative.
    seconds: f64,
}

/// Tone or pause, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Tone,
    Pause,
}

impl PlaybackRequest {
    /// Build a request, rejecting negative and NaN durations and anything
    /// above [`MAX_DURATION`].
    pub fn new(token: impl Into<String>, pitch: Pitch, seconds: f64) -> Result<Self, LineError> {
        if !is_valid_duration(seconds) {
            return Err(LineError::InvalidDuration(seconds.to_string()));
        }
        Ok(Self {
            token: token.into(),
            pitch,
            seconds,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    pub fn kind(&self) -> RequestKind {
        match self.pitch {
            Pitch::Rest => RequestKind::Pause,
            Pitch::Tone(_) => RequestKind::Tone,
        }
    }

    pub fn frequency(&self) -> Option<f64> {
        self.pitch.frequency()
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.seconds)
    }
}

/// True for durations in `0.0..=MAX_DURATION`.
pub fn is_valid_duration(seconds: f64) -> bool {
    (0.0..=MAX_DURATION).contains(&seconds)
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{amplify, DEFAULT_FADE_SAMPLES};
use crate::error::PlayerError;

/// Volume used when none is given.
pub const DEFAULT_VOLUME: f32 = 0.3;

/// Options recognized by [`TonePlayer`](crate::player::TonePlayer).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Output gain, 0.0 to 1.0.
    pub volume: f32,
    /// Suppress `Playing`/`Pausing`/`Done` lines. Diagnostics still print.
    pub silent: bool,
    /// Mute stderr while the audio device opens and closes.
    pub hide_device_warnings: bool,
    /// Fade-in/fade-out window in samples.
    pub fade_samples: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            silent: false,
            hide_device_warnings: true,
            fade_samples: DEFAULT_FADE_SAMPLES,
        }
    }
}

impl PlayerConfig {
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn with_hide_device_warnings(mut self, hide: bool) -> Self {
        self.hide_device_warnings = hide;
        self
    }

    pub fn with_fade_samples(mut self, fade_samples: usize) -> Self {
        self.fade_samples = fade_samples;
        self
    }

    pub fn validate(&self) -> Result<(), PlayerError> {
        if !amplify::is_valid_volume(self.volume) {
            return Err(PlayerError::InvalidVolume {
                volume: self.volume,
            });
        }
        Ok(())
    }
}

//! Tone synthesis: oscillator → fade envelope → volume/quantize.
//!
//! [`ToneSynth::render`] turns a frequency and a duration into a fresh
//! [`ToneBuffer`] of 16-bit samples ready for an output sink.

/// Volume scaling and 16-bit quantization.
pub mod amplify;
/// Linear fade-in/fade-out against boundary clicks.
pub mod envelope;
/// Sine waveform generation.
pub mod oscillator;

use std::time::Duration;

pub use envelope::{FadeEnvelope, DEFAULT_FADE_SAMPLES};
pub use oscillator::SineOscillator;

/// Fixed output sample rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// A block of mono 16-bit samples at a known rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl ToneBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Wall-clock time the buffer takes to play.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }
}

/// Number of samples for `seconds` at `sample_rate`, rounded down.
pub fn sample_count(seconds: f64, sample_rate: u32) -> usize {
    (seconds * sample_rate as f64).floor() as usize
}

/// Renders sine tones with a fixed volume and fade window.
#[derive(Debug, Clone)]
pub struct ToneSynth {
    sample_rate: u32,
    volume: f32,
    fade: FadeEnvelope,
    scratch: Vec<f32>,
}

impl ToneSynth {
    /// `volume` is assumed validated by the caller.
    pub fn new(sample_rate: u32, volume: f32, fade_samples: usize) -> Self {
        Self {
            sample_rate,
            volume,
            fade: FadeEnvelope::new(fade_samples),
            scratch: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn render(&mut self, frequency: f64, seconds: f64) -> ToneBuffer {
        let len = sample_count(seconds, self.sample_rate);
        self.scratch.clear();
        self.scratch.resize(len, 0.0);

        SineOscillator::new(frequency, self.sample_rate).render(&mut self.scratch);
        self.fade.apply(&mut self.scratch);

        let mut samples = Vec::with_capacity(len);
        amplify::quantize(&self.scratch, self.volume, &mut samples);
        ToneBuffer::new(samples, self.sample_rate)
    }
}

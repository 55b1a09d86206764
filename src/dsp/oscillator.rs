use std::f64::consts::TAU;

/*
Sine Oscillator
===============

The only waveform this player needs: a pure tone with no harmonics.

Each sample is computed from its absolute time, not from an accumulated
phase, so sample 44_099 carries no more rounding error than sample 0:

    t      = n / sample_rate
    sample = sin(2π · f · t)

Output is in [-1.0, 1.0]. Volume and fades are applied downstream.
*/

#[derive(Debug, Clone, Copy)]
pub struct SineOscillator {
    frequency: f64,
    sample_rate: u32,
}

impl SineOscillator {
    pub fn new(frequency: f64, sample_rate: u32) -> Self {
        Self {
            frequency,
            sample_rate,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Value of sample `n`.
    #[inline]
    pub fn sample_at(&self, n: usize) -> f32 {
        let t = n as f64 / self.sample_rate as f64;
        (TAU * self.frequency * t).sin() as f32
    }

    /// Fill `out` starting at sample 0.
    pub fn render(&self, out: &mut [f32]) {
        for (n, sample) in out.iter_mut().enumerate() {
            *sample = self.sample_at(n);
        }
    }
}

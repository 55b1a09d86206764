/*
Fade Envelope
=============

A sine tone switched on or off mid-cycle jumps from silence to some non-zero
amplitude in a single sample. The speaker reproduces that step as a click.
The fix is to ramp the amplitude linearly over a short window at both ends of
every buffer.

Vocabulary
----------

  window   Number of samples ramped at each end (default 800, ~18ms at 44.1kHz).

  gain     Per-sample multiplier in [0.0, 1.0].


The Shape
---------

  gain
    1.0 ┤      ┌───────────────────┐
        │     ╱                     ╲
        │    ╱                       ╲
    0.0 ┼───╱─────────────────────────╲──→ sample
        0   F                    len-F  len
          fade-in               fade-out

  fade-in:  gain(i) = i / F            for i in 0..F
  fade-out: gain(k) = (F - k) / F      for the k-th of the last F samples

The first sample is silent; the last is at 1/F, small enough not to click.


Short Buffers
-------------

A buffer shorter than two windows would have its ramps overlap (or index past
the end). The window is clamped to half the buffer length, so a 100-sample
buffer gets 50 samples up and 50 samples down. An empty buffer is left alone.
*/

/// Default fade window in samples.
pub const DEFAULT_FADE_SAMPLES: usize = 800;

#[derive(Debug, Clone, Copy)]
pub struct FadeEnvelope {
    window: usize,
}

impl FadeEnvelope {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Window actually used for a buffer of `len` samples.
    pub fn effective_window(&self, len: usize) -> usize {
        self.window.min(len / 2)
    }

    /// Apply fade-in and fade-out in place.
    pub fn apply(&self, buffer: &mut [f32]) {
        let len = buffer.len();
        let window = self.effective_window(len);
        if window == 0 {
            return;
        }

        let step = 1.0 / window as f32;
        for (i, sample) in buffer[..window].iter_mut().enumerate() {
            *sample *= i as f32 * step;
        }
        for (k, sample) in buffer[len - window..].iter_mut().enumerate() {
            *sample *= (window - k) as f32 * step;
        }
    }
}

impl Default for FadeEnvelope {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_SAMPLES)
    }
}

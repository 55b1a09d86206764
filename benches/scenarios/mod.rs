//! Whole-note benchmarks.
//!
//! These follow one line of input from its note token to the i16 buffer that
//! is handed to the output device.

mod tone;

pub use tone::bench_tone;

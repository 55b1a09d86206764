//! Benchmarks for sine generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musical_beeps::dsp::oscillator::SineOscillator;
use musical_beeps::dsp::SAMPLE_RATE;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let osc = SineOscillator::new(440.0, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });

        // Top of the range: C8
        let osc = SineOscillator::new(4_186.0, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("sine_high", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

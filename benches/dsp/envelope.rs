//! Benchmarks for the fade-in/fade-out envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musical_beeps::dsp::envelope::{FadeEnvelope, DEFAULT_FADE_SAMPLES};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![1.0f32; size];

        let fade = FadeEnvelope::new(DEFAULT_FADE_SAMPLES);
        group.bench_with_input(BenchmarkId::new("default", size), &size, |b, _| {
            b.iter(|| {
                fade.apply(black_box(&mut buffer));
            })
        });

        // Window larger than the buffer; clamps to half its length
        let fade = FadeEnvelope::new(size);
        group.bench_with_input(BenchmarkId::new("clamped", size), &size, |b, _| {
            b.iter(|| {
                fade.apply(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

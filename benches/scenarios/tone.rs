//! Benchmarks for rendering complete notes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musical_beeps::dsp::envelope::DEFAULT_FADE_SAMPLES;
use musical_beeps::dsp::{ToneSynth, SAMPLE_RATE};
use musical_beeps::{parse_line, parse_note};

use crate::BLOCK_SIZES;

pub fn bench_tone(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/tone");

    for &size in BLOCK_SIZES {
        let seconds = size as f64 / SAMPLE_RATE as f64;

        // === RENDER ONLY ===
        // oscillator → fade → quantize
        let mut synth = ToneSynth::new(SAMPLE_RATE, 0.3, DEFAULT_FADE_SAMPLES);
        group.bench_with_input(BenchmarkId::new("render", size), &size, |b, _| {
            b.iter(|| black_box(synth.render(black_box(440.0), seconds)))
        });

        // === FULL LINE ===
        // parse "C5#:<secs>" then render it
        let line = format!("C5#:{seconds}");
        let mut synth = ToneSynth::new(SAMPLE_RATE, 0.3, DEFAULT_FADE_SAMPLES);
        group.bench_with_input(BenchmarkId::new("line", size), &size, |b, _| {
            b.iter(|| {
                let request = parse_line(black_box(&line)).ok().flatten();
                if let Some(frequency) = request.as_ref().and_then(|r| r.frequency()) {
                    black_box(synth.render(frequency, seconds));
                }
            })
        });
    }

    // Parsing alone is tiny; one size is enough
    group.bench_function("parse_note", |b| {
        b.iter(|| {
            for token in ["A", "C5#", "bb", "G2b", "pause"] {
                let _ = black_box(parse_note(black_box(token)));
            }
        })
    });

    group.finish();
}

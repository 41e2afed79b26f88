//! Criterion benchmarks for the lofi-core downsampler
//!
//! Run with: cargo bench -p lofi-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lofi_core::{
    AnyConverter, ConverterKind, Downsampler, Effect, HistoryRing, InterpolatingResampler,
    RateConverter, hermite,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_downsampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("Downsampler");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut output = vec![0.0; block_size];

        for kind in ConverterKind::ALL {
            group.bench_with_input(
                BenchmarkId::new(kind.name(), block_size),
                &block_size,
                |b, _| {
                    let mut ds =
                        Downsampler::with_converter(SAMPLE_RATE, AnyConverter::new(kind, 1.0));
                    ds.set_rate(0.25);
                    b.iter(|| {
                        ds.process_block(black_box(&input), &mut output);
                        black_box(&output);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stages");
    let input = generate_test_signal(1024);

    group.bench_function("hermite", |b| {
        b.iter(|| {
            black_box(hermite(
                black_box(0.37),
                black_box(0.1),
                black_box(0.4),
                black_box(-0.2),
                black_box(0.8),
            ))
        });
    });

    group.bench_function("ring_write_1024", |b| {
        let mut ring = HistoryRing::new();
        b.iter(|| {
            for &sample in &input {
                ring.write(black_box(sample));
            }
            black_box(ring.chronological())
        });
    });

    for &rate in &[0.1, 0.5, 1.0] {
        group.bench_with_input(
            BenchmarkId::new("interpolating_resampler_1024", rate),
            &rate,
            |b, &rate| {
                let mut conv = InterpolatingResampler::new(rate);
                b.iter(|| {
                    let mut produced = 0;
                    for &sample in &input {
                        produced += conv.process_frame(black_box(sample)).len();
                    }
                    black_box(produced)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_downsampler, bench_stages);
criterion_main!(benches);

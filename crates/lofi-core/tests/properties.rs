//! Property-based tests for the lofi-core downsampler.
//!
//! Checks parameter clamping, phase bounds, output stability and ring
//! retention using proptest for randomized input generation.

use lofi_core::{
    AnyConverter, ConverterKind, Downsampler, Effect, HistoryRing, MAX_WINDOW, MIN_RATE,
    MIN_WINDOW, hermite,
};
use proptest::prelude::*;

fn converter_kind(index: usize) -> ConverterKind {
    ConverterKind::ALL[index % ConverterKind::ALL.len()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any finite rate request lands in [MIN_RATE, 1.0]; requests already in
    /// (0, 1] are stored unchanged.
    #[test]
    fn rate_is_clamped(rate in -10.0f32..10.0f32) {
        let mut ds = Downsampler::new(48000.0);
        ds.set_rate(rate);
        prop_assert!(ds.rate() >= MIN_RATE && ds.rate() <= 1.0);
        if rate > 0.0 && rate <= 1.0 {
            prop_assert_eq!(ds.rate(), rate);
        }
    }

    /// Any finite window request lands in [1, 256] and equals the truncated
    /// request when that is in range.
    #[test]
    fn window_is_clamped(window in -1000.0f32..1000.0f32) {
        let mut ds = Downsampler::new(48000.0);
        ds.set_window(window);
        prop_assert!((MIN_WINDOW..=MAX_WINDOW).contains(&ds.window()));
        let truncated = window.trunc();
        if (1.0..=256.0).contains(&truncated) {
            prop_assert_eq!(f32::from(ds.window()), truncated);
        }
    }

    /// After at least one tick the phase lies in (0, 1].
    #[test]
    fn phase_in_unit_interval(
        rate in 0.0001f32..=1.0f32,
        sample_rate in 8000.0f32..192000.0f32,
        ticks in 1usize..5000,
    ) {
        let mut ds = Downsampler::new(sample_rate);
        ds.set_rate(rate);
        for _ in 0..ticks {
            ds.process(0.25);
        }
        prop_assert!(ds.phase() > 0.0 && ds.phase() <= 1.0, "phase {}", ds.phase());
    }

    /// Bounded input gives bounded, finite output for every converter.
    #[test]
    fn output_bounded(
        rate in 0.001f32..=1.0f32,
        kind in 0usize..3,
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..1024),
    ) {
        let mut ds = Downsampler::with_converter(
            48000.0,
            AnyConverter::new(converter_kind(kind), 1.0),
        );
        ds.set_rate(rate);
        let mut output = vec![0.0; input.len()];
        ds.process_block(&input, &mut output);
        for &y in &output {
            prop_assert!(y.is_finite() && y.abs() <= 2.0, "output {}", y);
        }
    }

    /// The ring holds exactly the last four written samples, oldest first.
    #[test]
    fn ring_keeps_last_four(values in prop::collection::vec(-1.0f32..=1.0f32, 4..64)) {
        let mut ring = HistoryRing::new();
        for &v in &values {
            ring.write(v);
        }
        let tail = &values[values.len() - 4..];
        let got = ring.chronological();
        prop_assert_eq!(got.as_slice(), tail);
    }

    /// The kernel passes through both inner points for any window.
    #[test]
    fn hermite_hits_inner_points(
        y0 in -1.0f32..=1.0f32,
        y1 in -1.0f32..=1.0f32,
        y2 in -1.0f32..=1.0f32,
        y3 in -1.0f32..=1.0f32,
    ) {
        prop_assert!((hermite(0.0, y0, y1, y2, y3) - y1).abs() < 1e-6);
        prop_assert!((hermite(1.0, y0, y1, y2, y3) - y2).abs() < 1e-5);
    }

    /// Splitting the input into arbitrary blocks changes nothing: one output
    /// per input, bit-identical to a fresh run over the same samples.
    #[test]
    fn blocks_are_deterministic_and_one_to_one(
        rate in 0.001f32..=1.0f32,
        kind in 0usize..3,
        split in 1usize..300,
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..1024),
    ) {
        let make = || {
            let mut ds = Downsampler::with_converter(
                44100.0,
                AnyConverter::new(converter_kind(kind), 1.0),
            );
            ds.set_rate(rate);
            ds
        };

        let mut whole = make();
        let mut expected = vec![0.0; input.len()];
        whole.process_block(&input, &mut expected);

        let mut chunked = make();
        let mut output = Vec::with_capacity(input.len());
        for chunk in input.chunks(split) {
            let mut out = vec![0.0; chunk.len()];
            chunked.process_block(chunk, &mut out);
            output.extend(out);
        }

        prop_assert_eq!(output.len(), input.len());
        let same = expected.iter().zip(&output).all(|(a, b)| a.to_bits() == b.to_bits());
        prop_assert!(same);
    }
}

//! Integration tests for the lofi-core downsampler.
//!
//! Exercises the full write/ring/read pipeline through the public API:
//! sample cardinality, parameter clamping, phase bounds, delay behaviour at
//! unity rate, history overwrite, determinism, and an impulse traced through
//! the four-tap reconstruction window.

use lofi_core::{
    AnyConverter, ConverterKind, Decimator, Downsampler, DownsamplerConfig, Effect,
    InterpolatingResampler, MIN_RATE, ParameterInfo, PassThrough,
};

const SAMPLE_RATE: f32 = 48000.0;
const TAU: f32 = core::f32::consts::TAU;

fn generate_sine(freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| libm::sinf(TAU * freq_hz * n as f32 / sample_rate))
        .collect()
}

fn impulse(len: usize) -> Vec<f32> {
    let mut signal = vec![0.0; len];
    signal[0] = 1.0;
    signal
}

// ============================================================================
// 1. Cardinality
// ============================================================================

#[test]
fn one_output_per_input_for_every_converter() {
    let input = generate_sine(440.0, SAMPLE_RATE, 1000);
    for kind in ConverterKind::ALL {
        for &rate in &[1.0, 0.5, 0.1, 0.001] {
            let mut ds = Downsampler::with_converter(SAMPLE_RATE, AnyConverter::new(kind, 1.0));
            ds.set_rate(rate);
            let mut output = vec![f32::NAN; input.len()];
            ds.process_block(&input, &mut output);
            assert!(
                output.iter().all(|s| s.is_finite()),
                "{kind} at rate {rate} left unwritten or non-finite samples"
            );
        }
    }
}

#[test]
fn block_and_sample_processing_agree() {
    let input = generate_sine(1000.0, SAMPLE_RATE, 777);

    let mut per_sample = Downsampler::new(SAMPLE_RATE);
    per_sample.set_rate(0.3);
    let expected: Vec<f32> = input.iter().map(|&x| per_sample.process(x)).collect();

    let mut blocked = Downsampler::new(SAMPLE_RATE);
    blocked.set_rate(0.3);
    let mut output = vec![0.0; input.len()];
    for (inp, out) in input.chunks(64).zip(output.chunks_mut(64)) {
        blocked.process_block(inp, out);
    }

    assert_eq!(expected, output);
}

// ============================================================================
// 2. Parameters
// ============================================================================

#[test]
fn rate_and_window_clamping() {
    let mut ds = Downsampler::new(SAMPLE_RATE);

    ds.set_rate(1.5);
    assert_eq!(ds.rate(), 1.0);
    ds.set_rate(0.0);
    assert_eq!(ds.rate(), MIN_RATE);
    ds.set_rate(0.42);
    assert_eq!(ds.rate(), 0.42);

    ds.set_window(300.0);
    assert_eq!(ds.window(), 256);
    ds.set_window(-5.0);
    assert_eq!(ds.window(), 1);
    ds.set_window(10.7);
    assert_eq!(ds.window(), 10);
}

#[test]
fn window_does_not_change_output() {
    let input = generate_sine(300.0, SAMPLE_RATE, 2048);
    let run = |window: f32| {
        let mut ds = Downsampler::new(SAMPLE_RATE);
        ds.set_rate(0.2);
        ds.set_window(window);
        input.iter().map(|&x| ds.process(x)).collect::<Vec<f32>>()
    };
    assert_eq!(run(1.0), run(256.0));
}

#[test]
fn param_interface_matches_setters() {
    let mut ds = Downsampler::new(SAMPLE_RATE);
    let rate = ds.find_param_by_name("rate").unwrap();
    ds.set_param(rate, 0.25);
    assert_eq!(ds.rate(), 0.25);
    assert_eq!(ds.param_info(rate).unwrap().format_value(0.25), "0.2500x");
}

// ============================================================================
// 3. Phase
// ============================================================================

#[test]
fn phase_stays_in_half_open_unit_interval() {
    for &rate in &[1.0, 0.77, 0.01, MIN_RATE] {
        let mut ds = Downsampler::new(SAMPLE_RATE);
        ds.set_rate(rate);
        for i in 0..20_000 {
            ds.process(i as f32 * 1e-4);
            let phase = ds.phase();
            assert!(phase > 0.0 && phase <= 1.0, "rate {rate}: phase {phase}");
        }
    }
}

#[test]
fn phase_advances_by_rate_over_sample_rate() {
    let mut ds = Downsampler::from_config(DownsamplerConfig {
        sample_rate: 1000.0,
        rate: 0.5,
        window: 1.0,
    });
    for _ in 0..100 {
        ds.process(0.0);
    }
    assert!((ds.phase() - 0.05).abs() < 1e-12);
}

// ============================================================================
// 4. Unity rate and history
// ============================================================================

#[test]
fn unity_rate_is_near_identity_with_two_sample_delay() {
    let input = generate_sine(100.0, SAMPLE_RATE, 480);
    let mut ds = Downsampler::with_converter(SAMPLE_RATE, PassThrough::new());
    assert_eq!(ds.latency_samples(), 2);

    let output: Vec<f32> = input.iter().map(|&x| ds.process(x)).collect();
    for n in 2..input.len() {
        assert!(
            (output[n] - input[n - 2]).abs() < 1e-3,
            "sample {n}: {} vs {}",
            output[n],
            input[n - 2]
        );
    }
}

#[test]
fn fifth_sample_evicts_first() {
    let mut ds = Downsampler::with_converter(SAMPLE_RATE, PassThrough::new());
    for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
        ds.process(v);
    }
    assert_eq!(ds.history().chronological(), [2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn silence_in_silence_out() {
    for kind in ConverterKind::ALL {
        let mut ds = Downsampler::with_converter(SAMPLE_RATE, AnyConverter::new(kind, 1.0));
        ds.set_rate(0.37);
        for _ in 0..4096 {
            assert_eq!(ds.process(0.0), 0.0);
        }
    }
}

// ============================================================================
// 5. Determinism and reset
// ============================================================================

#[test]
fn identical_runs_are_bit_identical() {
    let input = generate_sine(523.0, SAMPLE_RATE, 4096);
    let run = || {
        let mut ds = Downsampler::new(SAMPLE_RATE);
        ds.set_rate(0.137);
        input.iter().map(|&x| ds.process(x)).collect::<Vec<f32>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn reset_replays_from_scratch() {
    let input = generate_sine(523.0, SAMPLE_RATE, 1024);
    let mut ds = Downsampler::with_converter(SAMPLE_RATE, InterpolatingResampler::default());
    ds.set_rate(0.25);
    let first: Vec<f32> = input.iter().map(|&x| ds.process(x)).collect();
    ds.reset();
    let second: Vec<f32> = input.iter().map(|&x| ds.process(x)).collect();
    assert_eq!(first, second);
}

// ============================================================================
// 6. End to end
// ============================================================================

#[test]
fn half_rate_impulse_walks_through_window() {
    let input = impulse(48_000);
    let mut ds = Downsampler::with_converter(SAMPLE_RATE, Decimator::default());
    ds.set_rate(0.5);
    assert_eq!(ds.converter().factor(), 2);

    let mut output = vec![0.0; input.len()];
    ds.process_block(&input, &mut output);
    assert_eq!(output.len(), 48_000);

    // Taps s(1) then s(0): small ramp-in, then the impulse itself.
    assert!(output[0].abs() < 1e-6);
    assert!(output[2].abs() < 1e-3);
    assert!((output[4] - 1.0).abs() < 1e-3);
    assert!((output[5] - 1.0).abs() < 1e-3);
    assert!(output[6].abs() < 1e-3);

    // Once the impulse leaves the ring the output is exactly silent.
    assert!(output[8..].iter().all(|&s| s == 0.0));
}

#[test]
fn coarse_rate_holds_between_updates() {
    let input = generate_sine(50.0, SAMPLE_RATE, 4800);
    let mut ds = Downsampler::with_converter(SAMPLE_RATE, Decimator::default());
    ds.set_rate(0.01);

    let output: Vec<f32> = input.iter().map(|&x| ds.process(x)).collect();
    // Between converter updates (every 100 ticks) the ring is frozen, so the
    // output changes only by the tiny phase drift.
    for block in output.chunks(100).skip(4) {
        let spread = block.iter().fold(0.0_f32, |m, &s| m.max((s - block[0]).abs()));
        assert!(spread < 0.05, "spread {spread}");
    }
}

//! Downsampler demo: impulse responses, latency, and rate sweeps.
//!
//! Run with: cargo run -p lofi-core --example downsample_demo

use lofi_core::{
    AnyConverter, ConverterKind, Downsampler, DownsamplerConfig, Effect, ParameterInfo,
};

fn build(kind: ConverterKind, rate: f32) -> Downsampler<AnyConverter> {
    let config = DownsamplerConfig {
        sample_rate: 48000.0,
        rate,
        window: 1.0,
    };
    Downsampler::from_config_with(config, AnyConverter::new(kind, f64::from(rate)))
}

fn main() {
    // --- Latency per converter ---
    println!("=== Latency ===\n");
    for kind in ConverterKind::ALL {
        let ds = build(kind, 0.5);
        println!("  {:14} {} samples", kind.name(), ds.latency_samples());
    }

    // --- Impulse through the decimator at half rate ---
    println!("\n=== Impulse Response (decimator, rate 0.5) ===\n");
    let mut ds = build(ConverterKind::Decimator, 0.5);
    let mut input = [0.0_f32; 16];
    input[0] = 1.0;
    let mut output = [0.0_f32; 16];
    ds.process_block(&input, &mut output);
    for (i, s) in output.iter().enumerate() {
        println!("  [{:2}] {:+.4}", i, s);
    }

    // --- Output level vs. rate for a 1 kHz tone ---
    println!("\n=== 1 kHz Tone Through a Rate Sweep ===\n");
    println!("{:>8} {:>10} {:>10}", "Rate", "Peak", "Phase inc");
    println!("{:->8} {:->10} {:->10}", "", "", "");
    let tone: Vec<f32> = (0..4800)
        .map(|i| (core::f32::consts::TAU * 1000.0 * i as f32 / 48000.0).sin())
        .collect();
    for rate in [1.0, 0.5, 0.25, 0.1, 0.01] {
        let mut ds = build(ConverterKind::Interpolating, rate);
        let mut out = vec![0.0; tone.len()];
        ds.process_block(&tone, &mut out);
        let peak = out.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
        println!("{:>8.3} {:>10.4} {:>10.2e}", rate, peak, ds.phase_increment());
    }

    // --- Parameter table ---
    println!("\n=== Parameters ===\n");
    let ds = Downsampler::new(48000.0);
    for i in 0..ds.param_count() {
        if let Some(desc) = ds.param_info(i) {
            println!(
                "  {:8} {} .. {} (default {})",
                desc.name,
                desc.format_value(desc.min),
                desc.format_value(desc.max),
                desc.format_value(desc.default)
            );
        }
    }
}

//! File-based downsampling command.

use crate::commands::common::DownsampleArgs;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use lofi_io::{WavSpec, read_wav, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    settings: DownsampleArgs,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (8, 16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (8 | 16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Invalid bit depth: '{}' (expected 8, 16, 24, or 32)", s)),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    let mixdown = if spec.channels > 1 {
        format!(" (mixed down from {} channels)", spec.channels)
    } else {
        String::new()
    };
    println!(
        "  {} samples, {} Hz, {:.2}s{}",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate,
        mixdown
    );

    let mut engine = settings.engine(sample_rate);
    println!("Downsampling:");
    settings.describe(&engine);

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = engine.process_file_with_progress(&samples, args.block_size, |done| {
        pb.inc(done as u64);
    });
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output)),
        linear_to_db(peak(&output))
    );

    println!("\nWriting {}...", args.output.display());
    write_wav(
        &args.output,
        &output,
        WavSpec::mono(spec.sample_rate, args.bit_depth),
    )?;
    println!("Done!");

    Ok(())
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}

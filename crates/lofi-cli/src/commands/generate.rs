//! Test signal generation command.

use clap::{Args, Subcommand};
use lofi_io::{WavSpec, write_wav};
use std::f32::consts::TAU;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate an impulse
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "48000")]
        length: usize,

        /// Position of the impulse in samples
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate a sine tone
    Sine {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Impulse {
            output,
            length,
            offset,
            sample_rate,
            amplitude,
        } => {
            if offset >= length {
                anyhow::bail!(
                    "Impulse offset {} is outside a {}-sample signal",
                    offset,
                    length
                );
            }
            println!("Generating impulse at sample {}...", offset);
            let samples = impulse(length, offset, amplitude);
            write_wav(&output, &samples, WavSpec::mono(sample_rate, 32))?;
            println!("Saved to {}", output.display());
        }

        GenerateCommand::Sine {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            if !(duration.is_finite() && duration >= 0.0) {
                anyhow::bail!("Duration must be a non-negative number of seconds");
            }
            println!("Generating {} Hz sine...", freq);
            let samples = sine(freq, duration, sample_rate, amplitude);
            write_wav(&output, &samples, WavSpec::mono(sample_rate, 32))?;
            println!(
                "Saved to {} ({:.2}s, {} samples)",
                output.display(),
                duration,
                samples.len()
            );
        }
    }

    Ok(())
}

fn impulse(length: usize, offset: usize, amplitude: f32) -> Vec<f32> {
    let mut samples = vec![0.0; length];
    if let Some(s) = samples.get_mut(offset) {
        *s = amplitude;
    }
    samples
}

fn sine(freq: f32, duration: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    let num_samples = (duration * sample_rate as f32) as usize;
    let step = f64::from(freq) / f64::from(sample_rate);
    (0..num_samples)
        .map(|i| {
            // Phase in f64 keeps long tones from drifting.
            let phase = (i as f64 * step).fract() as f32;
            amplitude * (TAU * phase).sin()
        })
        .collect()
}

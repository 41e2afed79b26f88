//! Shared CLI helpers used across multiple commands.

use clap::Args;
use lofi_config::{ConfigError, Preset, resolve_preset};
use lofi_core::{ConverterKind, Downsampler, DownsamplerConfig, ParameterInfo, RATE_PARAM_ID};
use lofi_io::ProcessingEngine;

/// Downsampler settings accepted by `process` and `realtime`.
///
/// Explicit flags override the matching preset field.
#[derive(Args, Debug, Clone, Default)]
pub struct DownsampleArgs {
    /// Target rate as a fraction of the native sample rate, in (0, 1]
    #[arg(short, long, allow_negative_numbers = true)]
    pub rate: Option<f32>,

    /// Interpolation window size, 1 to 256 (accepted but does not affect output)
    #[arg(short, long, allow_negative_numbers = true)]
    pub window: Option<f32>,

    /// Preset name or path to a preset TOML file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Write-stage converter: interpolating, decimator or passthrough
    #[arg(long)]
    pub converter: Option<ConverterKind>,
}

/// Resolved downsampler settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Name of the preset the settings started from, if any.
    pub preset_name: Option<String>,
    /// Requested rate, before clamping.
    pub rate: f32,
    /// Requested window, before clamping.
    pub window: f32,
    /// Write-stage converter.
    pub converter: ConverterKind,
}

impl DownsampleArgs {
    /// Merge the preset (if any) with explicit flags.
    pub fn resolve(&self) -> anyhow::Result<Settings> {
        let preset = self.preset.as_deref().map(load_preset).transpose()?;
        let base = preset.clone().unwrap_or_default();

        Ok(Settings {
            preset_name: preset.map(|p| p.name),
            rate: self.rate.unwrap_or(base.rate),
            window: self.window.unwrap_or(base.window as f32),
            converter: self.converter.unwrap_or(base.converter),
        })
    }
}

impl Settings {
    /// Construction parameters at `sample_rate`.
    pub fn config(&self, sample_rate: f32) -> DownsamplerConfig {
        DownsamplerConfig {
            sample_rate,
            rate: self.rate,
            window: self.window,
        }
    }

    /// A processing engine at `sample_rate` with these settings.
    pub fn engine(&self, sample_rate: f32) -> ProcessingEngine {
        ProcessingEngine::from_config(self.config(sample_rate), self.converter)
    }

    /// Print a short summary of the effective settings.
    pub fn describe(&self, engine: &ProcessingEngine) {
        let ds = engine.downsampler();
        if let Some(name) = &self.preset_name {
            println!("  Preset:    {}", name);
        }
        println!(
            "  Rate:      {} ({:.1} Hz effective)",
            format_rate(ds.rate()),
            ds.rate() * ds.sample_rate()
        );
        println!("  Window:    {}", ds.window());
        println!("  Converter: {}", self.converter);
        println!("  Latency:   {} samples", engine.latency_samples());
    }
}

/// Display text for a rate, formatted the way the rate parameter prints it.
pub fn format_rate(rate: f32) -> String {
    let ds = Downsampler::new(48000.0);
    ds.param_index_by_id(RATE_PARAM_ID)
        .and_then(|i| ds.param_info(i))
        .map_or_else(|| format!("{rate}x"), |desc| desc.format_value(rate))
}

/// Load a preset by name or path.
///
/// Searches factory presets, then the user presets directory, then treats
/// `name` as a file path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    match resolve_preset(name) {
        Ok(preset) => Ok(preset),
        Err(ConfigError::PresetNotFound(_)) => anyhow::bail!(
            "Preset '{}' not found. Use 'lofi presets list' to see available presets.",
            name
        ),
        Err(e) => Err(e.into()),
    }
}

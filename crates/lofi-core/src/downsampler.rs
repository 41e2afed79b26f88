//! Downsampler effect: sample rate reduction with interpolated playback.
//!
//! # Theory
//!
//! The effect lowers the *effective* sample rate of a signal while the
//! output keeps the host's sample rate and sample count. Each tick runs
//! three stages:
//!
//! ```text
//! input ─► RateConverter ─► {0..k} samples ─► HistoryRing ─► Reconstructor ─► output
//!            (write)                          (4 slots)      (Hermite, phase)
//! ```
//!
//! 1. The [`RateConverter`] turns one input sample into however many
//!    samples the reduced rate yields for that tick (usually 0 or 1).
//! 2. Every produced sample is written to the four-slot [`HistoryRing`] in
//!    production order.
//! 3. The [`Reconstructor`] reads the ring exactly once, whether or not
//!    anything new arrived, and interpolates at its phase.
//!
//! When no sample arrives the reconstructor keeps reading the same four
//! slots, so the coarse stream is held/extrapolated between updates. That
//! hold is what produces the aliased lo-fi character.
//!
//! The phase increment is `rate / sample_rate`, recomputed whenever either
//! changes.
//!
//! # Parameters
//!
//! | Index | Name | Range | Default |
//! |-------|------|-------|---------|
//! | 0 | Rate | 0.000001–1.0 | 1.0 |
//! | 1 | Window | 1–256 | 1 |
//!
//! `Window` is accepted, clamped and reported but does not affect the
//! kernel, which is fixed at four points.

use crate::effect::Effect;
use crate::param_info::{
    ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo,
};
use crate::reconstruct::Reconstructor;
use crate::resampler::{InterpolatingResampler, RateConverter};
use crate::ring::HistoryRing;

/// Smallest stored rate. Zero and negative requests are raised to this.
pub const MIN_RATE: f32 = 1e-6;

/// Largest stored rate (no reduction).
pub const MAX_RATE: f32 = 1.0;

/// Smallest window size.
pub const MIN_WINDOW: u16 = 1;

/// Largest window size.
pub const MAX_WINDOW: u16 = 256;

/// Stable ID of the rate parameter.
pub const RATE_PARAM_ID: ParamId = ParamId(100);

/// Stable ID of the window parameter.
pub const WINDOW_PARAM_ID: ParamId = ParamId(101);

/// Ticks between a sample entering the ring and sitting at the
/// interpolation start point `s(0)`.
const RING_LATENCY: usize = 2;

/// Construction parameters for a [`Downsampler`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownsamplerConfig {
    /// Native (host) sample rate in Hz.
    pub sample_rate: f32,
    /// Fraction of the native rate to downsample to.
    pub rate: f32,
    /// Interpolation window size.
    pub window: f32,
}

impl Default for DownsamplerConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            rate: 1.0,
            window: 1.0,
        }
    }
}

/// Clamp a rate request. `None` means the request is ignored (NaN).
#[inline]
pub fn clamp_rate(rate: f32) -> Option<f32> {
    if rate.is_nan() {
        None
    } else if rate > MAX_RATE {
        Some(MAX_RATE)
    } else if rate <= 0.0 {
        Some(MIN_RATE)
    } else {
        Some(rate)
    }
}

/// Clamp a window request: truncate toward zero, then saturate into
/// `[MIN_WINDOW, MAX_WINDOW]`. `None` means the request is ignored (NaN).
#[inline]
pub fn clamp_window(window: f32) -> Option<u16> {
    if window.is_nan() {
        None
    } else if window > f32::from(MAX_WINDOW) {
        Some(MAX_WINDOW)
    } else if window < f32::from(MIN_WINDOW) {
        Some(MIN_WINDOW)
    } else {
        Some(libm::truncf(window) as u16)
    }
}

/// Lo-fi downsampler: reduced-rate write stage, four-point Hermite read stage.
///
/// Generic over the write stage; the default is the
/// [`InterpolatingResampler`].
///
/// # Example
///
/// ```rust
/// use lofi_core::{Downsampler, Effect};
///
/// let mut ds = Downsampler::new(48000.0);
/// ds.set_rate(0.25);
///
/// let input = [0.5_f32; 64];
/// let mut output = [0.0_f32; 64];
/// ds.process_block(&input, &mut output);
/// assert!(output.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct Downsampler<C: RateConverter = InterpolatingResampler> {
    converter: C,
    history: HistoryRing,
    reconstructor: Reconstructor,
    rate: f32,
    window: u16,
    sample_rate: f32,
}

impl Downsampler<InterpolatingResampler> {
    /// Create a downsampler at unity rate with the default converter.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_converter(sample_rate, InterpolatingResampler::default())
    }

    /// Create a downsampler from a configuration with the default converter.
    pub fn from_config(config: DownsamplerConfig) -> Self {
        Self::from_config_with(config, InterpolatingResampler::default())
    }
}

impl<C: RateConverter> Downsampler<C> {
    /// Create a downsampler at unity rate around an existing converter.
    pub fn with_converter(sample_rate: f32, converter: C) -> Self {
        Self::from_config_with(
            DownsamplerConfig {
                sample_rate,
                ..DownsamplerConfig::default()
            },
            converter,
        )
    }

    /// Create a downsampler from a configuration around an existing converter.
    ///
    /// An unusable sample rate in the config falls back to 48 kHz.
    pub fn from_config_with(config: DownsamplerConfig, converter: C) -> Self {
        let mut ds = Self {
            converter,
            history: HistoryRing::new(),
            reconstructor: Reconstructor::default(),
            rate: MAX_RATE,
            window: MIN_WINDOW,
            sample_rate: DownsamplerConfig::default().sample_rate,
        };
        ds.set_sample_rate(config.sample_rate);
        ds.set_rate(config.rate);
        ds.set_window(config.window);
        ds
    }

    /// Set the target rate as a fraction of the native sample rate.
    ///
    /// Values above 1.0 become 1.0 (no reduction), zero or negative values
    /// become [`MIN_RATE`], NaN is ignored. The converter is updated too.
    pub fn set_rate(&mut self, rate: f32) {
        let Some(rate) = clamp_rate(rate) else {
            return;
        };
        self.rate = rate;
        self.recalculate();
    }

    /// Current target rate.
    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Set the interpolation window size.
    ///
    /// Stored and reported only; the kernel is always four points.
    pub fn set_window(&mut self, window: f32) {
        if let Some(window) = clamp_window(window) {
            self.window = window;
            #[cfg(feature = "tracing")]
            tracing::debug!(window = self.window, "downsampler window");
        }
    }

    /// Current window size.
    #[inline]
    pub fn window(&self) -> u16 {
        self.window
    }

    /// Native sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current reconstruction phase.
    #[inline]
    pub fn phase(&self) -> f64 {
        self.reconstructor.phase()
    }

    /// Per-tick phase increment, `rate / sample_rate`.
    #[inline]
    pub fn phase_increment(&self) -> f64 {
        self.reconstructor.increment()
    }

    /// The four most recent converted samples.
    #[inline]
    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    /// The write-stage converter.
    #[inline]
    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Run one tick: convert, write everything produced, reconstruct once.
    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        for &sample in self.converter.process_frame(input) {
            self.history.write(sample);
        }
        self.reconstructor.reconstruct(&self.history)
    }

    fn recalculate(&mut self) {
        let increment = f64::from(self.rate) / f64::from(self.sample_rate);
        self.reconstructor.set_increment(increment);
        self.converter.set_rate(f64::from(self.rate));
        #[cfg(feature = "tracing")]
        tracing::debug!(
            rate = self.rate,
            sample_rate = self.sample_rate,
            increment,
            "downsampler rate"
        );
    }
}

impl Default for Downsampler<InterpolatingResampler> {
    fn default() -> Self {
        Self::from_config(DownsamplerConfig::default())
    }
}

impl<C: RateConverter> Effect for Downsampler<C> {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.tick(input)
    }

    /// Non-positive and non-finite rates are ignored.
    fn set_sample_rate(&mut self, sample_rate: f32) {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return;
        }
        self.sample_rate = sample_rate;
        self.recalculate();
    }

    /// Zero the history, rewind the phase, reset the converter. Parameters
    /// are kept.
    fn reset(&mut self) {
        self.history.clear();
        self.reconstructor.reset();
        self.converter.reset();
    }

    fn latency_samples(&self) -> usize {
        RING_LATENCY + self.converter.latency_samples()
    }
}

impl<C: RateConverter> ParameterInfo for Downsampler<C> {
    fn param_count(&self) -> usize {
        2
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::new("Rate", "Rate", ParamUnit::Ratio, MIN_RATE, MAX_RATE, 1.0)
                    .with_scale(ParamScale::Logarithmic)
                    .with_step(0.001)
                    .with_id(RATE_PARAM_ID, "ds_rate"),
            ),
            1 => Some(
                ParamDescriptor::new(
                    "Window",
                    "Window",
                    ParamUnit::Samples,
                    f32::from(MIN_WINDOW),
                    f32::from(MAX_WINDOW),
                    1.0,
                )
                .with_step(1.0)
                .with_id(WINDOW_PARAM_ID, "ds_window")
                .with_flags(
                    ParamFlags::AUTOMATABLE
                        .union(ParamFlags::STEPPED)
                        .union(ParamFlags::INERT),
                ),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.rate,
            1 => f32::from(self.window),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_rate(value),
            1 => self.set_window(value),
            _ => {}
        }
    }
}

//! Rate converters: the write stage of the downsampler.
//!
//! A [`RateConverter`] consumes one input sample per tick and produces zero
//! or more samples at the configured rate. The produced samples are handed
//! back as a slice that stays valid until the next call, so the whole
//! exchange is allocation-free.
//!
//! # Implementations
//!
//! | Type | Samples per tick | Use |
//! |------|------------------|-----|
//! | [`InterpolatingResampler`] | `floor` of accumulated rate, 0..=16 | default, smooth decimation |
//! | [`Decimator`] | 0 or 1 | keeps every Nth input verbatim |
//! | [`PassThrough`] | always 1 | reference / identity |
//!
//! [`AnyConverter`] wraps all three behind one enum so a converter can be
//! chosen at runtime (CLI, presets) without boxing on the audio path.

use core::fmt;
use core::str::FromStr;

use crate::downsampler::MIN_RATE;
use crate::interpolate::hermite_window;
use crate::ring::HistoryRing;

/// Highest rate the interpolating converter accepts.
pub const MAX_CONVERTER_RATE: f64 = 16.0;

/// Capacity of a converter's output buffer, in samples.
pub const CONVERTER_OUTPUT_LEN: usize = 16;

/// Write stage contract.
///
/// `process_frame` returns exactly the samples produced for this tick, in
/// production order. The slice borrows the converter's own buffer.
pub trait RateConverter {
    /// Set the conversion ratio (output rate / input rate).
    fn set_rate(&mut self, rate: f64);

    /// Feed one input sample, returning the samples produced by it.
    fn process_frame(&mut self, sample: f32) -> &[f32];

    /// Clear all history and phase state; the rate is kept.
    fn reset(&mut self);

    /// Delay, in input samples, between a sample arriving and its converted
    /// counterpart being produced.
    fn latency_samples(&self) -> usize {
        0
    }
}

fn sanitize_rate(rate: f64, max: f64) -> Option<f64> {
    if rate.is_nan() {
        None
    } else {
        Some(rate.clamp(f64::from(MIN_RATE), max))
    }
}

/// Phase-accumulating converter with Hermite-interpolated output.
///
/// Every input frame adds `rate` to an output phase. Each time the phase
/// crosses an integer, one output sample is produced at the fractional
/// point of the crossing. The interpolation runs one input sample behind
/// so all four kernel taps are real samples.
///
/// At rate 1.0 this is an exact one-sample delay; at rate 0.5 it keeps every
/// second input sample unchanged.
///
/// # Example
///
/// ```rust
/// use lofi_core::{InterpolatingResampler, RateConverter};
///
/// let mut conv = InterpolatingResampler::new(0.5);
/// let produced: usize = (0..100).map(|i| conv.process_frame(i as f32).len()).sum();
/// assert_eq!(produced, 50);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatingResampler {
    rate: f64,
    phase: f64,
    input: HistoryRing,
    output: [f32; CONVERTER_OUTPUT_LEN],
}

impl InterpolatingResampler {
    /// Create a converter at the given ratio.
    pub fn new(rate: f64) -> Self {
        let mut conv = Self {
            rate: 1.0,
            phase: 0.0,
            input: HistoryRing::new(),
            output: [0.0; CONVERTER_OUTPUT_LEN],
        };
        conv.set_rate(rate);
        conv
    }

    /// Current conversion ratio.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for InterpolatingResampler {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RateConverter for InterpolatingResampler {
    fn set_rate(&mut self, rate: f64) {
        if let Some(rate) = sanitize_rate(rate, MAX_CONVERTER_RATE) {
            self.rate = rate;
        }
    }

    #[inline]
    fn process_frame(&mut self, sample: f32) -> &[f32] {
        self.input.write(sample);
        self.phase += self.rate;

        let window = self.input.chronological();
        let mut count = 0;
        while self.phase >= 1.0 && count < CONVERTER_OUTPUT_LEN {
            self.phase -= 1.0;
            // Position of this crossing inside the latest input interval.
            let frac = 1.0 - self.phase / self.rate;
            self.output[count] = hermite_window(frac as f32, window);
            count += 1;
        }
        &self.output[..count]
    }

    fn reset(&mut self) {
        self.phase = 0.0;
        self.input.clear();
        self.output = [0.0; CONVERTER_OUTPUT_LEN];
    }

    fn latency_samples(&self) -> usize {
        1
    }
}

/// Keeps every Nth input sample, `N = round(1 / rate)`.
///
/// The first sample after a reset is always kept. Rates at or above 1.0
/// keep every sample.
#[derive(Debug, Clone)]
pub struct Decimator {
    factor: u32,
    counter: u32,
    output: [f32; 1],
}

impl Decimator {
    /// Create a decimator for the given ratio.
    pub fn new(rate: f64) -> Self {
        let mut dec = Self {
            factor: 1,
            counter: 0,
            output: [0.0],
        };
        dec.set_rate(rate);
        dec
    }

    /// Current decimation factor.
    pub fn factor(&self) -> u32 {
        self.factor
    }
}

impl Default for Decimator {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RateConverter for Decimator {
    fn set_rate(&mut self, rate: f64) {
        if let Some(rate) = sanitize_rate(rate, 1.0) {
            // Float-to-int casts saturate, so tiny rates land on u32::MAX.
            self.factor = libm::round(1.0 / rate).max(1.0) as u32;
            if self.counter >= self.factor {
                self.counter = 0;
            }
        }
    }

    #[inline]
    fn process_frame(&mut self, sample: f32) -> &[f32] {
        let keep = self.counter == 0;
        self.counter += 1;
        if self.counter >= self.factor {
            self.counter = 0;
        }
        if keep {
            self.output[0] = sample;
            &self.output[..]
        } else {
            &self.output[..0]
        }
    }

    fn reset(&mut self) {
        self.counter = 0;
        self.output = [0.0];
    }
}

/// Emits every input sample unchanged, ignoring the rate.
#[derive(Debug, Clone, Default)]
pub struct PassThrough {
    output: [f32; 1],
}

impl PassThrough {
    /// Create a pass-through converter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateConverter for PassThrough {
    fn set_rate(&mut self, _rate: f64) {}

    #[inline]
    fn process_frame(&mut self, sample: f32) -> &[f32] {
        self.output[0] = sample;
        &self.output[..]
    }

    fn reset(&mut self) {
        self.output = [0.0];
    }
}

/// Converter selector used by presets and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConverterKind {
    /// [`InterpolatingResampler`].
    #[default]
    Interpolating,
    /// [`Decimator`].
    Decimator,
    /// [`PassThrough`].
    PassThrough,
}

impl ConverterKind {
    /// All kinds, in display order.
    pub const ALL: [ConverterKind; 3] = [
        ConverterKind::Interpolating,
        ConverterKind::Decimator,
        ConverterKind::PassThrough,
    ];

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            ConverterKind::Interpolating => "interpolating",
            ConverterKind::Decimator => "decimator",
            ConverterKind::PassThrough => "passthrough",
        }
    }
}

impl fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a converter name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConverter;

impl fmt::Display for UnknownConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown converter (expected interpolating, decimator, or passthrough)")
    }
}

impl core::error::Error for UnknownConverter {}

const CONVERTER_ALIASES: [(&str, ConverterKind); 6] = [
    ("hermite", ConverterKind::Interpolating),
    ("resampler", ConverterKind::Interpolating),
    ("nth", ConverterKind::Decimator),
    ("decimate", ConverterKind::Decimator),
    ("pass", ConverterKind::PassThrough),
    ("identity", ConverterKind::PassThrough),
];

impl FromStr for ConverterKind {
    type Err = UnknownConverter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ConverterKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .or_else(|| {
                CONVERTER_ALIASES
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(s))
                    .map(|&(_, kind)| kind)
            })
            .ok_or(UnknownConverter)
    }
}

/// Runtime-selected converter, dispatched by `match` rather than a vtable.
#[derive(Debug, Clone)]
pub enum AnyConverter {
    /// See [`InterpolatingResampler`].
    Interpolating(InterpolatingResampler),
    /// See [`Decimator`].
    Decimator(Decimator),
    /// See [`PassThrough`].
    PassThrough(PassThrough),
}

impl AnyConverter {
    /// Build the converter for `kind` at the given ratio.
    pub fn new(kind: ConverterKind, rate: f64) -> Self {
        match kind {
            ConverterKind::Interpolating => {
                AnyConverter::Interpolating(InterpolatingResampler::new(rate))
            }
            ConverterKind::Decimator => AnyConverter::Decimator(Decimator::new(rate)),
            ConverterKind::PassThrough => AnyConverter::PassThrough(PassThrough::new()),
        }
    }

    /// Which converter this is.
    pub fn kind(&self) -> ConverterKind {
        match self {
            AnyConverter::Interpolating(_) => ConverterKind::Interpolating,
            AnyConverter::Decimator(_) => ConverterKind::Decimator,
            AnyConverter::PassThrough(_) => ConverterKind::PassThrough,
        }
    }
}

impl Default for AnyConverter {
    fn default() -> Self {
        AnyConverter::new(ConverterKind::default(), 1.0)
    }
}

impl RateConverter for AnyConverter {
    fn set_rate(&mut self, rate: f64) {
        match self {
            AnyConverter::Interpolating(c) => c.set_rate(rate),
            AnyConverter::Decimator(c) => c.set_rate(rate),
            AnyConverter::PassThrough(c) => c.set_rate(rate),
        }
    }

    #[inline]
    fn process_frame(&mut self, sample: f32) -> &[f32] {
        match self {
            AnyConverter::Interpolating(c) => c.process_frame(sample),
            AnyConverter::Decimator(c) => c.process_frame(sample),
            AnyConverter::PassThrough(c) => c.process_frame(sample),
        }
    }

    fn reset(&mut self) {
        match self {
            AnyConverter::Interpolating(c) => c.reset(),
            AnyConverter::Decimator(c) => c.reset(),
            AnyConverter::PassThrough(c) => c.reset(),
        }
    }

    fn latency_samples(&self) -> usize {
        match self {
            AnyConverter::Interpolating(c) => c.latency_samples(),
            AnyConverter::Decimator(c) => c.latency_samples(),
            AnyConverter::PassThrough(c) => c.latency_samples(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn run<C: RateConverter>(conv: &mut C, input: &[f32]) -> (Vec<usize>, Vec<f32>) {
        let mut counts = Vec::new();
        let mut produced = Vec::new();
        for &x in input {
            let out = conv.process_frame(x);
            counts.push(out.len());
            produced.extend_from_slice(out);
        }
        (counts, produced)
    }

    #[test]
    fn test_interpolating_unity_is_one_sample_delay() {
        let mut conv = InterpolatingResampler::new(1.0);
        let input: Vec<f32> = (1..=8).map(|i| i as f32).collect();
        let (counts, produced) = run(&mut conv, &input);
        assert!(counts.iter().all(|&c| c == 1));
        assert_eq!(produced, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_interpolating_half_keeps_every_other() {
        let mut conv = InterpolatingResampler::new(0.5);
        let input: Vec<f32> = (1..=8).map(|i| i as f32).collect();
        let (counts, produced) = run(&mut conv, &input);
        assert_eq!(counts, [0, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(produced, [1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_interpolating_output_count_tracks_rate() {
        for &rate in &[0.1, 0.25, 0.333, 0.7, 1.0] {
            let mut conv = InterpolatingResampler::new(rate);
            let n = 10_000;
            let total: usize = (0..n).map(|_| conv.process_frame(0.0).len()).sum();
            let expected = (n as f64 * rate) as usize;
            assert!(
                total.abs_diff(expected) <= 1,
                "rate {rate}: expected ~{expected}, got {total}"
            );
        }
    }

    #[test]
    fn test_interpolating_upsampling_emits_several() {
        let mut conv = InterpolatingResampler::new(4.0);
        assert_eq!(conv.process_frame(1.0).len(), 4);
        assert_eq!(conv.process_frame(1.0).len(), 4);
    }

    #[test]
    fn test_interpolating_fractional_rate_interpolates_ramp() {
        // A ramp is reproduced exactly by the cubic kernel once the history is full.
        let mut conv = InterpolatingResampler::new(0.4);
        let input: Vec<f32> = (0..64).map(|i| i as f32).collect();
        let mut last = f32::NEG_INFINITY;
        for (i, &x) in input.iter().enumerate() {
            for &y in conv.process_frame(x) {
                if i >= 4 {
                    assert!(y > last, "ramp output must increase");
                    assert!(y <= x - 1.0 + 1e-4 && y >= x - 2.0 - 1e-4);
                }
                last = y;
            }
        }
    }

    #[test]
    fn test_interpolating_rate_clamps() {
        let mut conv = InterpolatingResampler::new(100.0);
        assert_eq!(conv.rate(), MAX_CONVERTER_RATE);
        conv.set_rate(-1.0);
        assert_eq!(conv.rate(), f64::from(MIN_RATE));
        conv.set_rate(f64::NAN);
        assert_eq!(conv.rate(), f64::from(MIN_RATE));
    }

    #[test]
    fn test_interpolating_reset_clears_history() {
        let mut conv = InterpolatingResampler::new(1.0);
        for _ in 0..4 {
            conv.process_frame(1.0);
        }
        conv.reset();
        assert_eq!(conv.process_frame(0.5), [0.0]);
    }

    #[test]
    fn test_decimator_every_other() {
        let mut dec = Decimator::new(0.5);
        assert_eq!(dec.factor(), 2);
        let (counts, produced) = run(&mut dec, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(counts, [1, 0, 1, 0, 1]);
        assert_eq!(produced, [1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_decimator_rounds_factor() {
        assert_eq!(Decimator::new(0.3).factor(), 3);
        assert_eq!(Decimator::new(1.0).factor(), 1);
        assert_eq!(Decimator::new(2.0).factor(), 1);
    }

    #[test]
    fn test_decimator_rate_change_keeps_counter_in_range() {
        let mut dec = Decimator::new(0.125);
        for _ in 0..5 {
            dec.process_frame(0.0);
        }
        dec.set_rate(0.5);
        let (counts, _) = run(&mut dec, &[0.0; 4]);
        assert_eq!(counts.iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_passthrough() {
        let mut pass = PassThrough::new();
        pass.set_rate(0.1);
        let (counts, produced) = run(&mut pass, &[0.1, 0.2, 0.3]);
        assert_eq!(counts, [1, 1, 1]);
        assert_eq!(produced, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_converter_kind_parse() {
        assert_eq!(
            "decimator".parse::<ConverterKind>(),
            Ok(ConverterKind::Decimator)
        );
        assert_eq!(
            " PassThrough ".parse::<ConverterKind>(),
            Ok(ConverterKind::PassThrough)
        );
        assert_eq!(
            "hermite".parse::<ConverterKind>(),
            Ok(ConverterKind::Interpolating)
        );
        assert_eq!("fft".parse::<ConverterKind>(), Err(UnknownConverter));
        for kind in ConverterKind::ALL {
            assert_eq!(kind.name().parse::<ConverterKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_any_converter_dispatch() {
        let mut any = AnyConverter::new(ConverterKind::Decimator, 0.25);
        assert_eq!(any.kind(), ConverterKind::Decimator);
        let (counts, _) = run(&mut any, &[0.0; 8]);
        assert_eq!(counts, [1, 0, 0, 0, 1, 0, 0, 0]);
    }
}

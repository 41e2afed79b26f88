//! Lofi Core - real-time downsampling effect
//!
//! This crate implements a lo-fi sample rate reducer: the signal is
//! converted down to a fraction of the host rate, kept in a four-slot
//! history, and played back at the host rate through a phase-driven
//! four-point Hermite interpolator. Exactly one output sample is produced
//! per input sample, with no allocation on the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe per-sample / per-block processing trait
//! - [`ParameterInfo`] - Indexed, introspectable parameters for hosts and CLIs
//!
//! ## Downsampler Pipeline
//!
//! - [`RateConverter`] - Write stage contract, with [`InterpolatingResampler`],
//!   [`Decimator`], [`PassThrough`] and the runtime-selected [`AnyConverter`]
//! - [`HistoryRing`] - Four most recent converted samples
//! - [`Reconstructor`] - Phase accumulator reading the ring through [`hermite`]
//! - [`Downsampler`] - The assembled effect
//!
//! ## Thread Handoff
//!
//! - [`SharedControls`] / [`ControlWatcher`] - Lock-free parameter updates,
//!   applied once per block
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! lofi-core = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to get `debug` events on parameter changes.
//! Nothing is logged from the per-sample path.
//!
//! # Example
//!
//! ```rust
//! use lofi_core::{Downsampler, Effect, ParameterInfo};
//!
//! let mut ds = Downsampler::new(44100.0);
//! ds.set_param(0, 0.1); // one tenth of the host rate
//!
//! let input: Vec<f32> = (0..512).map(|i| (i as f32 * 0.05).sin()).collect();
//! let mut output = vec![0.0; input.len()];
//! ds.process_block(&input, &mut output);
//! assert_eq!(output.len(), input.len());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod controls;
pub mod downsampler;
pub mod effect;
pub mod interpolate;
pub mod param_info;
pub mod reconstruct;
pub mod resampler;
pub mod ring;

// Re-export main types at crate root
pub use controls::{ControlSnapshot, ControlWatcher, SharedControls};
pub use downsampler::{
    Downsampler, DownsamplerConfig, MAX_RATE, MAX_WINDOW, MIN_RATE, MIN_WINDOW, RATE_PARAM_ID,
    WINDOW_PARAM_ID, clamp_rate, clamp_window,
};
pub use effect::Effect;
pub use interpolate::{hermite, hermite_window};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use reconstruct::Reconstructor;
pub use resampler::{
    AnyConverter, CONVERTER_OUTPUT_LEN, ConverterKind, Decimator, InterpolatingResampler,
    MAX_CONVERTER_RATE, PassThrough, RateConverter, UnknownConverter,
};
pub use ring::{HISTORY_LEN, HistoryRing};

//! Audio I/O layer for the lofi downsampler.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for mono load/save
//! - **Block processing**: [`ProcessingEngine`] runs a downsampler over
//!   blocks, applying [`SharedControls`](lofi_core::SharedControls) updates
//!   at block boundaries
//! - **Real-time streaming**: [`AudioStream`] for live mono processing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lofi_core::{ConverterKind, DownsamplerConfig};
//! use lofi_io::{read_wav, write_wav, ProcessingEngine, WavSpec};
//!
//! let (samples, spec) = read_wav("input.wav")?;
//!
//! let config = DownsamplerConfig {
//!     sample_rate: spec.sample_rate as f32,
//!     rate: 0.25,
//!     window: 1.0,
//! };
//! let mut engine = ProcessingEngine::from_config(config, ConverterKind::Interpolating);
//! let processed = engine.process_file(&samples, 512);
//!
//! write_wav("output.wav", &processed, WavSpec::mono(spec.sample_rate, 32))?;
//! ```

mod engine;
mod stream;
mod wav;

pub use engine::ProcessingEngine;
pub use stream::{AudioDevice, AudioStream, StreamConfig, default_device, list_devices};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

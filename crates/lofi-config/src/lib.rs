//! Preset management for the lofi downsampler.
//!
//! # Features
//!
//! - **Preset System**: Load and save downsampler settings as TOML
//! - **Validation**: Lenient loading clamps; strict loading rejects
//! - **Factory Presets**: Built-in presets that are always available
//! - **Paths**: Platform-specific user preset directory (`std` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use lofi_config::{Preset, resolve_preset, user_presets_dir};
//! use lofi_core::ConverterKind;
//!
//! // Factory presets resolve by name
//! let telephone = resolve_preset("telephone").unwrap();
//! assert_eq!(telephone.name, "Telephone");
//!
//! // Create and save a user preset
//! let preset = Preset::new("Radio")
//!     .with_description("AM band")
//!     .with_rate(0.2)
//!     .with_converter(ConverterKind::Decimator);
//! preset.save(user_presets_dir().join("radio.toml")).unwrap();
//! ```

mod error;
mod preset;

/// Factory presets bundled with the library.
pub mod factory_presets;

/// Strict preset validation.
pub mod validation;

/// Platform-specific paths and preset lookup.
#[cfg(feature = "std")]
pub mod paths;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
#[cfg(feature = "std")]
pub use paths::{
    preset_name_from_path, resolve_preset, user_config_dir, user_presets_dir,
};
pub use preset::Preset;
pub use validation::{preset_issues, validate_preset};

//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use lofi_core::{
    ConverterKind, Downsampler, DownsamplerConfig, MAX_WINDOW, MIN_WINDOW, RateConverter,
    clamp_rate,
};

use crate::error::ConfigError;
use crate::validation::validate_preset;

/// Downsampler settings stored as a TOML preset.
///
/// # TOML Format
///
/// ```toml
/// name = "Telephone"
/// description = "Narrow, aliased voice band"
/// rate = 0.1667
/// window = 1
/// converter = "interpolating"
/// ```
///
/// Every field except `name` is optional. Loading clamps out-of-range values
/// the same way the downsampler does; the `*_strict` loaders reject them
/// instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Target rate as a fraction of the native sample rate.
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// Interpolation window size.
    #[serde(default = "default_window")]
    pub window: i64,

    /// Write-stage converter.
    #[serde(default, with = "converter_name")]
    pub converter: ConverterKind,
}

fn default_rate() -> f32 {
    1.0
}

fn default_window() -> i64 {
    1
}

/// Serialize [`ConverterKind`] by its stable lowercase name.
mod converter_name {
    use lofi_core::ConverterKind;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(kind: &ConverterKind, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(kind.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ConverterKind, D::Error> {
        let name = String::deserialize(d)?;
        name.parse().map_err(de::Error::custom)
    }
}

impl Preset {
    /// Create a preset with default settings (unity rate).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            rate: default_rate(),
            window: default_window(),
            converter: ConverterKind::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the rate.
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the window size.
    pub fn with_window(mut self, window: i64) -> Self {
        self.window = window;
        self
    }

    /// Set the converter.
    pub fn with_converter(mut self, converter: ConverterKind) -> Self {
        self.converter = converter;
        self
    }

    /// Load a preset from a TOML file, clamping out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::read(path.as_ref())?.clamped())
    }

    /// Load a preset from a TOML file, rejecting out-of-range values.
    pub fn load_strict(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let preset = Self::read(path.as_ref())?;
        validate_preset(&preset)?;
        Ok(preset)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Parse a preset from a TOML string, clamping out-of-range values.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let preset: Preset = toml::from_str(toml_str)?;
        Ok(preset.clamped())
    }

    /// Parse a preset from a TOML string, rejecting out-of-range values.
    pub fn from_toml_strict(toml_str: &str) -> Result<Self, ConfigError> {
        let preset: Preset = toml::from_str(toml_str)?;
        validate_preset(&preset)?;
        Ok(preset)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The same preset with `rate` and `window` clamped into range.
    ///
    /// A NaN rate falls back to the default.
    pub fn clamped(mut self) -> Self {
        self.rate = clamp_rate(self.rate).unwrap_or_else(default_rate);
        self.window = self
            .window
            .clamp(i64::from(MIN_WINDOW), i64::from(MAX_WINDOW));
        self
    }

    /// Construction parameters for a downsampler at `sample_rate`.
    pub fn downsampler_config(&self, sample_rate: f32) -> DownsamplerConfig {
        DownsamplerConfig {
            sample_rate,
            rate: self.rate,
            window: self.window as f32,
        }
    }

    /// Apply rate and window to an existing downsampler.
    ///
    /// The converter choice is not applied; it is fixed at construction.
    pub fn apply_to<C: RateConverter>(&self, ds: &mut Downsampler<C>) {
        ds.set_rate(self.rate);
        ds.set_window(self.window as f32);
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_preset_new() {
        let preset = Preset::new("Test");
        assert_eq!(preset.name, "Test");
        assert!(preset.description.is_none());
        assert_eq!(preset.rate, 1.0);
        assert_eq!(preset.window, 1);
        assert_eq!(preset.converter, ConverterKind::Interpolating);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let preset = Preset::from_toml("name = \"Bare\"").unwrap();
        assert_eq!(preset, Preset::new("Bare"));
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
name = "Radio"
description = "AM band"
rate = 0.2
window = 8
converter = "decimator"
"#;
        let preset = Preset::from_toml(toml).unwrap();
        assert_eq!(preset.description.as_deref(), Some("AM band"));
        assert_eq!(preset.rate, 0.2);
        assert_eq!(preset.window, 8);
        assert_eq!(preset.converter, ConverterKind::Decimator);
    }

    #[test]
    fn test_unknown_converter_is_a_parse_error() {
        let result = Preset::from_toml("name = \"x\"\nconverter = \"fft\"");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_lenient_load_clamps() {
        let preset = Preset::from_toml("name = \"x\"\nrate = 4.0\nwindow = 900").unwrap();
        assert_eq!(preset.rate, 1.0);
        assert_eq!(preset.window, 256);

        let preset = Preset::from_toml("name = \"x\"\nrate = -1.0\nwindow = -5").unwrap();
        assert_eq!(preset.rate, lofi_core::MIN_RATE);
        assert_eq!(preset.window, 1);
    }

    #[test]
    fn test_strict_load_rejects() {
        let result = Preset::from_toml_strict("name = \"x\"\nrate = 4.0");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { ref param, .. }) if param == "rate"
        ));
        assert!(Preset::from_toml_strict("name = \"x\"\nrate = 0.5\nwindow = 12").is_ok());
    }

    #[test]
    fn test_toml_text_roundtrip() {
        let preset = Preset::new("Saved")
            .with_description("desc")
            .with_rate(0.125)
            .with_window(16)
            .with_converter(ConverterKind::PassThrough);
        let text = preset.to_toml().unwrap();
        assert!(text.contains("converter = \"passthrough\""));
        assert_eq!(Preset::from_toml(&text).unwrap(), preset);
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("p.toml");
        let preset = Preset::new("Deep").with_rate(0.3);
        preset.save(&path).unwrap();
        assert_eq!(Preset::load(&path).unwrap(), preset);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Preset::load("/nonexistent/lofi/preset.toml");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_apply_to_downsampler() {
        let preset = Preset::new("x").with_rate(0.25).with_window(300);
        let mut ds = Downsampler::new(48000.0);
        preset.apply_to(&mut ds);
        assert_eq!(ds.rate(), 0.25);
        assert_eq!(ds.window(), 256);

        let config = preset.downsampler_config(44100.0);
        assert_eq!(config.sample_rate, 44100.0);
        assert_eq!(config.rate, 0.25);
    }
}

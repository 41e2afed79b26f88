//! Platform-specific preset locations and preset lookup.
//!
//! # Directory Structure
//!
//! - **User presets**: `~/.config/lofi/presets/` (Linux),
//!   `~/Library/Application Support/lofi/presets/` (macOS),
//!   `%APPDATA%\lofi\presets\` (Windows)
//!
//! # Lookup Order
//!
//! [`resolve_preset`] tries, in order: factory presets, `<name>.toml` in the
//! user presets directory, then `name` as a file path.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;
use crate::preset::Preset;

/// Application name used for directory paths.
const APP_NAME: &str = "lofi";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific presets directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// File name for a preset, adding `.toml` when missing.
pub fn preset_file_name(name: &str) -> String {
    if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    }
}

/// Find a preset file in `dir`, then as a path.
pub fn find_preset_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let in_dir = dir.join(preset_file_name(name));
    if in_dir.is_file() {
        return Some(in_dir);
    }

    let path = PathBuf::from(name);
    path.is_file().then_some(path)
}

/// Resolve a preset by name: factory, then files under `user_dir`, then a path.
///
/// File presets are loaded leniently (clamped).
pub fn resolve_preset_in(user_dir: &Path, name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    match find_preset_in(user_dir, name) {
        Some(path) => Preset::load(path),
        None => Err(ConfigError::PresetNotFound(name.to_string())),
    }
}

/// Resolve a preset by name using the user presets directory.
pub fn resolve_preset(name: &str) -> Result<Preset, ConfigError> {
    resolve_preset_in(&user_presets_dir(), name)
}

/// List preset files (`*.toml`) in `dir`, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path (the file stem).
///
/// ```rust
/// use lofi_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/radio.toml"));
/// assert_eq!(name, Some("radio".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

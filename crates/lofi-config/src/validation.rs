//! Strict preset validation.
//!
//! The downsampler never fails on bad parameters, it clamps. Validation
//! reports the values that would be clamped so strict callers can refuse
//! them instead.

use lofi_core::{MAX_WINDOW, MIN_WINDOW};

use crate::error::ConfigError;
use crate::preset::Preset;

/// Every problem found in `preset`, in field order.
pub fn preset_issues(preset: &Preset) -> Vec<ConfigError> {
    let mut issues = Vec::new();
    let invalid = |param: &str, reason: String| {
        ConfigError::invalid_parameter(preset.name.clone(), param, reason)
    };

    if preset.name.trim().is_empty() {
        issues.push(invalid("name", "must not be empty".to_string()));
    }

    if !(preset.rate.is_finite() && preset.rate > 0.0 && preset.rate <= 1.0) {
        issues.push(invalid("rate", format!("must be in (0, 1], got {}", preset.rate)));
    }

    let window_range = i64::from(MIN_WINDOW)..=i64::from(MAX_WINDOW);
    if !window_range.contains(&preset.window) {
        issues.push(invalid(
            "window",
            format!(
                "must be in [{MIN_WINDOW}, {MAX_WINDOW}], got {}",
                preset.window
            ),
        ));
    }

    issues
}

/// Fail with the first problem found in `preset`.
pub fn validate_preset(preset: &Preset) -> Result<(), ConfigError> {
    match preset_issues(preset).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

//! Factory presets bundled with lofi.
//!
//! These are embedded at compile time and always available, ahead of any
//! user preset with the same name.

use crate::Preset;

/// Factory preset identifiers, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &["clean", "half", "telephone", "crushed", "gritty"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("clean", CLEAN_PRESET),
    ("half", HALF_PRESET),
    ("telephone", TELEPHONE_PRESET),
    ("crushed", CRUSHED_PRESET),
    ("gritty", GRITTY_PRESET),
];

const CLEAN_PRESET: &str = r#"
name = "Clean"
description = "Unity rate; only the interpolation delay remains"
rate = 1.0
window = 1
converter = "interpolating"
"#;

const HALF_PRESET: &str = r#"
name = "Half"
description = "Half the host rate, gentle high-end loss"
rate = 0.5
window = 1
converter = "interpolating"
"#;

const TELEPHONE_PRESET: &str = r#"
name = "Telephone"
description = "About 8 kHz at a 48 kHz host, narrow voice band"
rate = 0.1667
window = 1
converter = "interpolating"
"#;

const CRUSHED_PRESET: &str = r#"
name = "Crushed"
description = "One twentieth of the host rate, heavy aliasing"
rate = 0.05
window = 1
converter = "interpolating"
"#;

const GRITTY_PRESET: &str = r#"
name = "Gritty"
description = "Quarter rate with raw sample dropping instead of interpolation"
rate = 0.25
window = 1
converter = "decimator"
"#;

/// All factory presets, parsed.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by identifier or display name, ignoring case.
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name = name.trim();
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| Some((*id, Preset::from_toml(toml).ok()?)))
        .find(|(id, preset)| {
            id.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name)
        })
        .map(|(_, preset)| preset)
}

/// Factory preset identifiers.
pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

/// Whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_preset;
    use lofi_core::ConverterKind;

    #[test]
    fn test_all_factory_presets_are_strictly_valid() {
        for (id, toml) in FACTORY_PRESETS_TOML {
            let preset = Preset::from_toml_strict(toml)
                .unwrap_or_else(|e| panic!("factory preset '{id}' invalid: {e}"));
            assert!(preset.description.is_some(), "'{id}' needs a description");
            assert!(validate_preset(&preset).is_ok());
        }
        assert_eq!(factory_presets().len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn test_names_match_table() {
        let ids: Vec<&str> = FACTORY_PRESETS_TOML.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, FACTORY_PRESET_NAMES);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(get_factory_preset("half").unwrap().rate, 0.5);
        assert_eq!(get_factory_preset("TELEPHONE").unwrap().name, "Telephone");
        assert_eq!(get_factory_preset("Crushed").unwrap().rate, 0.05);
        assert!(get_factory_preset("nonexistent").is_none());
        assert!(is_factory_preset("clean"));
        assert!(!is_factory_preset("radio"));
    }

    #[test]
    fn test_gritty_uses_decimator() {
        let gritty = get_factory_preset("gritty").unwrap();
        assert_eq!(gritty.converter, ConverterKind::Decimator);
        assert_eq!(gritty.rate, 0.25);
    }
}

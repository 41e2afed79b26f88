//! Preset demo: factory presets, TOML round-trips, and validation.
//!
//! Run with: cargo run -p lofi-config --example preset_demo

use lofi_config::{Preset, factory_preset_names, get_factory_preset, preset_issues};
use lofi_core::{ConverterKind, Downsampler, Effect};

fn main() {
    // --- Factory presets ---
    println!("=== Factory Presets ===\n");
    for name in factory_preset_names() {
        if let Some(preset) = get_factory_preset(name) {
            println!(
                "  {:10} rate {:.4}  {:13}  {}",
                name,
                preset.rate,
                preset.converter.name(),
                preset.description.as_deref().unwrap_or("")
            );
        }
    }

    // --- Build a preset and round-trip it through TOML ---
    println!("\n=== TOML ===\n");
    let radio = Preset::new("Radio")
        .with_description("AM band")
        .with_rate(0.2)
        .with_converter(ConverterKind::Decimator);
    match radio.to_toml() {
        Ok(text) => {
            print!("{text}");
            let parsed = Preset::from_toml(&text).map(|p| p == radio);
            println!("\nRound-trip equal: {:?}", parsed);
        }
        Err(e) => println!("serialize failed: {e}"),
    }

    // --- Lenient vs strict ---
    println!("\n=== Validation ===\n");
    let wild = "name = \"Wild\"\nrate = 3.0\nwindow = 0\n";
    if let Ok(clamped) = Preset::from_toml(wild) {
        println!("  lenient: rate {} window {}", clamped.rate, clamped.window);
    }
    if let Err(e) = Preset::from_toml_strict(wild) {
        println!("  strict:  {e}");
    }
    let raw = Preset::new("Wild").with_rate(3.0).with_window(0);
    for issue in preset_issues(&raw) {
        println!("  issue:   {issue}");
    }

    // --- Apply to a running downsampler ---
    println!("\n=== Apply ===\n");
    let mut ds = Downsampler::new(44100.0);
    if let Some(telephone) = get_factory_preset("telephone") {
        telephone.apply_to(&mut ds);
    }
    println!(
        "  rate {:.4}, window {}, latency {} samples",
        ds.rate(),
        ds.window(),
        ds.latency_samples()
    );
}

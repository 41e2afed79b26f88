//! Preset management commands.
//!
//! Provides commands to list, show, save and delete downsampler presets.
//! Every command takes `--dir` to work on a directory other than the user
//! presets directory.

use crate::commands::common::format_rate;
use clap::{Args, Subcommand};
use lofi_config::paths::{list_presets_in_dir, preset_file_name, resolve_preset_in};
use lofi_config::{
    Preset, factory_presets, get_factory_preset, preset_name_from_path, user_presets_dir,
    validate_preset,
};
use lofi_core::ConverterKind;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset directory (defaults to the user presets directory)
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save settings as a user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Target rate as a fraction of the native sample rate
        #[arg(short, long, default_value = "1.0", allow_negative_numbers = true)]
        rate: f32,

        /// Interpolation window size
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        window: i64,

        /// Write-stage converter
        #[arg(long, default_value = "interpolating")]
        converter: ConverterKind,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,

        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Show the preset directory
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let dir = args.dir.unwrap_or_else(user_presets_dir);

    match args.command {
        PresetsCommand::List { factory, user } => list_presets(&dir, factory, user),
        PresetsCommand::Show { name } => show_preset(&dir, &name),
        PresetsCommand::Save {
            name,
            rate,
            window,
            converter,
            description,
            force,
        } => {
            let mut preset = Preset::new(name.as_str())
                .with_rate(rate)
                .with_window(window)
                .with_converter(converter);
            if let Some(desc) = description {
                preset = preset.with_description(desc);
            }
            save_preset(&dir, &name, &preset, force)
        }
        PresetsCommand::Delete { name, force } => delete_preset(&dir, &name, force),
        PresetsCommand::Paths => {
            println!("User presets: {}", dir.display());
            Ok(())
        }
    }
}

fn list_presets(dir: &Path, factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:12} {:>8}  {}", preset.name, format_rate(preset.rate), desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_presets_in_dir(dir);
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: lofi presets save <name> --rate 0.25\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:12} {:>8}  {}", name, format_rate(preset.rate), desc);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping preset");
                        println!("  {:12} (error loading)", name);
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(dir: &Path, name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset_in(dir, name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    println!("Rate:      {}", format_rate(preset.rate));
    println!("Window:    {}", preset.window);
    println!("Converter: {}", preset.converter);
    println!();
    println!("TOML:");
    print!("{}", preset.to_toml()?);

    Ok(())
}

fn save_preset(dir: &Path, name: &str, preset: &Preset, force: bool) -> anyhow::Result<()> {
    if get_factory_preset(name).is_some() {
        anyhow::bail!(
            "'{}' is a factory preset name. Choose a different name.",
            name
        );
    }
    validate_preset(preset)?;

    let preset_path = dir.join(preset_file_name(name));
    if preset_path.exists() && !force {
        anyhow::bail!("Preset '{}' already exists. Use --force to overwrite.", name);
    }

    preset.save(&preset_path)?;
    println!("Saved preset '{}' to {}", name, preset_path.display());
    Ok(())
}

fn delete_preset(dir: &Path, name: &str, force: bool) -> anyhow::Result<()> {
    if get_factory_preset(name).is_some() {
        anyhow::bail!(
            "Cannot delete factory preset '{}'. Factory presets are built-in.",
            name
        );
    }

    let preset_path = dir.join(preset_file_name(name));
    if !preset_path.exists() {
        anyhow::bail!("User preset '{}' not found.", name);
    }

    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{}'.", name);
    }

    std::fs::remove_file(&preset_path)?;
    println!("Deleted preset '{}'.", name);
    Ok(())
}

//! lofi CLI - command-line front end for the lofi downsampler.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lofi")]
#[command(author, version, about = "Real-time downsampling effect", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Downsample a WAV file
    Process(commands::process::ProcessArgs),

    /// Run real-time downsampling on an audio device
    Realtime(commands::realtime::RealtimeArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),

    /// List audio devices
    Devices(commands::devices::DevicesArgs),

    /// Show the downsampler's parameters
    Params(commands::params::ParamsArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Realtime(args) => commands::realtime::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}

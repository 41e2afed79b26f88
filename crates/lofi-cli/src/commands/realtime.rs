//! Real-time audio processing command.
//!
//! The audio callback owns the engine. Parameter changes typed on stdin go
//! through [`SharedControls`] and are picked up at the next audio block.

use crate::commands::common::DownsampleArgs;
use clap::Args;
use lofi_core::{
    Downsampler, ParamDescriptor, ParamId, ParameterInfo, RATE_PARAM_ID, SharedControls,
    WINDOW_PARAM_ID, clamp_rate, clamp_window,
};
use lofi_io::{AudioStream, StreamConfig};
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Args)]
pub struct RealtimeArgs {
    #[command(flatten)]
    settings: DownsampleArgs,

    /// Input device name or index
    #[arg(long)]
    input_device: Option<String>,

    /// Output device name or index
    #[arg(long)]
    output_device: Option<String>,

    /// Buffer size
    #[arg(long, default_value = "256")]
    buffer_size: u32,
}

/// A line typed at the control prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ControlCommand {
    Rate(f32),
    Window(f32),
    Show,
    Help,
    Quit,
}

/// Descriptors used to read typed values and echo applied ones.
struct ControlParams {
    rate: ParamDescriptor,
    window: ParamDescriptor,
}

impl ControlParams {
    fn new() -> anyhow::Result<Self> {
        let ds = Downsampler::new(48000.0);
        let lookup = |id: ParamId| {
            ds.param_index_by_id(id)
                .and_then(|i| ds.param_info(i))
                .ok_or_else(|| anyhow::anyhow!("downsampler has no parameter {}", id.0))
        };
        Ok(Self {
            rate: lookup(RATE_PARAM_ID)?,
            window: lookup(WINDOW_PARAM_ID)?,
        })
    }
}

/// Values may carry their unit, as in `rate 0.25x` or `window 16 smp`.
fn parse_command(line: &str, params: &ControlParams) -> Result<ControlCommand, String> {
    let line = line.trim();
    let (command, value) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, Some(rest.trim())),
        None => (line, None),
    };
    let command = command.to_ascii_lowercase();

    let number = |name: &str, desc: &ParamDescriptor| -> Result<f32, String> {
        let text = value.ok_or_else(|| format!("'{}' needs a value", name))?;
        desc.parse_value(text)
            .ok_or_else(|| format!("'{}' is not a number", text))
    };

    match command.as_str() {
        "rate" | "r" => number("rate", &params.rate).map(ControlCommand::Rate),
        "window" | "w" => number("window", &params.window).map(ControlCommand::Window),
        "show" | "" => Ok(ControlCommand::Show),
        "help" | "?" => Ok(ControlCommand::Help),
        "quit" | "q" | "exit" => Ok(ControlCommand::Quit),
        other => Err(format!("unknown command '{}' (try 'help')", other)),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  rate <r>     set the target rate, in (0, 1] (e.g. 0.25 or 0.25x)");
    println!("  window <n>   set the interpolation window, 1 to 256 (e.g. 16 or 16 smp)");
    println!("  show         print the current settings");
    println!("  quit         stop processing");
}

/// Read control lines from stdin until `quit` or end of input.
fn control_loop(controls: &SharedControls, params: &ControlParams, running: &AtomicBool) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if !running.load(Ordering::SeqCst) {
            break;
        }

        match parse_command(&line, params) {
            Ok(ControlCommand::Rate(rate)) => match clamp_rate(rate) {
                Some(applied) => {
                    controls.set_rate(rate);
                    println!("rate -> {}", params.rate.format_value(applied));
                }
                None => println!("rate unchanged"),
            },
            Ok(ControlCommand::Window(window)) => match clamp_window(window) {
                Some(applied) => {
                    controls.set_window(window);
                    println!(
                        "window -> {}",
                        params.window.format_value(f32::from(applied))
                    );
                }
                None => println!("window unchanged"),
            },
            Ok(ControlCommand::Show) => {
                let snapshot = controls.snapshot();
                let window = clamp_window(snapshot.window).unwrap_or(1);
                println!(
                    "rate {}, window {}, {} Hz",
                    params.rate.format_value(clamp_rate(snapshot.rate).unwrap_or(1.0)),
                    params.window.format_value(f32::from(window)),
                    snapshot.sample_rate
                );
            }
            Ok(ControlCommand::Help) => print_help(),
            Ok(ControlCommand::Quit) => {
                running.store(false, Ordering::SeqCst);
                break;
            }
            Err(msg) => println!("{}", msg),
        }
    }
    tracing::debug!("control input closed");
}

pub fn run(args: RealtimeArgs) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;
    let params = ControlParams::new()?;

    let config = StreamConfig {
        buffer_size: args.buffer_size,
        input_device: args.input_device,
        output_device: args.output_device,
    };
    let mut stream = AudioStream::new(config)?;

    // The effect runs at whatever rate the device gives us.
    let sample_rate = stream.sample_rate() as f32;
    let controls = Arc::new(SharedControls::new(settings.config(sample_rate)));
    let mut engine = settings
        .engine(sample_rate)
        .with_controls(Arc::clone(&controls));

    println!("Real-time downsampling");
    settings.describe(&engine);
    println!("  Sample rate: {} Hz", stream.sample_rate());
    println!("  Buffer size: {} samples", stream.buffer_size());
    println!("\nType 'help' for commands. Press Ctrl+C or type 'quit' to stop...\n");

    let running = stream.running_flag();
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    let control_running = Arc::clone(&running);
    let control_handle = Arc::clone(&controls);
    std::thread::Builder::new()
        .name("lofi-control".to_string())
        .spawn(move || control_loop(&control_handle, &params, &control_running))?;

    stream.run(move |input, output| {
        engine.process_block(input, output);
    })?;

    println!("Stopped.");
    Ok(())
}

//! Parameter listing command.

use clap::Args;
use lofi_core::{ConverterKind, Downsampler, ParamDescriptor, ParamFlags, ParamScale, ParameterInfo};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for one parameter (name or string ID)
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let ds = Downsampler::new(48000.0);

    if let Some(name) = &args.param {
        let desc = ds
            .find_param_by_name(name)
            .and_then(|i| ds.param_info(i))
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", name))?;
        print_detail(&desc);
        return Ok(());
    }

    println!("Downsampler Parameters");
    println!("======================");
    println!();
    println!(
        "  {:4}  {:10}  {:8}  {:12}  {:12}  {:12}  {}",
        "ID", "String ID", "Name", "Min", "Max", "Default", "Notes"
    );
    println!(
        "  {:4}  {:10}  {:8}  {:12}  {:12}  {:12}  {}",
        "--", "---------", "----", "---", "---", "-------", "-----"
    );

    for desc in (0..ds.param_count()).filter_map(|i| ds.param_info(i)) {
        println!(
            "  {:4}  {:10}  {:8}  {:12}  {:12}  {:12}  {}",
            desc.id.0,
            desc.string_id,
            desc.name,
            desc.format_value(desc.min),
            desc.format_value(desc.max),
            desc.format_value(desc.default),
            notes(&desc).join(", ")
        );
    }

    println!();
    println!("Converters:");
    for kind in ConverterKind::ALL {
        let default = if kind == ConverterKind::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {}{}", kind, default);
    }
    println!();
    println!("Example usage:");
    println!("  lofi process input.wav output.wav --rate 0.25");
    println!("  lofi process input.wav output.wav --preset telephone --converter decimator");

    Ok(())
}

fn notes(desc: &ParamDescriptor) -> Vec<&'static str> {
    let mut notes = Vec::new();
    if desc.scale == ParamScale::Logarithmic {
        notes.push("log");
    }
    if desc.flags.contains(ParamFlags::STEPPED) {
        notes.push("stepped");
    }
    if desc.flags.contains(ParamFlags::INERT) {
        notes.push("no audible effect");
    }
    notes
}

fn print_detail(desc: &ParamDescriptor) {
    println!("{}", desc.name);
    println!("{}", "=".repeat(desc.name.len()));
    println!();
    println!("  ID:        {} ({})", desc.id.0, desc.string_id);
    println!(
        "  Range:     {} to {}",
        desc.format_value(desc.min),
        desc.format_value(desc.max)
    );
    println!("  Default:   {}", desc.format_value(desc.default));
    println!("  Step:      {}", desc.step);
    let notes = notes(desc);
    if !notes.is_empty() {
        println!("  Notes:     {}", notes.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_flagged_inert() {
        let ds = Downsampler::new(48000.0);
        let window = ds
            .find_param_by_name("ds_window")
            .and_then(|i| ds.param_info(i))
            .unwrap();
        assert!(notes(&window).contains(&"no audible effect"));

        let rate = ds.param_info(0).unwrap();
        assert_eq!(notes(&rate), ["log"]);
    }

    #[test]
    fn rate_minimum_is_not_shown_as_zero() {
        let ds = Downsampler::new(48000.0);
        let rate = ds.param_info(0).unwrap();
        assert_eq!(rate.format_value(rate.min), "1.0000e-6x");
        assert_eq!(rate.format_value(rate.max), "1.0000x");
    }
}

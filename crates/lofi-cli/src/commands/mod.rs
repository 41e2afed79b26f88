//! CLI command implementations.

pub mod common;
pub mod devices;
pub mod generate;
pub mod params;
pub mod presets;
pub mod process;
pub mod realtime;

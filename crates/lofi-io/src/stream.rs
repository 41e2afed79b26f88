//! Real-time mono audio streaming via cpal.
//!
//! Input frames are averaged to mono, handed to the processing callback one
//! block at a time, and the mono result is copied to every output channel.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, Stream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;

/// Fallback when a device does not report a default config.
const FALLBACK_SAMPLE_RATE: u32 = 48000;

/// Input queued ahead of the output, in output blocks, before the oldest
/// samples are dropped.
const MAX_PENDING_BLOCKS: usize = 4;

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Whether the device supports audio input.
    pub is_input: bool,
    /// Whether the device supports audio output.
    pub is_output: bool,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
}

/// Stream configuration.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Requested buffer size in frames.
    pub buffer_size: u32,
    /// Input device name or index (uses default if `None`).
    pub input_device: Option<String>,
    /// Output device name or index (uses default if `None`).
    pub output_device: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            input_device: None,
            output_device: None,
        }
    }
}

fn input_rate(device: &Device) -> u32 {
    device
        .default_input_config()
        .map(|c| c.sample_rate())
        .unwrap_or(FALLBACK_SAMPLE_RATE)
}

fn output_rate(device: &Device) -> u32 {
    device
        .default_output_config()
        .map(|c| c.sample_rate())
        .unwrap_or(FALLBACK_SAMPLE_RATE)
}

/// List all available audio devices.
///
/// A device that supports both directions is listed once.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices: Vec<AudioDevice> = Vec::new();

    if let Ok(inputs) = host.input_devices() {
        for device in inputs {
            if let Ok(name) = device_name(&device) {
                devices.push(AudioDevice {
                    name,
                    is_input: true,
                    is_output: device.default_output_config().is_ok(),
                    default_sample_rate: input_rate(&device),
                });
            }
        }
    }

    if let Ok(outputs) = host.output_devices() {
        for device in outputs {
            let Ok(name) = device_name(&device) else {
                continue;
            };
            if devices.iter().any(|d| d.name == name) {
                continue;
            }
            devices.push(AudioDevice {
                name,
                is_input: false,
                is_output: true,
                default_sample_rate: output_rate(&device),
            });
        }
    }

    tracing::debug!(count = devices.len(), host = ?host.id(), "enumerated audio devices");
    Ok(devices)
}

/// Get the default input and output device info.
pub fn default_device() -> Result<(Option<AudioDevice>, Option<AudioDevice>)> {
    let host = cpal::default_host();

    let input = host.default_input_device().and_then(|d| {
        device_name(&d).ok().map(|name| AudioDevice {
            name,
            is_input: true,
            is_output: false,
            default_sample_rate: input_rate(&d),
        })
    });

    let output = host.default_output_device().and_then(|d| {
        device_name(&d).ok().map(|name| AudioDevice {
            name,
            is_input: false,
            is_output: true,
            default_sample_rate: output_rate(&d),
        })
    });

    Ok((input, output))
}

/// Real-time duplex mono stream.
pub struct AudioStream {
    input_device: Device,
    output_device: Device,
    config: StreamConfig,
    running: Arc<AtomicBool>,
    _input_stream: Option<Stream>,
    _output_stream: Option<Stream>,
}

impl AudioStream {
    /// Open the configured (or default) input and output devices.
    pub fn new(config: StreamConfig) -> Result<Self> {
        let host = cpal::default_host();

        let input_device = match &config.input_device {
            Some(name) => find_input_device(&host, name)?,
            None => host.default_input_device().ok_or(Error::NoDevice)?,
        };

        let output_device = match &config.output_device {
            Some(name) => find_output_device(&host, name)?,
            None => host.default_output_device().ok_or(Error::NoDevice)?,
        };

        tracing::info!(
            input = %device_name(&input_device).unwrap_or_default(),
            output = %device_name(&output_device).unwrap_or_default(),
            "opened audio devices"
        );

        Ok(Self {
            input_device,
            output_device,
            config,
            running: Arc::new(AtomicBool::new(false)),
            _input_stream: None,
            _output_stream: None,
        })
    }

    /// Sample rate the output device runs at; the effect must use this.
    pub fn sample_rate(&self) -> u32 {
        output_rate(&self.output_device)
    }

    /// Requested buffer size in frames.
    pub fn buffer_size(&self) -> u32 {
        self.config.buffer_size
    }

    /// Get the output device channel count.
    pub fn output_channels(&self) -> u16 {
        self.output_device
            .default_output_config()
            .map(|c| c.channels())
            .unwrap_or(2)
    }

    /// Flag that keeps [`run`](Self::run) blocking; store `false` to stop.
    ///
    /// Clone it into a Ctrl+C handler or control thread.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Run the stream with a mono processing callback.
    ///
    /// The callback receives one block of mono input and must fill the
    /// equally long mono output. This function blocks until the stream is
    /// stopped.
    pub fn run<F>(&mut self, mut process: F) -> Result<()>
    where
        F: FnMut(&[f32], &mut [f32]) + Send + 'static,
    {
        let input_config = self
            .input_device
            .default_input_config()
            .map_err(|e| Error::Stream(e.to_string()))?;

        let output_config = self
            .output_device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?;

        let input_channels = usize::from(input_config.channels()).max(1);
        let output_channels = usize::from(output_config.channels()).max(1);

        if input_config.sample_rate() != output_config.sample_rate() {
            tracing::warn!(
                input = input_config.sample_rate(),
                output = output_config.sample_rate(),
                "input and output sample rates differ; audio will drift"
            );
        }

        tracing::info!(
            sample_rate = output_config.sample_rate(),
            input_channels,
            output_channels,
            buffer_size = self.config.buffer_size,
            "starting audio stream"
        );

        // Mono blocks from the input callback to the output callback.
        let (tx, rx) = mpsc::sync_channel::<Vec<f32>>(4);

        self.running.store(true, Ordering::SeqCst);

        let input_running = Arc::clone(&self.running);
        let input_stream = self
            .input_device
            .build_input_stream(
                &input_config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if input_running.load(Ordering::SeqCst) {
                        let _ = tx.try_send(mix_to_mono(data, input_channels));
                    }
                },
                |err| tracing::error!(%err, "input stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        let output_running = Arc::clone(&self.running);
        let mut pending: Vec<f32> = Vec::new();
        let mut overflow_reported = false;
        let mut mono_in: Vec<f32> = Vec::new();
        let mut mono_out: Vec<f32> = Vec::new();
        let output_stream = self
            .output_device
            .build_output_stream(
                &output_config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !output_running.load(Ordering::SeqCst) {
                        data.fill(0.0);
                        return;
                    }

                    let frames = data.len() / output_channels;
                    let cap = frames.max(1) * MAX_PENDING_BLOCKS;
                    let mut dropped = 0;
                    while let Ok(block) = rx.try_recv() {
                        dropped += push_bounded(&mut pending, &block, cap);
                    }
                    if dropped > 0 && !overflow_reported {
                        overflow_reported = true;
                        tracing::warn!(
                            dropped,
                            "input is running ahead of output; dropping oldest samples"
                        );
                    }

                    if pending.len() < frames {
                        // Underrun: keep the effect's clock unchanged, emit silence.
                        data.fill(0.0);
                        return;
                    }

                    mono_in.clear();
                    mono_in.extend(pending.drain(..frames));
                    mono_out.resize(frames, 0.0);
                    process(&mono_in, &mut mono_out);
                    spread_to_channels(&mono_out, data, output_channels);
                },
                |err| tracing::error!(%err, "output stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        input_stream
            .play()
            .map_err(|e| Error::Stream(e.to_string()))?;
        output_stream
            .play()
            .map_err(|e| Error::Stream(e.to_string()))?;

        self._input_stream = Some(input_stream);
        self._output_stream = Some(output_stream);

        while self.running.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(100));
        }

        tracing::info!("audio stream stopped");
        Ok(())
    }
}

/// Average interleaved frames to one channel.
fn mix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Append `block` to `pending`, then drop the oldest samples beyond `cap`.
///
/// Returns how many samples were dropped.
fn push_bounded(pending: &mut Vec<f32>, block: &[f32], cap: usize) -> usize {
    pending.extend_from_slice(block);
    let excess = pending.len().saturating_sub(cap);
    if excess > 0 {
        pending.drain(..excess);
    }
    excess
}

/// Copy each mono sample to every channel of an interleaved buffer.
fn spread_to_channels(mono: &[f32], output: &mut [f32], channels: usize) {
    for (frame, &sample) in output.chunks_exact_mut(channels).zip(mono) {
        frame.fill(sample);
    }
}

fn find_input_device(host: &Host, name_or_index: &str) -> Result<Device> {
    let devices: Vec<_> = host
        .input_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();

    find_device_from_list(&devices, name_or_index, "input")
}

fn find_output_device(host: &Host, name_or_index: &str) -> Result<Device> {
    let devices: Vec<_> = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();

    find_device_from_list(&devices, name_or_index, "output")
}

/// Find a device by index, exact name, or case-insensitive partial name.
fn find_device_from_list(devices: &[Device], name_or_index: &str, kind: &str) -> Result<Device> {
    if let Ok(index) = name_or_index.parse::<usize>() {
        return devices.get(index).cloned().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "{kind} device index {index} (only {} devices available)",
                devices.len()
            ))
        });
    }

    let names: Vec<Option<String>> = devices.iter().map(|d| device_name(d).ok()).collect();
    let pick = |i: usize| Ok(devices[i].clone());

    if let Some(i) = names
        .iter()
        .position(|n| n.as_deref() == Some(name_or_index))
    {
        return pick(i);
    }

    let search = name_or_index.to_lowercase();
    let matches = matching_indices(&names, &search);
    match matches.as_slice() {
        [] => Err(Error::DeviceNotFound(format!(
            "no {kind} device matching '{name_or_index}'"
        ))),
        [only] => pick(*only),
        [first, ..] => {
            tracing::warn!(
                query = name_or_index,
                kind,
                count = matches.len(),
                chosen = names[*first].as_deref().unwrap_or_default(),
                "ambiguous device name, using first match"
            );
            pick(*first)
        }
    }
}

fn matching_indices(names: &[Option<String>], search_lower: &str) -> Vec<usize> {
    names
        .iter()
        .enumerate()
        .filter(|(_, n)| {
            n.as_deref()
                .is_some_and(|n| n.to_lowercase().contains(search_lower))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_to_mono() {
        assert_eq!(mix_to_mono(&[1.0, 0.0, 0.5, 0.5], 2), vec![0.5, 0.5]);
        assert_eq!(mix_to_mono(&[0.1, 0.2], 1), vec![0.1, 0.2]);
    }

    #[test]
    fn test_spread_to_channels() {
        let mut out = [0.0; 6];
        spread_to_channels(&[0.25, -0.5, 1.0], &mut out, 2);
        assert_eq!(out, [0.25, 0.25, -0.5, -0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_push_bounded_drops_oldest() {
        let mut pending = vec![1.0, 2.0, 3.0];
        assert_eq!(push_bounded(&mut pending, &[4.0, 5.0], 4), 1);
        assert_eq!(pending, [2.0, 3.0, 4.0, 5.0]);
        assert_eq!(push_bounded(&mut pending, &[], 4), 0);
        assert_eq!(pending.len(), 4);
    }

    #[test]
    fn test_pending_stays_bounded_when_input_outpaces_output() {
        // 48 kHz in, 44.1 kHz out: 480 samples arrive per 441 consumed.
        let frames = 441;
        let cap = frames * MAX_PENDING_BLOCKS;
        let mut pending = Vec::new();
        let mut dropped = 0;
        for _ in 0..1000 {
            dropped += push_bounded(&mut pending, &[0.5; 480], cap);
            assert!(pending.len() <= cap);
            if pending.len() >= frames {
                pending.drain(..frames);
            }
        }
        assert!(dropped > 0);
        assert!(pending.len() < cap);
    }

    #[test]
    fn test_matching_indices_is_case_insensitive() {
        let names = vec![
            Some("Built-in Output".to_string()),
            None,
            Some("USB Audio CODEC".to_string()),
            Some("usb headset".to_string()),
        ];
        assert_eq!(matching_indices(&names, "usb"), vec![2, 3]);
        assert_eq!(matching_indices(&names, "built"), vec![0]);
        assert!(matching_indices(&names, "hdmi").is_empty());
    }

    #[test]
    fn test_list_devices() {
        // Device availability depends on the system; this only checks the call succeeds.
        assert!(list_devices().is_ok());
    }
}

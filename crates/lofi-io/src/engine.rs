//! Block processing engine around a [`Downsampler`].

use std::sync::Arc;

use lofi_core::{
    AnyConverter, ControlWatcher, ConverterKind, Downsampler, DownsamplerConfig, Effect,
    SharedControls,
};

/// Processing engine that runs one downsampler over blocks of audio.
///
/// When [`SharedControls`] are attached, pending control changes are applied
/// once at the top of every block, so a block never sees half an update.
///
/// The engine is `Send` so it can move into an audio callback.
pub struct ProcessingEngine {
    downsampler: Downsampler<AnyConverter>,
    controls: Option<Arc<SharedControls>>,
    watcher: ControlWatcher,
}

impl ProcessingEngine {
    /// Create an engine at unity rate with the default converter.
    pub fn new(sample_rate: f32) -> Self {
        Self::from_config(
            DownsamplerConfig {
                sample_rate,
                ..DownsamplerConfig::default()
            },
            ConverterKind::default(),
        )
    }

    /// Create an engine from a configuration and converter choice.
    pub fn from_config(config: DownsamplerConfig, converter: ConverterKind) -> Self {
        let converter = AnyConverter::new(converter, f64::from(config.rate));
        Self {
            downsampler: Downsampler::from_config_with(config, converter),
            controls: None,
            watcher: ControlWatcher::new(),
        }
    }

    /// Attach shared controls; they take effect at the next block.
    pub fn with_controls(mut self, controls: Arc<SharedControls>) -> Self {
        self.controls = Some(controls);
        self.watcher = ControlWatcher::new();
        self
    }

    /// The attached shared controls, if any.
    pub fn controls(&self) -> Option<&Arc<SharedControls>> {
        self.controls.as_ref()
    }

    /// The wrapped downsampler.
    pub fn downsampler(&self) -> &Downsampler<AnyConverter> {
        &self.downsampler
    }

    /// Get the sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.downsampler.sample_rate()
    }

    /// Set the native sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.downsampler.set_sample_rate(sample_rate);
    }

    /// Get the total latency in samples.
    pub fn latency_samples(&self) -> usize {
        self.downsampler.latency_samples()
    }

    /// Reset processing state; parameters are kept.
    pub fn reset(&mut self) {
        self.downsampler.reset();
    }

    /// Apply pending control changes. Returns `true` if anything was applied.
    pub fn sync_controls(&mut self) -> bool {
        match &self.controls {
            Some(controls) => self.watcher.apply_if_changed(controls, &mut self.downsampler),
            None => false,
        }
    }

    /// Process a block of samples.
    ///
    /// Output buffer must be at least as large as input.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert!(output.len() >= input.len());
        self.sync_controls();
        self.downsampler.process_block(input, &mut output[..input.len()]);
    }

    /// Process a block of samples in-place.
    pub fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        self.sync_controls();
        self.downsampler.process_block_inplace(buffer);
    }

    /// Process an entire file's worth of samples in blocks.
    ///
    /// Returns a new vector with exactly one output per input. A block size
    /// of zero is treated as one.
    pub fn process_file(&mut self, input: &[f32], block_size: usize) -> Vec<f32> {
        self.process_file_with_progress(input, block_size, |_| {})
    }

    /// Like [`process_file`](Self::process_file), calling `on_block` with the
    /// number of samples finished after every block.
    pub fn process_file_with_progress<F>(
        &mut self,
        input: &[f32],
        block_size: usize,
        mut on_block: F,
    ) -> Vec<f32>
    where
        F: FnMut(usize),
    {
        let block_size = block_size.max(1);
        let mut output = vec![0.0; input.len()];

        for (in_chunk, out_chunk) in input.chunks(block_size).zip(output.chunks_mut(block_size)) {
            self.process_block(in_chunk, out_chunk);
            on_block(in_chunk.len());
        }

        output
    }
}

impl Default for ProcessingEngine {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

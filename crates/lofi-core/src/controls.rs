//! Lock-free parameter handoff from a control thread to the audio thread.
//!
//! The control side writes values at any time through [`SharedControls`].
//! The audio side owns a [`ControlWatcher`] and polls it once at the top of
//! each block. Each write bumps a generation counter, so the poll is a
//! single atomic load when nothing changed.
//!
//! f32 values are stored as their bit patterns in `AtomicU32`.
//!
//! ```rust
//! use lofi_core::{ControlWatcher, Downsampler, DownsamplerConfig, SharedControls};
//!
//! let controls = SharedControls::new(DownsamplerConfig::default());
//! let mut watcher = ControlWatcher::new();
//! let mut ds = Downsampler::new(48000.0);
//!
//! controls.set_rate(0.25);
//!
//! // audio thread, top of block
//! if let Some(snapshot) = watcher.poll(&controls) {
//!     ds.apply_controls(snapshot);
//! }
//! assert_eq!(ds.rate(), 0.25);
//! assert!(watcher.poll(&controls).is_none());
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use crate::downsampler::{Downsampler, DownsamplerConfig};
use crate::resampler::RateConverter;

/// Parameter values shared between threads.
#[derive(Debug)]
pub struct SharedControls {
    rate: AtomicU32,
    window: AtomicU32,
    sample_rate: AtomicU32,
    generation: AtomicU32,
}

impl SharedControls {
    /// Create controls holding the config's values.
    pub fn new(config: DownsamplerConfig) -> Self {
        Self {
            rate: AtomicU32::new(config.rate.to_bits()),
            window: AtomicU32::new(config.window.to_bits()),
            sample_rate: AtomicU32::new(config.sample_rate.to_bits()),
            generation: AtomicU32::new(0),
        }
    }

    /// Request a new rate. Clamping happens when the audio side applies it.
    pub fn set_rate(&self, rate: f32) {
        self.rate.store(rate.to_bits(), Ordering::Relaxed);
        self.publish();
    }

    /// Request a new window size.
    pub fn set_window(&self, window: f32) {
        self.window.store(window.to_bits(), Ordering::Relaxed);
        self.publish();
    }

    /// Request a new native sample rate.
    pub fn set_sample_rate(&self, sample_rate: f32) {
        self.sample_rate.store(sample_rate.to_bits(), Ordering::Relaxed);
        self.publish();
    }

    /// Number of writes so far (wrapping).
    pub fn generation(&self) -> u32 {
        self.generation.load(Ordering::Acquire)
    }

    /// Current values, regardless of generation.
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            rate: f32::from_bits(self.rate.load(Ordering::Relaxed)),
            window: f32::from_bits(self.window.load(Ordering::Relaxed)),
            sample_rate: f32::from_bits(self.sample_rate.load(Ordering::Relaxed)),
        }
    }

    #[inline]
    fn publish(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl Default for SharedControls {
    fn default() -> Self {
        Self::new(DownsamplerConfig::default())
    }
}

/// Values read from [`SharedControls`] in one poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSnapshot {
    /// Requested rate.
    pub rate: f32,
    /// Requested window size.
    pub window: f32,
    /// Requested native sample rate.
    pub sample_rate: f32,
}

/// Audio-side generation tracker.
#[derive(Debug, Clone)]
pub struct ControlWatcher {
    seen: u32,
}

impl ControlWatcher {
    /// A fresh watcher reports on its first poll.
    pub fn new() -> Self {
        Self { seen: u32::MAX }
    }

    /// Return a snapshot if anything was written since the last poll.
    #[inline]
    pub fn poll(&mut self, controls: &SharedControls) -> Option<ControlSnapshot> {
        let generation = controls.generation();
        if generation == self.seen {
            return None;
        }
        self.seen = generation;
        Some(controls.snapshot())
    }

    /// Poll and, if anything changed, apply the snapshot to `ds`.
    ///
    /// Returns `true` when a snapshot was applied.
    #[inline]
    pub fn apply_if_changed<C: RateConverter>(
        &mut self,
        controls: &SharedControls,
        ds: &mut Downsampler<C>,
    ) -> bool {
        match self.poll(controls) {
            Some(snapshot) => {
                ds.apply_controls(snapshot);
                true
            }
            None => false,
        }
    }
}

impl Default for ControlWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: RateConverter> Downsampler<C> {
    /// Apply a control snapshot. Setters run only for values that differ
    /// from the current state.
    pub fn apply_controls(&mut self, snapshot: ControlSnapshot) {
        use crate::effect::Effect;

        if snapshot.sample_rate != self.sample_rate() {
            self.set_sample_rate(snapshot.sample_rate);
        }
        if snapshot.rate != self.rate() {
            self.set_rate(snapshot.rate);
        }
        if snapshot.window != f32::from(self.window()) {
            self.set_window(snapshot.window);
        }
    }
}

//! Core Effect trait.
//!
//! The [`Effect`] trait is the processing contract every audio unit in lofi
//! satisfies: one sample in, one sample out, with block helpers layered on top.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: Single `f32` input/output. The downsampler holds
//!   one channel of history; run one instance per channel.
//!
//! - **Object-safe**: `dyn Effect` works, which lets the I/O engine hold a
//!   boxed effect while tests use concrete types.
//!
//! - **No allocations**: All methods are callable from a real-time audio
//!   callback.

/// Core trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use lofi_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// assert_eq!(gain.process(1.0), 0.5);
/// ```
pub trait Effect {
    /// Process a single sample.
    ///
    /// Stateful effects advance their state by exactly one sample (one tick).
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample, so block
    /// boundaries carry no meaning for per-sample effects.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in-place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate.
    ///
    /// Called at setup and whenever the host's operating rate changes.
    /// Effects recalculate anything derived from it.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state.
    ///
    /// Clears history without changing parameters.
    fn reset(&mut self);

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}

impl<E: Effect + ?Sized> Effect for alloc::boxed::Box<E> {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        (**self).process(input)
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        (**self).process_block(input, output);
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        (**self).process_block_inplace(buffer);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        (**self).set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn latency_samples(&self) -> usize {
        (**self).latency_samples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;

    struct Gain(f32);

    impl Effect for Gain {
        fn process(&mut self, input: f32) -> f32 {
            input * self.0
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    struct Counter(u32);

    impl Effect for Counter {
        fn process(&mut self, _input: f32) -> f32 {
            self.0 += 1;
            self.0 as f32
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {
            self.0 = 0;
        }
        fn latency_samples(&self) -> usize {
            3
        }
    }

    #[test]
    fn test_default_block_matches_per_sample() {
        let mut gain = Gain(2.0);
        let input = [1.0, 2.0, 3.0];
        let mut output = [0.0; 3];
        gain.process_block(&input, &mut output);
        assert_eq!(output, [2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_block_inplace_advances_state_per_sample() {
        let mut counter = Counter(0);
        let mut buf = [0.0; 4];
        counter.process_block_inplace(&mut buf);
        assert_eq!(buf, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_boxed_effect_forwards() {
        let mut boxed: Box<dyn Effect> = Box::new(Counter(0));
        assert_eq!(boxed.process(0.0), 1.0);
        assert_eq!(boxed.latency_samples(), 3);
        boxed.reset();
        assert_eq!(boxed.process(0.0), 1.0);
    }
}
